//! Optional TOML configuration file.
//!
//! ```toml
//! [quality]
//! error_ratio_threshold = 0.05
//! garbled_check = false
//!
//! [logging]
//! format = "compact"
//! file = "qbank.log"
//! ```
//!
//! Command-line flags take precedence over file values.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use qbank_validate::{DEFAULT_ERROR_RATIO_THRESHOLD, GatePolicy};

use crate::logging::LogFormat;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QbankConfig {
    pub quality: QualityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Maximum share of rows with Error flags accepted by `ingest`.
    pub error_ratio_threshold: f64,
    /// Enable the garbled-text rules.
    pub garbled_check: bool,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            error_ratio_threshold: DEFAULT_ERROR_RATIO_THRESHOLD,
            garbled_check: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub format: Option<LogFormat>,
    pub file: Option<PathBuf>,
}

impl QbankConfig {
    /// Gate policy with an optional threshold override from the command line.
    pub fn gate_policy(&self, threshold: Option<f64>) -> GatePolicy {
        GatePolicy {
            error_ratio_threshold: threshold.unwrap_or(self.quality.error_ratio_threshold),
            ..GatePolicy::default()
        }
    }
}

/// Reads a configuration file.
pub fn load_config(path: &Path) -> Result<QbankConfig> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("parse config {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_tables_use_defaults() {
        let config: QbankConfig = toml::from_str("").unwrap();
        assert_eq!(config, QbankConfig::default());
        assert_eq!(config.quality.error_ratio_threshold, 0.05);
    }

    #[test]
    fn partial_tables_merge_with_defaults() {
        let config: QbankConfig = toml::from_str(
            r#"
            [quality]
            garbled_check = true

            [logging]
            format = "json"
            "#,
        )
        .unwrap();
        assert!(config.quality.garbled_check);
        assert_eq!(config.quality.error_ratio_threshold, 0.05);
        assert_eq!(config.logging.format, Some(LogFormat::Json));
        assert_eq!(config.logging.file, None);
    }

    #[test]
    fn flag_threshold_overrides_file() {
        let config = QbankConfig {
            quality: QualityConfig {
                error_ratio_threshold: 0.2,
                garbled_check: false,
            },
            ..QbankConfig::default()
        };
        assert_eq!(config.gate_policy(None).error_ratio_threshold, 0.2);
        assert_eq!(config.gate_policy(Some(0.0)).error_ratio_threshold, 0.0);
        assert!(config.gate_policy(None).block_on_kind_mismatch);
    }
}
