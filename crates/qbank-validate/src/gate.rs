//! Acceptance gate applied before a submission is stored.

use std::fmt;

use serde::{Deserialize, Serialize};

use qbank_model::SubmissionMetadata;

/// Default maximum share of rows carrying an Error flag.
pub const DEFAULT_ERROR_RATIO_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GatePolicy {
    pub error_ratio_threshold: f64,
    pub block_on_kind_mismatch: bool,
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self {
            error_ratio_threshold: DEFAULT_ERROR_RATIO_THRESHOLD,
            block_on_kind_mismatch: true,
        }
    }
}

/// Why a submission was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GateReason {
    /// The declared kind disagrees with detection. Forcing does not help.
    KindMismatch,
    /// Too many rows carry Error flags.
    ErrorRatio { ratio: f64, threshold: f64 },
}

impl fmt::Display for GateReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GateReason::KindMismatch => f.write_str(
                "类型选择与系统识别不一致：请检查文件结构或更正上传类型。已禁用入库与强制入库。",
            ),
            GateReason::ErrorRatio { ratio, .. } => write!(
                f,
                "质量错误占比 {:.2}% 超过阈值，建议修复后再入库",
                ratio * 100.0
            ),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GateDecision {
    pub accepted: bool,
    pub reasons: Vec<GateReason>,
}

impl GateDecision {
    pub fn is_blocked_by_mismatch(&self) -> bool {
        self.reasons.contains(&GateReason::KindMismatch)
    }
}

/// Decides whether a processed submission may be stored.
///
/// A missing quality summary (empty frame) counts as a zero error ratio.
/// `force` waives the error-ratio check only.
pub fn evaluate_gate(metadata: &SubmissionMetadata, policy: &GatePolicy, force: bool) -> GateDecision {
    let mut reasons = Vec::new();
    if policy.block_on_kind_mismatch && metadata.kind_mismatch() {
        reasons.push(GateReason::KindMismatch);
    }
    let ratio = metadata
        .quality_summary
        .as_ref()
        .map_or(0.0, |summary| summary.error_row_ratio);
    if !force && ratio > policy.error_ratio_threshold {
        reasons.push(GateReason::ErrorRatio {
            ratio,
            threshold: policy.error_ratio_threshold,
        });
    }
    GateDecision {
        accepted: reasons.is_empty(),
        reasons,
    }
}
