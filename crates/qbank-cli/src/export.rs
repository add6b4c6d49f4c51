//! Canonical CSV export.
//!
//! Quality columns are never written: they are recomputed on demand.

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, SerWriter};

use qbank_core::to_dataframe;
use qbank_model::{CanonicalFrame, ContentKind, Level, SubmissionMetadata};

/// Default output file name: `{stem}_parsed_qa.csv` or
/// `{stem}_parsed_ex_{ug|grad}.csv`.
pub fn parsed_file_name(metadata: &SubmissionMetadata) -> String {
    let stem = Path::new(&metadata.filename)
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("submission");
    match metadata.kind {
        ContentKind::Qa => format!("{stem}_parsed_qa.csv"),
        ContentKind::Exercise => {
            let level = metadata.level.unwrap_or(Level::Undergraduate);
            format!("{stem}_parsed_ex_{}.csv", level.code())
        }
    }
}

/// Resolves where the export goes: an explicit file, a file inside an
/// existing directory, or the default name in the current directory.
pub fn output_path(requested: Option<&Path>, metadata: &SubmissionMetadata) -> PathBuf {
    match requested {
        Some(path) if path.is_dir() => path.join(parsed_file_name(metadata)),
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(parsed_file_name(metadata)),
    }
}

/// Writes the canonical columns as UTF-8 CSV with a header row.
pub fn write_canonical_csv(frame: &CanonicalFrame, path: &Path) -> Result<()> {
    let mut df = to_dataframe(frame, None).context("build export frame")?;
    let mut file =
        File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(&mut df)
        .with_context(|| format!("write {}", path.display()))?;
    Ok(())
}
