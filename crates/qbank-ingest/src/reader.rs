//! Submission reading: extension dispatch and source digest.

use std::path::Path;

use qbank_model::{RawSheet, SheetSet};
use sha2::{Digest, Sha256};

use crate::csv_table::{decode_text, parse_csv_sheet};
use crate::error::{IngestError, Result};
use crate::workbook::{WORKBOOK_EXTENSIONS, read_workbook_bytes};

/// How a submission file is decoded, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Csv,
    Workbook,
}

impl SourceFormat {
    /// Classifies a filename by its extension (case-insensitive).
    pub fn from_filename(filename: &str) -> Result<Self> {
        let extension = Path::new(filename)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        if extension == "csv" {
            Ok(SourceFormat::Csv)
        } else if WORKBOOK_EXTENSIONS.contains(&extension.as_str()) {
            Ok(SourceFormat::Workbook)
        } else {
            Err(IngestError::UnsupportedFormat {
                filename: filename.to_string(),
            })
        }
    }
}

/// Reads a submission file from disk.
pub fn read_submission(path: &Path) -> Result<SheetSet> {
    let bytes = std::fs::read(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            IngestError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            IngestError::FileRead {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    read_submission_bytes(&filename, &bytes)
}

/// Reads an in-memory submission; `filename` selects the decoder.
pub fn read_submission_bytes(filename: &str, bytes: &[u8]) -> Result<SheetSet> {
    let format = SourceFormat::from_filename(filename)?;
    if bytes.is_empty() {
        return Err(IngestError::EmptyFile {
            filename: filename.to_string(),
        });
    }
    let sheets = match format {
        SourceFormat::Csv => {
            let (text, encoding) = decode_text(filename, bytes)?;
            tracing::debug!(filename, %encoding, "decoded CSV");
            vec![parse_csv_sheet(filename, &text)?]
        }
        SourceFormat::Workbook => read_workbook_bytes(filename, bytes)?,
    };
    tracing::info!(
        filename,
        sheets = sheets.len(),
        rows = sheets.iter().map(RawSheet::height).sum::<usize>(),
        "read submission"
    );
    Ok(SheetSet::new(filename, sheets).with_digest(sha256_hex(bytes)))
}

/// Hex-encoded SHA-256 of the source bytes.
pub fn sha256_hex(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_dispatch_is_case_insensitive() {
        assert_eq!(
            SourceFormat::from_filename("题库.CSV").unwrap(),
            SourceFormat::Csv
        );
        assert_eq!(
            SourceFormat::from_filename("bank.xlsx").unwrap(),
            SourceFormat::Workbook
        );
        assert_eq!(
            SourceFormat::from_filename("bank.xls").unwrap(),
            SourceFormat::Workbook
        );
    }

    #[test]
    fn unknown_extension_is_rejected() {
        for name in ["bank.pdf", "bank", "bank.docx"] {
            assert!(matches!(
                SourceFormat::from_filename(name),
                Err(IngestError::UnsupportedFormat { .. })
            ));
        }
    }

    #[test]
    fn digest_is_stable() {
        assert_eq!(
            sha256_hex(b"abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }
}
