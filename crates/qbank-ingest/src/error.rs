//! Error types for submission reading.

use std::path::PathBuf;
use thiserror::Error;

/// Structural failures that prevent a submission from being read at all.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// Submission file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Format Errors ===
    /// Extension is neither CSV nor a supported workbook format.
    #[error("不支持的文件类型: {filename}")]
    UnsupportedFormat { filename: String },

    /// File contains no bytes or no non-blank rows.
    #[error("file is empty: {filename}")]
    EmptyFile { filename: String },

    /// Text is neither valid UTF-8 nor valid GB18030.
    #[error("could not decode {filename} as UTF-8 or GB18030")]
    Undecodable { filename: String },

    // === Parsing Errors ===
    /// Malformed CSV.
    #[error("failed to parse CSV {filename}: {message}")]
    CsvParse { filename: String, message: String },

    /// Workbook could not be opened.
    #[error("failed to open workbook {filename}: {message}")]
    Workbook { filename: String, message: String },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::FileNotFound {
            path: PathBuf::from("/path/to/bank.xlsx"),
        };
        assert_eq!(err.to_string(), "file not found: /path/to/bank.xlsx");

        let err = IngestError::UnsupportedFormat {
            filename: "bank.pdf".to_string(),
        };
        assert_eq!(err.to_string(), "不支持的文件类型: bank.pdf");
    }
}
