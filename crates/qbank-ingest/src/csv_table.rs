//! CSV decoding.
//!
//! Submissions exported from Chinese-locale spreadsheet tools are often
//! GB18030 rather than UTF-8, so text is decoded as UTF-8 first and retried
//! as GB18030 before giving up.

use std::fmt;

use csv::ReaderBuilder;
use qbank_model::RawSheet;

use crate::error::{IngestError, Result};

/// Name given to the single sheet produced from a CSV file.
pub const CSV_SHEET_NAME: &str = "CSV";

/// Encoding a text submission was decoded with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
    Gb18030,
}

impl fmt::Display for TextEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextEncoding::Utf8 => f.write_str("UTF-8"),
            TextEncoding::Gb18030 => f.write_str("GB18030"),
        }
    }
}

/// Decodes raw bytes as UTF-8, falling back to GB18030.
pub fn decode_text(filename: &str, bytes: &[u8]) -> Result<(String, TextEncoding)> {
    if let Ok(text) = std::str::from_utf8(bytes) {
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);
        return Ok((text.to_string(), TextEncoding::Utf8));
    }
    let (decoded, _, had_errors) = encoding_rs::GB18030.decode(bytes);
    if had_errors {
        return Err(IngestError::Undecodable {
            filename: filename.to_string(),
        });
    }
    tracing::debug!(filename, "decoded as GB18030");
    Ok((decoded.into_owned(), TextEncoding::Gb18030))
}

/// Parses CSV text into a single sheet. The first non-blank record is the
/// header row; ragged rows are padded or truncated to the header width.
pub fn parse_csv_sheet(filename: &str, text: &str) -> Result<RawSheet> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| IngestError::CsvParse {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;
        let row: Vec<String> = record.iter().map(str::to_string).collect();
        if row.iter().all(|value| value.trim().is_empty()) {
            continue;
        }
        records.push(row);
    }
    let mut records = records.into_iter();
    let Some(headers) = records.next() else {
        return Err(IngestError::EmptyFile {
            filename: filename.to_string(),
        });
    };
    Ok(RawSheet::new(CSV_SHEET_NAME, headers, records))
}
