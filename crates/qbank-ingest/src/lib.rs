//! Reading question-bank submissions into raw sheets.
//!
//! CSV files become a single sheet named `CSV`; workbooks keep every sheet in
//! workbook order. Anything else is a structural error.

pub mod csv_table;
pub mod error;
pub mod reader;
pub mod workbook;

pub use csv_table::{CSV_SHEET_NAME, TextEncoding, decode_text, parse_csv_sheet};
pub use error::{IngestError, Result};
pub use reader::{SourceFormat, read_submission, read_submission_bytes, sha256_hex};
pub use workbook::{WORKBOOK_EXTENSIONS, cell_to_string, read_workbook_bytes};
