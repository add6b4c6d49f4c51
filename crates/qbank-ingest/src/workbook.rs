//! Spreadsheet workbook reading via calamine.

use std::io::{Cursor, Read, Seek};

use calamine::{Data, Reader, Sheets, open_workbook_auto_from_rs};
use qbank_model::RawSheet;

use crate::error::{IngestError, Result};

/// Extensions read as workbooks (lower-case, without the dot).
pub const WORKBOOK_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Reads every sheet of an in-memory workbook, in workbook order.
///
/// The first row of each sheet is its header row. A sheet whose range cannot
/// be read is logged and skipped; an empty sheet is kept with no headers so
/// its name still reaches detection.
pub fn read_workbook_bytes(filename: &str, bytes: &[u8]) -> Result<Vec<RawSheet>> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook =
        open_workbook_auto_from_rs(cursor).map_err(|e| IngestError::Workbook {
            filename: filename.to_string(),
            message: e.to_string(),
        })?;
    Ok(read_sheets(filename, &mut workbook))
}

fn read_sheets<RS>(filename: &str, workbook: &mut Sheets<RS>) -> Vec<RawSheet>
where
    RS: Read + Seek,
{
    let sheet_names = workbook.sheet_names().to_vec();
    let mut sheets = Vec::with_capacity(sheet_names.len());
    for name in sheet_names {
        let range = match workbook.worksheet_range(&name) {
            Ok(range) => range,
            Err(error) => {
                tracing::warn!(filename, sheet = %name, %error, "skipping unreadable sheet");
                continue;
            }
        };
        let mut rows = range
            .rows()
            .map(|row| row.iter().map(cell_to_string).collect::<Vec<String>>())
            .filter(|row| row.iter().any(|value| !value.trim().is_empty()));
        let headers = rows.next().unwrap_or_default();
        tracing::debug!(filename, sheet = %name, columns = headers.len(), "read sheet");
        sheets.push(RawSheet::new(name, headers, rows));
    }
    sheets
}

/// Renders a workbook cell as text. Whole floats drop the fractional part so
/// numeric answers like `5` do not become `5.0`.
pub fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{f:.0}")
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{e:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_floats_render_without_fraction() {
        assert_eq!(cell_to_string(&Data::Float(5.0)), "5");
        assert_eq!(cell_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(cell_to_string(&Data::Int(12)), "12");
        assert_eq!(cell_to_string(&Data::Empty), "");
    }

    #[test]
    fn booleans_render_as_judgement_keywords() {
        assert_eq!(cell_to_string(&Data::Bool(true)), "TRUE");
        assert_eq!(cell_to_string(&Data::Bool(false)), "FALSE");
    }

    #[test]
    fn garbage_bytes_are_a_workbook_error() {
        let err = read_workbook_bytes("bank.xlsx", b"not a workbook").unwrap_err();
        assert!(matches!(err, IngestError::Workbook { .. }));
    }
}
