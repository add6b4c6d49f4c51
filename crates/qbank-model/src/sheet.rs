//! Decoded input tables.

use serde::{Deserialize, Serialize};

/// One sheet of a submission: a header row plus string-valued rows.
///
/// Headers are trimmed, stripped of byte-order marks and have internal
/// whitespace collapsed. Cells are trimmed. Every row has exactly
/// `headers.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSheet {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawSheet {
    pub fn new(
        name: impl Into<String>,
        headers: impl IntoIterator<Item = impl AsRef<str>>,
        rows: impl IntoIterator<Item = Vec<String>>,
    ) -> Self {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| normalize_header(h.as_ref()))
            .collect();
        let width = headers.len();
        let rows = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<String> =
                    row.iter().take(width).map(|c| normalize_cell(c)).collect();
                cells.resize(width, String::new());
                cells
            })
            .filter(|cells| cells.iter().any(|c| !c.is_empty()))
            .collect();
        Self {
            name: name.into(),
            headers,
            rows,
        }
    }

    /// Convenience constructor from string literals, mostly for tests and callers
    /// that assemble sheets by hand.
    pub fn from_rows(name: &str, headers: &[&str], rows: &[&[&str]]) -> Self {
        Self::new(
            name,
            headers.iter().copied(),
            rows.iter()
                .map(|row| row.iter().map(|c| (*c).to_string()).collect()),
        )
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Index of a header by exact (normalized) name.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    /// Cell text at (row, column); empty for out-of-range access.
    pub fn cell(&self, row: usize, column: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(String::as_str)
            .unwrap_or("")
    }

    /// True when every cell of the column is blank (or the sheet has no rows).
    pub fn is_column_blank(&self, column: usize) -> bool {
        self.rows
            .iter()
            .all(|row| row.get(column).is_none_or(|c| is_blank_cell(c)))
    }
}

/// A decoded submission: sheets in workbook order plus source identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetSet {
    pub filename: String,
    pub sheets: Vec<RawSheet>,
    /// Hex SHA-256 of the source bytes, when read from a file.
    pub digest: Option<String>,
}

impl SheetSet {
    pub fn new(filename: impl Into<String>, sheets: Vec<RawSheet>) -> Self {
        Self {
            filename: filename.into(),
            sheets,
            digest: None,
        }
    }

    pub fn with_digest(mut self, digest: impl Into<String>) -> Self {
        self.digest = Some(digest.into());
        self
    }

    pub fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|s| s.name.clone()).collect()
    }
}

/// Whether a cell carries no value.
///
/// Spreadsheet exports frequently spell missing values as `nan`/`None`.
pub fn is_blank_cell(value: &str) -> bool {
    let trimmed = value.trim();
    trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("nan")
        || trimmed.eq_ignore_ascii_case("none")
        || trimmed.eq_ignore_ascii_case("null")
}

fn normalize_header(raw: &str) -> String {
    raw.trim()
        .trim_matches('\u{feff}')
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_pads_short_rows_and_drops_blank_ones() {
        let sheet = RawSheet::new(
            "S",
            ["\u{feff}stem ", "answer"],
            vec![
                vec!["q1".to_string()],
                vec![" ".to_string(), String::new()],
                vec!["q2".to_string(), " a2 ".to_string(), "extra".to_string()],
            ],
        );
        assert_eq!(sheet.headers, vec!["stem", "answer"]);
        assert_eq!(sheet.height(), 2);
        assert_eq!(sheet.rows[0], vec!["q1", ""]);
        assert_eq!(sheet.rows[1], vec!["q2", "a2"]);
    }

    #[test]
    fn header_whitespace_is_collapsed() {
        let sheet = RawSheet::from_rows("S", &["Correct   Answer"], &[]);
        assert_eq!(sheet.headers, vec!["Correct Answer"]);
    }

    #[test]
    fn blank_cells_include_nan_spellings() {
        assert!(is_blank_cell(""));
        assert!(is_blank_cell(" nan "));
        assert!(is_blank_cell("NaN"));
        assert!(is_blank_cell("None"));
        assert!(!is_blank_cell("0"));
    }

    #[test]
    fn column_blank_detection() {
        let sheet = RawSheet::from_rows("S", &["a", "b"], &[&["x", ""], &["y", "nan"]]);
        assert!(!sheet.is_column_blank(0));
        assert!(sheet.is_column_blank(1));
        assert_eq!(sheet.cell(5, 0), "");
    }
}
