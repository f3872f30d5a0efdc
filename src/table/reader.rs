//! Delimited score sheet reader
//!
//! The sheet is a plain delimited file: the header line decides both the
//! delimiter and the column set. There is no quoting, so a delimiter inside a
//! value shifts the remaining fields of that row.

use crate::error::{Result, StandingsError};
use serde::Serialize;
use std::collections::HashMap;

/// One data row, keyed by column name
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RawRecord {
    values: HashMap<String, String>,
    /// Number of fields the line actually had
    field_count: usize,
}

impl RawRecord {
    /// Value of a column, or an empty string when the row has none
    pub fn get(&self, column: &str) -> &str {
        self.values.get(column).map(String::as_str).unwrap_or("")
    }

    /// Value of a column, `None` when missing or blank
    pub fn non_empty(&self, column: &str) -> Option<&str> {
        Some(self.get(column)).filter(|v| !v.is_empty())
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }
}

/// Parsed sheet: ordered unique columns plus rows in file order
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<RawRecord>,
    pub delimiter: char,
}

impl Table {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Rows with fewer fields than the header, as (row number, field count)
    ///
    /// Row numbers count the header as row 1, ignoring blank lines.
    pub fn short_rows(&self) -> Vec<(usize, usize)> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.field_count < self.columns.len())
            .map(|(i, r)| (i + 2, r.field_count))
            .collect()
    }
}

/// Pick the delimiter from the header line: semicolon if present, else comma
pub fn detect_delimiter(header_line: &str) -> char {
    if header_line.contains(';') {
        ';'
    } else {
        ','
    }
}

/// Parse sheet text into columns and rows
///
/// Blank text is an error; a header with no data lines is an empty table.
pub fn parse(text: &str) -> Result<Table> {
    let text = text.trim();
    let header_line = match text.lines().next() {
        Some(line) if !line.trim().is_empty() => line,
        _ => return Err(StandingsError::EmptySource),
    };
    let delimiter = detect_delimiter(header_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter as u8)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut records = reader.records();

    let header = match records.next() {
        Some(record) => record?,
        None => return Err(StandingsError::EmptySource),
    };

    // Keep the first occurrence of each name so the column set stays unique
    let mut columns: Vec<String> = Vec::with_capacity(header.len());
    let mut positions: Vec<Option<usize>> = Vec::with_capacity(header.len());
    for name in header.iter() {
        if columns.iter().any(|c| c == name) {
            log::warn!("Duplicate column '{}' ignored", name);
            positions.push(None);
        } else {
            positions.push(Some(columns.len()));
            columns.push(name.to_string());
        }
    }

    let mut rows = Vec::new();
    for result in records {
        let record = result?;
        if record.len() <= 1 && record.get(0).map_or(true, str::is_empty) {
            continue;
        }

        if record.len() > header.len() {
            log::debug!(
                "Line {} has {} fields, header has {}; extras ignored",
                rows.len() + 2,
                record.len(),
                header.len()
            );
        }

        let mut values = HashMap::with_capacity(columns.len());
        for (i, slot) in positions.iter().enumerate() {
            if let Some(col) = slot {
                let value = record.get(i).unwrap_or("");
                values.insert(columns[*col].clone(), value.to_string());
            }
        }

        rows.push(RawRecord {
            values,
            field_count: record.len(),
        });
    }

    log::debug!(
        "Parsed {} columns and {} rows (delimiter '{}')",
        columns.len(),
        rows.len(),
        delimiter
    );

    Ok(Table {
        columns,
        rows,
        delimiter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect_delimiter() {
        assert_eq!(detect_delimiter("Username;Round 1;Round 2"), ';');
        assert_eq!(detect_delimiter("Username,Round 1,Round 2"), ',');
    }

    #[test]
    fn test_parse_semicolon_sheet() {
        let table = parse("Username ; Round 1;Round 2\nAlice; 10 ;8\n").unwrap();
        assert_eq!(table.delimiter, ';');
        assert_eq!(table.columns, vec!["Username", "Round 1", "Round 2"]);
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].get("Username"), "Alice");
        assert_eq!(table.rows[0].get("Round 1"), "10");
    }

    #[test]
    fn test_delimiter_taken_from_header_only() {
        // Header has no semicolon, so the semicolon in the row is plain text
        let table = parse("Username,Note\nAlice,a;b\n").unwrap();
        assert_eq!(table.delimiter, ',');
        assert_eq!(table.rows[0].get("Note"), "a;b");
    }

    #[test]
    fn test_blank_lines_skipped() {
        let text = "\n\nUsername,Round 1\n\nAlice,3\n   \nBob,4\n\n";
        let table = parse(text).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].get("Username"), "Bob");
    }

    #[test]
    fn test_crlf_lines() {
        let table = parse("Username,Round 1\r\nAlice,3\r\nBob,4\r\n").unwrap();
        assert_eq!(table.columns, vec!["Username", "Round 1"]);
        assert_eq!(table.rows[1].get("Round 1"), "4");
    }

    #[test]
    fn test_short_row_padded_with_empty() {
        let table = parse("Username,Round 1,Round 2\nAlice,5\n").unwrap();
        let row = &table.rows[0];
        assert_eq!(row.get("Round 1"), "5");
        assert_eq!(row.get("Round 2"), "");
        assert_eq!(row.non_empty("Round 2"), None);
        assert_eq!(row.field_count(), 2);
        assert_eq!(table.short_rows(), vec![(2, 2)]);
    }

    #[test]
    fn test_long_row_extras_ignored() {
        let table = parse("Username,Round 1\nAlice,5,99,100\n").unwrap();
        assert_eq!(table.rows[0].get("Round 1"), "5");
        assert!(table.short_rows().is_empty());
    }

    #[test]
    fn test_quotes_are_literal() {
        let table = parse("Username,Round 1\n\"Al,ice\",5\n").unwrap();
        // No quoting support: the comma splits the name
        assert_eq!(table.rows[0].get("Username"), "\"Al");
        assert_eq!(table.rows[0].get("Round 1"), "ice\"");
    }

    #[test]
    fn test_duplicate_columns_keep_first() {
        let table = parse("Username,Round 1,Round 1\nAlice,5,7\n").unwrap();
        assert_eq!(table.columns, vec!["Username", "Round 1"]);
        assert_eq!(table.rows[0].get("Round 1"), "5");
    }

    #[test]
    fn test_header_only_is_empty_table() {
        let table = parse("Username,Round 1\n").unwrap();
        assert_eq!(table.columns.len(), 2);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_empty_text_is_error() {
        assert!(matches!(parse(""), Err(StandingsError::EmptySource)));
        assert!(matches!(parse("  \n \n"), Err(StandingsError::EmptySource)));
    }
}
