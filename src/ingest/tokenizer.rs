//! Line/field tokenizer for raw CSV text.
//!
//! The tokenizer turns one in-memory string into a header row plus data rows. It deliberately
//! does not validate anything beyond shape: fewer than 2 non-blank lines is "no data", not an
//! error, and downstream classification/mapping decide what the rows mean.
//!
//! Quoting note: uploaded spreadsheets routinely quote currency cells that contain commas
//! (`"$12,000"`), so fields are read with real CSV quoting rather than a naive comma split.
//! One layer of enclosing double quotes is consumed and embedded doubled quotes unescaped.

use csv::{ReaderBuilder, Trim};

/// A tokenized document: one header row plus zero or more data rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizedDocument {
    /// The raw first non-blank line, untouched. The schema classifier sniffs this.
    pub header_line: String,
    /// Lower-cased, whitespace-trimmed header tokens, in column order.
    pub headers: Vec<String>,
    /// Data rows; each value whitespace-trimmed and unquoted. Row lengths may differ from the
    /// header length (missing trailing cells map to absent fields downstream).
    pub rows: Vec<Vec<String>>,
}

/// Tokenize raw CSV text.
///
/// - Splits on CRLF-or-LF; blank (whitespace-only) lines are skipped.
/// - Returns `None` when the input has fewer than 2 non-blank lines (no header + data).
/// - The first non-blank line is the header; the rest are data rows. A line of empty cells
///   (`,,`) is a data row, not a blank line: it reaches the mappers and defaults in full.
/// - Rows that fail CSV decoding are skipped rather than failing the whole document.
pub fn tokenize(raw: &str) -> Option<TokenizedDocument> {
    let mut non_blank = raw.lines().filter(|line| !line.trim().is_empty());
    let header_line = non_blank.next()?.to_string();
    non_blank.next()?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(raw.trim_start().as_bytes());

    let headers: Vec<String> = rdr
        .headers()
        .ok()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();

    let rows: Vec<Vec<String>> = rdr
        .records()
        .filter_map(Result::ok)
        .map(|record| record.iter().map(|v| v.trim().to_string()).collect())
        // Whitespace-only lines come through as a single empty field; drop those, keep
        // multi-cell all-empty rows (`,,`) for the mappers to default.
        .filter(|row: &Vec<String>| !(row.len() == 1 && row[0].is_empty()))
        .collect();

    Some(TokenizedDocument {
        header_line,
        headers,
        rows,
    })
}
