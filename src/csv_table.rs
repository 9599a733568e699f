//! In-memory CSV table reader shared by every command.
//!
//! Turns the full text of a comma-delimited file into an ordered list of
//! [`Record`]s keyed by the header row. The scan is a single forward pass over
//! the characters with one character of lookahead, tracking whether the cursor
//! sits inside a quoted field:
//!
//! - `""` inside a quoted field is one literal quote.
//! - Commas and line breaks inside a quoted field are field data, which is how
//!   multi-line cells survive.
//! - `\n`, `\r` and `\r\n` all end a row outside quotes.
//! - Rows whose cells are all blank are dropped.
//!
//! Malformed input never fails: short rows are padded with empty strings, extra
//! cells are ignored and an unterminated quote closes at end of input. Callers
//! that need a stricter contract check the returned records themselves, for
//! example with [`require_columns()`].

use std::{iter::Peekable, str::Chars};

use thiserror::Error;

/// One data row keyed by the cleaned header names, in header order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<(String, String)>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Value for `name`, or `""` when the column does not exist.
    pub fn get_or_empty(&self, name: &str) -> &str {
        self.get(name).unwrap_or("")
    }

    /// First non-empty value among several alternative column names.
    pub fn first_non_empty(&self, names: &[&str]) -> Option<&str> {
        names
            .iter()
            .filter_map(|name| self.get(name))
            .find(|value| !value.is_empty())
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(key, _)| key.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(_, value)| value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FieldState {
    Unquoted,
    Quoted,
}

struct RowSplitter<'a> {
    chars: Peekable<Chars<'a>>,
    state: FieldState,
    field: String,
    row: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl<'a> RowSplitter<'a> {
    fn new(content: &'a str) -> Self {
        Self {
            chars: content.chars().peekable(),
            state: FieldState::Unquoted,
            field: String::new(),
            row: Vec::new(),
            rows: Vec::new(),
        }
    }

    fn run(mut self) -> Vec<Vec<String>> {
        while let Some(ch) = self.chars.next() {
            match (self.state, ch) {
                (FieldState::Quoted, '"') => {
                    if self.chars.next_if_eq(&'"').is_some() {
                        self.field.push('"');
                    } else {
                        self.state = FieldState::Unquoted;
                    }
                }
                (FieldState::Unquoted, '"') => self.state = FieldState::Quoted,
                (FieldState::Unquoted, ',') => self.end_field(),
                (FieldState::Unquoted, '\r') => {
                    self.chars.next_if_eq(&'\n');
                    self.end_row();
                }
                (FieldState::Unquoted, '\n') => self.end_row(),
                (_, other) => self.field.push(other),
            }
        }
        if !self.field.is_empty() || !self.row.is_empty() {
            self.end_row();
        }
        self.rows
    }

    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
    }

    fn end_row(&mut self) {
        self.end_field();
        let row = std::mem::take(&mut self.row);
        if row.iter().any(|cell| !clean_cell(cell).is_empty()) {
            self.rows.push(row);
        }
    }
}

/// Splits raw CSV text into rows of unprocessed cells, dropping blank rows.
///
/// Quote characters that wrap or escape field content are consumed here; the
/// cells are otherwise untouched (no trimming).
pub fn split_rows(content: &str) -> Vec<Vec<String>> {
    RowSplitter::new(content).run()
}

/// Parses CSV text into records keyed by the header row.
///
/// Returns an empty list when the input holds fewer than two non-blank rows.
/// Header names and values are trimmed of surrounding whitespace. The wrapping
/// quotes of a quoted cell are removed once during the scan, so a value that
/// begins or ends with an escaped `""` keeps its literal quote.
///
/// A header name that appears more than once yields a single key at its first
/// position holding the value of the last column with that name.
pub fn parse(content: &str) -> Vec<Record> {
    let rows = split_rows(content);
    let Some((header_row, data_rows)) = rows.split_first() else {
        return Vec::new();
    };
    if data_rows.is_empty() {
        return Vec::new();
    }

    let layout = column_layout(header_row);
    data_rows
        .iter()
        .map(|row| Record {
            fields: layout
                .iter()
                .map(|(name, idx)| {
                    let value = row.get(*idx).map(|cell| clean_cell(cell)).unwrap_or("");
                    (name.clone(), value.to_string())
                })
                .collect(),
        })
        .collect()
}

/// Maps each distinct header name to the cell index its value is read from.
fn column_layout(header_row: &[String]) -> Vec<(String, usize)> {
    let mut layout: Vec<(String, usize)> = Vec::with_capacity(header_row.len());
    for (idx, cell) in header_row.iter().enumerate() {
        let name = clean_cell(cell);
        match layout.iter_mut().find(|(existing, _)| existing == name) {
            Some(entry) => entry.1 = idx,
            None => layout.push((name.to_string(), idx)),
        }
    }
    layout
}

fn clean_cell(cell: &str) -> &str {
    // A leading byte-order mark counts as padding.
    cell.trim_matches(|ch: char| ch.is_whitespace() || ch == '\u{feff}')
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required column(s): {}", .missing.join(", "))]
pub struct MissingColumns {
    pub missing: Vec<String>,
}

/// Fails when the table's header lacks any of `required`.
///
/// An empty table has nothing to check and passes.
pub fn require_columns(records: &[Record], required: &[&str]) -> Result<(), MissingColumns> {
    let Some(first) = records.first() else {
        return Ok(());
    };
    let missing = required
        .iter()
        .filter(|name| first.get(name).is_none())
        .map(|name| name.to_string())
        .collect::<Vec<_>>();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(MissingColumns { missing })
    }
}
