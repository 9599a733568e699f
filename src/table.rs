//! Plain-text tables for terminal output.

use std::fmt::Write as _;

use crate::csv_table::Record;

/// Cells wider than this many characters are cut and end with `…`.
pub const MAX_CELL_WIDTH: usize = 60;

pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let headers = headers.iter().map(|h| cell_text(h)).collect::<Vec<_>>();
    let rows = rows
        .iter()
        .map(|row| row.iter().map(|cell| cell_text(cell)).collect::<Vec<_>>())
        .collect::<Vec<_>>();

    let mut widths = headers
        .iter()
        .map(|h| h.chars().count().max(3))
        .collect::<Vec<_>>();
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    let _ = writeln!(output, "{}", join_padded(&headers, &widths));
    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>();
    let _ = writeln!(output, "{}", join_padded(&rule, &widths));
    for row in &rows {
        let _ = writeln!(output, "{}", join_padded(row, &widths));
    }
    output
}

/// Renders records under their own header names.
///
/// Every record from one parse shares the same keys, so the first record
/// supplies the header line.
pub fn render_records(records: &[Record]) -> String {
    let Some(first) = records.first() else {
        return String::new();
    };
    let headers = first.keys().map(str::to_string).collect::<Vec<_>>();
    let rows = records
        .iter()
        .map(|record| record.values().map(str::to_string).collect())
        .collect::<Vec<Vec<String>>>();
    render_table(&headers, &rows)
}

pub fn print_table(headers: &[String], rows: &[Vec<String>]) {
    print!("{}", render_table(headers, rows));
}

fn join_padded(cells: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (idx, (cell, &width)) in cells.iter().zip(widths).enumerate() {
        if idx > 0 {
            line.push_str("  ");
        }
        let _ = write!(line, "{cell:<width$}");
    }
    line.trim_end().to_string()
}

/// Single-line, width-capped version of a cell.
fn cell_text(value: &str) -> String {
    let flat = value
        .chars()
        .map(|ch| if matches!(ch, '\n' | '\r' | '\t') { ' ' } else { ch })
        .collect::<String>();
    if flat.chars().count() <= MAX_CELL_WIDTH {
        return flat;
    }
    let mut cut = flat.chars().take(MAX_CELL_WIDTH - 1).collect::<String>();
    cut.push('…');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::csv_table::parse;

    #[test]
    fn columns_are_aligned_with_a_rule() {
        let headers = vec!["old".to_string(), "new".to_string()];
        let rows = vec![
            vec!["/a".to_string(), "/agroverse-shipments/a".to_string()],
            vec!["/shipments/b".to_string(), "/b".to_string()],
        ];
        let rendered = render_table(&headers, &rows);
        let lines = rendered.lines().collect::<Vec<_>>();
        assert_eq!(
            lines,
            vec![
                "old           new",
                "------------  ----------------------",
                "/a            /agroverse-shipments/a",
                "/shipments/b  /b",
            ]
        );
    }

    #[test]
    fn multi_line_cells_are_flattened() {
        let records = parse("note\n\"line1\nline2\tend\"\n");
        let rendered = render_records(&records);
        assert_eq!(rendered.lines().nth(2), Some("line1 line2 end"));
    }

    #[test]
    fn long_cells_are_truncated() {
        let long = "x".repeat(MAX_CELL_WIDTH + 10);
        let text = cell_text(&long);
        assert_eq!(text.chars().count(), MAX_CELL_WIDTH);
        assert!(text.ends_with('…'));
    }

    #[test]
    fn no_records_render_nothing() {
        assert_eq!(render_records(&[]), "");
    }
}
