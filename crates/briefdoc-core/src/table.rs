//! Pipe table assembly.
//!
//! The first line is the header. The second line is dropped if it is a
//! `|---|:---:|` separator; every later pipe line is a row. Rows are stored
//! as written: no padding, no truncation.

use crate::ast::{Block, Inline};
use crate::inline::parse_inlines;

/// Whether a trimmed line opens a table (starts and ends with `|`).
#[inline]
pub fn is_table_start(trimmed: &str) -> bool {
    trimmed.len() >= 2 && trimmed.starts_with('|') && trimmed.ends_with('|')
}

/// Trimmed, non-empty `|`-separated segments.
pub fn split_cells(line: &str) -> Vec<&str> {
    line.split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect()
}

/// Whether every cell is made of dashes and colons (at least one dash).
pub fn is_separator(line: &str) -> bool {
    let cells = split_cells(line);
    !cells.is_empty()
        && cells.iter().all(|cell| {
            cell.contains('-') && cell.chars().all(|c| matches!(c, '-' | ':' | ' '))
        })
}

/// Builds one `Table` block from consecutive pipe lines.
#[derive(Debug, Clone)]
pub struct TableAssembler {
    headers: Vec<Vec<Inline>>,
    rows: Vec<Vec<Vec<Inline>>>,
    /// Lines consumed after the header.
    seen: usize,
}

impl TableAssembler {
    /// Start a table from its header line.
    pub fn new(header_line: &str) -> Self {
        Self {
            headers: parse_row(header_line),
            rows: Vec::new(),
            seen: 0,
        }
    }

    /// Number of header cells.
    #[inline]
    pub fn header_width(&self) -> usize {
        self.headers.len()
    }

    /// Feed the next pipe line.
    ///
    /// Returns the row's cell count, or `None` when the line was the
    /// separator and got discarded.
    pub fn push_line(&mut self, line: &str) -> Option<usize> {
        self.seen += 1;
        if self.seen == 1 && is_separator(line) {
            return None;
        }
        let row = parse_row(line);
        let width = row.len();
        self.rows.push(row);
        Some(width)
    }

    /// Produce the `Table` block.
    pub fn finish(self) -> Block {
        Block::Table {
            headers: self.headers,
            rows: self.rows,
        }
    }
}

fn parse_row(line: &str) -> Vec<Vec<Inline>> {
    split_cells(line).into_iter().map(parse_inlines).collect()
}
