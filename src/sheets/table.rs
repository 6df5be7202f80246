// src/sheets/table.rs

use anyhow::Result;
use serde_json::{Map, Value};

/// Number of header rows preceding the data rows on the sheet.
const HEADER_ROWS: usize = 1;

/// An in-memory snapshot of the sheet: a header row naming the columns,
/// followed by data rows. Rows coming back from the values API may be ragged
/// (trailing empty cells are trimmed), so every row is padded to the header
/// width when the snapshot is built.
#[derive(Debug, Clone)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

/// A pending write of one value into one cell, addressed by 1-based sheet
/// row and column numbers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellWrite {
    pub row: usize,
    pub col: usize,
    pub value: String,
}

impl Table {
    /// Build a snapshot from raw sheet values. The first row is the header;
    /// an entirely empty sheet is an error since no columns can be resolved.
    pub fn from_values(values: Vec<Vec<String>>) -> Result<Self> {
        let mut iter = values.into_iter();
        let header = match iter.next() {
            Some(h) if !h.is_empty() => h,
            _ => anyhow::bail!("sheet has no header row"),
        };
        let width = header.len();
        let rows = iter
            .map(|mut row| {
                row.resize(width, String::new());
                row
            })
            .collect();
        Ok(Table { header, rows })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Resolve a column name to its 0-based index. Resolution happens fresh
    /// per snapshot so the logic never depends on physical column positions.
    pub fn column_index(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| anyhow::anyhow!("sheet is missing column `{}`", name))
    }

    pub fn cell(&self, row_idx: usize, col_idx: usize) -> &str {
        &self.rows[row_idx][col_idx]
    }

    /// Project a data row into an ordered name → value mapping, one entry per
    /// header column.
    pub fn labeled_row(&self, row_idx: usize) -> Map<String, Value> {
        let mut labeled = Map::new();
        for (name, value) in self.header.iter().zip(&self.rows[row_idx]) {
            labeled.insert(name.clone(), Value::String(value.clone()));
        }
        labeled
    }

    /// 1-based sheet row number for a 0-based data row index.
    pub fn sheet_row(row_idx: usize) -> usize {
        row_idx + HEADER_ROWS + 1
    }

    /// Apply a pending write to the snapshot. Production code writes to the
    /// live sheet and re-reads; this keeps the in-memory copy usable in tests.
    #[cfg(test)]
    pub fn apply(&mut self, write: &CellWrite) {
        let row_idx = write.row - HEADER_ROWS - 1;
        self.rows[row_idx][write.col - 1] = write.value.clone();
    }
}
