//! [`Table`]: a spreadsheet-like grid of string cells.
//!
//! Rows and columns are addressed 1-based, the way a spreadsheet labels them.
//! An empty string is an empty cell. Rows may be ragged: reading past the end
//! of a row yields an empty cell, writing past it grows the grid.

/// An in-memory grid of cells, loaded from and persisted by a
/// [`TableStore`](crate::store::TableStore).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
  rows: Vec<Vec<String>>,
}

impl Table {
  pub fn new() -> Self { Self::default() }

  /// Build a table from raw rows, row 1 first.
  pub fn from_rows(rows: Vec<Vec<String>>) -> Self { Self { rows } }

  /// A table whose only row is `header`.
  pub fn with_header<S: AsRef<str>>(header: &[S]) -> Self {
    Self {
      rows: vec![header.iter().map(|h| h.as_ref().to_owned()).collect()],
    }
  }

  /// The raw rows, row 1 first. Trailing blank rows may be present.
  pub fn rows(&self) -> &[Vec<String>] { &self.rows }

  pub fn into_rows(self) -> Vec<Vec<String>> { self.rows }

  /// The cell at (`row`, `col`), 1-based. Out-of-range cells read as empty.
  pub fn cell(&self, row: usize, col: usize) -> &str {
    if row == 0 || col == 0 {
      return "";
    }
    self
      .rows
      .get(row - 1)
      .and_then(|r| r.get(col - 1))
      .map(String::as_str)
      .unwrap_or_default()
  }

  /// Write `value` into (`row`, `col`), 1-based, growing the grid as needed.
  ///
  /// # Panics
  ///
  /// Panics if `row` or `col` is zero.
  pub fn set_cell(&mut self, row: usize, col: usize, value: impl Into<String>) {
    assert!(row > 0 && col > 0, "cell addresses are 1-based");
    if self.rows.len() < row {
      self.rows.resize_with(row, Vec::new);
    }
    let cells = &mut self.rows[row - 1];
    if cells.len() < col {
      cells.resize_with(col, String::new);
    }
    cells[col - 1] = value.into();
  }

  /// The cells of `row`, 1-based, with trailing empty cells dropped.
  pub fn row(&self, row: usize) -> &[String] {
    let Some(cells) = row.checked_sub(1).and_then(|i| self.rows.get(i)) else {
      return &[];
    };
    let len = cells
      .iter()
      .rposition(|c| !c.is_empty())
      .map_or(0, |i| i + 1);
    &cells[..len]
  }

  /// Index of the last row holding any non-empty cell; 0 for a blank table.
  ///
  /// This is the equivalent of a spreadsheet's "last used cell" row, and is
  /// always recomputed from the cells rather than tracked.
  pub fn last_occupied_row(&self) -> usize {
    self
      .rows
      .iter()
      .rposition(|r| r.iter().any(|c| !c.is_empty()))
      .map_or(0, |i| i + 1)
  }
}
