//! Append-only log tables.
//!
//! A log is a table whose row 1 is a fixed header and whose rows 2..N each hold
//! one [`LogRecord`]. Records are only ever appended; nothing here rewrites or
//! removes a row once written.

use std::path::Path;

use tracing::{debug, info};

use crate::{Error, Result, store::TableStore, table::Table};

// ─── LogRecord ───────────────────────────────────────────────────────────────

/// An ordered set of named fields, written as one row of a log.
///
/// Field names must match the log's header; the row is laid out in header
/// order regardless of the order fields were added in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogRecord {
  fields: Vec<(String, String)>,
}

impl LogRecord {
  pub fn new() -> Self { Self::default() }

  /// Set `name` to `value`, replacing any earlier value for `name`.
  pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
    let name = name.into();
    let value = value.into();
    match self.fields.iter_mut().find(|(n, _)| *n == name) {
      Some(slot) => slot.1 = value,
      None => self.fields.push((name, value)),
    }
    self
  }

  pub fn get(&self, name: &str) -> Option<&str> {
    self
      .fields
      .iter()
      .find(|(n, _)| n == name)
      .map(|(_, v)| v.as_str())
  }

  /// Fields in insertion order.
  pub fn fields(&self) -> impl Iterator<Item = (&str, &str)> {
    self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
  }

  pub fn len(&self) -> usize { self.fields.len() }

  pub fn is_empty(&self) -> bool { self.fields.is_empty() }
}

// ─── AppendOnlyLog ───────────────────────────────────────────────────────────

/// Append-only record logs over any [`TableStore`].
#[derive(Debug, Clone)]
pub struct AppendOnlyLog<S> {
  store: S,
}

impl<S: TableStore> AppendOnlyLog<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// Create the log at `path` with `header` as row 1, unless it already
  /// exists. An existing log is left untouched, header included.
  ///
  /// Returns `true` if the log was created by this call.
  pub fn ensure_created<H: AsRef<str>>(&self, path: &Path, header: &[H]) -> Result<bool> {
    let created = self
      .store
      .create_if_absent(path, &Table::with_header(header))?;
    if created {
      info!(path = %path.display(), "created log table");
    }
    Ok(created)
  }

  /// Append `record` after the last occupied row of the log at `path`.
  ///
  /// The last occupied row is recomputed on every call, since the table may
  /// have been edited externally since the previous append. Returns the
  /// 1-based row the record was written to.
  pub fn append(&self, path: &Path, record: &LogRecord) -> Result<usize> {
    let row = self.store.update(path, |table| {
      let header = header_of(table, path)?;

      if let Some((name, _)) = record
        .fields()
        .find(|(name, _)| !header.iter().any(|h| h == name))
      {
        return Err(Error::UnknownField(name.to_owned()));
      }

      let row = table.last_occupied_row() + 1;
      for (col, name) in header.iter().enumerate() {
        if name.is_empty() {
          continue;
        }
        let value = record
          .get(name)
          .ok_or_else(|| Error::MissingField(name.clone()))?;
        table.set_cell(row, col + 1, value);
      }
      Ok(row)
    })?;

    debug!(path = %path.display(), row, "appended log record");
    Ok(row)
  }

  /// Read back every data row of the log at `path`, keyed by the header.
  pub fn records(&self, path: &Path) -> Result<Vec<LogRecord>> {
    let table = self.store.read(path)?;
    let header = header_of(&table, path)?;

    let records = (2..=table.last_occupied_row())
      .map(|row| {
        header
          .iter()
          .enumerate()
          .filter(|(_, name)| !name.is_empty())
          .fold(LogRecord::new(), |rec, (col, name)| {
            rec.with(name.as_str(), table.cell(row, col + 1))
          })
      })
      .collect();
    Ok(records)
  }
}

fn header_of(table: &Table, path: &Path) -> Result<Vec<String>> {
  let header = table.row(1);
  if header.is_empty() {
    return Err(Error::MissingHeader(path.to_path_buf()));
  }
  Ok(header.to_vec())
}
