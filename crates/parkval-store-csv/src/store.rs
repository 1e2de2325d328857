//! The CSV file implementation of [`TableStore`].

use std::{
  fs::{self, File},
  io,
  path::Path,
};

use parkval_core::{Table, TableStore};
use tracing::{debug, info};

use crate::{
  Error, Result,
  lock::{TableLock, sidecar},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A table store keeping one CSV file per table.
///
/// Holds no open files between calls; every operation opens, locks, and
/// releases what it needs.
#[derive(Debug, Clone)]
pub struct CsvStore {
  delimiter: u8,
}

impl Default for CsvStore {
  fn default() -> Self { Self { delimiter: b',' } }
}

impl CsvStore {
  pub fn new() -> Self { Self::default() }

  /// Use `delimiter` instead of a comma.
  pub fn with_delimiter(mut self, delimiter: u8) -> Self {
    self.delimiter = delimiter;
    self
  }

  fn load(&self, path: &Path) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
      .has_headers(false)
      .flexible(true)
      .delimiter(self.delimiter)
      .from_path(path)
      .map_err(|e| Error::csv(path, e))?;

    let rows = reader
      .records()
      .map(|record| record.map(|r| r.iter().map(str::to_owned).collect()))
      .collect::<csv::Result<Vec<Vec<String>>>>()
      .map_err(|e| Error::csv(path, e))?;

    Ok(Table::from_rows(rows))
  }

  /// Write `table` to a temp file beside `path`, sync it, and rename it into
  /// place.
  fn save(&self, path: &Path, table: &Table) -> Result<()> {
    let tmp = sidecar(path, "tmp");
    let file = File::create(&tmp).map_err(|e| Error::io(&tmp, e))?;

    let mut writer = csv::WriterBuilder::new()
      .has_headers(false)
      .flexible(true)
      .delimiter(self.delimiter)
      .from_writer(file);

    let used = table.last_occupied_row();
    for row in &table.rows()[..used] {
      // A lone empty field keeps a blank row from collapsing on reload.
      let written = if row.is_empty() {
        writer.write_record([""])
      } else {
        writer.write_record(row)
      };
      written.map_err(|e| Error::csv(&tmp, e))?;
    }

    let file = writer
      .into_inner()
      .map_err(|e| Error::io(&tmp, io::Error::new(e.error().kind(), e.to_string())))?;
    file.sync_all().map_err(|e| Error::io(&tmp, e))?;
    drop(file);

    fs::rename(&tmp, path).map_err(|e| Error::io(path, e))?;
    sync_parent(path)?;
    debug!(path = %path.display(), rows = used, "saved table");
    Ok(())
  }
}

/// Make a new or renamed directory entry durable.
#[cfg(unix)]
fn sync_parent(path: &Path) -> Result<()> {
  let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) else {
    return Ok(());
  };
  File::open(parent)
    .and_then(|dir| dir.sync_all())
    .map_err(|e| Error::io(parent, e))
}

#[cfg(not(unix))]
fn sync_parent(_path: &Path) -> Result<()> { Ok(()) }

// ─── TableStore impl ─────────────────────────────────────────────────────────

impl TableStore for CsvStore {
  fn exists(&self, path: &Path) -> parkval_core::Result<bool> {
    Ok(path.try_exists().map_err(|e| Error::io(path, e))?)
  }

  fn create_if_absent(&self, path: &Path, initial: &Table) -> parkval_core::Result<bool> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
      fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let _lock = TableLock::acquire(path)?;
    if self.exists(path)? {
      return Ok(false);
    }
    self.save(path, initial)?;
    info!(path = %path.display(), "created table file");
    Ok(true)
  }

  fn read(&self, path: &Path) -> parkval_core::Result<Table> {
    if !self.exists(path)? {
      return Err(parkval_core::Error::NotFound(path.to_path_buf()));
    }
    Ok(self.load(path)?)
  }

  fn update<T, F>(&self, path: &Path, f: F) -> parkval_core::Result<T>
  where
    F: FnOnce(&mut Table) -> parkval_core::Result<T>,
  {
    if !self.exists(path)? {
      return Err(parkval_core::Error::NotFound(path.to_path_buf()));
    }

    // Held until return, whichever way we leave.
    let _lock = TableLock::acquire(path)?;

    // The table may have been removed while we waited for the lock.
    if !self.exists(path)? {
      return Err(parkval_core::Error::NotFound(path.to_path_buf()));
    }

    let mut table = self.load(path)?;
    let out = f(&mut table)?;
    self.save(path, &table)?;
    Ok(out)
  }
}
