//! An in-process [`TableStore`] keeping tables in a map.
//!
//! Nothing is written to disk. Used by tests and by the kiosk's demo mode.

use std::{
  collections::HashMap,
  path::{Path, PathBuf},
  sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{Error, Result, store::TableStore, table::Table};

/// A table store backed by a map from path to [`Table`].
#[derive(Debug, Default)]
pub struct MemoryStore {
  tables: Mutex<HashMap<PathBuf, Table>>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn tables(&self) -> MutexGuard<'_, HashMap<PathBuf, Table>> {
    self.tables.lock().unwrap_or_else(PoisonError::into_inner)
  }

  /// Replace (or create) the table at `path`, bypassing the append-only
  /// contract. Stands in for someone editing the file by hand.
  pub fn put(&self, path: impl Into<PathBuf>, table: Table) {
    self.tables().insert(path.into(), table);
  }
}

impl TableStore for MemoryStore {
  fn exists(&self, path: &Path) -> Result<bool> {
    Ok(self.tables().contains_key(path))
  }

  fn create_if_absent(&self, path: &Path, initial: &Table) -> Result<bool> {
    let mut tables = self.tables();
    if tables.contains_key(path) {
      return Ok(false);
    }
    tables.insert(path.to_path_buf(), initial.clone());
    Ok(true)
  }

  fn read(&self, path: &Path) -> Result<Table> {
    self
      .tables()
      .get(path)
      .cloned()
      .ok_or_else(|| Error::NotFound(path.to_path_buf()))
  }

  fn update<T, F>(&self, path: &Path, f: F) -> Result<T>
  where
    F: FnOnce(&mut Table) -> Result<T>,
  {
    // The map lock is the exclusive hold; it drops on every return path.
    let mut tables = self.tables();
    let stored = tables
      .get_mut(path)
      .ok_or_else(|| Error::NotFound(path.to_path_buf()))?;

    // Work on a copy so a failed `f` leaves the stored table untouched.
    let mut working = stored.clone();
    let out = f(&mut working)?;
    *stored = working;
    Ok(out)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn update_on_missing_table_is_not_found() {
    let store = MemoryStore::new();
    let err = store
      .update(Path::new("nope.csv"), |_| Ok(()))
      .unwrap_err();
    assert!(matches!(err, Error::NotFound(p) if p == Path::new("nope.csv")));
  }

  #[test]
  fn failed_update_discards_changes() {
    let store = MemoryStore::new();
    let path = Path::new("t.csv");
    store
      .create_if_absent(path, &Table::with_header(&["A"]))
      .unwrap();

    let result: Result<()> = store.update(path, |t| {
      t.set_cell(2, 1, "half-written");
      Err(Error::BlankField("A"))
    });
    assert!(result.is_err());
    assert_eq!(store.read(path).unwrap().last_occupied_row(), 1);
  }

  #[test]
  fn create_if_absent_never_overwrites() {
    let store = MemoryStore::new();
    let path = Path::new("t.csv");
    assert!(store.create_if_absent(path, &Table::with_header(&["A"])).unwrap());
    assert!(!store.create_if_absent(path, &Table::with_header(&["B"])).unwrap());
    assert_eq!(store.read(path).unwrap().cell(1, 1), "A");
  }
}
