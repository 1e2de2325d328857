//! The `TableStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `parkval-store-csv`, or
//! [`MemoryStore`](crate::memory::MemoryStore) in tests). The log and the code
//! allocator depend on this abstraction, not on any file format.

use std::path::Path;

use crate::{Result, table::Table};

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a table storage backend.
///
/// Every call is synchronous and self-contained: a table is opened, used, and
/// released within the call. No handle survives between calls, so a table
/// may change underneath the application between operations.
pub trait TableStore {
  /// Whether a table exists at `path`.
  fn exists(&self, path: &Path) -> Result<bool>;

  /// Persist `initial` at `path` unless a table is already there.
  ///
  /// Returns `true` if a table was created. An existing table is never
  /// overwritten.
  fn create_if_absent(&self, path: &Path, initial: &Table) -> Result<bool>;

  /// Load a snapshot of the table at `path`.
  ///
  /// Returns [`Error::NotFound`](crate::Error::NotFound) if there is none.
  fn read(&self, path: &Path) -> Result<Table>;

  /// Open the table at `path` exclusively, hand it to `f`, and persist it if
  /// `f` succeeds.
  ///
  /// - Returns [`Error::NotFound`](crate::Error::NotFound) if there is no
  ///   table at `path`; `f` is not called.
  /// - If `f` fails, its error is returned and the stored table is left as it
  ///   was.
  /// - Exclusive access is released on every exit path.
  fn update<T, F>(&self, path: &Path, f: F) -> Result<T>
  where
    F: FnOnce(&mut Table) -> Result<T>;
}

impl<S: TableStore + ?Sized> TableStore for &S {
  fn exists(&self, path: &Path) -> Result<bool> { (**self).exists(path) }

  fn create_if_absent(&self, path: &Path, initial: &Table) -> Result<bool> {
    (**self).create_if_absent(path, initial)
  }

  fn read(&self, path: &Path) -> Result<Table> { (**self).read(path) }

  fn update<T, F>(&self, path: &Path, f: F) -> Result<T>
  where
    F: FnOnce(&mut Table) -> Result<T>,
  {
    (**self).update(path, f)
  }
}
