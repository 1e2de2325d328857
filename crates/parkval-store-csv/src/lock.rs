//! Advisory per-table locks.

use std::{
  ffi::OsString,
  fs::File,
  path::{Path, PathBuf},
};

use tracing::{debug, warn};

use crate::{Error, Result};

/// An exclusive advisory lock on a table, held until dropped.
///
/// The lock lives on a sidecar file next to the table rather than on the
/// table itself, because saves replace the table file by rename.
#[derive(Debug)]
pub(crate) struct TableLock {
  file: File,
  path: PathBuf,
}

impl TableLock {
  /// Block until the lock for `table` is acquired.
  pub(crate) fn acquire(table: &Path) -> Result<Self> {
    let path = sidecar(table, "lock");
    let file = File::options()
      .create(true)
      .truncate(false)
      .write(true)
      .open(&path)
      .map_err(|e| Error::io(&path, e))?;
    file.lock().map_err(|e| Error::io(&path, e))?;
    debug!(lock = %path.display(), "acquired table lock");
    Ok(Self { file, path })
  }
}

impl Drop for TableLock {
  fn drop(&mut self) {
    if let Err(e) = self.file.unlock() {
      warn!(lock = %self.path.display(), error = %e, "failed to release table lock");
    }
  }
}

/// `table` with `.suffix` appended to its file name.
pub(crate) fn sidecar(table: &Path, suffix: &str) -> PathBuf {
  let mut name = table.file_name().map(OsString::from).unwrap_or_default();
  name.push(".");
  name.push(suffix);
  table.with_file_name(name)
}
