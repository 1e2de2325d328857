//! Sequential code allocation from a pre-seeded pool.
//!
//! Pool layout: column 1 rows 1..K hold the seeded codes, and the pointer cell
//! at row 1, column 3 holds the 1-based row of the next unissued code.

use std::path::Path;

use tracing::{info, warn};

use crate::{Error, Result, store::TableStore, table::Table};

/// Column holding the seeded codes.
pub const CODE_COLUMN: usize = 1;
/// Row of the pointer cell.
pub const POINTER_ROW: usize = 1;
/// Column of the pointer cell.
pub const POINTER_COLUMN: usize = 3;

/// Issues each seeded code exactly once, in seed order.
#[derive(Debug, Clone)]
pub struct SequentialCodeAllocator<S> {
  store: S,
}

impl<S: TableStore> SequentialCodeAllocator<S> {
  pub fn new(store: S) -> Self { Self { store } }

  /// Create the pool at `path` from `codes` with the pointer at 1, unless a
  /// pool already exists there. Existing pools are never re-seeded.
  ///
  /// Returns `true` if the pool was created by this call.
  pub fn ensure_seeded<C: AsRef<str>>(&self, path: &Path, codes: &[C]) -> Result<bool> {
    if self.store.exists(path)? {
      return Ok(false);
    }
    if codes.is_empty() {
      return Err(Error::EmptySeed);
    }
    // A blank cell reads as the end of the pool, hiding every code after it.
    if let Some(i) = codes.iter().position(|c| c.as_ref().trim().is_empty()) {
      return Err(Error::BlankSeedCode(i + 1));
    }

    let mut table = Table::new();
    for (i, code) in codes.iter().enumerate() {
      table.set_cell(i + 1, CODE_COLUMN, code.as_ref());
    }
    table.set_cell(POINTER_ROW, POINTER_COLUMN, "1");

    let created = self.store.create_if_absent(path, &table)?;
    if created {
      info!(path = %path.display(), codes = codes.len(), "seeded code pool");
    }
    Ok(created)
  }

  /// Issue the code under the pointer and advance the pointer by one.
  ///
  /// Fails with [`Error::ExhaustedPool`] once every seeded code has been
  /// issued; the pointer is left where it was.
  pub fn next(&self, path: &Path) -> Result<String> {
    let issued = self.store.update(path, |table| {
      let pointer = read_pointer(table)?;
      let code = table.cell(pointer, CODE_COLUMN);
      if code.is_empty() {
        return Err(Error::ExhaustedPool { path: path.to_path_buf(), pointer });
      }
      let code = code.to_owned();
      table.set_cell(POINTER_ROW, POINTER_COLUMN, (pointer + 1).to_string());
      Ok((pointer, code))
    });

    match issued {
      Ok((pointer, code)) => {
        info!(path = %path.display(), pointer, "issued validation code");
        Ok(code)
      }
      Err(e @ Error::ExhaustedPool { .. }) => {
        warn!(path = %path.display(), "code pool exhausted");
        Err(e)
      }
      Err(e) => Err(e),
    }
  }

  /// Number of codes still available to [`next`](Self::next).
  pub fn remaining(&self, path: &Path) -> Result<usize> {
    let table = self.store.read(path)?;
    let pointer = read_pointer(&table)?;
    let remaining = (pointer..=table.last_occupied_row())
      .take_while(|&row| !table.cell(row, CODE_COLUMN).is_empty())
      .count();
    Ok(remaining)
  }
}

fn read_pointer(table: &Table) -> Result<usize> {
  let raw = table.cell(POINTER_ROW, POINTER_COLUMN).trim();
  match raw.parse::<usize>() {
    Ok(pointer) if pointer >= 1 => Ok(pointer),
    _ => Err(Error::InvalidPointer(raw.to_owned())),
  }
}
