//! Error types for `parkval-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The backend failed to open, read, save, or release a table.
  #[error("storage error: {0}")]
  Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("table not found: {}", .0.display())]
  NotFound(PathBuf),

  #[error("code pool {} is exhausted at pointer {pointer}", .path.display())]
  ExhaustedPool { path: PathBuf, pointer: usize },

  #[error("code pool pointer cell holds {0:?}, expected a positive row index")]
  InvalidPointer(String),

  #[error("code pool cannot be seeded with an empty code list")]
  EmptySeed,

  #[error("seed code {0} is blank")]
  BlankSeedCode(usize),

  #[error("table {} has no header row", .0.display())]
  MissingHeader(PathBuf),

  #[error("record is missing field {0:?}")]
  MissingField(String),

  #[error("record field {0:?} is not a column of the log")]
  UnknownField(String),

  #[error("{0} must not be blank")]
  BlankField(&'static str),
}

impl Error {
  /// Wrap a backend error as [`Error::Storage`].
  pub fn storage(err: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Storage(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
