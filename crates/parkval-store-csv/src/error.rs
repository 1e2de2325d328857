//! Error type for `parkval-store-csv`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("io error on {}: {source}", .path.display())]
  Io {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("csv error in {}: {source}", .path.display())]
  Csv {
    path:   PathBuf,
    #[source]
    source: csv::Error,
  },
}

impl Error {
  pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
    Self::Io { path: path.to_path_buf(), source }
  }

  pub(crate) fn csv(path: &std::path::Path, source: csv::Error) -> Self {
    Self::Csv { path: path.to_path_buf(), source }
  }
}

impl From<Error> for parkval_core::Error {
  fn from(err: Error) -> Self { parkval_core::Error::storage(err) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
