//! CSV file backend for the parkval table store.
//!
//! Each table is one CSV file. Updates hold an advisory lock on a sidecar
//! `.lock` file and are saved through a temp file and a rename, so readers
//! never see a half-written table.

mod lock;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::CsvStore;
