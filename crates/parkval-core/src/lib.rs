//! Core types for the parkval parking-validation kiosk.
//!
//! Two storage abstractions carry the kiosk: an [`AppendOnlyLog`] of visitor
//! records and a [`SequentialCodeAllocator`] handing out pre-seeded validation
//! codes. Both sit on the [`TableStore`] trait, so this crate is free of any
//! file-format dependency.

pub mod error;
pub mod kiosk;
pub mod log;
pub mod memory;
pub mod pool;
pub mod screen;
pub mod store;
pub mod table;

pub use error::{Error, Result};
pub use kiosk::{Failure, Kiosk, Layout};
pub use log::{AppendOnlyLog, LogRecord};
pub use memory::MemoryStore;
pub use pool::SequentialCodeAllocator;
pub use screen::{Action, Notice, Screen, Transition};
pub use store::TableStore;
pub use table::Table;
