//! The kiosk controller: wires form submissions to the log and the pool.

use std::{
  fs,
  io,
  path::{Path, PathBuf},
};

use chrono::NaiveDate;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
  Error, Result,
  log::{AppendOnlyLog, LogRecord},
  pool::SequentialCodeAllocator,
  screen::Action,
  store::TableStore,
};

/// Header of the direct-entry log.
pub const DIRECT_LOG_HEADER: [&str; 3] = ["Date", "ID", "Name"];
/// Header of the prepaid-code log.
pub const PREPAID_LOG_HEADER: [&str; 4] = ["Date", "Provider", "Guest", "Code"];
/// Codes a fresh pool is seeded with when none are configured.
pub const DEFAULT_SEED_CODES: [&str; 3] = ["CODE1", "CODE2", "CODE3"];
/// Format of the Date column: month/day/year.
pub const DATE_FORMAT: &str = "%m/%d/%Y";

// ─── Layout ──────────────────────────────────────────────────────────────────

/// Where the kiosk's tables live on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
  pub log_dir:     PathBuf,
  pub code_dir:    PathBuf,
  pub direct_log:  PathBuf,
  pub prepaid_log: PathBuf,
  pub code_pool:   PathBuf,
}

impl Layout {
  /// The standard layout under `data_dir`.
  pub fn under(data_dir: impl AsRef<Path>) -> Self {
    let data_dir = data_dir.as_ref();
    let log_dir = data_dir.join("employee_logs");
    let code_dir = data_dir.join("parking_codes");
    Self {
      direct_log: log_dir.join("parking_log.csv"),
      prepaid_log: log_dir.join("prepaid_log.csv"),
      code_pool: code_dir.join("parking_codes.csv"),
      log_dir,
      code_dir,
    }
  }

  /// Create the log and code directories if they are missing.
  pub fn create_dirs(&self) -> io::Result<()> {
    fs::create_dir_all(&self.log_dir)?;
    fs::create_dir_all(&self.code_dir)?;
    Ok(())
  }
}

// ─── Failure ─────────────────────────────────────────────────────────────────

/// A failed submission, classified by the step that failed.
#[derive(Debug, Error)]
pub enum Failure {
  /// The record was not saved. Nothing was written.
  #[error("error saving parking data: {0}")]
  Save(#[source] Error),

  /// The record was saved but no code could be issued.
  #[error("error generating parking code: {0}")]
  CodeGeneration(#[source] Error),
}

impl Failure {
  /// The screen action this failure corresponds to.
  pub fn into_action(self) -> Action {
    match self {
      Self::Save(e) => Action::SaveFailed(e.to_string()),
      Self::CodeGeneration(_) => Action::CodeGenerationFailed,
    }
  }

  /// The underlying core error.
  pub fn error(&self) -> &Error {
    match self {
      Self::Save(e) | Self::CodeGeneration(e) => e,
    }
  }
}

// ─── Kiosk ───────────────────────────────────────────────────────────────────

/// Handles the two kiosk forms against a [`TableStore`].
#[derive(Debug)]
pub struct Kiosk<S> {
  store:      S,
  layout:     Layout,
  seed_codes: Vec<String>,
}

impl<S: TableStore> Kiosk<S> {
  pub fn new(store: S, layout: Layout, seed_codes: Vec<String>) -> Self {
    Self { store, layout, seed_codes }
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn layout(&self) -> &Layout { &self.layout }

  fn log(&self) -> AppendOnlyLog<&S> { AppendOnlyLog::new(&self.store) }

  fn pool(&self) -> SequentialCodeAllocator<&S> { SequentialCodeAllocator::new(&self.store) }

  /// Log a visitor by name and ID, then issue the next code from the pool.
  pub fn submit_direct_entry(
    &self,
    date: NaiveDate,
    name: &str,
    id: &str,
  ) -> Result<String, Failure> {
    let name = non_blank("Name", name).map_err(Failure::Save)?;
    let id = non_blank("ID", id).map_err(Failure::Save)?;

    let record = LogRecord::new()
      .with("Date", date.format(DATE_FORMAT).to_string())
      .with("ID", id)
      .with("Name", name);
    self
      .append(&self.layout.direct_log, &DIRECT_LOG_HEADER, &record)
      .map_err(Failure::Save)?;

    self.next_code().map_err(Failure::CodeGeneration)
  }

  /// Log a prepaid-code visitor and hand their own code back. The pool is
  /// not touched.
  pub fn submit_prepaid(
    &self,
    date: NaiveDate,
    guest: &str,
    provider: &str,
    code: &str,
  ) -> Result<String, Failure> {
    let guest = non_blank("Guest", guest).map_err(Failure::Save)?;
    let provider = non_blank("Provider", provider).map_err(Failure::Save)?;
    let code = non_blank("Code", code).map_err(Failure::Save)?;

    let record = LogRecord::new()
      .with("Date", date.format(DATE_FORMAT).to_string())
      .with("Provider", provider)
      .with("Guest", guest)
      .with("Code", code);
    self
      .append(&self.layout.prepaid_log, &PREPAID_LOG_HEADER, &record)
      .map_err(Failure::Save)?;

    info!("recorded prepaid code");
    Ok(code.to_owned())
  }

  /// Codes left in the pool. A pool that has not been created yet reports
  /// its seed size.
  pub fn remaining_codes(&self) -> Result<usize> {
    match self.pool().remaining(&self.layout.code_pool) {
      Err(Error::NotFound(_)) => Ok(self.seed_codes.len()),
      other => other,
    }
  }

  /// Every direct-entry record logged so far.
  pub fn direct_entries(&self) -> Result<Vec<LogRecord>> {
    self.records(&self.layout.direct_log)
  }

  /// Every prepaid record logged so far.
  pub fn prepaid_entries(&self) -> Result<Vec<LogRecord>> {
    self.records(&self.layout.prepaid_log)
  }

  fn records(&self, path: &Path) -> Result<Vec<LogRecord>> {
    match self.log().records(path) {
      Err(Error::NotFound(_)) => Ok(Vec::new()),
      other => other,
    }
  }

  fn append(&self, path: &Path, header: &[&str], record: &LogRecord) -> Result<usize> {
    let log = self.log();
    log.ensure_created(path, header)?;
    log.append(path, record).inspect_err(|e| {
      warn!(path = %path.display(), error = %e, "failed to append log record");
    })
  }

  fn next_code(&self) -> Result<String> {
    let pool = self.pool();
    pool.ensure_seeded(&self.layout.code_pool, self.seed_codes.as_slice())?;
    pool.next(&self.layout.code_pool).inspect_err(|e| {
      warn!(error = %e, "failed to issue validation code");
    })
  }
}

fn non_blank<'a>(field: &'static str, value: &'a str) -> Result<&'a str> {
  let trimmed = value.trim();
  if trimmed.is_empty() {
    return Err(Error::BlankField(field));
  }
  Ok(trimmed)
}
