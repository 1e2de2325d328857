//! Kiosk settings.
//!
//! Read from an optional TOML file, then `PARKVAL_*` environment variables;
//! command-line flags are applied on top by `main`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use parkval_core::kiosk::DEFAULT_SEED_CODES;
use serde::Deserialize;

/// Runtime kiosk configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct KioskConfig {
  /// Root for `employee_logs/` and `parking_codes/`. Defaults to the
  /// directory holding the executable.
  #[serde(default)]
  pub data_dir:          Option<PathBuf>,
  /// Codes a fresh pool is seeded with. Ignored once the pool file exists.
  #[serde(default = "default_seed_codes")]
  pub seed_codes:        Vec<String>,
  /// Where tracing output goes. Defaults to `<data_dir>/parkval.log`.
  #[serde(default)]
  pub log_file:          Option<PathBuf>,
  /// Show a low-stock hint once this few codes remain.
  #[serde(default = "default_low_stock_warning")]
  pub low_stock_warning: usize,
}

fn default_seed_codes() -> Vec<String> {
  DEFAULT_SEED_CODES.iter().map(|c| c.to_string()).collect()
}

fn default_low_stock_warning() -> usize { 5 }

impl Default for KioskConfig {
  fn default() -> Self {
    Self {
      data_dir:          None,
      seed_codes:        default_seed_codes(),
      log_file:          None,
      low_stock_warning: default_low_stock_warning(),
    }
  }
}

impl KioskConfig {
  /// Layer `file` (if present) under `PARKVAL_*` environment variables.
  pub fn load(file: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(file.to_path_buf()).required(false))
      .add_source(
        config::Environment::with_prefix("PARKVAL")
          .try_parsing(true)
          .list_separator(",")
          .with_list_parse_key("seed_codes"),
      )
      .build()
      .with_context(|| format!("failed to read config file {}", file.display()))?;

    settings
      .try_deserialize()
      .context("failed to deserialise KioskConfig")
  }

  /// The data directory, falling back to the executable's directory.
  pub fn resolve_data_dir(&self) -> Result<PathBuf> {
    if let Some(dir) = &self.data_dir {
      return Ok(expand_tilde(dir));
    }
    let exe = std::env::current_exe().context("locating the kiosk executable")?;
    Ok(
      exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")),
    )
  }

  /// The tracing log file for a kiosk rooted at `data_dir`.
  pub fn resolve_log_file(&self, data_dir: &Path) -> PathBuf {
    self
      .log_file
      .as_deref()
      .map(expand_tilde)
      .unwrap_or_else(|| data_dir.join("parkval.log"))
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
