//! `parkval`: terminal front end for the parking-validation kiosk.
//!
//! # Usage
//!
//! ```
//! parkval
//! parkval --config /etc/parkval/parkval.toml --data-dir /srv/kiosk
//! parkval --in-memory
//! ```

mod app;
mod settings;
mod ui;

use std::{
  fs::{self, OpenOptions},
  io,
  path::{Path, PathBuf},
  sync::Mutex,
  time::Duration,
};

use anyhow::{Context, Result};
use app::App;
use clap::Parser;
use crossterm::{
  event::{self, Event, KeyEventKind},
  execute,
  terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use parkval_core::{Kiosk, Layout, MemoryStore, TableStore};
use parkval_store_csv::CsvStore;
use ratatui::{Terminal, backend::CrosstermBackend};
use settings::KioskConfig;
use tracing::{info, level_filters::LevelFilter};
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "parkval", version, about = "Parking-validation kiosk")]
struct Args {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "parkval.toml")]
  config: PathBuf,

  /// Directory holding `employee_logs/` and `parking_codes/`.
  #[arg(long, value_name = "DIR")]
  data_dir: Option<PathBuf>,

  /// Keep every table in memory; no table files or directories are created.
  /// The log file is still written.
  #[arg(long)]
  in_memory: bool,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

fn main() -> Result<()> {
  let args = Args::parse();

  let mut cfg = KioskConfig::load(&args.config)?;
  // CLI flags override config file and environment.
  if let Some(dir) = args.data_dir {
    cfg.data_dir = Some(dir);
  }

  let data_dir = cfg.resolve_data_dir()?;
  let layout = prepare_layout(&data_dir, args.in_memory)?;

  init_tracing(&cfg.resolve_log_file(&data_dir))?;
  info!(data_dir = %data_dir.display(), in_memory = args.in_memory, "starting kiosk");

  let seed_codes = cfg.seed_codes.clone();
  if args.in_memory {
    run(App::new(Kiosk::new(MemoryStore::new(), layout, seed_codes), cfg.low_stock_warning))
  } else {
    run(App::new(Kiosk::new(CsvStore::new(), layout, seed_codes), cfg.low_stock_warning))
  }
}

/// The table layout under `data_dir`. Its directories are created unless the
/// tables live in memory.
fn prepare_layout(data_dir: &Path, in_memory: bool) -> Result<Layout> {
  let layout = Layout::under(data_dir);
  if !in_memory {
    layout
      .create_dirs()
      .with_context(|| format!("creating kiosk directories under {}", data_dir.display()))?;
  }
  Ok(layout)
}

/// Send tracing output to `log_file`; the terminal belongs to the UI.
fn init_tracing(log_file: &Path) -> Result<()> {
  if let Some(parent) = log_file.parent().filter(|p| !p.as_os_str().is_empty()) {
    fs::create_dir_all(parent)
      .with_context(|| format!("creating log directory {}", parent.display()))?;
  }
  let file = OpenOptions::new()
    .create(true)
    .append(true)
    .open(log_file)
    .with_context(|| format!("opening log file {}", log_file.display()))?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .init();
  Ok(())
}

/// Set up the terminal, run the event loop, and restore the terminal even on
/// error.
fn run<S: TableStore>(mut app: App<S>) -> Result<()> {
  info!(
    pool = %app.kiosk().layout().code_pool.display(),
    remaining = ?app.remaining,
    "kiosk ready"
  );
  enable_raw_mode().context("enabling raw mode")?;
  let mut stdout = io::stdout();
  execute!(stdout, EnterAlternateScreen).context("entering alternate screen")?;
  let backend = CrosstermBackend::new(stdout);
  let mut terminal = Terminal::new(backend).context("creating terminal")?;

  let run_result = run_event_loop(&mut terminal, &mut app);

  // Restore terminal regardless of result.
  disable_raw_mode().ok();
  execute!(terminal.backend_mut(), LeaveAlternateScreen).ok();
  terminal.show_cursor().ok();

  info!("kiosk stopped");
  run_result
}

// ─── Event loop ───────────────────────────────────────────────────────────────

fn run_event_loop<S: TableStore>(
  terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
  app: &mut App<S>,
) -> Result<()> {
  loop {
    terminal.draw(|f| ui::draw(f, app)).context("drawing frame")?;

    if !event::poll(Duration::from_millis(250)).context("polling terminal events")? {
      continue;
    }

    match event::read().context("reading terminal event")? {
      // Some platforms also report releases; act on presses only.
      Event::Key(key) if key.kind == KeyEventKind::Press => {
        if !app.handle_key(key) {
          break;
        }
      }
      Event::Resize(_, _) => {
        // Terminal will redraw on next iteration.
      }
      _ => {}
    }
  }

  Ok(())
}
