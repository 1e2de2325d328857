//! TUI rendering. Orchestrates all panes.

pub mod form;
pub mod menu;
pub mod notice;

use chrono::Local;
use parkval_core::{Screen, TableStore, kiosk::DATE_FORMAT};
use ratatui::{
  Frame,
  layout::{Constraint, Direction, Layout, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Paragraph},
};

use crate::app::App;

// ─── Root draw ────────────────────────────────────────────────────────────────

/// Main draw function called each frame.
pub fn draw<S: TableStore>(f: &mut Frame, app: &App<S>) {
  let area = f.area();

  // Vertical stack: header, body, status bar.
  let rows = Layout::default()
    .direction(Direction::Vertical)
    .constraints([
      Constraint::Length(1), // header
      Constraint::Min(0),    // body
      Constraint::Length(1), // status bar
    ])
    .split(area);

  draw_header(f, rows[0], app);
  draw_body(f, rows[1], app);
  draw_status(f, rows[2], app);

  if let Some(notice) = &app.notice {
    notice::draw(f, area, notice);
  }
}

// ─── Header ───────────────────────────────────────────────────────────────────

fn draw_header<S: TableStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let date = Local::now().format(DATE_FORMAT).to_string();

  let left = Span::styled(
    " Parking Validations",
    Style::default()
      .fg(Color::White)
      .add_modifier(Modifier::BOLD),
  );

  let stock_style = if app.low_on_codes() {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::Gray)
  };
  let stock = Span::styled(
    match app.remaining {
      Some(n) => format!("codes left: {n}  "),
      None => "codes left: ?  ".to_string(),
    },
    stock_style,
  );
  let right = Span::styled(format!("{date} "), Style::default().fg(Color::Gray));

  // Simple left-right header: pad the middle.
  let pad = padding(area.width, &[&left, &stock, &right]);

  let line = Line::from(vec![left, Span::raw(" ".repeat(pad)), stock, right]);

  let block = Block::default().style(Style::default().bg(Color::DarkGray));
  let inner = block.inner(area);
  f.render_widget(block, area);
  f.render_widget(Paragraph::new(line), inner);
}

// ─── Body ─────────────────────────────────────────────────────────────────────

fn draw_body<S: TableStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  match &app.screen {
    Screen::MainMenu => menu::draw_main(f, area),
    Screen::DirectEntry => form::draw(f, area, &app.direct, "F2 I have a prepaid code"),
    Screen::PrepaidEntry => {
      form::draw(f, area, &app.prepaid, "F2 I don't have a prepaid code")
    }
    Screen::CodeDisplay { code } => menu::draw_code(f, area, code),
  }
}

// ─── Status bar ───────────────────────────────────────────────────────────────

fn draw_status<S: TableStore>(f: &mut Frame, area: Rect, app: &App<S>) {
  let (mode_label, hints) = match &app.screen {
    _ if app.notice.is_some() => ("NOTICE", "Enter/Esc dismiss"),
    Screen::MainMenu => ("WELCOME", "1 parking validation  2 temporary badge  q quit"),
    Screen::DirectEntry | Screen::PrepaidEntry => (
      "ENTRY",
      "Tab/↑↓ move  Enter submit  F2 switch form  Esc cancel",
    ),
    Screen::CodeDisplay { .. } => ("CODE", "t how to use  Enter return to start  n new code"),
  };

  let status = if app.status_msg.is_empty() {
    hints.to_string()
  } else {
    app.status_msg.clone()
  };

  let mode_span = Span::styled(
    format!(" {mode_label} "),
    Style::default()
      .fg(Color::Black)
      .bg(Color::Cyan)
      .add_modifier(Modifier::BOLD),
  );
  let hint_span = Span::styled(format!("  {status}"), Style::default().fg(Color::Gray));

  let line = Line::from(vec![mode_span, hint_span]);
  f.render_widget(
    Paragraph::new(line).style(Style::default().bg(Color::Black)),
    area,
  );
}

/// Columns left over once `spans` are laid out in `width` terminal cells.
fn padding(width: u16, spans: &[&Span]) -> usize {
  let used: usize = spans.iter().map(|s| s.width()).sum();
  usize::from(width).saturating_sub(used)
}

/// A `width` x `height` rectangle centred in `area`, clamped to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
  let width = width.min(area.width);
  let height = height.min(area.height);
  Rect {
    x: area.x + (area.width - width) / 2,
    y: area.y + (area.height - height) / 2,
    width,
    height,
  }
}
