//! Welcome screen and code display.

use ratatui::{
  Frame,
  layout::{Alignment, Rect},
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use super::centered;

/// Render the welcome screen into `area`.
pub fn draw_main(f: &mut Frame, area: Rect) {
  let lines = vec![
    Line::from(Span::styled(
      "Welcome!",
      Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    Line::from("Please select an option below."),
    Line::from(""),
    Line::from(vec![
      Span::styled("[1] ", Style::default().fg(Color::Cyan)),
      Span::raw("Parking Validation"),
      Span::raw("     "),
      Span::styled("[2] ", Style::default().fg(Color::Cyan)),
      Span::raw("Temporary Badge"),
    ]),
  ];

  let panel = centered(area, 60, 9);
  f.render_widget(
    Paragraph::new(lines)
      .alignment(Alignment::Center)
      .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray))),
    panel,
  );
}

/// Render the issued (or echoed) `code` into `area`.
pub fn draw_code(f: &mut Frame, area: Rect, code: &str) {
  let option = |key: &'static str, label: &'static str| {
    Line::from(vec![
      Span::styled(key, Style::default().fg(Color::Cyan)),
      Span::raw(label),
    ])
  };

  let lines = vec![
    Line::from("Your code!"),
    Line::from(""),
    Line::from(Span::styled(
      code.to_owned(),
      Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    )),
    Line::from(""),
    option("[t] ", "Learn more about how to use a Parking Validation Code"),
    option("[Enter] ", "Return to Start"),
    option("[n] ", "Code not working? Get a new one here."),
  ];

  let panel = centered(area, 64, 11);
  f.render_widget(
    Paragraph::new(lines)
      .alignment(Alignment::Center)
      .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray))),
    panel,
  );
}
