//! Entry forms for name/ID and prepaid code.

use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Modifier, Style},
  text::{Line, Span},
  widgets::{Block, Borders, Paragraph},
};

use super::centered;
use crate::app::Form;

const LABEL_WIDTH: usize = 14;

/// Render `form` into `area`, with `switch_hint` naming the other form.
pub fn draw(f: &mut Frame, area: Rect, form: &Form, switch_hint: &str) {
  let mut lines = vec![Line::from(form.prompt), Line::from("")];

  for (i, field) in form.fields.iter().enumerate() {
    let focused = i == form.focus;
    let label = format!("{:<width$}", format!("{}:", field.label), width = LABEL_WIDTH);
    let value_style = if focused {
      Style::default().fg(Color::White).bg(Color::Blue)
    } else {
      Style::default().fg(Color::White)
    };
    let cursor = if focused { "_" } else { "" };

    lines.push(Line::from(vec![
      Span::styled(label, Style::default().fg(Color::Gray)),
      Span::styled(format!("{}{cursor}", field.value), value_style),
    ]));
  }

  lines.push(Line::from(""));

  // The submit button stays dim until every field is filled in.
  let submit_style = if form.is_complete() {
    Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
  } else {
    Style::default().fg(Color::DarkGray)
  };
  lines.push(Line::from(vec![
    Span::styled("[Esc] Cancel", Style::default().fg(Color::Gray)),
    Span::raw("   "),
    Span::styled("[Enter] Submit", submit_style),
  ]));
  lines.push(Line::from(""));
  lines.push(Line::from(Span::styled(
    switch_hint.to_owned(),
    Style::default().fg(Color::Cyan),
  )));

  let height = lines.len() as u16 + 2;
  let panel = centered(area, 70, height);
  f.render_widget(
    Paragraph::new(lines).block(
      Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray)),
    ),
    panel,
  );
}
