//! Modal notice popup.

use parkval_core::Notice;
use ratatui::{
  Frame,
  layout::Rect,
  style::{Color, Style},
  text::Line,
  widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::centered;

/// Render `notice` as a box centred over `area`.
pub fn draw(f: &mut Frame, area: Rect, notice: &Notice) {
  let message = notice.message();
  let lines: Vec<Line> = message.lines().map(|l| Line::from(l.to_owned())).collect();

  let border = if notice.is_error() { Color::Red } else { Color::Cyan };
  let height = lines.len() as u16 + 4;
  let popup = centered(area, 72, height);

  f.render_widget(Clear, popup);
  f.render_widget(
    Paragraph::new(lines).wrap(Wrap { trim: false }).block(
      Block::default()
        .title(format!(" {} ", notice.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border)),
    ),
    popup,
  );
}
