//! Input bar: image path or explore search.

use ratatui::{
    layout::Position,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
    Frame,
};

use crate::state::{InputPurpose, InputState};
use crate::ui::theme::colors;

fn prompt(purpose: Option<InputPurpose>) -> &'static str {
    match purpose {
        Some(InputPurpose::ImagePath) => " image path ▸ ",
        Some(InputPurpose::ExploreSearch) => " search ▸ ",
        None => " ▸ ",
    }
}

pub fn render(f: &mut Frame, input: &InputState, area: ratatui::prelude::Rect) {
    let prompt = prompt(input.purpose);
    let line = Line::from(vec![
        Span::styled(prompt, Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
        Span::styled(input.buffer.as_str(), Style::default().fg(colors::TEXT)),
    ]);
    let block = Block::default()
        .style(Style::default().bg(colors::ELEVATED))
        .borders(Borders::TOP)
        .border_style(Style::default().fg(colors::BORDER))
        .border_type(BorderType::Plain);
    let inner = block.inner(area);
    f.render_widget(block, area);
    f.render_widget(Paragraph::new(line), inner);

    let typed = input.buffer.get(..input.cursor).map(|s| s.chars().count()).unwrap_or(0);
    let cursor_x = inner.x + (prompt.chars().count() + typed) as u16;
    let x = cursor_x.min(inner.x + inner.width.saturating_sub(1));
    f.set_cursor_position(Position { x, y: inner.y });
}
