//! Permission: what the camera is used for, before it is opened.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::ui::layout::centered;
use crate::ui::theme::colors;

const BODY: &str = "Colora reads the center of each camera frame to find the color you are \
pointing at. Frames stay on this machine; only the hex code you confirm is sent \
for palette suggestions.";

pub fn render(f: &mut Frame, area: ratatui::prelude::Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Camera access",
            Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
        Line::from(Span::styled(BODY, Style::default().fg(colors::TEXT_DIM))),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Enter ", Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled("allow and continue", Style::default().fg(colors::TEXT)),
        ]),
        Line::from(vec![
            Span::styled("o     ", Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled("use an image file instead", Style::default().fg(colors::TEXT)),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER));
    let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: true });
    f.render_widget(para, centered(area, 64, 12));
}
