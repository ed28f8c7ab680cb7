//! Header: app name, current screen, version.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::nav::Screen;
use crate::ui::theme::colors;

const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn render(f: &mut Frame, screen: Screen, area: ratatui::prelude::Rect) {
    let left = vec![
        Span::styled(" ◐ ", Style::default().fg(colors::ACCENT)),
        Span::styled("Colora", Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD)),
        Span::styled("  ·  ", Style::default().fg(colors::BORDER)),
        Span::styled(screen.title(), Style::default().fg(colors::TEXT_DIM)),
    ];
    let version = format!("v{VERSION} ");
    let used: usize = left.iter().map(|s| s.content.chars().count()).sum();
    let pad = (area.width as usize).saturating_sub(used + version.chars().count());

    let mut spans = left;
    spans.push(Span::raw(" ".repeat(pad)));
    spans.push(Span::styled(version, Style::default().fg(colors::MUTED)));

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(colors::ELEVATED));
    let para = Paragraph::new(Line::from(spans)).block(block);
    f.render_widget(para, area);
}
