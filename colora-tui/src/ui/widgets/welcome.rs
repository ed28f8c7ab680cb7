//! Welcome: title, tagline, entry points.

use ratatui::{
    layout::Alignment,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::catalog::CATEGORIES;
use crate::ui::layout::centered;
use crate::ui::theme::colors;
use crate::ui::widgets::swatch::chip;

const MENU: [(&str, &str); 3] = [
    ("s", "Capture a color"),
    ("e", "Explore color families"),
    ("v", "Saved colors and palettes"),
];

pub fn render(f: &mut Frame, area: ratatui::prelude::Rect) {
    let strip: Vec<Span> = CATEGORIES.iter().take(6).map(|c| chip(c.colors[3], 4)).collect();

    let mut lines = vec![
        Line::from(strip),
        Line::raw(""),
        Line::from(Span::styled(
            "Colora",
            Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Point, capture, and get palettes that work with it.",
            Style::default().fg(colors::TEXT_DIM),
        )),
        Line::raw(""),
    ];
    for (key, label) in MENU {
        lines.push(Line::from(vec![
            Span::styled(format!("{key}  "), Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
            Span::styled(format!("{label:<26}"), Style::default().fg(colors::TEXT)),
        ]));
    }

    let height = lines.len() as u16;
    let para = Paragraph::new(lines).alignment(Alignment::Center);
    f.render_widget(para, centered(area, area.width, height));
}
