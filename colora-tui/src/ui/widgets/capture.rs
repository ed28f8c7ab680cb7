//! Capture: live sample preview with a center reticle.

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph, Wrap},
    Frame,
};

use crate::state::AppState;
use crate::ui::layout::centered;
use crate::ui::theme::colors;
use crate::ui::widgets::swatch::ink;

pub fn render(f: &mut Frame, state: &AppState, area: ratatui::prelude::Rect, spinner_char: char) {
    if let Some(err) = &state.camera_error {
        let lines = vec![
            Line::from(Span::styled(
                "Camera unavailable",
                Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(err.as_str(), Style::default().fg(colors::TEXT_DIM))),
            Line::raw(""),
            Line::from(Span::styled(
                "Press o to pick a color from an image file.",
                Style::default().fg(colors::TEXT),
            )),
        ];
        let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
        f.render_widget(para, centered(area, 60, 6));
        return;
    }

    if !state.camera_on {
        let lines = vec![
            Line::from(Span::styled("Camera off", Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD))),
            Line::raw(""),
            Line::from(Span::styled(
                "Press o to pick a color from an image file, or Enter to use the camera.",
                Style::default().fg(colors::TEXT_DIM),
            )),
        ];
        let para = Paragraph::new(lines).alignment(Alignment::Center).wrap(Wrap { trim: true });
        f.render_widget(para, centered(area, 60, 5));
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(2)])
        .split(area);
    let view = chunks[0];

    let Some(color) = state.live_color else {
        let para = Paragraph::new(format!("{spinner_char} Waiting for the camera…"))
            .style(Style::default().fg(colors::MUTED))
            .alignment(Alignment::Center);
        f.render_widget(para, centered(view, view.width, 1));
        return;
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(colors::BORDER))
        .style(Style::default().bg(color.into()));
    f.render_widget(block, view);
    let reticle = Paragraph::new("+")
        .style(Style::default().fg(ink(color)).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(reticle, centered(view, view.width, 1));

    let label = Line::from(vec![
        Span::styled(color.to_string(), Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD)),
        Span::styled(format!("   {}", color.rgb_label()), Style::default().fg(colors::MUTED)),
    ]);
    f.render_widget(Paragraph::new(label).alignment(Alignment::Center), chunks[1]);
}
