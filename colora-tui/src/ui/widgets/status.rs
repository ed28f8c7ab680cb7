//! Status bar: notice or spinner on the left, key hints on the right.

use ratatui::{
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::nav::Screen;
use crate::state::{AppState, NoticeKind};
use crate::ui::theme::colors;

/// Key hints for what the current screen accepts.
pub fn hints(state: &AppState) -> &'static str {
    if state.input.is_active() {
        return " Enter confirm  Esc cancel ";
    }
    match state.screen {
        Screen::Welcome => " s start  e explore  v saved  q quit ",
        Screen::Permission => " Enter allow camera  o open image  Esc back ",
        Screen::Capture if state.camera_error.is_some() => " o open image  e explore  Esc back ",
        Screen::Capture if !state.camera_on => " Enter use camera  o open image  Esc back ",
        Screen::Capture => " Space/Enter capture  o open image  Esc back ",
        Screen::Confirmation => " ↑↓ slider  ←→ adjust  r reset  Enter analyze  Esc back ",
        Screen::Results => " ↑↓ select  s save  c copy  n new  v saved  Esc home ",
        Screen::Explore if state.explore.open.is_some() => {
            " ←↑↓→ pick  Enter analyze  s save  Esc back "
        }
        Screen::Explore => " ↑↓ select  Enter open  / search  Esc home ",
        Screen::Saved => " Tab switch  ↑↓ select  Enter analyze  c copy  d delete  Esc home ",
    }
}

pub fn render(f: &mut Frame, state: &AppState, area: ratatui::prelude::Rect, spinner_char: char) {
    let (left, fg) = match (&state.notice, state.loading) {
        (Some(n), true) => (format!(" {spinner_char} {}", n.text), colors::ACCENT),
        (None, true) => (format!(" {spinner_char} Working…"), colors::ACCENT),
        (Some(n), false) if n.kind == NoticeKind::Error => (format!(" ✕ {}", n.text), colors::ERROR),
        (Some(n), false) => (format!(" {}", n.text), colors::TEXT_DIM),
        (None, false) => (" Ready".to_string(), colors::MUTED),
    };
    let right = hints(state);
    let width = area.width as usize;
    let right_len = right.chars().count();
    let left: String = left.chars().take(width.saturating_sub(right_len)).collect();
    let pad = width.saturating_sub(left.chars().count() + right_len);

    let line = Line::from(vec![
        Span::styled(left, Style::default().fg(fg)),
        Span::raw(" ".repeat(pad)),
        Span::styled(right, Style::default().fg(colors::MUTED)),
    ]);
    f.render_widget(Paragraph::new(line).style(Style::default().bg(colors::ELEVATED)), area);
}
