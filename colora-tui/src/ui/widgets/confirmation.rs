//! Confirmation: original vs adjusted swatch and the two sliders.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color as TermColor, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::adjust::OFFSET_LIMIT;
use crate::app::App;
use crate::color::Color;
use crate::state::Slider;
use crate::ui::theme::colors;
use crate::ui::widgets::swatch::{chip, labeled_chip};

const TRACK_WIDTH: usize = 41;

/// Track with a knob at `value` in [-OFFSET_LIMIT, OFFSET_LIMIT].
fn track(value: i32, focused: bool) -> Vec<Span<'static>> {
    let span = 2 * OFFSET_LIMIT;
    let pos = ((value + OFFSET_LIMIT) as usize * (TRACK_WIDTH - 1)) / span as usize;
    let line = if focused { colors::TEXT_DIM } else { colors::BORDER };
    let knob = if focused { colors::ACCENT } else { colors::MUTED };
    vec![
        Span::styled("━".repeat(pos), Style::default().fg(line)),
        Span::styled("●", Style::default().fg(knob).add_modifier(Modifier::BOLD)),
        Span::styled("━".repeat(TRACK_WIDTH - 1 - pos), Style::default().fg(line)),
    ]
}

fn slider_line(
    label: &str,
    low: (&'static str, TermColor),
    high: (&'static str, TermColor),
    value: i32,
    focused: bool,
) -> Line<'static> {
    let label_style = if focused {
        Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::TEXT_DIM)
    };
    let mut spans = vec![
        Span::styled(if focused { "▸ " } else { "  " }, Style::default().fg(colors::ACCENT)),
        Span::styled(format!("{label:<12}"), label_style),
        Span::styled(format!("{:>5} ", low.0), Style::default().fg(low.1)),
    ];
    spans.extend(track(value, focused));
    spans.push(Span::styled(format!(" {:<5}", high.0), Style::default().fg(high.1)));
    spans.push(Span::styled(format!("{value:+4}"), label_style));
    Line::from(spans)
}

fn swatch_block(title: &str, color: Color) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(
        title.to_string(),
        Style::default().fg(colors::MUTED),
    ))];
    for _ in 0..3 {
        lines.push(Line::from(chip(color, 18)));
    }
    lines.push(Line::from(labeled_chip(color)));
    lines
}

pub fn render(f: &mut Frame, app: &App, area: ratatui::prelude::Rect, spinner_char: char) {
    let (Some(base), Some(adjusted)) = (app.session.captured(), app.adjusted_color()) else {
        return;
    };
    let confirm = &app.state.confirm;

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(6), Constraint::Length(1), Constraint::Min(4)])
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(22), Constraint::Min(22)])
        .split(rows[0]);
    f.render_widget(Paragraph::new(swatch_block("Captured", base)), cols[0]);
    let title = if confirm.adjustment.is_neutral() { "Unchanged" } else { "Adjusted" };
    f.render_widget(Paragraph::new(swatch_block(title, adjusted)), cols[1]);

    let mut lines = vec![
        slider_line(
            "Temperature",
            ("cool", colors::COOL),
            ("warm", colors::WARM),
            confirm.adjustment.temperature,
            confirm.focus == Slider::Temperature,
        ),
        Line::raw(""),
        slider_line(
            "Brightness",
            ("dark", colors::MUTED),
            ("light", colors::TEXT),
            confirm.adjustment.brightness,
            confirm.focus == Slider::Brightness,
        ),
        Line::raw(""),
    ];
    lines.push(if app.state.loading {
        Line::from(Span::styled(
            format!("{spinner_char} Harmonizing {adjusted}…"),
            Style::default().fg(colors::ACCENT),
        ))
    } else {
        Line::from(Span::styled(
            format!("Enter analyzes {adjusted}"),
            Style::default().fg(colors::TEXT_DIM),
        ))
    });
    f.render_widget(Paragraph::new(lines), rows[2]);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knob_at(value: i32) -> usize {
        track(value, true)[0].content.chars().count()
    }

    #[test]
    fn knob_spans_the_track() {
        assert_eq!(knob_at(-OFFSET_LIMIT), 0);
        assert_eq!(knob_at(0), TRACK_WIDTH / 2);
        assert_eq!(knob_at(OFFSET_LIMIT), TRACK_WIDTH - 1);
    }
}
