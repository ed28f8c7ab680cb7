//! Explore: searchable color families and a grid for the open one.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::catalog::{Category, CATEGORIES};
use crate::state::ExploreState;
use crate::ui::theme::colors;
use crate::ui::widgets::swatch::{chip, cursor, ink, row_style, scroll_offset};

const GRID_COLUMNS: usize = 3;
const CELL_WIDTH: usize = 14;

fn category_list(explore: &ExploreState) -> (Vec<Line<'static>>, usize) {
    let mut lines = vec![Line::from(vec![
        Span::styled("/ ", Style::default().fg(colors::ACCENT)),
        Span::styled(
            if explore.query.is_empty() { "search".to_string() } else { explore.query.clone() },
            Style::default().fg(if explore.query.is_empty() { colors::MUTED } else { colors::TEXT }),
        ),
    ])];
    lines.push(Line::raw(""));
    if explore.filtered.is_empty() {
        lines.push(Line::from(Span::styled(
            "No color family matches.",
            Style::default().fg(colors::MUTED),
        )));
        return (lines, 0);
    }
    let first = lines.len();
    for (row, &idx) in explore.filtered.iter().enumerate() {
        let cat = &CATEGORIES[idx];
        let selected = row == explore.selected;
        let mut spans = vec![cursor(selected), Span::styled(format!("{:<14}", cat.name), row_style(selected))];
        spans.extend(cat.colors.iter().map(|&c| chip(c, 3)));
        lines.push(Line::from(spans));
    }
    (lines, first + explore.selected)
}

fn category_grid(cat: &Category, highlighted: usize) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::from(Span::styled(
            cat.name,
            Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD),
        )),
        Line::raw(""),
    ];
    for (row, chunk) in cat.colors.chunks(GRID_COLUMNS).enumerate() {
        let mut fill = Vec::new();
        let mut labels = Vec::new();
        for (col, &color) in chunk.iter().enumerate() {
            let selected = row * GRID_COLUMNS + col == highlighted;
            fill.push(chip(color, CELL_WIDTH));
            fill.push(Span::raw("  "));
            let label = format!("{:^width$}", color.to_string(), width = CELL_WIDTH);
            let style = if selected {
                Style::default().bg(color.into()).fg(ink(color)).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors::TEXT_DIM)
            };
            labels.push(Span::styled(label, style));
            labels.push(Span::raw("  "));
        }
        lines.push(Line::from(fill.clone()));
        lines.push(Line::from(fill));
        lines.push(Line::from(labels));
        lines.push(Line::raw(""));
    }
    lines
}

pub fn render(f: &mut Frame, explore: &ExploreState, area: ratatui::prelude::Rect) {
    if let Some(cat) = explore.open.and_then(|i| CATEGORIES.get(i)) {
        f.render_widget(Paragraph::new(category_grid(cat, explore.color_index)), area);
        return;
    }
    let (lines, selected_line) = category_list(explore);
    let height = area.height as usize;
    let offset = scroll_offset(selected_line, lines.len(), height);
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
    f.render_widget(Paragraph::new(visible), area);
}
