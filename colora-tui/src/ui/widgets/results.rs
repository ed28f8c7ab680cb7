//! Results: base color header, combination colors, palettes, risky picks.

use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::model::AnalysisResult;
use crate::state::{results_entries, ResultsEntry};
use crate::ui::markdown;
use crate::ui::theme::{colors, SWATCH_WIDTH};
use crate::ui::widgets::swatch::{chip, color_row, cursor, palette_bar, row_style, scroll_offset};

const PALETTE_BAR_WIDTH: usize = 36;

fn section(title: &str) -> Line<'static> {
    Line::from(Span::styled(
        title.to_uppercase(),
        Style::default().fg(colors::MUTED).add_modifier(Modifier::BOLD),
    ))
}

/// Body lines plus the index of the selected row's first line.
fn body_lines(analysis: &AnalysisResult, selected: usize) -> (Vec<Line<'static>>, usize) {
    let combos = analysis.combination_colors();
    let risky = analysis.risky_colors();
    let mut lines = Vec::new();
    let mut selected_line = 0;
    let mut last_section = None;

    for (row, entry) in results_entries(analysis).into_iter().enumerate() {
        let is_selected = row == selected;
        let kind = std::mem::discriminant(&entry);
        if last_section != Some(kind) {
            if last_section.is_some() {
                lines.push(Line::raw(""));
            }
            lines.push(section(match entry {
                ResultsEntry::Combination(_) => "Combination colors",
                ResultsEntry::Palette(_) => "Palettes",
                ResultsEntry::Risky(_) => "Risky picks",
            }));
            last_section = Some(kind);
        }
        if is_selected {
            selected_line = lines.len();
        }
        match entry {
            ResultsEntry::Combination(i) => lines.push(color_row(combos[i], is_selected)),
            ResultsEntry::Risky(i) => lines.push(color_row(risky[i], is_selected)),
            ResultsEntry::Palette(i) => {
                let palette = &analysis.palettes[i];
                lines.push(Line::from(vec![
                    cursor(is_selected),
                    Span::styled(palette.title.clone(), row_style(is_selected)),
                ]));
                let mut bar = vec![Span::raw("  ")];
                bar.extend(palette_bar(palette, PALETTE_BAR_WIDTH));
                lines.push(Line::from(bar));
                let shares: Vec<Span> = palette
                    .items
                    .iter()
                    .map(|item| {
                        Span::styled(
                            format!("  {} {:.0}%", item.color, item.percentage),
                            Style::default().fg(colors::MUTED),
                        )
                    })
                    .collect();
                lines.push(Line::from(shares));
                for desc in markdown::to_lines(&palette.description) {
                    let mut spans = vec![Span::raw("  ")];
                    spans.extend(desc.spans);
                    lines.push(Line::from(spans));
                }
            }
        }
    }
    (lines, selected_line)
}

pub fn render(f: &mut Frame, analysis: &AnalysisResult, selected: usize, area: ratatui::prelude::Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(3)])
        .split(area);

    let base = &analysis.base_color;
    let header = vec![
        Line::from(vec![
            chip(base.hex, SWATCH_WIDTH * 2),
            Span::styled(
                format!("  {}", base.name),
                Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            chip(base.hex, SWATCH_WIDTH * 2),
            Span::styled(format!("  {}  {}", base.hex, base.rgb), Style::default().fg(colors::TEXT_DIM)),
        ]),
    ];
    f.render_widget(Paragraph::new(header), rows[0]);

    let (lines, selected_line) = body_lines(analysis, selected);
    let height = rows[1].height as usize;
    let offset = scroll_offset(selected_line, lines.len(), height);
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
    f.render_widget(Paragraph::new(visible), rows[1]);
}
