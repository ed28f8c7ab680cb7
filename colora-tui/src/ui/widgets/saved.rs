//! Saved: colors and palettes tabs.

use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::state::{SavedState, SavedTab};
use crate::ui::theme::colors;
use crate::ui::widgets::swatch::{color_row, cursor, palette_bar, row_style, scroll_offset};

const PALETTE_BAR_WIDTH: usize = 24;

fn tab(label: String, active: bool) -> Span<'static> {
    if active {
        Span::styled(label, Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD | Modifier::UNDERLINED))
    } else {
        Span::styled(label, Style::default().fg(colors::MUTED))
    }
}

pub fn render(f: &mut Frame, saved: &SavedState, area: ratatui::prelude::Rect) {
    let mut lines = vec![
        Line::from(vec![
            tab(format!("Colors ({})", saved.colors.len()), saved.tab == SavedTab::Colors),
            Span::raw("    "),
            tab(format!("Palettes ({})", saved.palettes.len()), saved.tab == SavedTab::Palettes),
        ]),
        Line::raw(""),
    ];
    let first = lines.len();

    match saved.tab {
        SavedTab::Colors => {
            lines.extend(
                saved.colors.iter().enumerate().map(|(i, &c)| color_row(c, i == saved.selected)),
            );
        }
        SavedTab::Palettes => {
            for (i, palette) in saved.palettes.iter().enumerate() {
                let selected = i == saved.selected;
                let mut spans = vec![cursor(selected)];
                spans.extend(palette_bar(palette, PALETTE_BAR_WIDTH));
                spans.push(Span::styled(format!("  {}", palette.title), row_style(selected)));
                lines.push(Line::from(spans));
            }
        }
    }
    if saved.len() == 0 {
        let hint = match saved.tab {
            SavedTab::Colors => "No saved colors yet. Press s on a result to keep one.",
            SavedTab::Palettes => "No saved palettes yet. Select a palette in results and press s.",
        };
        lines.push(Line::from(Span::styled(hint, Style::default().fg(colors::MUTED))));
    }

    let height = area.height as usize;
    let offset = scroll_offset(first + saved.selected, lines.len(), height);
    let visible: Vec<Line> = lines.into_iter().skip(offset).take(height).collect();
    f.render_widget(Paragraph::new(visible), area);
}
