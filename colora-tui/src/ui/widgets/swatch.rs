//! Color chips and selectable rows shared by the screens.

use ratatui::style::{Color as TermColor, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::color::Color;
use crate::model::Palette;
use crate::ui::theme::{colors, SWATCH_WIDTH};

/// Readable text color on top of `color`.
pub fn ink(color: Color) -> TermColor {
    if color.luminance() > 0.55 {
        TermColor::Black
    } else {
        TermColor::White
    }
}

/// A solid block `width` cells wide.
pub fn chip(color: Color, width: usize) -> Span<'static> {
    Span::styled(" ".repeat(width), Style::default().bg(color.into()))
}

/// Chip with the hex code printed inside.
pub fn labeled_chip(color: Color) -> Span<'static> {
    Span::styled(
        format!(" {color} "),
        Style::default().bg(color.into()).fg(ink(color)).add_modifier(Modifier::BOLD),
    )
}

/// Marker column for list rows.
pub fn cursor(selected: bool) -> Span<'static> {
    Span::styled(if selected { "▎ " } else { "  " }, Style::default().fg(colors::ACCENT))
}

pub fn row_style(selected: bool) -> Style {
    if selected {
        Style::default().fg(colors::TEXT).bg(colors::ACCENT_GLOW).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(colors::TEXT_DIM)
    }
}

/// One color row: marker, chip, hex and rgb.
pub fn color_row(color: Color, selected: bool) -> Line<'static> {
    let style = row_style(selected);
    Line::from(vec![
        cursor(selected),
        chip(color, SWATCH_WIDTH),
        Span::styled(format!("  {color}"), style),
        Span::styled(format!("  {}", color.rgb_label()), Style::default().fg(colors::MUTED)),
    ])
}

/// Palette bar: each item's width follows its share of `width`.
pub fn palette_bar(palette: &Palette, width: usize) -> Vec<Span<'static>> {
    let total: f64 = palette.items.iter().map(|i| i.percentage.max(0.0)).sum();
    let mut spans = Vec::with_capacity(palette.items.len());
    let mut used = 0;
    for (i, item) in palette.items.iter().enumerate() {
        let cells = if i + 1 == palette.items.len() {
            width.saturating_sub(used)
        } else if total > 0.0 {
            ((item.percentage.max(0.0) / total) * width as f64).round() as usize
        } else {
            width / palette.items.len()
        };
        let cells = cells.max(1).min(width.saturating_sub(used).max(1));
        used += cells;
        spans.push(chip(item.color, cells));
    }
    spans
}

/// Keep `selected_line` in view: returns the first visible line.
pub fn scroll_offset(selected_line: usize, total: usize, height: usize) -> usize {
    if total <= height {
        return 0;
    }
    selected_line.saturating_sub(height / 2).min(total - height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::palette;

    #[test]
    fn ink_contrasts_with_background() {
        assert_eq!(ink(Color::new(255, 255, 255)), TermColor::Black);
        assert_eq!(ink(Color::new(0x1C, 0x19, 0x17)), TermColor::White);
    }

    #[test]
    fn palette_bar_fills_width_by_share() {
        let p = palette("Neutrals", &["#6366F1", "#F5F5F4", "#1C1917"]);
        let widths: Vec<usize> = palette_bar(&p, 20).iter().map(|s| s.content.len()).collect();
        assert_eq!(widths, [12, 6, 2]);
    }

    #[test]
    fn scroll_keeps_selection_visible() {
        assert_eq!(scroll_offset(3, 5, 10), 0);
        assert_eq!(scroll_offset(30, 40, 10), 25);
        assert_eq!(scroll_offset(39, 40, 10), 30);
    }
}
