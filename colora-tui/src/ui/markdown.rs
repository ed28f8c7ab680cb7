//! Palette descriptions to ratatui Lines: paragraphs, bold/emphasis, inline code, lists.

use pulldown_cmark::{Event, Options, Parser, Tag};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};

use super::theme::colors;

/// Convert a short markdown description to owned lines.
pub fn to_lines(md: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = Vec::new();
    let mut current: Vec<Span<'static>> = Vec::new();
    let mut bold = false;
    let mut list_depth: usize = 0;
    let mut ordered_index: Option<u64> = None;

    for event in Parser::new_ext(md, Options::empty()) {
        match event {
            Event::Start(Tag::List(start)) => {
                flush_spans(&mut current, &mut lines);
                list_depth += 1;
                ordered_index = start;
            }
            Event::End(Tag::List(_)) => {
                list_depth = list_depth.saturating_sub(1);
                if list_depth == 0 {
                    ordered_index = None;
                }
            }
            Event::Start(Tag::Item) => {
                let indent = "  ".repeat(list_depth.saturating_sub(1));
                let bullet = match ordered_index {
                    Some(idx) => {
                        ordered_index = Some(idx + 1);
                        format!("{indent}{idx}. ")
                    }
                    None => format!("{indent}• "),
                };
                current.push(Span::styled(bullet, Style::default().fg(colors::ACCENT)));
            }
            Event::End(Tag::Item) | Event::End(Tag::Paragraph) => {
                flush_spans(&mut current, &mut lines);
            }

            Event::Text(t) => {
                let style = if bold {
                    Style::default().fg(colors::TEXT).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(colors::TEXT_DIM)
                };
                current.push(Span::styled(t.to_string(), style));
            }
            Event::Code(t) => {
                current.push(Span::styled(
                    format!(" {t} "),
                    Style::default().fg(colors::ACCENT).bg(colors::CODE_BG),
                ));
            }

            Event::Start(Tag::Strong) | Event::Start(Tag::Emphasis) => bold = true,
            Event::End(Tag::Strong) | Event::End(Tag::Emphasis) => bold = false,

            Event::SoftBreak => current.push(Span::raw(" ")),
            Event::HardBreak => flush_spans(&mut current, &mut lines),

            _ => {}
        }
    }
    flush_spans(&mut current, &mut lines);
    lines
}

fn flush_spans(current: &mut Vec<Span<'static>>, lines: &mut Vec<Line<'static>>) {
    if !current.is_empty() {
        lines.push(Line::from(std::mem::take(current)));
    }
}
