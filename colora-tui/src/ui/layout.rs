//! Single-column layout: header, screen body, input bar, status.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use super::theme::{HEADER_HEIGHT, INPUT_HEIGHT, MARGIN_X, MIN_BODY_LINES, STATUS_HEIGHT};

#[derive(Clone, Debug)]
pub struct LayoutRegions {
    pub header: Rect,
    pub body: Rect,
    pub input: Option<Rect>,
    pub status: Rect,
}

/// The input bar only takes space while it has focus.
pub fn compute(area: Rect, input_open: bool) -> LayoutRegions {
    let input_height = if input_open { INPUT_HEIGHT } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(MIN_BODY_LINES),
            Constraint::Length(input_height),
            Constraint::Length(STATUS_HEIGHT),
        ])
        .split(area);
    let body = Rect {
        x: area.x + MARGIN_X,
        y: chunks[1].y,
        width: area.width.saturating_sub(2 * MARGIN_X),
        height: chunks[1].height,
    };
    LayoutRegions {
        header: chunks[0],
        body,
        input: input_open.then_some(chunks[2]),
        status: chunks[3],
    }
}

/// Centered box of at most `width` x `height` inside `area`.
pub fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect {
        x: area.x + (area.width - w) / 2,
        y: area.y + (area.height - h) / 2,
        width: w,
        height: h,
    }
}
