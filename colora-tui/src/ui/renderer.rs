//! Frame render: header, the current screen, optional input bar, status.

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use crate::app::App;
use crate::nav::Screen;
use crate::ui::layout;
use crate::ui::theme::{colors, SPINNER};
use crate::ui::widgets::{
    render_capture, render_confirmation, render_explore, render_header, render_input,
    render_permission, render_results, render_saved, render_status, render_welcome,
};

pub fn render(f: &mut Frame, app: &App, tick: usize) {
    let area = f.area();
    f.render_widget(Block::default().style(Style::default().bg(colors::BG)), area);
    let regions = layout::compute(area, app.input_has_focus());
    let spinner_char = SPINNER[tick % SPINNER.len()];
    let state = &app.state;

    render_header(f, state.screen, regions.header);
    match state.screen {
        Screen::Welcome => render_welcome(f, regions.body),
        Screen::Permission => render_permission(f, regions.body),
        Screen::Capture => render_capture(f, state, regions.body, spinner_char),
        Screen::Confirmation => render_confirmation(f, app, regions.body, spinner_char),
        Screen::Results => {
            if let Some(analysis) = app.session.analysis() {
                render_results(f, analysis, state.results.selected, regions.body);
            }
        }
        Screen::Explore => render_explore(f, &state.explore, regions.body),
        Screen::Saved => render_saved(f, &state.saved, regions.body),
    }
    if let Some(input) = regions.input {
        render_input(f, &state.input, input);
    }
    render_status(f, state, regions.status, spinner_char);
}
