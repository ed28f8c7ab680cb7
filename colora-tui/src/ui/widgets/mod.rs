//! TUI widgets: chrome (header, input, status) and one view per screen.

mod capture;
mod confirmation;
mod explore;
mod header;
mod input;
mod permission;
mod results;
mod saved;
mod status;
mod swatch;
mod welcome;

pub use capture::render as render_capture;
pub use confirmation::render as render_confirmation;
pub use explore::render as render_explore;
pub use header::render as render_header;
pub use input::render as render_input;
pub use permission::render as render_permission;
pub use results::render as render_results;
pub use saved::render as render_saved;
pub use status::render as render_status;
pub use welcome::render as render_welcome;
