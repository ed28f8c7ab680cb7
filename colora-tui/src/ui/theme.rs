//! Theme: dark canvas so sampled swatches carry the color.

use ratatui::style::Color;

pub mod colors {
    use super::*;
    /// Main canvas.
    pub const BG: Color = Color::Rgb(0x18, 0x1c, 0x22);
    /// Header, input bar, status.
    pub const ELEVATED: Color = Color::Rgb(0x16, 0x1a, 0x1f);
    pub const BORDER: Color = Color::Rgb(0x2d, 0x34, 0x3e);
    /// Selection and focused slider.
    pub const ACCENT: Color = Color::Rgb(0x81, 0x8c, 0xf8);
    /// Selected row background.
    pub const ACCENT_GLOW: Color = Color::Rgb(0x23, 0x26, 0x3d);
    pub const TEXT: Color = Color::Rgb(0xf2, 0xf4, 0xf8);
    pub const TEXT_DIM: Color = Color::Rgb(0xbc, 0xc5, 0xd0);
    /// Hints.
    pub const MUTED: Color = Color::Rgb(0x94, 0x9e, 0xad);
    pub const CODE_BG: Color = Color::Rgb(0x1e, 0x24, 0x2e);
    pub const WARM: Color = Color::Rgb(0xf5, 0x9e, 0x0b);
    pub const COOL: Color = Color::Rgb(0x3b, 0x82, 0xf6);
    pub const ERROR: Color = Color::Rgb(0xf0, 0x6c, 0x6c);
}

pub const HEADER_HEIGHT: u16 = 2;
pub const INPUT_HEIGHT: u16 = 2;
pub const STATUS_HEIGHT: u16 = 1;
pub const MIN_BODY_LINES: u16 = 6;
/// Inner horizontal margin (chars each side).
pub const MARGIN_X: u16 = 2;
/// Width of a color chip in cells.
pub const SWATCH_WIDTH: usize = 6;
pub const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];
