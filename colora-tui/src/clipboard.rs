//! Copy text to the host clipboard through the terminal (OSC 52).

use std::io::Write;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> std::io::Result<()>;
}

/// Emits `ESC ] 52 ; c ; <base64> BEL`; terminals that support it set the
/// system clipboard.
pub struct Osc52<W: Write> {
    out: W,
}

impl<W: Write> Osc52<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> Clipboard for Osc52<W> {
    fn copy(&mut self, text: &str) -> std::io::Result<()> {
        self.out.write_all(osc52_sequence(text).as_bytes())?;
        self.out.flush()
    }
}
