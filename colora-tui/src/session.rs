//! Per-run session context shared by the screens.

use crate::color::Color;
use crate::model::AnalysisResult;

/// Created at startup, cleared on reset. Screens read it through [`crate::nav`]
/// guards instead of touching globals.
#[derive(Clone, Debug, Default)]
pub struct Session {
    captured: Option<Color>,
    analysis: Option<AnalysisResult>,
}

impl Session {
    pub fn captured(&self) -> Option<Color> {
        self.captured
    }

    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn capture(&mut self, color: Color) {
        self.captured = Some(color);
    }

    /// Store a finished analysis together with the color it was made for.
    pub fn complete(&mut self, base: Color, analysis: AnalysisResult) {
        self.captured = Some(base);
        self.analysis = Some(analysis);
    }

    pub fn reset(&mut self) {
        self.captured = None;
        self.analysis = None;
    }
}
