//! Domain model for an analysis: base color identity, palettes, bold colors.

use serde::{Deserialize, Serialize};

use crate::color::Color;

/// How many distinct palette colors the results screen shows.
pub const MAX_COMBINATION_COLORS: usize = 8;
/// How many bold colors the results screen shows.
pub const MAX_RISKY_COLORS: usize = 4;

pub const EXPECTED_PALETTES: usize = 3;
pub const EXPECTED_BOLD_COLORS: usize = 4;

/// The AI-assigned identity of a base color.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColorData {
    pub hex: Color,
    pub name: String,
    pub rgb: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaletteItem {
    pub color: Color,
    /// Share of the palette. Producer-supplied; items need not sum to 100.
    pub percentage: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Palette {
    /// Also the de-duplication key for saved palettes.
    pub title: String,
    pub description: String,
    pub items: Vec<PaletteItem>,
}

impl Palette {
    /// Color used when a saved palette is sent back for analysis.
    pub fn lead_color(&self) -> Option<Color> {
        self.items.first().map(|i| i.color)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub base_color: ColorData,
    pub palettes: Vec<Palette>,
    pub bold_colors: Vec<Color>,
}

impl AnalysisResult {
    /// Distinct palette item colors in first-seen order, capped.
    pub fn combination_colors(&self) -> Vec<Color> {
        let mut out: Vec<Color> = Vec::new();
        for color in self.palettes.iter().flat_map(|p| p.items.iter().map(|i| i.color)) {
            if !out.contains(&color) {
                out.push(color);
            }
        }
        out.truncate(MAX_COMBINATION_COLORS);
        out
    }

    pub fn risky_colors(&self) -> &[Color] {
        let n = self.bold_colors.len().min(MAX_RISKY_COLORS);
        &self.bold_colors[..n]
    }
}
