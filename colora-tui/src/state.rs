//! UI state: current screen, notices, text input, per-screen selections.

use crate::adjust::Adjustment;
use crate::color::Color;
use crate::model::{AnalysisResult, Palette};
use crate::nav::Screen;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
}

/// One-line message shown in the status bar.
#[derive(Clone, Debug)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn info(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Info, text: text.into() }
    }
    pub fn error(text: impl Into<String>) -> Self {
        Self { kind: NoticeKind::Error, text: text.into() }
    }
}

/// What the input bar is collecting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputPurpose {
    ImagePath,
    ExploreSearch,
}

#[derive(Clone, Debug, Default)]
pub struct InputState {
    pub purpose: Option<InputPurpose>,
    pub buffer: String,
    pub cursor: usize,
}

impl InputState {
    pub fn is_active(&self) -> bool {
        self.purpose.is_some()
    }

    pub fn open(&mut self, purpose: InputPurpose) {
        self.purpose = Some(purpose);
        self.buffer.clear();
        self.cursor = 0;
    }

    pub fn close(&mut self) {
        self.purpose = None;
    }

    pub fn insert(&mut self, c: char) {
        let pos = self.cursor.min(self.buffer.len());
        self.buffer.insert(pos, c);
        self.cursor = pos + c.len_utf8();
    }

    pub fn backspace(&mut self) {
        if self.cursor == 0 || self.cursor > self.buffer.len() {
            return;
        }
        if let Some((idx, _)) = self.buffer[..self.cursor].char_indices().next_back() {
            self.buffer.remove(idx);
            self.cursor = idx;
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Slider {
    #[default]
    Temperature,
    Brightness,
}

#[derive(Clone, Debug, Default)]
pub struct ConfirmState {
    pub adjustment: Adjustment,
    pub focus: Slider,
}

/// A selectable row on the results screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResultsEntry {
    Combination(usize),
    Palette(usize),
    Risky(usize),
}

/// Rows in display order: combination colors, palettes, risky colors.
pub fn results_entries(analysis: &AnalysisResult) -> Vec<ResultsEntry> {
    let combos = analysis.combination_colors().len();
    let risky = analysis.risky_colors().len();
    (0..combos)
        .map(ResultsEntry::Combination)
        .chain((0..analysis.palettes.len()).map(ResultsEntry::Palette))
        .chain((0..risky).map(ResultsEntry::Risky))
        .collect()
}

#[derive(Clone, Debug, Default)]
pub struct ResultsState {
    pub selected: usize,
}

#[derive(Clone, Debug)]
pub struct ExploreState {
    pub query: String,
    /// Indices into the catalog that match `query`.
    pub filtered: Vec<usize>,
    pub selected: usize,
    /// Open category and the highlighted color inside it.
    pub open: Option<usize>,
    pub color_index: usize,
}

impl Default for ExploreState {
    fn default() -> Self {
        Self {
            query: String::new(),
            filtered: crate::catalog::filter_categories(""),
            selected: 0,
            open: None,
            color_index: 0,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SavedTab {
    #[default]
    Colors,
    Palettes,
}

#[derive(Clone, Debug, Default)]
pub struct SavedState {
    pub tab: SavedTab,
    pub colors: Vec<Color>,
    pub palettes: Vec<Palette>,
    pub selected: usize,
}

impl SavedState {
    pub fn len(&self) -> usize {
        match self.tab {
            SavedTab::Colors => self.colors.len(),
            SavedTab::Palettes => self.palettes.len(),
        }
    }
}

/// Global UI state.
#[derive(Clone, Debug)]
pub struct AppState {
    pub screen: Screen,
    pub notice: Option<Notice>,
    pub input: InputState,
    /// Latest live sample on the capture screen.
    pub live_color: Option<Color>,
    /// Set when the camera could not be acquired on capture entry.
    pub camera_error: Option<String>,
    /// The live sampler is running.
    pub camera_on: bool,
    pub confirm: ConfirmState,
    pub results: ResultsState,
    pub explore: ExploreState,
    pub saved: SavedState,
    /// A palette request is in flight; its trigger is disabled.
    pub loading: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Welcome,
            notice: None,
            input: InputState::default(),
            live_color: None,
            camera_error: None,
            camera_on: false,
            confirm: ConfirmState::default(),
            results: ResultsState::default(),
            explore: ExploreState::default(),
            saved: SavedState::default(),
            loading: false,
        }
    }
}
