//! Global state container and action dispatch.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;

use crate::actions::Action;
use crate::analysis::{AnalysisError, AnalysisService};
use crate::catalog::{filter_categories, CATEGORIES};
use crate::clipboard::Clipboard;
use crate::color::Color;
use crate::model::{AnalysisResult, Palette};
use crate::nav::{self, Screen};
use crate::sampler::{sample_image_file, CameraDevice, LiveSampler};
use crate::session::Session;
use crate::state::{
    results_entries, AppState, ConfirmState, ExploreState, InputPurpose, Notice, ResultsEntry,
    ResultsState, SavedTab, Slider,
};
use crate::store::{Collections, KeyValueStore};

/// Slider movement per Left/Right press.
pub const SLIDER_STEP: i32 = 5;
/// Explore shows a category's colors three to a row.
const EXPLORE_COLUMNS: usize = 3;

/// External collaborators, injected so tests can swap in fakes.
pub struct Services {
    pub analysis: Arc<dyn AnalysisService>,
    pub camera: Box<dyn CameraDevice>,
    pub store: Box<dyn KeyValueStore>,
    pub clipboard: Box<dyn Clipboard>,
}

struct PendingAnalysis {
    id: u64,
    origin: Screen,
    cancel: CancellationToken,
}

struct AnalysisOutcome {
    id: u64,
    base: Color,
    result: Result<AnalysisResult, AnalysisError>,
}

/// Something on screen that can be saved or copied.
enum Pick {
    Color(Color),
    Palette(Palette),
}

pub struct App {
    pub state: AppState,
    pub session: Session,
    collections: Collections<Box<dyn KeyValueStore>>,
    analysis: Arc<dyn AnalysisService>,
    camera: Box<dyn CameraDevice>,
    clipboard: Box<dyn Clipboard>,
    runtime: Handle,
    sampler: Option<LiveSampler>,
    pending: Option<PendingAnalysis>,
    next_request: u64,
    outcomes_tx: mpsc::UnboundedSender<AnalysisOutcome>,
    outcomes_rx: mpsc::UnboundedReceiver<AnalysisOutcome>,
    pub should_quit: bool,
    /// For spinner animation (incremented each tick).
    pub tick: usize,
}

impl App {
    pub fn new(services: Services, runtime: Handle) -> Self {
        let (outcomes_tx, outcomes_rx) = mpsc::unbounded_channel();
        Self {
            state: AppState::default(),
            session: Session::default(),
            collections: Collections::new(services.store),
            analysis: services.analysis,
            camera: services.camera,
            clipboard: services.clipboard,
            runtime,
            sampler: None,
            pending: None,
            next_request: 0,
            outcomes_tx,
            outcomes_rx,
            should_quit: false,
            tick: 0,
        }
    }

    pub fn bootstrap(&mut self) {
        self.state.notice = Some(Notice::info(
            "Press s to start, e to explore, v for saved colors.",
        ));
    }

    pub fn input_has_focus(&self) -> bool {
        self.state.input.is_active()
    }

    /// Pull in background results: the live sample and finished analyses.
    pub fn poll_results(&mut self) {
        if let Some(sampler) = &self.sampler {
            self.state.live_color = sampler.current();
        }
        while let Ok(outcome) = self.outcomes_rx.try_recv() {
            self.apply_outcome(outcome);
        }
    }

    /// Move to `to`, subject to the flow's edges and guards.
    pub fn navigate(&mut self, to: Screen) {
        self.move_to(to, true);
    }

    /// Like [`navigate`](Self::navigate); `camera` is false when capture is
    /// entered to read an image file, which leaves the camera alone.
    fn move_to(&mut self, to: Screen, camera: bool) {
        let from = self.state.screen;
        let target = nav::resolve(from, to, &self.session);
        if target == from {
            return;
        }
        self.leave(from);
        tracing::debug!(?from, to = ?target, "screen change");
        self.state.screen = target;
        self.enter(target, camera);
    }

    fn leave(&mut self, screen: Screen) {
        self.state.input.close();
        if self.pending.as_ref().is_some_and(|p| p.origin == screen) {
            self.cancel_pending();
        }
        if screen == Screen::Capture {
            if let Some(sampler) = self.sampler.take() {
                sampler.stop();
            }
            self.state.live_color = None;
            self.state.camera_on = false;
        }
    }

    fn enter(&mut self, screen: Screen, camera: bool) {
        match screen {
            Screen::Capture if camera => self.start_camera(),
            Screen::Capture => self.state.camera_error = None,
            Screen::Confirmation => self.state.confirm = ConfirmState::default(),
            Screen::Results => self.state.results = ResultsState::default(),
            Screen::Explore => self.state.explore = ExploreState::default(),
            Screen::Saved => {
                self.state.saved.selected = 0;
                self.reload_saved();
            }
            Screen::Welcome | Screen::Permission => {}
        }
    }

    fn start_camera(&mut self) {
        self.state.camera_error = None;
        match LiveSampler::start(self.camera.as_ref(), &self.runtime) {
            Ok(sampler) => {
                self.sampler = Some(sampler);
                self.state.camera_on = true;
            }
            Err(e) => {
                tracing::warn!(error = %e, "camera unavailable, offering image file");
                self.state.notice = Some(Notice::error(format!("{e}. Press o to open an image.")));
                self.state.camera_error = Some(e.to_string());
            }
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            Action::Cancel => {
                if self.pending.is_some() {
                    self.cancel_pending();
                    self.state.notice = Some(Notice::info("Request cancelled."));
                }
                return;
            }
            _ => {}
        }

        if self.state.input.is_active() {
            self.dispatch_input(action);
            return;
        }

        match self.state.screen {
            Screen::Welcome => self.on_welcome(action),
            Screen::Permission => self.on_permission(action),
            Screen::Capture => self.on_capture(action),
            Screen::Confirmation => self.on_confirmation(action),
            Screen::Results => self.on_results(action),
            Screen::Explore => self.on_explore(action),
            Screen::Saved => self.on_saved(action),
        }
    }

    fn dispatch_input(&mut self, action: Action) {
        let purpose = self.state.input.purpose;
        match action {
            Action::Char(c) => self.state.input.insert(c),
            Action::Backspace => self.state.input.backspace(),
            Action::Back => {
                self.state.input.close();
                return;
            }
            Action::Submit => {
                match purpose {
                    Some(InputPurpose::ImagePath) => self.submit_image_path(),
                    Some(InputPurpose::ExploreSearch) | None => self.state.input.close(),
                }
                return;
            }
            _ => return,
        }
        if purpose == Some(InputPurpose::ExploreSearch) {
            let explore = &mut self.state.explore;
            explore.query = self.state.input.buffer.clone();
            explore.filtered = filter_categories(&explore.query);
            explore.selected = 0;
        }
    }

    fn submit_image_path(&mut self) {
        let raw = self.state.input.buffer.trim();
        if raw.is_empty() {
            return;
        }
        let path = expand_home(raw);
        match sample_image_file(&path) {
            Ok(color) => {
                self.state.input.close();
                self.session.capture(color);
                self.state.notice = None;
                self.navigate(Screen::Confirmation);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "image sampling failed");
                self.state.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    fn on_welcome(&mut self, action: Action) {
        match action {
            Action::StartCapture | Action::Submit => self.navigate(Screen::Permission),
            Action::OpenSaved => self.navigate(Screen::Saved),
            Action::OpenExplore => self.navigate(Screen::Explore),
            _ => {}
        }
    }

    fn on_permission(&mut self, action: Action) {
        match action {
            Action::Submit => self.navigate(Screen::Capture),
            Action::OpenImage => {
                self.move_to(Screen::Capture, false);
                self.state.input.open(InputPurpose::ImagePath);
            }
            Action::Back => self.navigate(Screen::Welcome),
            _ => {}
        }
    }

    fn on_capture(&mut self, action: Action) {
        match action {
            Action::Submit => match self.state.live_color {
                Some(color) => {
                    tracing::info!(%color, "captured live color");
                    self.session.capture(color);
                    self.navigate(Screen::Confirmation);
                }
                None if self.state.camera_error.is_some() => {
                    self.state.notice =
                        Some(Notice::error("Camera unavailable. Press o to open an image."));
                }
                None if !self.state.camera_on => self.start_camera(),
                None => self.state.notice = Some(Notice::info("Waiting for the first frame…")),
            },
            Action::OpenImage => self.state.input.open(InputPurpose::ImagePath),
            Action::OpenExplore => self.navigate(Screen::Explore),
            Action::Back => self.navigate(Screen::Welcome),
            _ => {}
        }
    }

    /// Base color with the current slider offsets applied.
    pub fn adjusted_color(&self) -> Option<Color> {
        self.session.captured().map(|c| self.state.confirm.adjustment.apply(c))
    }

    fn on_confirmation(&mut self, action: Action) {
        let confirm = &mut self.state.confirm;
        match action {
            Action::Up | Action::Down => {
                confirm.focus = match confirm.focus {
                    Slider::Temperature => Slider::Brightness,
                    Slider::Brightness => Slider::Temperature,
                };
            }
            Action::Left | Action::Right => {
                let step = if action == Action::Left { -SLIDER_STEP } else { SLIDER_STEP };
                match confirm.focus {
                    Slider::Temperature => confirm.adjustment.nudge_temperature(step),
                    Slider::Brightness => confirm.adjustment.nudge_brightness(step),
                }
            }
            Action::ResetSliders => confirm.adjustment = Default::default(),
            Action::Submit => {
                if let Some(color) = self.adjusted_color() {
                    self.start_analysis(color);
                }
            }
            Action::Back => self.navigate(Screen::Capture),
            _ => {}
        }
    }

    fn on_results(&mut self, action: Action) {
        let count = self.session.analysis().map(|a| results_entries(a).len()).unwrap_or(0);
        match action {
            Action::Up => self.state.results.selected = self.state.results.selected.saturating_sub(1),
            Action::Down => {
                if self.state.results.selected + 1 < count {
                    self.state.results.selected += 1;
                }
            }
            Action::Save => {
                if let Some(pick) = self.results_pick() {
                    self.save(pick);
                }
            }
            Action::Copy => {
                if let Some(pick) = self.results_pick() {
                    self.copy(pick);
                }
            }
            Action::NewCapture => {
                self.session.reset();
                self.navigate(Screen::Capture);
            }
            Action::OpenSaved => self.navigate(Screen::Saved),
            Action::Back => self.navigate(Screen::Welcome),
            _ => {}
        }
    }

    fn results_pick(&self) -> Option<Pick> {
        let analysis = self.session.analysis()?;
        let entry = *results_entries(analysis).get(self.state.results.selected)?;
        match entry {
            ResultsEntry::Combination(i) => analysis.combination_colors().get(i).copied().map(Pick::Color),
            ResultsEntry::Palette(i) => analysis.palettes.get(i).cloned().map(Pick::Palette),
            ResultsEntry::Risky(i) => analysis.risky_colors().get(i).copied().map(Pick::Color),
        }
    }

    fn on_explore(&mut self, action: Action) {
        let explore = &mut self.state.explore;
        if let Some(cat) = explore.open {
            let colors = &CATEGORIES[cat].colors;
            let last = colors.len() - 1;
            match action {
                Action::Left => explore.color_index = explore.color_index.saturating_sub(1),
                Action::Right => explore.color_index = (explore.color_index + 1).min(last),
                Action::Up => explore.color_index = explore.color_index.saturating_sub(EXPLORE_COLUMNS),
                Action::Down => {
                    explore.color_index = (explore.color_index + EXPLORE_COLUMNS).min(last)
                }
                Action::Submit => {
                    let color = colors[explore.color_index];
                    self.start_analysis(color);
                }
                Action::Save => {
                    let color = colors[explore.color_index];
                    self.save(Pick::Color(color));
                }
                Action::Back => explore.open = None,
                _ => {}
            }
            return;
        }

        match action {
            Action::Up => explore.selected = explore.selected.saturating_sub(1),
            Action::Down => {
                if explore.selected + 1 < explore.filtered.len() {
                    explore.selected += 1;
                }
            }
            Action::Submit => {
                if let Some(&cat) = explore.filtered.get(explore.selected) {
                    explore.open = Some(cat);
                    explore.color_index = 0;
                }
            }
            Action::Search => {
                let query = explore.query.clone();
                self.state.input.open(InputPurpose::ExploreSearch);
                for c in query.chars() {
                    self.state.input.insert(c);
                }
            }
            Action::Back => self.navigate(Screen::Welcome),
            _ => {}
        }
    }

    fn on_saved(&mut self, action: Action) {
        let len = self.state.saved.len();
        match action {
            Action::NextTab | Action::Left | Action::Right => {
                let saved = &mut self.state.saved;
                saved.tab = match saved.tab {
                    SavedTab::Colors => SavedTab::Palettes,
                    SavedTab::Palettes => SavedTab::Colors,
                };
                saved.selected = 0;
            }
            Action::Up => self.state.saved.selected = self.state.saved.selected.saturating_sub(1),
            Action::Down => {
                if self.state.saved.selected + 1 < len {
                    self.state.saved.selected += 1;
                }
            }
            Action::Submit => {
                if let Some(color) = self.saved_color() {
                    self.start_analysis(color);
                }
            }
            Action::Copy => {
                if let Some(color) = self.saved_color() {
                    self.copy(Pick::Color(color));
                }
            }
            Action::Delete => self.delete_saved(),
            Action::Back => self.navigate(Screen::Welcome),
            _ => {}
        }
    }

    /// Selected saved color, or the lead color of the selected palette.
    fn saved_color(&self) -> Option<Color> {
        let saved = &self.state.saved;
        match saved.tab {
            SavedTab::Colors => saved.colors.get(saved.selected).copied(),
            SavedTab::Palettes => saved.palettes.get(saved.selected).and_then(Palette::lead_color),
        }
    }

    fn delete_saved(&mut self) {
        let saved = &self.state.saved;
        let result = match saved.tab {
            SavedTab::Colors => match saved.colors.get(saved.selected) {
                Some(&color) => self.collections.remove_color(color).map(|_| ()),
                None => return,
            },
            SavedTab::Palettes => {
                if saved.selected >= saved.palettes.len() {
                    return;
                }
                self.collections.remove_palette(saved.selected).map(|_| ())
            }
        };
        if let Err(e) = result {
            tracing::error!(error = %e, "delete failed");
            self.state.notice = Some(Notice::error(format!("Could not delete: {e}")));
        }
        self.reload_saved();
    }

    fn reload_saved(&mut self) {
        let colors = self.collections.list_colors();
        let palettes = self.collections.list_palettes();
        match colors.and_then(|c| palettes.map(|p| (c, p))) {
            Ok((colors, palettes)) => {
                self.state.saved.colors = colors;
                self.state.saved.palettes = palettes;
            }
            Err(e) => {
                tracing::error!(error = %e, "could not load saved collections");
                self.state.notice = Some(Notice::error(format!("Could not load saved items: {e}")));
            }
        }
        let len = self.state.saved.len();
        if self.state.saved.selected >= len {
            self.state.saved.selected = len.saturating_sub(1);
        }
    }

    fn save(&mut self, pick: Pick) {
        let notice = match &pick {
            Pick::Color(color) => match self.collections.add_color(*color) {
                Ok(true) => Notice::info(format!("Saved {color}")),
                Ok(false) => Notice::info(format!("{color} is already saved")),
                Err(e) => Notice::error(format!("Could not save {color}: {e}")),
            },
            Pick::Palette(palette) => match self.collections.add_palette(palette) {
                Ok(true) => Notice::info(format!("Saved palette \"{}\"", palette.title)),
                Ok(false) => Notice::info(format!("\"{}\" is already saved", palette.title)),
                Err(e) => Notice::error(format!("Could not save palette: {e}")),
            },
        };
        self.state.notice = Some(notice);
    }

    fn copy(&mut self, pick: Pick) {
        let text = match pick {
            Pick::Color(color) => color.to_string(),
            Pick::Palette(palette) => palette
                .items
                .iter()
                .map(|i| i.color.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        };
        self.state.notice = Some(match self.clipboard.copy(&text) {
            Ok(()) => Notice::info(format!("Copied {text}")),
            Err(e) => Notice::error(format!("Could not copy: {e}")),
        });
    }

    /// Fire one palette request. Ignored while another is in flight.
    fn start_analysis(&mut self, base: Color) {
        if self.pending.is_some() {
            tracing::debug!(%base, "analysis already in flight, ignoring");
            return;
        }
        self.next_request += 1;
        let id = self.next_request;
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let service = Arc::clone(&self.analysis);
        let tx = self.outcomes_tx.clone();
        self.runtime.spawn(async move {
            let result = tokio::select! {
                _ = token.cancelled() => Err(AnalysisError::Cancelled),
                r = service.request_analysis(base) => r,
            };
            // A closed channel means the app is gone; nothing to report to.
            let _ = tx.send(AnalysisOutcome { id, base, result });
        });
        self.pending = Some(PendingAnalysis { id, origin: self.state.screen, cancel });
        self.state.loading = true;
        self.state.notice = Some(Notice::info(format!("Harmonizing {base}…")));
    }

    fn cancel_pending(&mut self) {
        if let Some(p) = self.pending.take() {
            tracing::info!(id = p.id, "cancelling palette request");
            p.cancel.cancel();
        }
        self.state.loading = false;
    }

    fn apply_outcome(&mut self, outcome: AnalysisOutcome) {
        if self.pending.as_ref().map(|p| p.id) != Some(outcome.id) {
            tracing::debug!(id = outcome.id, "dropping stale analysis result");
            return;
        }
        // Leaving the origin screen cancels, so a live id means it is still on screen.
        self.pending = None;
        self.state.loading = false;
        match outcome.result {
            Ok(analysis) => {
                tracing::info!(base = %outcome.base, name = %analysis.base_color.name, "analysis ready");
                self.session.complete(outcome.base, analysis);
                self.state.notice = None;
                self.navigate(Screen::Results);
            }
            Err(AnalysisError::Cancelled) => {}
            Err(e) => {
                tracing::warn!(base = %outcome.base, error = %e, "analysis failed");
                self.state.notice = Some(Notice::error(format!("{e}. Press Enter to try again.")));
            }
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.cancel_pending();
    }
}

fn expand_home(raw: &str) -> PathBuf {
    match raw.strip_prefix("~/") {
        Some(rest) => dirs::home_dir().map(|h| h.join(rest)).unwrap_or_else(|| PathBuf::from(raw)),
        None => PathBuf::from(raw),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::fakes::ScriptedService;
    use crate::analysis::parse_analysis;
    use crate::clipboard::fakes::RecordingClipboard;
    use crate::model::fixtures::{analysis, palette};
    use crate::sampler::fakes::{eventually, solid, FakeCamera};
    use crate::sampler::NoCamera;
    use crate::store::fakes::MemoryStore;
    use crate::store::{SAVED_COLORS_KEY, SAVED_PALETTES_KEY};
    use std::time::Duration;
    use tokio::sync::Notify;

    struct Harness {
        app: App,
        service: Arc<ScriptedService>,
        clipboard: RecordingClipboard,
    }

    fn harness_with(
        service: ScriptedService,
        camera: Box<dyn CameraDevice>,
        store: MemoryStore,
    ) -> Harness {
        let service = Arc::new(service);
        let clipboard = RecordingClipboard::default();
        let app = App::new(
            Services {
                analysis: service.clone(),
                camera,
                store: Box::new(store),
                clipboard: Box::new(clipboard.clone()),
            },
            Handle::current(),
        );
        Harness { app, service, clipboard }
    }

    fn harness(service: ScriptedService) -> Harness {
        let camera = FakeCamera::showing(solid(4, 4, [0x63, 0x66, 0xF1]));
        harness_with(service, Box::new(camera), MemoryStore::default())
    }

    /// Polls the app until `done` holds or about two seconds pass.
    async fn settle(app: &mut App, done: impl Fn(&App) -> bool) -> bool {
        for _ in 0..200 {
            app.poll_results();
            if done(app) {
                return true;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        false
    }

    /// Walks Welcome -> Explore -> first category -> first color -> Results.
    async fn on_results(h: &mut Harness) {
        h.app.dispatch(Action::OpenExplore);
        h.app.dispatch(Action::Submit);
        h.app.dispatch(Action::Submit);
        assert!(settle(&mut h.app, |a| a.state.screen == Screen::Results).await);
    }

    #[tokio::test]
    async fn capture_confirm_and_analyze() {
        let camera = FakeCamera::showing(solid(4, 4, [0x63, 0x66, 0xF1]));
        let mut h = harness_with(
            ScriptedService::replying([Ok(analysis("#6366F1"))]),
            Box::new(camera.clone()),
            MemoryStore::default(),
        );
        h.app.dispatch(Action::StartCapture);
        assert_eq!(h.app.state.screen, Screen::Permission);
        h.app.dispatch(Action::Submit);
        assert_eq!(h.app.state.screen, Screen::Capture);
        assert_eq!(camera.acquired(), 1);
        assert!(settle(&mut h.app, |a| a.state.live_color.is_some()).await);

        h.app.dispatch(Action::Submit);
        assert_eq!(h.app.state.screen, Screen::Confirmation);
        assert!(eventually(|| camera.released() == 1).await);

        h.app.dispatch(Action::Submit);
        assert!(h.app.state.loading);
        h.app.dispatch(Action::Submit);
        assert!(settle(&mut h.app, |a| a.state.screen == Screen::Results).await);
        assert_eq!(h.service.calls(), 1);
        assert!(!h.app.state.loading);
        let a = h.app.session.analysis().unwrap();
        assert_eq!(a.base_color.hex.to_string(), "#6366F1");
        assert_eq!(a.palettes.len(), 3);
        assert_eq!(a.bold_colors.len(), 4);
    }

    #[tokio::test]
    async fn sliders_change_the_requested_color() {
        let mut h = harness(ScriptedService::default());
        h.app.dispatch(Action::StartCapture);
        h.app.dispatch(Action::Submit);
        assert!(settle(&mut h.app, |a| a.state.live_color.is_some()).await);
        h.app.dispatch(Action::Submit);

        h.app.dispatch(Action::Down);
        for _ in 0..10 {
            h.app.dispatch(Action::Right);
        }
        assert_eq!(h.app.state.confirm.adjustment.brightness, 50);
        assert_eq!(h.app.adjusted_color().unwrap(), Color::new(0x63 + 80, 0x66 + 80, 255));
        h.app.dispatch(Action::ResetSliders);
        assert_eq!(h.app.adjusted_color().unwrap().to_string(), "#6366F1");
    }

    #[tokio::test]
    async fn malformed_response_keeps_screen_and_allows_retry() {
        let bad = parse_analysis("<html>502</html>");
        let mut h = harness(ScriptedService::replying([bad, Ok(analysis("#6366F1"))]));
        h.app.dispatch(Action::StartCapture);
        h.app.dispatch(Action::Submit);
        assert!(settle(&mut h.app, |a| a.state.live_color.is_some()).await);
        h.app.dispatch(Action::Submit);

        h.app.dispatch(Action::Submit);
        assert!(settle(&mut h.app, |a| !a.state.loading).await);
        assert_eq!(h.app.state.screen, Screen::Confirmation);
        assert!(h.app.session.analysis().is_none());
        let notice = h.app.state.notice.clone().unwrap();
        assert_eq!(notice.kind, crate::state::NoticeKind::Error);

        h.app.dispatch(Action::Submit);
        assert!(settle(&mut h.app, |a| a.state.screen == Screen::Results).await);
        assert_eq!(h.service.calls(), 2);
    }

    #[tokio::test]
    async fn leaving_the_screen_drops_the_late_result() {
        let gate = Arc::new(Notify::new());
        let service = ScriptedService::replying([Ok(analysis("#FFB7B2"))]).gated(gate.clone());
        let mut h = harness(service);
        h.app.dispatch(Action::OpenExplore);
        h.app.dispatch(Action::Submit);
        h.app.dispatch(Action::Submit);
        assert!(h.app.state.loading);

        h.app.dispatch(Action::Back); // close category
        h.app.dispatch(Action::Back); // leave Explore
        assert_eq!(h.app.state.screen, Screen::Welcome);
        assert!(!h.app.state.loading);

        gate.notify_one();
        settle(&mut h.app, |_| false).await;
        assert_eq!(h.app.state.screen, Screen::Welcome);
        assert!(h.app.session.analysis().is_none());
    }

    #[tokio::test]
    async fn ctrl_c_cancels_in_flight_request() {
        let gate = Arc::new(Notify::new());
        let service = ScriptedService::replying([Ok(analysis("#FFB7B2"))]).gated(gate);
        let mut h = harness(service);
        h.app.dispatch(Action::OpenExplore);
        h.app.dispatch(Action::Submit);
        h.app.dispatch(Action::Submit);
        h.app.dispatch(Action::Cancel);
        assert!(!h.app.state.loading);
        settle(&mut h.app, |_| false).await;
        assert_eq!(h.app.state.screen, Screen::Explore);
    }

    #[tokio::test]
    async fn results_guard_redirects_to_welcome() {
        let mut h = harness(ScriptedService::default());
        h.app.navigate(Screen::Explore);
        h.app.navigate(Screen::Results);
        assert_eq!(h.app.state.screen, Screen::Welcome);
    }

    #[tokio::test]
    async fn missing_camera_falls_back_to_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swatch.png");
        solid(6, 6, [0x12, 0x34, 0x56]).save(&path).unwrap();

        let mut h = harness_with(ScriptedService::default(), Box::new(NoCamera), MemoryStore::default());
        h.app.dispatch(Action::StartCapture);
        h.app.dispatch(Action::Submit);
        assert_eq!(h.app.state.screen, Screen::Capture);
        assert!(h.app.state.camera_error.is_some());

        h.app.dispatch(Action::Submit);
        assert_eq!(h.app.state.screen, Screen::Capture);

        h.app.dispatch(Action::OpenImage);
        assert!(h.app.input_has_focus());
        for c in path.to_string_lossy().chars() {
            h.app.dispatch(Action::Char(c));
        }
        h.app.dispatch(Action::Submit);
        assert_eq!(h.app.state.screen, Screen::Confirmation);
        assert_eq!(h.app.session.captured().unwrap().to_string(), "#123456");
    }

    #[tokio::test]
    async fn bad_image_path_reports_and_stays() {
        let mut h = harness(ScriptedService::default());
        h.app.dispatch(Action::StartCapture);
        h.app.dispatch(Action::OpenImage);
        assert_eq!(h.app.state.screen, Screen::Capture);
        for c in "/no/such/file.png".chars() {
            h.app.dispatch(Action::Char(c));
        }
        h.app.dispatch(Action::Submit);
        assert_eq!(h.app.state.screen, Screen::Capture);
        assert!(h.app.input_has_focus());
        assert!(h.app.session.captured().is_none());
    }

    #[tokio::test]
    async fn image_entry_from_permission_leaves_camera_off() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("swatch.png");
        solid(6, 6, [0xAB, 0xCD, 0xEF]).save(&path).unwrap();

        let camera = FakeCamera::showing(solid(4, 4, [0x63, 0x66, 0xF1]));
        let mut h = harness_with(ScriptedService::default(), Box::new(camera.clone()), MemoryStore::default());
        h.app.dispatch(Action::StartCapture);
        h.app.dispatch(Action::OpenImage);
        assert_eq!(h.app.state.screen, Screen::Capture);
        assert!(h.app.input_has_focus());
        assert!(!h.app.state.camera_on);
        assert_eq!(camera.acquired(), 0);

        for c in path.to_string_lossy().chars() {
            h.app.dispatch(Action::Char(c));
        }
        h.app.dispatch(Action::Submit);
        assert_eq!(h.app.state.screen, Screen::Confirmation);
        assert_eq!(h.app.session.captured().unwrap().to_string(), "#ABCDEF");
        assert_eq!(camera.acquired(), 0);
    }

    #[tokio::test]
    async fn camera_can_be_turned_on_after_image_entry() {
        let camera = FakeCamera::showing(solid(4, 4, [0x63, 0x66, 0xF1]));
        let mut h = harness_with(ScriptedService::default(), Box::new(camera.clone()), MemoryStore::default());
        h.app.dispatch(Action::StartCapture);
        h.app.dispatch(Action::OpenImage);
        h.app.dispatch(Action::Back); // close the path prompt
        assert_eq!(h.app.state.screen, Screen::Capture);

        h.app.dispatch(Action::Submit);
        assert!(h.app.state.camera_on);
        assert_eq!(camera.acquired(), 1);
        assert!(settle(&mut h.app, |a| a.state.live_color.is_some()).await);
    }

    #[tokio::test]
    async fn failed_reanalysis_from_saved_keeps_previous_results() {
        let bad = parse_analysis("<html>502 Bad Gateway</html>");
        let mut h = harness(ScriptedService::replying([Ok(analysis("#6366F1")), bad]));
        on_results(&mut h).await;
        let before = h.app.session.analysis().cloned().unwrap();
        let captured = h.app.session.captured();
        assert_eq!(captured.unwrap().to_string(), "#FFB7B2");

        h.app.dispatch(Action::Save);
        h.app.dispatch(Action::OpenSaved);
        assert_eq!(h.app.state.screen, Screen::Saved);
        h.app.dispatch(Action::Submit);
        assert!(h.app.state.loading);
        assert!(settle(&mut h.app, |a| !a.state.loading).await);

        assert_eq!(h.service.calls(), 2);
        assert_eq!(h.app.state.screen, Screen::Saved);
        assert_eq!(h.app.session.analysis(), Some(&before));
        assert_eq!(h.app.session.captured(), captured);
        assert_eq!(h.app.state.notice.as_ref().map(|n| n.kind), Some(crate::state::NoticeKind::Error));
    }

    #[tokio::test]
    async fn results_save_copy_and_reset() {
        let mut h = harness(ScriptedService::replying([Ok(analysis("#6366F1"))]));
        on_results(&mut h).await;

        h.app.dispatch(Action::Save);
        h.app.dispatch(Action::Save);
        h.app.dispatch(Action::Copy);
        assert_eq!(h.clipboard.0.lock().unwrap().as_slice(), ["#6366F1"]);

        // Jump to the first palette row (after the 7 combination colors).
        for _ in 0..7 {
            h.app.dispatch(Action::Down);
        }
        h.app.dispatch(Action::Save);

        assert_eq!(h.app.collections.list_colors().unwrap().len(), 1);
        assert_eq!(h.app.collections.list_palettes().unwrap()[0].title, "Neutrals");

        h.app.dispatch(Action::NewCapture);
        assert_eq!(h.app.state.screen, Screen::Capture);
        assert!(h.app.session.analysis().is_none());
        assert!(h.app.session.captured().is_none());
    }

    #[tokio::test]
    async fn saved_screen_lists_deletes_and_analyzes() {
        let store = MemoryStore::default();
        store.set(SAVED_COLORS_KEY, r##"["#111111","#222222"]"##).unwrap();
        let p = serde_json::to_string(&[palette("Warm", &["#AA0000", "#00AA00"])]).unwrap();
        store.set(SAVED_PALETTES_KEY, &p).unwrap();
        let mut h = harness_with(
            ScriptedService::replying([Ok(analysis("#AA0000"))]),
            Box::new(NoCamera),
            store,
        );

        h.app.dispatch(Action::OpenSaved);
        assert_eq!(h.app.state.saved.colors.len(), 2);
        h.app.dispatch(Action::Delete);
        assert_eq!(h.app.state.saved.colors, vec!["#222222".parse::<Color>().unwrap()]);

        h.app.dispatch(Action::NextTab);
        h.app.dispatch(Action::Submit);
        assert!(settle(&mut h.app, |a| a.state.screen == Screen::Results).await);
        assert_eq!(h.app.session.captured().unwrap().to_string(), "#AA0000");
    }

    #[tokio::test]
    async fn explore_search_filters_categories() {
        let mut h = harness(ScriptedService::default());
        h.app.dispatch(Action::OpenExplore);
        h.app.dispatch(Action::Search);
        for c in "ocean".chars() {
            h.app.dispatch(Action::Char(c));
        }
        h.app.dispatch(Action::Submit);
        assert!(!h.app.input_has_focus());
        let first = h.app.state.explore.filtered[0];
        assert_eq!(CATEGORIES[first].name, "Ocean");

        h.app.dispatch(Action::Submit);
        h.app.dispatch(Action::Right);
        h.app.dispatch(Action::Save);
        assert_eq!(h.app.collections.list_colors().unwrap(), vec![CATEGORIES[first].colors[1]]);
    }
}
