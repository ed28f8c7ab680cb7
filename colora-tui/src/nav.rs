//! Screen flow: allowed moves between screens and their entry guards.

use crate::session::Session;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Screen {
    Welcome,
    Permission,
    Capture,
    Confirmation,
    Results,
    Explore,
    Saved,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Welcome => "Welcome",
            Screen::Permission => "Camera access",
            Screen::Capture => "Capture",
            Screen::Confirmation => "Adjust",
            Screen::Results => "Harmonies",
            Screen::Explore => "Explore",
            Screen::Saved => "Saved",
        }
    }

    /// Screens reachable from `self` by a user action.
    pub fn edges(&self) -> &'static [Screen] {
        use Screen::*;
        match self {
            Welcome => &[Permission, Saved, Explore],
            Permission => &[Capture, Welcome],
            Capture => &[Confirmation, Explore, Welcome],
            Confirmation => &[Results, Capture],
            Results => &[Capture, Saved, Welcome],
            Explore => &[Results, Welcome],
            Saved => &[Results, Welcome],
        }
    }

    pub fn can_reach(&self, to: Screen) -> bool {
        self.edges().contains(&to)
    }
}

/// Where a move from `from` to `to` actually lands.
///
/// Moves not on the edge list are refused and stay on `from`. Confirmation
/// needs a captured color and Results needs an analysis; without them the
/// flow falls back to Welcome.
pub fn resolve(from: Screen, to: Screen, session: &Session) -> Screen {
    if from != to && !from.can_reach(to) {
        tracing::debug!(?from, ?to, "navigation refused");
        return from;
    }
    guard(to, session)
}

/// Entry guard alone, for screens entered without a prior screen.
pub fn guard(to: Screen, session: &Session) -> Screen {
    let allowed = match to {
        Screen::Confirmation => session.captured().is_some(),
        Screen::Results => session.analysis().is_some(),
        _ => true,
    };
    if allowed {
        to
    } else {
        tracing::debug!(?to, "guard failed, redirecting to welcome");
        Screen::Welcome
    }
}
