//! Keybindings. Arrows/hjkl move, Enter acts, Esc goes back, q quits;
//! letters trigger per-screen shortcuts unless the input bar has focus.

use crate::actions::Action;
use crate::nav::Screen;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::Duration;

pub const TICK_RATE: Duration = Duration::from_millis(80);

pub fn key_to_action(event: &KeyEvent, screen: Screen, input_active: bool) -> Option<Action> {
    // Accept Press and Repeat (hold key); ignore Release so we don't double-handle.
    if event.kind == KeyEventKind::Release {
        return None;
    }
    let (code, mods) = (event.code, event.modifiers);

    if code == KeyCode::Char('c') && mods.contains(KeyModifiers::CONTROL) {
        return Some(Action::Cancel);
    }
    match code {
        KeyCode::Esc => return Some(Action::Back),
        KeyCode::Enter => return Some(Action::Submit),
        KeyCode::Backspace if input_active => return Some(Action::Backspace),
        _ => {}
    }

    if input_active {
        // Allow Alt for accented chars; only block Ctrl/Cmd.
        return match code {
            KeyCode::Char(c)
                if !mods.contains(KeyModifiers::CONTROL) && !mods.contains(KeyModifiers::SUPER) =>
            {
                Some(Action::Char(c))
            }
            _ => None,
        };
    }

    match code {
        KeyCode::Up | KeyCode::Char('k') => return Some(Action::Up),
        KeyCode::Down | KeyCode::Char('j') => return Some(Action::Down),
        KeyCode::Left | KeyCode::Char('h') => return Some(Action::Left),
        KeyCode::Right | KeyCode::Char('l') => return Some(Action::Right),
        KeyCode::Tab => return Some(Action::NextTab),
        KeyCode::Char('q') => return Some(Action::Quit),
        _ => {}
    }

    let KeyCode::Char(c) = code else {
        return None;
    };
    match (screen, c) {
        (Screen::Welcome, 's') => Some(Action::StartCapture),
        (Screen::Permission, 'o') | (Screen::Capture, 'o') => Some(Action::OpenImage),
        (Screen::Capture, ' ') => Some(Action::Submit),
        (Screen::Welcome, 'v') | (Screen::Results, 'v') => Some(Action::OpenSaved),
        (Screen::Welcome, 'e') | (Screen::Capture, 'e') => Some(Action::OpenExplore),
        (Screen::Explore, '/') => Some(Action::Search),
        (Screen::Confirmation, 'r') => Some(Action::ResetSliders),
        (Screen::Results, 'n') => Some(Action::NewCapture),
        (Screen::Results, 's') | (Screen::Explore, 's') => Some(Action::Save),
        (Screen::Results, 'c') | (Screen::Saved, 'c') => Some(Action::Copy),
        (Screen::Saved, 'd') => Some(Action::Delete),
        _ => None,
    }
}
