//! User actions.

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Esc: close input, leave category, or step back a screen.
    Back,
    /// Enter: the screen's primary action.
    Submit,
    /// Ctrl+C: stop honoring an in-flight palette request.
    Cancel,

    Up,
    Down,
    Left,
    Right,
    NextTab,

    Char(char),
    Backspace,

    StartCapture,
    OpenSaved,
    OpenExplore,
    OpenImage,
    Search,

    Save,
    Copy,
    Delete,
    NewCapture,
    ResetSliders,
}
