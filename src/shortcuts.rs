//! Keyboard shortcuts for the board

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    NewTask,
    Refresh,
    ToggleFilters,
    ClearCompleted,
    ToggleHelp,
    Escape,
}

/// Map a keydown to a shortcut.
///
/// `typing` is true when focus is in an input, select or textarea. Nothing
/// but Escape fires while typing or while the task form is open.
pub fn shortcut_for(key: &str, shift: bool, typing: bool, form_open: bool) -> Option<Shortcut> {
    if key == "Escape" {
        return Some(Shortcut::Escape);
    }
    if typing || form_open {
        return None;
    }
    match key {
        "n" | "N" if !shift => Some(Shortcut::NewTask),
        "r" | "R" if !shift => Some(Shortcut::Refresh),
        "f" | "F" if !shift => Some(Shortcut::ToggleFilters),
        "C" | "c" if shift => Some(Shortcut::ClearCompleted),
        "?" => Some(Shortcut::ToggleHelp),
        _ => None,
    }
}

/// Rows for the help overlay
pub const HELP: [(&str, &str); 6] = [
    ("N", "New task"),
    ("R", "Refresh tasks"),
    ("F", "Toggle filters"),
    ("Shift + C", "Clear completed"),
    ("?", "Show this help"),
    ("Esc", "Close menus and dialogs"),
];
