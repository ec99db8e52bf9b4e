//! Host input events.

use crate::run::utf16_len;

/// A `beforeinput`-style event from the host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputEvent {
    /// Plain text typed or pasted at the caret.
    InsertText(String),
    /// Anything that is not plain text (formatting commands, drops, ...).
    Other,
}

impl InputEvent {
    pub fn text(&self) -> Option<&str> {
        match self {
            InputEvent::InsertText(text) => Some(text),
            InputEvent::Other => None,
        }
    }
}

/// Whether a keydown should be swallowed before it reaches the editable
/// region. Named keys (`Enter`, `Backspace`, `ArrowLeft`, ...) are longer
/// than one UTF-16 unit; printable keys are a single unit.
pub fn is_suppressed_key(key: &str) -> bool {
    utf16_len(key) > 1
}
