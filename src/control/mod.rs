// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Control input from the computer keyboard.

pub mod keyboard;

pub use keyboard::{format_key_row, KeyboardMidiInput, KEY_ROW, STICKY_KEY};

use crate::music::NoteNumber;

/// Outcome of a handled key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// Nothing to do
    None,
    /// A note was pressed, released or toggled
    Note(NoteNumber),
    /// Every held note was released
    ReleaseAll,
    /// Sticky mode was switched
    StickyChanged(bool),
    /// Leave the interactive loop
    Quit,
}

impl ControlAction {
    /// Whether held-key state may have changed
    pub fn changes_keys(&self) -> bool {
        matches!(self, ControlAction::Note(_) | ControlAction::ReleaseAll)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changes_keys() {
        assert!(ControlAction::Note(60).changes_keys());
        assert!(ControlAction::ReleaseAll.changes_keys());
        assert!(!ControlAction::StickyChanged(true).changes_keys());
        assert!(!ControlAction::Quit.changes_keys());
    }
}
