// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Gesture shortcuts played on the keyboard.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::music::{ChordFingerprint, PitchClass};

/// A named key shape that acts as a command once all keys are released
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidiShortcut {
    /// Skip the current exercise: C, C♯, D♯ in any octave
    Skip,
}

impl MidiShortcut {
    /// All shortcuts
    pub const ALL: [MidiShortcut; 1] = [MidiShortcut::Skip];

    /// Shortcut name
    pub fn name(self) -> &'static str {
        match self {
            MidiShortcut::Skip => "skip",
        }
    }

    /// The pitch classes that make up the gesture
    pub fn pitch_classes(self) -> &'static [PitchClass] {
        match self {
            MidiShortcut::Skip => &[0, 1, 3],
        }
    }

    /// Fingerprint the pressed keys must match
    pub fn fingerprint(self) -> ChordFingerprint {
        ChordFingerprint::from_notes(self.pitch_classes().iter().copied())
    }

    /// Parse a shortcut from its name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "skip" => Some(MidiShortcut::Skip),
            _ => None,
        }
    }
}

impl fmt::Display for MidiShortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skip_fingerprint() {
        assert_eq!(MidiShortcut::Skip.fingerprint().as_str(), "0,1,3");
    }

    #[test]
    fn test_shortcut_names() {
        for shortcut in MidiShortcut::ALL {
            assert_eq!(MidiShortcut::from_str(shortcut.name()), Some(shortcut));
        }
        assert_eq!(MidiShortcut::from_str("undo"), None);
    }
}
