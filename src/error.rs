// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Error types for chord lookups and settings validation.

use thiserror::Error;

/// Errors raised by chord operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChordError {
    #[error("invalid inversion {inversion} for a chord of {note_count} notes")]
    InvalidInversion { inversion: usize, note_count: usize },

    #[error("unknown chord: {0}")]
    UnknownChord(String),
}

/// Errors raised when settings fail validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SettingsError {
    #[error("piano roll range is inverted: min {min} > max {max}")]
    InvertedPianoRoll { min: u8, max: u8 },

    #[error("note {0} is outside the MIDI range 0-127")]
    NoteOutOfRange(u8),

    #[error("keyboard base note {0} leaves no room for the emulated key row")]
    KeyboardOutOfRange(u8),
}
