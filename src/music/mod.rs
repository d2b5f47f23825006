// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Music theory for chord recognition.
//!
//! This module provides note spelling, pitch-class fingerprints, chord
//! definitions and the chord dictionary.

pub mod chord;
pub mod dictionary;
pub mod fingerprint;
pub mod note;

pub use chord::{Chord, ChordKind, Interval};
pub use dictionary::ChordDictionary;
pub use fingerprint::{fingerprint, ChordFingerprint};
pub use note::{
    is_black_key, note_name, pitch_class, NameOptions, Note, NoteNumber, PitchClass, MAX_NOTE,
    UNKNOWN_NOTE,
};
