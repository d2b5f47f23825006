// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord recognition for keyboard practice.
//!
//! - [`music`]: note spelling, pitch-class fingerprints, chords and the chord
//!   dictionary
//! - [`midi`]: MIDI message parsing and the held-key context that reports
//!   chord matches and gesture shortcuts
//! - [`control`]: computer keyboard emulation of a MIDI keyboard
//! - [`config`]: user settings
//! - [`practice`]: random chord selection for practice mode

pub mod config;
pub mod control;
pub mod error;
pub mod midi;
pub mod music;
pub mod practice;

pub use error::{ChordError, SettingsError};
