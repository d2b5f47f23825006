// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! MIDI input handling.
//!
//! Raw bytes are parsed into [`MidiMessage`]s, which drive the held-key
//! state in [`MidiContext`]. The context matches the held keys against the
//! chord dictionary and against [`MidiShortcut`] gestures.

pub mod context;
pub mod input;
pub mod shortcut;

pub use context::{ListenerId, MidiContext, Subscription};
pub use input::MidiMessage;
pub use shortcut::MidiShortcut;

/// MIDI message constants
pub mod messages {
    // Channel Voice Messages (upper nibble, lower nibble is channel 0-15)
    pub const NOTE_OFF: u8 = 0x80;
    pub const NOTE_ON: u8 = 0x90;
    pub const CONTROL_CHANGE: u8 = 0xB0;

    // Channel Mode controllers
    pub const ALL_SOUND_OFF: u8 = 120;
    pub const ALL_NOTES_OFF: u8 = 123;
}
