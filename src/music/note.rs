// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Note numbers, pitch classes and note-name spelling.

use std::fmt;

use serde::{Deserialize, Serialize};

/// MIDI note number type (0-127)
pub type NoteNumber = u8;

/// Pitch class type (0-11)
pub type PitchClass = u8;

/// Highest valid MIDI note number
pub const MAX_NOTE: NoteNumber = 127;

/// Display marker for note numbers outside the MIDI range
pub const UNKNOWN_NOTE: &str = "?";

const FLAT_NAMES: [&str; 12] = [
    "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B",
];

const SHARP_NAMES: [&str; 12] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

/// Reduce a note number to its pitch class
pub fn pitch_class(note: NoteNumber) -> PitchClass {
    note % 12
}

/// Whether a pitch class falls on a black piano key.
///
/// Shifting everything from F upwards by one makes the black keys exactly
/// the odd values.
pub fn is_black_key(pc: PitchClass) -> bool {
    let pc = pc % 12;
    let adjusted = if pc >= 5 { pc + 1 } else { pc };
    adjusted % 2 == 1
}

/// Spelling options for note and chord names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameOptions {
    /// Spell accidentals as sharps instead of flats
    #[serde(default)]
    pub sharps: bool,
    /// Use `#`/`b` instead of the Unicode accidentals
    #[serde(default)]
    pub ascii: bool,
    /// Append the octave number (MIDI note 60 is C4)
    #[serde(default)]
    pub with_octave_number: bool,
}

impl NameOptions {
    /// Options with sharp spelling
    pub fn sharps() -> Self {
        Self {
            sharps: true,
            ..Self::default()
        }
    }

    /// Return a copy with the given accidental preference
    pub fn with_sharps(mut self, sharps: bool) -> Self {
        self.sharps = sharps;
        self
    }

    /// Return a copy with ASCII accidentals
    pub fn with_ascii(mut self, ascii: bool) -> Self {
        self.ascii = ascii;
        self
    }

    /// Return a copy with octave numbers
    pub fn with_octave(mut self, with_octave_number: bool) -> Self {
        self.with_octave_number = with_octave_number;
        self
    }
}

/// Spell a note number.
///
/// Takes a wide integer so malformed device input can be displayed; anything
/// outside 0-127 renders as [`UNKNOWN_NOTE`].
pub fn note_name(note: i32, opts: NameOptions) -> String {
    if !(0..=MAX_NOTE as i32).contains(&note) {
        return UNKNOWN_NOTE.to_string();
    }

    let table = if opts.sharps { &SHARP_NAMES } else { &FLAT_NAMES };
    let mut name = table[(note % 12) as usize].to_string();

    if opts.ascii {
        name = name.replace('♭', "b").replace('♯', "#");
    }

    if opts.with_octave_number {
        let octave = note.div_euclid(12) - 1;
        name.push_str(&octave.to_string());
    }

    name
}

/// Note names (pitch classes)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Note {
    C,
    Cs, // C# / Db
    D,
    Ds, // D# / Eb
    E,
    F,
    Fs, // F# / Gb
    G,
    Gs, // G# / Ab
    A,
    As, // A# / Bb
    B,
}

impl Note {
    /// All notes in chromatic order
    pub const ALL: [Note; 12] = [
        Note::C,
        Note::Cs,
        Note::D,
        Note::Ds,
        Note::E,
        Note::F,
        Note::Fs,
        Note::G,
        Note::Gs,
        Note::A,
        Note::As,
        Note::B,
    ];

    /// Get the pitch class (0-11) for this note
    pub fn pitch_class(self) -> PitchClass {
        self as PitchClass
    }

    /// Get note from pitch class
    pub fn from_pitch_class(pc: PitchClass) -> Self {
        Note::ALL[(pc % 12) as usize]
    }

    /// Parse note from string (e.g., "C", "C#", "Db", "F♯")
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().replace('♯', "#").replace('♭', "b").to_uppercase();
        match s.as_str() {
            "C" | "B#" => Some(Note::C),
            "C#" | "CS" | "DB" => Some(Note::Cs),
            "D" => Some(Note::D),
            "D#" | "DS" | "EB" => Some(Note::Ds),
            "E" | "FB" => Some(Note::E),
            "F" | "E#" | "ES" => Some(Note::F),
            "F#" | "FS" | "GB" => Some(Note::Fs),
            "G" => Some(Note::G),
            "G#" | "GS" | "AB" => Some(Note::Gs),
            "A" => Some(Note::A),
            "A#" | "AS" | "BB" => Some(Note::As),
            "B" | "CB" => Some(Note::B),
            _ => None,
        }
    }

    /// Whether this note is a black key on the piano
    pub fn is_black_key(self) -> bool {
        is_black_key(self.pitch_class())
    }

    /// Spell this pitch class
    pub fn name(self, opts: NameOptions) -> String {
        note_name(
            self.pitch_class() as i32,
            NameOptions {
                with_octave_number: false,
                ..opts
            },
        )
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(NameOptions::default()))
    }
}
