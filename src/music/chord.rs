// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Chord kinds and chord values.
//!
//! A [`Chord`] is a root plus a [`ChordKind`]; its root-position notes are
//! built by stacking the kind's interval template on the root. Inversions
//! are expressed as relative shapes (lowest note = 0) so they can be compared
//! against whatever voicing is being held on the keyboard.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::fingerprint::ChordFingerprint;
use super::note::{note_name, NameOptions, Note, NoteNumber, PitchClass};
use crate::error::ChordError;

/// Semitone interval type
pub type Interval = u8;

/// Chord kinds known to the dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordKind {
    Major,
    Minor,
    Diminished,
    Augmented,
    Dominant7,
    Major7,
    Minor7,
    Diminished7,
    HalfDiminished7,
    Augmented7,
    Major6,
}

impl ChordKind {
    /// All chord kinds in dictionary order
    pub const ALL: [ChordKind; 11] = [
        ChordKind::Major,
        ChordKind::Minor,
        ChordKind::Diminished,
        ChordKind::Augmented,
        ChordKind::Dominant7,
        ChordKind::Major7,
        ChordKind::Minor7,
        ChordKind::Diminished7,
        ChordKind::HalfDiminished7,
        ChordKind::Augmented7,
        ChordKind::Major6,
    ];

    /// The triads
    pub const TRIADS: [ChordKind; 4] = [
        ChordKind::Major,
        ChordKind::Minor,
        ChordKind::Diminished,
        ChordKind::Augmented,
    ];

    /// Get the intervals (semitones from root) for this chord kind
    pub fn intervals(self) -> &'static [Interval] {
        match self {
            ChordKind::Major => &[0, 4, 7],
            ChordKind::Minor => &[0, 3, 7],
            ChordKind::Diminished => &[0, 3, 6],
            ChordKind::Augmented => &[0, 4, 8],
            ChordKind::Dominant7 => &[0, 4, 7, 10],
            ChordKind::Major7 => &[0, 4, 7, 11],
            ChordKind::Minor7 => &[0, 3, 7, 10],
            ChordKind::Diminished7 => &[0, 3, 6, 9],
            ChordKind::HalfDiminished7 => &[0, 3, 6, 10],
            ChordKind::Augmented7 => &[0, 4, 8, 11],
            ChordKind::Major6 => &[0, 4, 7, 9],
        }
    }

    /// Get a human-readable name for this chord kind
    pub fn name(self) -> &'static str {
        match self {
            ChordKind::Major => "Major",
            ChordKind::Minor => "Minor",
            ChordKind::Diminished => "Diminished",
            ChordKind::Augmented => "Augmented",
            ChordKind::Dominant7 => "Dominant 7",
            ChordKind::Major7 => "Major 7",
            ChordKind::Minor7 => "Minor 7",
            ChordKind::Diminished7 => "Diminished 7",
            ChordKind::HalfDiminished7 => "Half-Diminished 7",
            ChordKind::Augmented7 => "Augmented 7",
            ChordKind::Major6 => "Major 6",
        }
    }

    /// Get the chord-symbol suffix (e.g. "m7")
    pub fn symbol(self) -> &'static str {
        match self {
            ChordKind::Major => "",
            ChordKind::Minor => "m",
            ChordKind::Diminished => "dim",
            ChordKind::Augmented => "aug",
            ChordKind::Dominant7 => "7",
            ChordKind::Major7 => "maj7",
            ChordKind::Minor7 => "m7",
            ChordKind::Diminished7 => "dim7",
            ChordKind::HalfDiminished7 => "-7",
            ChordKind::Augmented7 => "aug7",
            ChordKind::Major6 => "6",
        }
    }

    /// Number of notes in this chord kind
    pub fn note_count(self) -> usize {
        self.intervals().len()
    }

    /// Parse a chord kind from string
    pub fn from_str(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase().replace([' ', '-', '_'], "");
        match s.as_str() {
            "major" | "maj" => Some(ChordKind::Major),
            "minor" | "min" | "m" => Some(ChordKind::Minor),
            "diminished" | "dim" => Some(ChordKind::Diminished),
            "augmented" | "aug" => Some(ChordKind::Augmented),
            "dominant7" | "dom7" | "7" => Some(ChordKind::Dominant7),
            "major7" | "maj7" => Some(ChordKind::Major7),
            "minor7" | "min7" | "m7" => Some(ChordKind::Minor7),
            "diminished7" | "dim7" => Some(ChordKind::Diminished7),
            "halfdiminished7" | "halfdim7" | "m7b5" => Some(ChordKind::HalfDiminished7),
            "augmented7" | "aug7" => Some(ChordKind::Augmented7),
            "major6" | "maj6" | "6" => Some(ChordKind::Major6),
            _ => None,
        }
    }
}

impl fmt::Display for ChordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A chord with a root and kind
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Chord {
    root: Note,
    kind: ChordKind,
    notes: Vec<NoteNumber>,
}

impl Chord {
    /// Create a chord in root position
    pub fn new(root: Note, kind: ChordKind) -> Self {
        let base = root.pitch_class();
        let notes = kind.intervals().iter().map(|&i| base + i).collect();

        Self { root, kind, notes }
    }

    /// Get the root note
    pub fn root(&self) -> Note {
        self.root
    }

    /// Get the root pitch class
    pub fn root_pitch_class(&self) -> PitchClass {
        self.root.pitch_class()
    }

    /// Get the chord kind
    pub fn kind(&self) -> ChordKind {
        self.kind
    }

    /// Root-position notes, starting at the root pitch class
    pub fn notes(&self) -> &[NoteNumber] {
        &self.notes
    }

    /// Number of notes in this chord
    pub fn note_count(&self) -> usize {
        self.notes.len()
    }

    /// Fingerprint of the root-position notes
    pub fn fingerprint(&self) -> ChordFingerprint {
        ChordFingerprint::from_notes(self.notes.iter().copied())
    }

    /// Interval shape of the root position (always starts at 0)
    pub fn intervals(&self) -> Vec<Interval> {
        let root = self.root_pitch_class();
        self.notes.iter().map(|&n| n - root).collect()
    }

    /// Relative shape of the `k`-th inversion.
    ///
    /// The root-position intervals are rotated left by `k`, every note that
    /// ends up below its predecessor is raised by an octave, and the result is
    /// shifted so its lowest note is 0.
    pub fn inversion(&self, k: usize) -> Result<Vec<Interval>, ChordError> {
        let count = self.note_count();
        if k >= count {
            return Err(ChordError::InvalidInversion {
                inversion: k,
                note_count: count,
            });
        }

        let mut rotated = self.intervals();
        rotated.rotate_left(k);

        let mut shape = Vec::with_capacity(count);
        let mut previous: Option<Interval> = None;
        for mut note in rotated {
            if let Some(prev) = previous {
                while note < prev {
                    note += 12;
                }
            }
            previous = Some(note);
            shape.push(note);
        }

        let lowest = shape[0];
        Ok(shape.into_iter().map(|n| n - lowest).collect())
    }

    /// All inversion shapes, root position first
    pub fn inversions(&self) -> Vec<Vec<Interval>> {
        (0..self.note_count())
            .filter_map(|k| self.inversion(k).ok())
            .collect()
    }

    /// Whether sharp spelling is forced for this chord.
    ///
    /// A major seventh over a black-key root reads badly with flats
    /// (D♭ Major 7 spells its seventh as C), so those chords switch to sharps.
    /// This does not cover every enharmonic case.
    pub(crate) fn forces_sharps(&self) -> bool {
        self.root.is_black_key() && self.intervals().contains(&11)
    }

    fn spelled_root(&self, opts: NameOptions) -> String {
        let opts = opts.with_sharps(opts.sharps || self.forces_sharps());
        note_name(self.notes[0] as i32, opts)
    }

    /// Long display name, e.g. "E♭ Minor 7"
    pub fn name(&self, opts: NameOptions) -> String {
        format!("{} {}", self.spelled_root(opts), self.kind.name())
    }

    /// Chord symbol, e.g. "E♭m7"
    pub fn short_name(&self, opts: NameOptions) -> String {
        format!("{}{}", self.spelled_root(opts), self.kind.symbol())
    }
}

impl fmt::Display for Chord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name(NameOptions::default()))
    }
}
