// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Practice mode: drawing chords to play.

use std::fmt;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::music::{note_name, Chord, ChordDictionary, ChordKind, NameOptions};

/// How a practice chord is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PracticeKind {
    /// Show the spelled notes of the chord
    Notes,
    /// Show the chord symbol
    Symbols,
}

impl PracticeKind {
    /// Parse a practice kind ("notes" or "symbols")
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "notes" => Some(PracticeKind::Notes),
            "symbols" => Some(PracticeKind::Symbols),
            _ => None,
        }
    }

    /// Render the prompt for a chord
    pub fn prompt(self, chord: &Chord, opts: NameOptions) -> String {
        match self {
            PracticeKind::Symbols => chord.short_name(opts),
            PracticeKind::Notes => {
                let opts = opts
                    .with_octave(false)
                    .with_sharps(opts.sharps || chord.forces_sharps());
                chord
                    .notes()
                    .iter()
                    .map(|&n| note_name(n as i32, opts))
                    .collect::<Vec<_>>()
                    .join(" ")
            }
        }
    }
}

impl fmt::Display for PracticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PracticeKind::Notes => write!(f, "notes"),
            PracticeKind::Symbols => write!(f, "symbols"),
        }
    }
}

/// Random source of chords for practice
pub struct ChordPool<'d> {
    chords: Vec<&'d Chord>,
    last: Option<usize>,
    rng: StdRng,
}

impl<'d> ChordPool<'d> {
    /// Pool of every dictionary chord of the given kinds
    pub fn new(dictionary: &'d ChordDictionary, kinds: &[ChordKind]) -> Self {
        Self::with_rng(dictionary, kinds, StdRng::from_entropy())
    }

    /// Pool with a fixed seed, for reproducible sequences
    pub fn with_seed(dictionary: &'d ChordDictionary, kinds: &[ChordKind], seed: u64) -> Self {
        Self::with_rng(dictionary, kinds, StdRng::seed_from_u64(seed))
    }

    fn with_rng(dictionary: &'d ChordDictionary, kinds: &[ChordKind], rng: StdRng) -> Self {
        Self {
            chords: dictionary.lookup_by_kinds(kinds),
            last: None,
            rng,
        }
    }

    /// Number of chords in the pool
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Whether the pool is empty
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Chords in the pool
    pub fn chords(&self) -> &[&'d Chord] {
        &self.chords
    }

    /// Draw the next chord; never the previous one if there is a choice
    pub fn next_chord(&mut self) -> Option<&'d Chord> {
        let len = self.chords.len();
        let index = match (len, self.last) {
            (0, _) => return None,
            (1, _) => 0,
            (_, Some(last)) => {
                // skip over the previous pick
                let i = self.rng.gen_range(0..len - 1);
                if i >= last {
                    i + 1
                } else {
                    i
                }
            }
            (_, None) => self.rng.gen_range(0..len),
        };
        self.last = Some(index);
        Some(self.chords[index])
    }
}
