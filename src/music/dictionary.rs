// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! The chord dictionary: every root combined with every chord kind.
//!
//! Built once, then only read. Chords are indexed by display name and by
//! fingerprint. Fingerprints are not unique: symmetric chords (augmented
//! triads, diminished sevenths) and relative pairs like C6/Am7 share a
//! pitch-class set, so each fingerprint maps to a list.

use std::collections::HashMap;
use std::sync::OnceLock;

use tracing::debug;

use super::chord::{Chord, ChordKind};
use super::fingerprint::ChordFingerprint;
use super::note::{NameOptions, Note, NoteNumber};
use crate::error::ChordError;

/// Immutable chord catalogue with name and fingerprint indices
#[derive(Debug, Clone)]
pub struct ChordDictionary {
    chords: Vec<Chord>,
    by_name: HashMap<String, usize>,
    by_fingerprint: HashMap<ChordFingerprint, Vec<usize>>,
}

static GLOBAL: OnceLock<ChordDictionary> = OnceLock::new();

impl ChordDictionary {
    /// Build the dictionary: 12 roots × every [`ChordKind`]
    pub fn new() -> Self {
        let mut chords = Vec::with_capacity(Note::ALL.len() * ChordKind::ALL.len());
        let mut by_name = HashMap::new();
        let mut by_fingerprint: HashMap<ChordFingerprint, Vec<usize>> = HashMap::new();

        for root in Note::ALL {
            for kind in ChordKind::ALL {
                let chord = Chord::new(root, kind);
                let index = chords.len();

                by_name.insert(chord.name(NameOptions::default()), index);
                by_fingerprint
                    .entry(chord.fingerprint())
                    .or_default()
                    .push(index);
                chords.push(chord);
            }
        }

        debug!(
            chords = chords.len(),
            fingerprints = by_fingerprint.len(),
            "built chord dictionary"
        );

        Self {
            chords,
            by_name,
            by_fingerprint,
        }
    }

    /// Process-wide dictionary, built on first access
    pub fn global() -> &'static ChordDictionary {
        GLOBAL.get_or_init(ChordDictionary::new)
    }

    /// Number of chords
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Whether the dictionary is empty (never, once built)
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// All chords in construction order (by root, then kind)
    pub fn iter(&self) -> impl Iterator<Item = &Chord> {
        self.chords.iter()
    }

    /// Display names of all chords
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Look up a chord by its long display name (e.g. "E♭ Minor 7")
    pub fn get(&self, name: &str) -> Option<&Chord> {
        self.by_name.get(name).map(|&i| &self.chords[i])
    }

    /// Like [`get`](Self::get), failing with [`ChordError::UnknownChord`]
    pub fn by_name(&self, name: &str) -> Result<&Chord, ChordError> {
        self.get(name)
            .ok_or_else(|| ChordError::UnknownChord(name.to_string()))
    }

    /// Find a chord by root and kind
    pub fn chord(&self, root: Note, kind: ChordKind) -> &Chord {
        let kind_index = ChordKind::ALL
            .iter()
            .position(|&k| k == kind)
            .unwrap_or_default();
        &self.chords[root.pitch_class() as usize * ChordKind::ALL.len() + kind_index]
    }

    /// All chords sharing a fingerprint, in construction order
    pub fn lookup_by_fingerprint(&self, fp: &ChordFingerprint) -> Vec<&Chord> {
        self.by_fingerprint
            .get(fp)
            .map(|indices| indices.iter().map(|&i| &self.chords[i]).collect())
            .unwrap_or_default()
    }

    /// All chords whose pitch classes match the given notes
    pub fn identify<I>(&self, notes: I) -> Vec<&Chord>
    where
        I: IntoIterator<Item = NoteNumber>,
    {
        self.lookup_by_fingerprint(&ChordFingerprint::from_notes(notes))
    }

    /// All chords of the given kinds, in construction order
    pub fn lookup_by_kinds(&self, kinds: &[ChordKind]) -> Vec<&Chord> {
        self.chords
            .iter()
            .filter(|c| kinds.contains(&c.kind()))
            .collect()
    }
}

impl Default for ChordDictionary {
    fn default() -> Self {
        Self::new()
    }
}
