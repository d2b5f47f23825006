// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Octave-independent chord fingerprints.
//!
//! A fingerprint is the sorted, deduplicated list of pitch classes in a set
//! of notes, rendered as `"0,4,7"`. Two note sets that differ only by octave
//! or ordering share a fingerprint.

use std::collections::BTreeSet;
use std::fmt;

use super::note::{pitch_class, NoteNumber, PitchClass};

/// Canonical identifier for a pitch-class set
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChordFingerprint(String);

impl ChordFingerprint {
    /// Fingerprint a collection of note numbers (or pitch classes)
    pub fn from_notes<I>(notes: I) -> Self
    where
        I: IntoIterator<Item = NoteNumber>,
    {
        let classes: BTreeSet<PitchClass> = notes.into_iter().map(pitch_class).collect();
        let key = classes
            .iter()
            .map(|pc| pc.to_string())
            .collect::<Vec<_>>()
            .join(",");
        Self(key)
    }

    /// The serialized form, e.g. `"0,1,3"`
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the fingerprint of an empty note set
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct pitch classes
    pub fn len(&self) -> usize {
        if self.0.is_empty() {
            0
        } else {
            self.0.split(',').count()
        }
    }
}

impl fmt::Display for ChordFingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Shorthand for [`ChordFingerprint::from_notes`]
pub fn fingerprint<I>(notes: I) -> ChordFingerprint
where
    I: IntoIterator<Item = NoteNumber>,
{
    ChordFingerprint::from_notes(notes)
}
