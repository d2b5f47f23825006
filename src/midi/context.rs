// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Live reconciliation of held keys against chords and shortcuts.
//!
//! [`MidiContext`] owns the set of currently pressed keys. Every call to
//! [`press`](MidiContext::press) or [`release`](MidiContext::release) runs a
//! reconciliation pass before returning:
//!
//! - Chord listeners are level-triggered. They fire on every pass in which
//!   the held keys match their chord, so they fire repeatedly while the shape
//!   is held.
//! - Shortcut listeners are edge-triggered. A shortcut whose shape is seen
//!   during a gesture is remembered, and fires once when every key has been
//!   released.
//!
//! Each pass works on a snapshot of the listeners taken when it starts.
//! Listeners may subscribe or unsubscribe from inside a callback; a listener
//! removed mid-pass can still receive the callback of the pass in flight.

use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::rc::{Rc, Weak};

use tracing::{debug, info, trace};

use super::input::MidiMessage;
use super::shortcut::MidiShortcut;
use crate::error::ChordError;
use crate::music::{Chord, ChordDictionary, ChordFingerprint, Interval, NoteNumber};

/// Identifier of a registered listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct ChordListener {
    chord: Chord,
    /// Required voicing, when an inversion was requested
    shape: Option<Vec<Interval>>,
    callback: Box<dyn Fn()>,
}

type ShortcutCallback = Rc<dyn Fn(MidiShortcut)>;

#[derive(Default)]
struct Listeners {
    next_id: u64,
    chords: BTreeMap<ListenerId, Rc<ChordListener>>,
    shortcuts: BTreeMap<ListenerId, ShortcutCallback>,
}

impl Listeners {
    fn allocate(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        id
    }

    fn remove(&mut self, id: ListenerId) -> bool {
        self.chords.remove(&id).is_some() || self.shortcuts.remove(&id).is_some()
    }
}

/// Handle returned by the subscribe methods.
///
/// Dropping the handle does not unsubscribe; call
/// [`unsubscribe`](Subscription::unsubscribe).
pub struct Subscription {
    listeners: Weak<RefCell<Listeners>>,
    id: ListenerId,
}

impl Subscription {
    /// The listener's identifier
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Remove the listener. Returns false if it was already removed.
    pub fn unsubscribe(&self) -> bool {
        match self.listeners.upgrade() {
            Some(listeners) => listeners.borrow_mut().remove(self.id),
            None => false,
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}

/// Pressed-key state with chord and shortcut detection
pub struct MidiContext<'d> {
    dictionary: &'d ChordDictionary,
    pressed_keys: BTreeSet<NoteNumber>,
    pending_shortcuts: BTreeSet<MidiShortcut>,
    shortcuts: Vec<MidiShortcut>,
    listeners: Rc<RefCell<Listeners>>,
}

impl<'d> MidiContext<'d> {
    /// Create a context recognizing every known shortcut
    pub fn new(dictionary: &'d ChordDictionary) -> Self {
        Self {
            dictionary,
            pressed_keys: BTreeSet::new(),
            pending_shortcuts: BTreeSet::new(),
            shortcuts: MidiShortcut::ALL.to_vec(),
            listeners: Rc::new(RefCell::new(Listeners::default())),
        }
    }

    /// Restrict recognition to the given shortcuts
    pub fn with_shortcuts<I>(mut self, shortcuts: I) -> Self
    where
        I: IntoIterator<Item = MidiShortcut>,
    {
        let mut enabled: Vec<MidiShortcut> = shortcuts.into_iter().collect();
        enabled.sort();
        enabled.dedup();
        self.shortcuts = enabled;
        self
    }

    /// The dictionary used for matching
    pub fn dictionary(&self) -> &'d ChordDictionary {
        self.dictionary
    }

    /// Shortcuts this context recognizes
    pub fn shortcuts(&self) -> &[MidiShortcut] {
        &self.shortcuts
    }

    /// Currently held keys, ascending
    pub fn pressed_keys(&self) -> &BTreeSet<NoteNumber> {
        &self.pressed_keys
    }

    /// Whether a key is held
    pub fn is_pressed(&self, note: NoteNumber) -> bool {
        self.pressed_keys.contains(&note)
    }

    /// Fingerprint of the held keys
    pub fn fingerprint(&self) -> ChordFingerprint {
        ChordFingerprint::from_notes(self.pressed_keys.iter().copied())
    }

    /// Dictionary chords matching the held pitch classes
    pub fn matching_chords(&self) -> Vec<&'d Chord> {
        self.dictionary.lookup_by_fingerprint(&self.fingerprint())
    }

    /// Shortcuts seen during the current gesture, not yet fired
    pub fn pending_shortcuts(&self) -> &BTreeSet<MidiShortcut> {
        &self.pending_shortcuts
    }

    /// Relative shape of the held keys (lowest key = 0)
    pub fn shape(&self) -> Vec<Interval> {
        match self.pressed_keys.first() {
            Some(&lowest) => self.pressed_keys.iter().map(|&n| n - lowest).collect(),
            None => Vec::new(),
        }
    }

    /// Number of registered listeners (chord and shortcut)
    pub fn listener_count(&self) -> usize {
        let listeners = self.listeners.borrow();
        listeners.chords.len() + listeners.shortcuts.len()
    }

    /// Listen for a chord.
    ///
    /// Without an inversion the callback fires whenever the held pitch
    /// classes match the chord, in any voicing. With inversion `k` the held
    /// keys must form exactly the shape of [`Chord::inversion`].
    pub fn subscribe_chord<F>(
        &self,
        chord: &Chord,
        inversion: Option<usize>,
        callback: F,
    ) -> Result<Subscription, ChordError>
    where
        F: Fn() + 'static,
    {
        let shape = inversion.map(|k| chord.inversion(k)).transpose()?;

        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.allocate();
        listeners.chords.insert(
            id,
            Rc::new(ChordListener {
                chord: chord.clone(),
                shape,
                callback: Box::new(callback),
            }),
        );
        debug!(?id, %chord, ?inversion, "chord listener added");

        Ok(Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        })
    }

    /// Listen for shortcuts; the callback receives the completed shortcut
    pub fn subscribe_shortcut<F>(&self, callback: F) -> Subscription
    where
        F: Fn(MidiShortcut) + 'static,
    {
        let mut listeners = self.listeners.borrow_mut();
        let id = listeners.allocate();
        listeners.shortcuts.insert(id, Rc::new(callback));
        debug!(?id, "shortcut listener added");

        Subscription {
            listeners: Rc::downgrade(&self.listeners),
            id,
        }
    }

    /// Key down
    pub fn press(&mut self, note: NoteNumber) {
        self.pressed_keys.insert(note);
        self.reconcile();
    }

    /// Key up
    pub fn release(&mut self, note: NoteNumber) {
        self.pressed_keys.remove(&note);
        self.reconcile();
    }

    /// Press an unheld key, release a held one
    pub fn toggle(&mut self, note: NoteNumber) {
        if !self.pressed_keys.remove(&note) {
            self.pressed_keys.insert(note);
        }
        self.reconcile();
    }

    /// Release every key at once
    pub fn release_all(&mut self) {
        self.pressed_keys.clear();
        self.reconcile();
    }

    /// Apply a parsed MIDI message. Returns true if it was a key message.
    pub fn apply(&mut self, message: &MidiMessage) -> bool {
        match message {
            MidiMessage::NoteOn { note, .. } => self.press(*note),
            MidiMessage::NoteOff { note, .. } => self.release(*note),
            msg if msg.is_all_notes_off() => self.release_all(),
            _ => return false,
        }
        true
    }

    fn reconcile(&mut self) {
        let dictionary = self.dictionary;
        let fp = self.fingerprint();
        trace!(fingerprint = %fp, keys = ?self.pressed_keys, "reconciling");

        for &shortcut in &self.shortcuts {
            if shortcut.fingerprint() == fp && self.pending_shortcuts.insert(shortcut) {
                debug!(%shortcut, "shortcut shape held");
            }
        }

        let chord_listeners: Vec<Rc<ChordListener>> =
            self.listeners.borrow().chords.values().cloned().collect();

        if !chord_listeners.is_empty() {
            let matches = dictionary.lookup_by_fingerprint(&fp);
            let shape = self.shape();

            for listener in chord_listeners {
                let matched = match &listener.shape {
                    None => matches.iter().any(|&c| *c == listener.chord),
                    Some(target) => *target == shape,
                };
                if matched {
                    debug!(chord = %listener.chord, "chord matched");
                    (listener.callback)();
                }
            }
        }

        if self.pressed_keys.is_empty() && !self.pending_shortcuts.is_empty() {
            let fired = std::mem::take(&mut self.pending_shortcuts);
            let shortcut_listeners: Vec<ShortcutCallback> =
                self.listeners.borrow().shortcuts.values().cloned().collect();

            for shortcut in fired {
                info!(%shortcut, listeners = shortcut_listeners.len(), "shortcut fired");
                for callback in &shortcut_listeners {
                    callback(shortcut);
                }
            }
        }
    }
}
