// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Integration tests for CHORDKEYS
//!
//! These tests drive the public API the way a front end would: raw MIDI
//! bytes or key events in, chord and shortcut notifications out.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use chordkeys::config::{Settings, SettingsStore};
use chordkeys::control::KeyboardMidiInput;
use chordkeys::midi::{MidiContext, MidiMessage, MidiShortcut};
use chordkeys::music::{fingerprint, ChordDictionary, ChordKind, NameOptions, Note};
use chordkeys::practice::{ChordPool, PracticeKind};
use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};

fn counter() -> (Rc<Cell<usize>>, impl Fn() + 'static) {
    let count = Rc::new(Cell::new(0));
    let handle = count.clone();
    (count, move || handle.set(handle.get() + 1))
}

fn shortcut_log(ctx: &MidiContext<'_>) -> Rc<RefCell<Vec<MidiShortcut>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = log.clone();
    ctx.subscribe_shortcut(move |s| sink.borrow_mut().push(s));
    log
}

/// Fingerprints ignore octave and order
#[test]
fn test_fingerprint_invariance() {
    assert_eq!(fingerprint([60, 64, 67]), fingerprint([67, 52, 72]));
    assert_eq!(fingerprint([60, 64, 67]).as_str(), "0,4,7");

    // every octave transposition of every note gives the same key
    let base = [62u8, 65, 69, 72];
    for shift in [0u8, 12, 24, 36] {
        let shifted: Vec<u8> = base.iter().rev().map(|n| n + shift).collect();
        assert_eq!(fingerprint(shifted), fingerprint(base));
    }
}

/// The dictionary covers 12 roots for each of the 11 kinds
#[test]
fn test_dictionary_completeness() {
    let dict = ChordDictionary::global();
    assert_eq!(dict.len(), 12 * 11);

    let mut names: Vec<&str> = dict.names().collect();
    names.sort();
    names.dedup();
    assert_eq!(names.len(), 132);

    for chord in dict.iter() {
        assert!(!dict.lookup_by_fingerprint(&chord.fingerprint()).is_empty());
        assert_eq!(chord.inversion(0).unwrap(), chord.intervals());
    }
}

/// Augmented triads share a fingerprint
#[test]
fn test_augmented_aliasing() {
    let dict = ChordDictionary::global();
    let bucket = dict.lookup_by_fingerprint(&fingerprint([0, 4, 8]));
    assert!(bucket.len() >= 3);
    for root in [Note::C, Note::E, Note::Gs] {
        assert!(bucket.contains(&dict.chord(root, ChordKind::Augmented)));
    }
}

/// A C major listener follows the held keys
#[test]
fn test_level_triggered_chord_match() {
    let dict = ChordDictionary::global();
    let mut ctx = MidiContext::new(dict);
    let c_major = dict.get("C Major").unwrap();
    let (count, callback) = counter();
    ctx.subscribe_chord(c_major, None, callback).unwrap();

    for note in [60, 64, 67] {
        ctx.press(note);
    }
    assert_eq!(count.get(), 1);

    ctx.press(72);
    assert_eq!(count.get(), 2);

    ctx.release(72);
    ctx.release(67);
    let after_release = count.get();
    ctx.release(64);
    assert_eq!(count.get(), after_release);
}

/// The skip gesture fires once per full release
#[test]
fn test_edge_triggered_shortcut() {
    let dict = ChordDictionary::global();
    let mut ctx = MidiContext::new(dict);
    let log = shortcut_log(&ctx);

    for round in 0..2 {
        for note in [60, 61, 63] {
            ctx.press(note);
        }
        // nothing fires while keys are held
        assert_eq!(log.borrow().len(), round);
        for note in [60, 61, 63] {
            ctx.release(note);
        }
    }
    assert_eq!(*log.borrow(), vec![MidiShortcut::Skip, MidiShortcut::Skip]);
}

/// Re-pressing keys without a full release does not fire again
#[test]
fn test_shortcut_without_full_release() {
    let dict = ChordDictionary::global();
    let mut ctx = MidiContext::new(dict);
    let log = shortcut_log(&ctx);

    for note in [60, 61, 63] {
        ctx.press(note);
    }
    for note in [61, 63] {
        ctx.release(note);
    }
    for note in [61, 63] {
        ctx.press(note);
    }
    assert!(log.borrow().is_empty());

    ctx.release_all();
    assert_eq!(log.borrow().len(), 1);
}

/// A matched gesture stays pending after the shape changes
#[test]
fn test_no_double_fire_on_multi_step_gesture() {
    let dict = ChordDictionary::global();
    let mut ctx = MidiContext::new(dict);
    let log = shortcut_log(&ctx);

    for note in [72, 73, 75] {
        ctx.press(note);
    }
    ctx.press(50);
    assert_ne!(ctx.fingerprint(), MidiShortcut::Skip.fingerprint());

    for note in [50, 72, 73, 75] {
        ctx.release(note);
    }
    assert_eq!(*log.borrow(), vec![MidiShortcut::Skip]);
}

/// Raw MIDI bytes drive chord detection
#[test]
fn test_midi_bytes_to_chord() {
    let dict = ChordDictionary::global();
    let mut ctx = MidiContext::new(dict);
    let g7 = dict.chord(Note::G, ChordKind::Dominant7);
    let (root_count, root_cb) = counter();
    let (third_count, third_cb) = counter();
    ctx.subscribe_chord(g7, None, root_cb).unwrap();
    ctx.subscribe_chord(g7, Some(3), third_cb).unwrap();

    // F G B D: third inversion
    for bytes in [[0x90, 65, 90], [0x90, 67, 90], [0x90, 71, 90], [0x90, 74, 90]] {
        let msg = MidiMessage::parse(&bytes).unwrap();
        ctx.apply(&msg);
    }
    assert_eq!(root_count.get(), 1);
    assert_eq!(third_count.get(), 1);

    let names: Vec<String> = ctx
        .matching_chords()
        .iter()
        .map(|c| c.short_name(NameOptions::default()))
        .collect();
    assert_eq!(names, vec!["G7".to_string()]);

    ctx.apply(&MidiMessage::parse(&[0xB0, 123, 0]).unwrap());
    assert!(ctx.pressed_keys().is_empty());
}

/// Emulated keyboard plays the skip gesture
#[test]
fn test_keyboard_gesture() {
    let dict = ChordDictionary::global();
    let mut ctx = MidiContext::new(dict);
    let log = shortcut_log(&ctx);
    let mut keyboard = KeyboardMidiInput::new(48);

    // a w e = C C♯ D♯
    for c in ['a', 'w', 'e'] {
        keyboard.handle(KeyCode::Char(c), KeyModifiers::NONE, KeyEventKind::Press, &mut ctx);
    }
    for c in ['a', 'w', 'e'] {
        keyboard.handle(KeyCode::Char(c), KeyModifiers::NONE, KeyEventKind::Release, &mut ctx);
    }
    assert_eq!(*log.borrow(), vec![MidiShortcut::Skip]);
}

/// Settings feed the context and the practice pool
#[test]
fn test_settings_drive_practice() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("settings.yaml");

    let mut store = SettingsStore::open(&path).unwrap();
    store
        .set(Settings {
            chord_notation_uses_sharps: true,
            chord_pool: vec![ChordKind::Major7],
            enabled_shortcuts: vec![],
            ..Settings::default()
        })
        .unwrap();

    let settings = SettingsStore::open(&path).unwrap().get().clone();
    let dict = ChordDictionary::global();
    let mut ctx =
        MidiContext::new(dict).with_shortcuts(settings.enabled_shortcuts.iter().copied());
    let log = shortcut_log(&ctx);

    let mut pool = ChordPool::with_seed(dict, &settings.chord_pool, 3);
    assert_eq!(pool.len(), 12);
    let chord = pool.next_chord().unwrap();
    let prompt = PracticeKind::Symbols.prompt(chord, settings.name_options());
    assert!(prompt.ends_with("maj7"));
    assert!(!prompt.contains('♭'));

    let (count, callback) = counter();
    ctx.subscribe_chord(chord, None, callback).unwrap();
    for &n in chord.notes() {
        ctx.press(n + 48);
    }
    assert_eq!(count.get(), 1);

    // shortcuts disabled in settings
    ctx.release_all();
    for note in [60, 61, 63] {
        ctx.press(note);
    }
    ctx.release_all();
    assert!(log.borrow().is_empty());
}
