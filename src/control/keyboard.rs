// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! Computer keyboard as a MIDI keyboard.
//!
//! The home row plays a chromatic octave and a half: white keys on
//! `a s d f g h j k l ; '`, black keys on `w e t y u o p`. `z` toggles sticky
//! mode, in which presses latch notes on and off and releases are ignored.
//! That also lets terminals that never report key releases play chords.

use crossterm::event::{KeyCode, KeyEventKind, KeyModifiers};
use tracing::info;

use super::ControlAction;
use crate::midi::MidiContext;
use crate::music::{note_name, NameOptions, NoteNumber};

/// Keys in semitone order, starting at the base note
pub const KEY_ROW: &str = "awsedftgyhujkolp;'";

/// Key that toggles sticky mode
pub const STICKY_KEY: char = 'z';

/// Emulated MIDI keyboard state
#[derive(Debug, Clone)]
pub struct KeyboardMidiInput {
    base_note: NoteNumber,
    sticky: bool,
}

impl KeyboardMidiInput {
    /// Create a keyboard whose first key plays `base_note`
    pub fn new(base_note: NoteNumber) -> Self {
        Self {
            base_note,
            sticky: false,
        }
    }

    /// Whether sticky mode is on
    pub fn is_sticky(&self) -> bool {
        self.sticky
    }

    /// Turn sticky mode on or off
    pub fn set_sticky(&mut self, sticky: bool) {
        self.sticky = sticky;
    }

    /// Note number played by a key, if it is on the row
    pub fn note_for(&self, code: KeyCode) -> Option<NoteNumber> {
        let KeyCode::Char(c) = code else {
            return None;
        };
        let offset = KEY_ROW.chars().position(|k| k == c.to_ascii_lowercase())?;
        let note = self.base_note as usize + offset;
        NoteNumber::try_from(note).ok().filter(|&n| n <= 127)
    }

    /// Handle a key event, updating the context's held keys
    pub fn handle(
        &mut self,
        code: KeyCode,
        modifiers: KeyModifiers,
        kind: KeyEventKind,
        ctx: &mut MidiContext<'_>,
    ) -> ControlAction {
        if kind == KeyEventKind::Repeat {
            return ControlAction::None;
        }

        match code {
            KeyCode::Esc => return ControlAction::Quit,
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return ControlAction::Quit
            }
            KeyCode::Char(' ') if kind == KeyEventKind::Press => {
                ctx.release_all();
                return ControlAction::ReleaseAll;
            }
            KeyCode::Char(STICKY_KEY) => {
                // toggled on release so a held key does not flip it back
                if kind == KeyEventKind::Release {
                    self.sticky = !self.sticky;
                    info!(sticky = self.sticky, "sticky keys toggled");
                    return ControlAction::StickyChanged(self.sticky);
                }
                return ControlAction::None;
            }
            _ => {}
        }

        let Some(note) = self.note_for(code) else {
            return ControlAction::None;
        };

        match (kind, self.sticky) {
            (KeyEventKind::Press, true) => ctx.toggle(note),
            (KeyEventKind::Press, false) => ctx.press(note),
            (KeyEventKind::Release, false) => ctx.release(note),
            _ => return ControlAction::None,
        }
        ControlAction::Note(note)
    }
}

impl Default for KeyboardMidiInput {
    fn default() -> Self {
        Self::new(60)
    }
}

/// Describe the key row for help display, e.g. `a:C4 w:D♭4 ...`
pub fn format_key_row(base_note: NoteNumber, opts: NameOptions) -> String {
    let opts = opts.with_octave(true);
    KEY_ROW
        .chars()
        .enumerate()
        .map(|(i, key)| format!("{}:{}", key, note_name(base_note as i32 + i as i32, opts)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::music::ChordDictionary;

    fn key(c: char) -> KeyCode {
        KeyCode::Char(c)
    }

    fn tap(
        keyboard: &mut KeyboardMidiInput,
        ctx: &mut MidiContext<'_>,
        code: KeyCode,
        kind: KeyEventKind,
    ) -> ControlAction {
        keyboard.handle(code, KeyModifiers::NONE, kind, ctx)
    }

    #[test]
    fn test_note_for_key() {
        let keyboard = KeyboardMidiInput::new(60);
        assert_eq!(keyboard.note_for(key('a')), Some(60));
        assert_eq!(keyboard.note_for(key('w')), Some(61));
        assert_eq!(keyboard.note_for(key('k')), Some(72));
        assert_eq!(keyboard.note_for(key('\'')), Some(77));
        assert_eq!(keyboard.note_for(key('A')), Some(60));
        assert_eq!(keyboard.note_for(key('x')), None);
        assert_eq!(keyboard.note_for(KeyCode::Enter), None);
    }

    #[test]
    fn test_note_for_key_out_of_range() {
        let keyboard = KeyboardMidiInput::new(120);
        assert_eq!(keyboard.note_for(key('k')), None);
    }

    #[test]
    fn test_press_and_release() {
        let dict = ChordDictionary::new();
        let mut ctx = MidiContext::new(&dict);
        let mut keyboard = KeyboardMidiInput::default();

        let action = tap(&mut keyboard, &mut ctx, key('a'), KeyEventKind::Press);
        assert_eq!(action, ControlAction::Note(60));
        tap(&mut keyboard, &mut ctx, key('d'), KeyEventKind::Press);
        assert_eq!(ctx.pressed_keys().len(), 2);

        tap(&mut keyboard, &mut ctx, key('a'), KeyEventKind::Release);
        assert!(!ctx.is_pressed(60));
        assert!(ctx.is_pressed(64));
    }

    #[test]
    fn test_repeat_is_ignored() {
        let dict = ChordDictionary::new();
        let mut ctx = MidiContext::new(&dict);
        let mut keyboard = KeyboardMidiInput::default();
        keyboard.set_sticky(true);

        tap(&mut keyboard, &mut ctx, key('a'), KeyEventKind::Press);
        let action = tap(&mut keyboard, &mut ctx, key('a'), KeyEventKind::Repeat);
        assert_eq!(action, ControlAction::None);
        assert!(ctx.is_pressed(60));
    }

    #[test]
    fn test_sticky_mode() {
        let dict = ChordDictionary::new();
        let mut ctx = MidiContext::new(&dict);
        let mut keyboard = KeyboardMidiInput::default();

        tap(&mut keyboard, &mut ctx, key(STICKY_KEY), KeyEventKind::Press);
        let action = tap(&mut keyboard, &mut ctx, key(STICKY_KEY), KeyEventKind::Release);
        assert_eq!(action, ControlAction::StickyChanged(true));
        assert!(keyboard.is_sticky());

        // releases are ignored, presses toggle
        tap(&mut keyboard, &mut ctx, key('a'), KeyEventKind::Press);
        tap(&mut keyboard, &mut ctx, key('a'), KeyEventKind::Release);
        assert!(ctx.is_pressed(60));
        tap(&mut keyboard, &mut ctx, key('a'), KeyEventKind::Press);
        assert!(!ctx.is_pressed(60));
    }

    #[test]
    fn test_quit_and_release_all() {
        let dict = ChordDictionary::new();
        let mut ctx = MidiContext::new(&dict);
        let mut keyboard = KeyboardMidiInput::default();

        tap(&mut keyboard, &mut ctx, key('a'), KeyEventKind::Press);
        let action = tap(&mut keyboard, &mut ctx, key(' '), KeyEventKind::Press);
        assert_eq!(action, ControlAction::ReleaseAll);
        assert!(ctx.pressed_keys().is_empty());

        assert_eq!(
            tap(&mut keyboard, &mut ctx, KeyCode::Esc, KeyEventKind::Press),
            ControlAction::Quit
        );
        assert_eq!(
            keyboard.handle(key('c'), KeyModifiers::CONTROL, KeyEventKind::Press, &mut ctx),
            ControlAction::Quit
        );
    }

    #[test]
    fn test_format_key_row() {
        let row = format_key_row(60, NameOptions::default().with_ascii(true));
        assert!(row.starts_with("a:C4 w:Db4 s:D4"));
        assert!(row.ends_with("':F5"));
    }
}
