// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

use std::cell::Cell;
use std::env;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

use anyhow::{anyhow, bail, Result};
use crossterm::event::{
    self, Event, KeyEvent, KeyboardEnhancementFlags, PopKeyboardEnhancementFlags,
    PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use crossterm::terminal::{self, disable_raw_mode, enable_raw_mode};
use tracing::{debug, Level};

use chordkeys::config::SettingsStore;
use chordkeys::control::{format_key_row, ControlAction, KeyboardMidiInput, STICKY_KEY};
use chordkeys::midi::{MidiContext, MidiShortcut, Subscription};
use chordkeys::music::{note_name, Chord, ChordDictionary, ChordKind, NameOptions, Note, NoteNumber};
use chordkeys::practice::{ChordPool, PracticeKind};

const DEFAULT_SETTINGS: &str = "chordkeys.yaml";

fn print_usage() {
    println!("CHORDKEYS - Chord practice with a MIDI keyboard");
    println!();
    println!("Usage: chordkeys [-v] [OPTIONS]");
    println!();
    println!("Options:");
    println!("  --list-chords [KIND...]              List known chords, optionally only some kinds");
    println!("  --identify <NOTE...>                 Name the chords formed by notes (60 or C4 style)");
    println!("  --keyboard [SETTINGS]                Play the computer keyboard and show matches");
    println!("  --practice [notes|symbols] [SETTINGS] Practice chords from the configured pool");
    println!("  -v                                   Verbose logging");
    println!("  --help                               Show this help message");
    println!();
    println!("SETTINGS defaults to {}", DEFAULT_SETTINGS);
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

/// Parse "60", "C4", "Eb3" or a bare "G" (octave 4)
fn parse_note(s: &str) -> Result<NoteNumber> {
    if let Ok(n) = s.parse::<NoteNumber>() {
        if n <= 127 {
            return Ok(n);
        }
        bail!("Note number out of range: {}", s);
    }

    let split = s
        .find(|c: char| c == '-' || c.is_ascii_digit())
        .unwrap_or(s.len());
    let (name, octave) = s.split_at(split);
    let note = Note::from_str(name).ok_or_else(|| anyhow!("Invalid note: {}", s))?;
    let octave: i32 = if octave.is_empty() {
        4
    } else {
        octave.parse().map_err(|_| anyhow!("Invalid octave: {}", s))?
    };

    let number = (octave + 1) * 12 + note.pitch_class() as i32;
    NoteNumber::try_from(number)
        .ok()
        .filter(|&n| n <= 127)
        .ok_or_else(|| anyhow!("Note out of range: {}", s))
}

fn list_chords(kinds: &[String]) -> Result<()> {
    let kinds: Vec<ChordKind> = if kinds.is_empty() {
        ChordKind::ALL.to_vec()
    } else {
        kinds
            .iter()
            .map(|k| ChordKind::from_str(k).ok_or_else(|| anyhow!("Unknown chord kind: {}", k)))
            .collect::<Result<_>>()?
    };

    let dictionary = ChordDictionary::global();
    for chord in dictionary.lookup_by_kinds(&kinds) {
        println!(
            "{:<24} {:<8} {}",
            chord.name(NameOptions::default()),
            chord.short_name(NameOptions::default()),
            chord.fingerprint()
        );
    }
    Ok(())
}

fn identify(notes: &[String]) -> Result<()> {
    if notes.is_empty() {
        bail!("--identify requires at least one note");
    }
    let notes = notes
        .iter()
        .map(|s| parse_note(s))
        .collect::<Result<Vec<_>>>()?;

    let dictionary = ChordDictionary::global();
    let fp = chordkeys::music::fingerprint(notes.iter().copied());
    println!("Fingerprint: {}", fp);

    let matches = dictionary.lookup_by_fingerprint(&fp);
    if matches.is_empty() {
        println!("No matching chord");
    }
    for chord in matches {
        println!("  {} ({})", chord.name(NameOptions::default()), chord.short_name(NameOptions::default()));
    }
    Ok(())
}

/// Raw terminal mode, restored on drop
struct RawTerminal {
    enhanced: bool,
}

impl RawTerminal {
    fn enter() -> Result<Self> {
        enable_raw_mode()?;
        let enhanced = terminal::supports_keyboard_enhancement().unwrap_or(false);
        if enhanced {
            execute!(
                io::stdout(),
                PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES)
            )?;
        }
        debug!(enhanced, "entered raw mode");
        Ok(Self { enhanced })
    }
}

impl Drop for RawTerminal {
    fn drop(&mut self) {
        if self.enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        let _ = disable_raw_mode();
    }
}

/// Print a line while in raw mode
fn say(line: &str) {
    let mut stdout = io::stdout();
    let _ = write!(stdout, "{}\r\n", line);
    let _ = stdout.flush();
}

fn describe_keys(ctx: &MidiContext<'_>, opts: NameOptions) -> String {
    if ctx.pressed_keys().is_empty() {
        return "-".to_string();
    }
    let keys = ctx
        .pressed_keys()
        .iter()
        .map(|&n| note_name(n as i32, opts.with_octave(true)))
        .collect::<Vec<_>>()
        .join(" ");
    let chords = ctx
        .matching_chords()
        .iter()
        .map(|c| c.short_name(opts))
        .collect::<Vec<_>>();

    if chords.is_empty() {
        keys
    } else {
        format!("{}  =>  {}", keys, chords.join(" / "))
    }
}

/// Current practice exercise
struct Exercise<'d> {
    kind: PracticeKind,
    pool: ChordPool<'d>,
    current: Option<(&'d Chord, Subscription)>,
    solved: Rc<Cell<bool>>,
}

impl<'d> Exercise<'d> {
    fn advance(&mut self, ctx: &MidiContext<'d>, opts: NameOptions) -> Result<()> {
        if let Some((_, subscription)) = self.current.take() {
            subscription.unsubscribe();
        }
        self.solved.set(false);

        let chord = self
            .pool
            .next_chord()
            .ok_or_else(|| anyhow!("The chord pool is empty; check chord_pool in the settings"))?;
        let solved = self.solved.clone();
        let subscription = ctx.subscribe_chord(chord, None, move || solved.set(true))?;
        self.current = Some((chord, subscription));

        say(&format!("Play: {}", self.kind.prompt(chord, opts)));
        Ok(())
    }
}

fn run_keyboard(settings_path: &Path, practice: Option<PracticeKind>) -> Result<()> {
    let store = SettingsStore::open(settings_path)?;
    let settings = store.get().clone();
    let opts = settings.name_options();

    let dictionary = ChordDictionary::global();
    let mut ctx =
        MidiContext::new(dictionary).with_shortcuts(settings.enabled_shortcuts.iter().copied());
    let mut keyboard = KeyboardMidiInput::new(settings.keyboard.base_note);

    let skipped = Rc::new(Cell::new(false));
    let skip_flag = skipped.clone();
    ctx.subscribe_shortcut(move |shortcut| {
        if shortcut == MidiShortcut::Skip {
            skip_flag.set(true);
        }
    });

    println!("Keys: {}", format_key_row(settings.keyboard.base_note, opts));
    println!(
        "'{}' toggles sticky keys, space releases all, Esc quits",
        STICKY_KEY
    );

    let terminal = RawTerminal::enter()?;
    if !terminal.enhanced {
        keyboard.set_sticky(true);
        say("Terminal does not report key releases; sticky keys enabled");
    }

    let mut exercise = match practice {
        Some(kind) => {
            let mut exercise = Exercise {
                kind,
                pool: ChordPool::new(dictionary, &settings.chord_pool),
                current: None,
                solved: Rc::new(Cell::new(false)),
            };
            exercise.advance(&ctx, opts)?;
            Some(exercise)
        }
        None => None,
    };

    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };

        let action = keyboard.handle(code, modifiers, kind, &mut ctx);
        match action {
            ControlAction::Quit => break,
            ControlAction::StickyChanged(sticky) => {
                say(&format!("Sticky keys {}", if sticky { "on" } else { "off" }));
            }
            _ => {}
        }

        if !action.changes_keys() {
            continue;
        }

        match exercise.as_mut() {
            Some(exercise) => {
                if exercise.solved.get() {
                    if let Some((chord, _)) = &exercise.current {
                        say(&format!("Correct: {}", chord.name(opts)));
                    }
                    exercise.advance(&ctx, opts)?;
                } else if skipped.replace(false) {
                    if let Some((chord, _)) = &exercise.current {
                        say(&format!("Skipped: {}", chord.name(opts)));
                    }
                    exercise.advance(&ctx, opts)?;
                }
            }
            None => {
                say(&describe_keys(&ctx, opts));
                if skipped.replace(false) {
                    say("Shortcut: skip");
                }
            }
        }
    }

    Ok(())
}

fn settings_arg(args: &[String], index: usize) -> PathBuf {
    args.get(index)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_SETTINGS))
}

fn main() -> Result<()> {
    let mut args: Vec<String> = env::args().collect();
    let verbose = args.iter().any(|a| a == "-v");
    args.retain(|a| a != "-v");
    init_logging(verbose);

    if args.len() < 2 {
        println!("CHORDKEYS - Chord practice with a MIDI keyboard");
        println!("Run with --help for usage information");
        return Ok(());
    }

    match args[1].as_str() {
        "--list-chords" => {
            list_chords(&args[2..])?;
        }
        "--identify" => {
            identify(&args[2..])?;
        }
        "--keyboard" => {
            run_keyboard(&settings_arg(&args, 2), None)?;
        }
        "--practice" => {
            let kind = match args.get(2) {
                Some(s) => PracticeKind::from_str(s)
                    .ok_or_else(|| anyhow!("Unknown practice kind: {} (use notes or symbols)", s))?,
                None => PracticeKind::Symbols,
            };
            run_keyboard(&settings_arg(&args, 3), Some(kind))?;
        }
        "--help" | "-h" => {
            print_usage();
        }
        _ => {
            eprintln!("Unknown option: {}", args[1]);
            print_usage();
            std::process::exit(1);
        }
    }

    Ok(())
}
