// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! User settings.
//!
//! Settings are stored as YAML. [`SettingsStore`] gives the rest of the
//! program a typed get/set/reset view of the file and falls back to defaults
//! when the stored content is unreadable or invalid.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::control::keyboard::KEY_ROW;
use crate::error::SettingsError;
use crate::midi::MidiShortcut;
use crate::music::{ChordKind, NameOptions, NoteNumber, MAX_NOTE};

const C4: NoteNumber = 60;

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Spell chord names with sharps instead of flats
    #[serde(default)]
    pub chord_notation_uses_sharps: bool,
    /// Lowest key shown on the piano roll
    #[serde(default = "default_piano_roll_min_key")]
    pub piano_roll_min_key: NoteNumber,
    /// Highest key shown on the piano roll
    #[serde(default = "default_piano_roll_max_key")]
    pub piano_roll_max_key: NoteNumber,
    /// Last used MIDI input device
    #[serde(default)]
    pub midi_device_id: Option<String>,
    /// Chord kinds drawn in practice mode
    #[serde(default = "default_chord_pool")]
    pub chord_pool: Vec<ChordKind>,
    /// Gesture shortcuts that are recognized
    #[serde(default = "default_enabled_shortcuts")]
    pub enabled_shortcuts: Vec<MidiShortcut>,
    /// Computer keyboard emulation
    #[serde(default)]
    pub keyboard: KeyboardConfig,
}

fn default_piano_roll_min_key() -> NoteNumber {
    C4 - 24
}
fn default_piano_roll_max_key() -> NoteNumber {
    C4 + 24
}
fn default_chord_pool() -> Vec<ChordKind> {
    ChordKind::TRIADS.to_vec()
}
fn default_enabled_shortcuts() -> Vec<MidiShortcut> {
    vec![MidiShortcut::Skip]
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chord_notation_uses_sharps: false,
            piano_roll_min_key: default_piano_roll_min_key(),
            piano_roll_max_key: default_piano_roll_max_key(),
            midi_device_id: None,
            chord_pool: default_chord_pool(),
            enabled_shortcuts: default_enabled_shortcuts(),
            keyboard: KeyboardConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).context("Failed to parse settings YAML")
    }

    /// Serialize to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).context("Failed to serialize settings to YAML")
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), SettingsError> {
        for key in [self.piano_roll_min_key, self.piano_roll_max_key] {
            if key > MAX_NOTE {
                return Err(SettingsError::NoteOutOfRange(key));
            }
        }
        if self.piano_roll_min_key > self.piano_roll_max_key {
            return Err(SettingsError::InvertedPianoRoll {
                min: self.piano_roll_min_key,
                max: self.piano_roll_max_key,
            });
        }
        self.keyboard.validate()
    }

    /// Name options matching the notation preference
    pub fn name_options(&self) -> NameOptions {
        NameOptions::default().with_sharps(self.chord_notation_uses_sharps)
    }
}

/// Computer keyboard emulation settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyboardConfig {
    /// Note played by the first key of the row
    #[serde(default = "default_base_note")]
    pub base_note: NoteNumber,
}

fn default_base_note() -> NoteNumber {
    C4
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            base_note: default_base_note(),
        }
    }
}

impl KeyboardConfig {
    /// Check that the whole key row stays inside the MIDI range
    pub fn validate(&self) -> Result<(), SettingsError> {
        let highest = self.base_note as usize + KEY_ROW.chars().count() - 1;
        if highest > MAX_NOTE as usize {
            return Err(SettingsError::KeyboardOutOfRange(self.base_note));
        }
        Ok(())
    }
}

/// File-backed settings with get/set/reset
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    current: Settings,
}

impl SettingsStore {
    /// Open the settings file, creating it with defaults if missing.
    ///
    /// Content that fails to parse or validate is replaced by defaults.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let contents = match fs::read_to_string(&path) {
            Ok(contents) => Some(contents),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read settings file: {:?}", path))
            }
        };

        let Some(contents) = contents else {
            debug!(?path, "settings file missing, writing defaults");
            let store = Self {
                path,
                current: Settings::default(),
            };
            store.write()?;
            return Ok(store);
        };

        let current = match Settings::from_yaml(&contents) {
            Ok(settings) => match settings.validate() {
                Ok(()) => Some(settings),
                Err(error) => {
                    warn!(%error, ?path, "invalid settings, resetting");
                    None
                }
            },
            Err(error) => {
                warn!(error = %format!("{:#}", error), ?path, "unreadable settings, resetting");
                None
            }
        };

        match current {
            Some(current) => Ok(Self { path, current }),
            None => {
                let mut store = Self {
                    path,
                    current: Settings::default(),
                };
                store.reset()?;
                Ok(store)
            }
        }
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current settings
    pub fn get(&self) -> &Settings {
        &self.current
    }

    /// Validate and store new settings
    pub fn set(&mut self, settings: Settings) -> Result<()> {
        settings.validate()?;
        self.current = settings;
        self.write()
    }

    /// Modify a copy of the current settings and store it
    pub fn update<F>(&mut self, f: F) -> Result<()>
    where
        F: FnOnce(&mut Settings),
    {
        let mut settings = self.current.clone();
        f(&mut settings);
        self.set(settings)
    }

    /// Restore defaults and remove the backing file
    pub fn reset(&mut self) -> Result<()> {
        self.current = Settings::default();
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e)
                .with_context(|| format!("Failed to remove settings file: {:?}", self.path)),
        }
    }

    fn write(&self) -> Result<()> {
        let yaml = self.current.to_yaml()?;
        fs::write(&self.path, yaml)
            .with_context(|| format!("Failed to write settings file: {:?}", self.path))
    }
}
