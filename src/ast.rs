//! # Abstract Syntax Tree (AST) Types
//!
//! This module defines the structures the parser builds from a Buzzer Script.
//!
//! ## Type Hierarchy
//! ```text
//! Script
//!   ├── globals: Settings (tempo, waveform, volume; each optional)
//!   └── Vec<Track>
//!         ├── name: String ("main" for the implicit track)
//!         ├── delay_beats: f64
//!         ├── settings: Settings (per-track overrides)
//!         └── Vec<MelodyToken>
//!               ├── sound: Sound (Rest | Note(Pitch))
//!               └── denominator: u32 (1 whole, 2 half, 4 quarter, ...)
//! ```
//!
//! ## Settings Resolution
//! Unset values are resolved at lowering time, in this order:
//! track override → script directive → caller's `PlayerOptions`.
//!
//! ## Related Modules
//! - `parser` - Creates these types from tokens
//! - `timeline` - Lowers these types into sound events
//! - `pitch` - Pitch and frequency mapping

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::pitch::Pitch;

/// Name of the track opened when notes appear before any `@track` line
pub const IMPLICIT_TRACK_NAME: &str = "main";

/// Oscillator shape requested for a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    #[default]
    Square,
    Sawtooth,
    Triangle,
}

impl Waveform {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Sine => "sine",
            Self::Square => "square",
            Self::Sawtooth => "sawtooth",
            Self::Triangle => "triangle",
        }
    }
}

impl FromStr for Waveform {
    type Err = String;

    /// Case-insensitive waveform name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sine" => Ok(Self::Sine),
            "square" => Ok(Self::Square),
            "sawtooth" => Ok(Self::Sawtooth),
            "triangle" => Ok(Self::Triangle),
            _ => Err(format!(
                "Unknown waveform '{}'. Expected: sine, square, sawtooth, or triangle",
                s
            )),
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Tempo, waveform and volume as written in a script.
///
/// Used for the top-level directives (`Script::globals`) and for per-track
/// options (`Track::settings`). `None` means "inherit".
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Settings {
    /// Beats per minute, always > 0 when set
    pub tempo: Option<f64>,
    pub waveform: Option<Waveform>,
    /// Clamped to [0, 1] when set
    pub volume: Option<f64>,
}

impl Settings {
    /// Fill unset fields from `fallback`
    pub fn or(self, fallback: Settings) -> Settings {
        Settings {
            tempo: self.tempo.or(fallback.tempo),
            waveform: self.waveform.or(fallback.waveform),
            volume: self.volume.or(fallback.volume),
        }
    }
}

/// A note or a rest
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Sound {
    Rest,
    Note(Pitch),
}

/// One fully resolved note or rest with its duration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MelodyToken {
    pub sound: Sound,
    /// Note value as a fraction of a whole note: 4 = quarter, 8 = eighth
    pub denominator: u32,
}

impl MelodyToken {
    pub fn is_rest(&self) -> bool {
        matches!(self.sound, Sound::Rest)
    }

    /// Duration in beats, where a quarter note is one beat
    pub fn beats(&self) -> f64 {
        4.0 / f64::from(self.denominator)
    }
}

/// A named, independently timed sequence of melody tokens
#[derive(Debug, Clone, PartialEq)]
pub struct Track {
    pub name: String,
    pub delay_beats: f64,
    pub settings: Settings,
    pub tokens: Vec<MelodyToken>,
}

impl Track {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            delay_beats: 0.0,
            settings: Settings::default(),
            tokens: Vec::new(),
        }
    }

    /// Total length of the melody in beats, excluding the delay
    pub fn length_beats(&self) -> f64 {
        self.tokens.iter().map(MelodyToken::beats).sum()
    }
}

/// A parsed script
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Script {
    pub globals: Settings,
    pub tracks: Vec<Track>,
}
