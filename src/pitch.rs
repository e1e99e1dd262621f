//! # Note Symbols and Pitch
//!
//! The single definition of the BZS note-symbol pattern and the
//! note→frequency mapping.
//!
//! ## Note Symbol Pattern
//! ```text
//! R                      rest
//! [A-G] [#|b]? [0-9]?    note: letter, optional accidental, optional octave
//! ```
//! The lexer uses [`NoteSymbol::scan`] to decide whether a word is a note
//! symbol, and the parser uses [`NoteSymbol::from_str`] to decompose it. Both
//! go through the same matcher, so anything lexed as a note decomposes.
//!
//! ## Frequency Mapping
//! Equal temperament with A4 = 440 Hz. Each pitch class has a semitone
//! offset from A in the same octave number (C = -9 … B = +2):
//!
//! `freq = 440 * 2^((offset + 12 * (octave - 4)) / 12)`
//!
//! ## Example
//! ```rust
//! use bzs::pitch::{Pitch, NoteLetter, Accidental};
//!
//! let a4 = Pitch::new(NoteLetter::A, None, 4);
//! assert!((a4.frequency() - 440.0).abs() < 1e-9);
//!
//! let c_sharp5 = Pitch::new(NoteLetter::C, Some(Accidental::Sharp), 5);
//! assert_eq!(c_sharp5.semitones_from_a4(), 4);
//! ```

use std::str::FromStr;

/// Reference pitch for A4 in Hz
pub const A4_FREQUENCY: f64 = 440.0;

/// Octave used when a note symbol omits one
pub const DEFAULT_OCTAVE: u8 = 4;

/// Note letters A through G
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteLetter {
    C,
    D,
    E,
    F,
    G,
    A,
    B,
}

impl NoteLetter {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'C' => Some(Self::C),
            'D' => Some(Self::D),
            'E' => Some(Self::E),
            'F' => Some(Self::F),
            'G' => Some(Self::G),
            'A' => Some(Self::A),
            'B' => Some(Self::B),
            _ => None,
        }
    }

    /// Semitone offset of the natural note from A in the same octave number
    pub fn semitones_from_a(self) -> i32 {
        match self {
            Self::C => -9,
            Self::D => -7,
            Self::E => -5,
            Self::F => -4,
            Self::G => -2,
            Self::A => 0,
            Self::B => 2,
        }
    }
}

/// Sharp (`#`) or flat (`b`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Accidental {
    Sharp,
    Flat,
}

impl Accidental {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '#' => Some(Self::Sharp),
            'b' => Some(Self::Flat),
            _ => None,
        }
    }

    pub fn semitones(self) -> i32 {
        match self {
            Self::Sharp => 1,
            Self::Flat => -1,
        }
    }
}

/// A fully resolved pitch: letter, accidental, and octave
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Pitch {
    pub letter: NoteLetter,
    pub accidental: Option<Accidental>,
    pub octave: u8,
}

impl Pitch {
    pub fn new(letter: NoteLetter, accidental: Option<Accidental>, octave: u8) -> Self {
        Self {
            letter,
            accidental,
            octave,
        }
    }

    /// Signed distance in semitones from A4
    pub fn semitones_from_a4(&self) -> i32 {
        let class = self.letter.semitones_from_a() + self.accidental.map_or(0, Accidental::semitones);
        class + 12 * (i32::from(self.octave) - i32::from(DEFAULT_OCTAVE))
    }

    /// Frequency in Hz, equal temperament, A4 = 440 Hz
    pub fn frequency(&self) -> f64 {
        A4_FREQUENCY * 2f64.powf(f64::from(self.semitones_from_a4()) / 12.0)
    }
}

/// A note symbol as written in a script, before a duration is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoteSymbol {
    Rest,
    Note {
        letter: NoteLetter,
        accidental: Option<Accidental>,
        octave: Option<u8>,
    },
}

impl NoteSymbol {
    /// Match the longest note symbol at the start of `input`.
    ///
    /// Returns the symbol and the number of bytes it covers, or `None` if
    /// `input` does not start with a note symbol. Characters after the match
    /// are not inspected; the lexer compares the length against competing
    /// token classes.
    pub fn scan(input: &str) -> Option<(Self, usize)> {
        let mut chars = input.chars().peekable();
        let first = chars.next()?;

        if first == 'R' {
            return Some((Self::Rest, 1));
        }

        let letter = NoteLetter::from_char(first)?;
        let mut len = 1;

        let accidental = chars.peek().copied().and_then(Accidental::from_char);
        if accidental.is_some() {
            chars.next();
            len += 1;
        }

        let octave = chars.peek().and_then(|c| c.to_digit(10)).map(|d| d as u8);
        if octave.is_some() {
            len += 1;
        }

        Some((
            Self::Note {
                letter,
                accidental,
                octave,
            },
            len,
        ))
    }

    /// Resolve to a pitch, filling in the default octave. `None` for rests.
    pub fn pitch(&self) -> Option<Pitch> {
        match *self {
            Self::Rest => None,
            Self::Note {
                letter,
                accidental,
                octave,
            } => Some(Pitch::new(letter, accidental, octave.unwrap_or(DEFAULT_OCTAVE))),
        }
    }
}

impl FromStr for NoteSymbol {
    type Err = String;

    /// Decompose a complete note symbol; trailing characters are an error.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match Self::scan(s) {
            Some((symbol, len)) if len == s.len() => Ok(symbol),
            _ => Err(format!("'{}' is not a note symbol (expected R or A-G, optional #/b, optional octave 0-9)", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    const ALL_CLASSES: [(NoteLetter, Option<Accidental>); 12] = [
        (NoteLetter::C, None),
        (NoteLetter::C, Some(Accidental::Sharp)),
        (NoteLetter::D, None),
        (NoteLetter::E, Some(Accidental::Flat)),
        (NoteLetter::E, None),
        (NoteLetter::F, None),
        (NoteLetter::F, Some(Accidental::Sharp)),
        (NoteLetter::G, None),
        (NoteLetter::A, Some(Accidental::Flat)),
        (NoteLetter::A, None),
        (NoteLetter::B, Some(Accidental::Flat)),
        (NoteLetter::B, None),
    ];

    #[test]
    fn test_a4_reference() {
        let a4 = Pitch::new(NoteLetter::A, None, 4);
        assert_approx_eq!(a4.frequency(), 440.0, 1e-6);
    }

    #[test]
    fn test_middle_c() {
        let c4 = Pitch::new(NoteLetter::C, None, 4);
        assert_eq!(c4.semitones_from_a4(), -9);
        assert_approx_eq!(c4.frequency(), 261.625_565, 1e-5);
    }

    #[test]
    fn test_octave_doubles_frequency() {
        for (letter, accidental) in ALL_CLASSES {
            for octave in 0..9 {
                let low = Pitch::new(letter, accidental, octave).frequency();
                let high = Pitch::new(letter, accidental, octave + 1).frequency();
                assert_approx_eq!(high, 2.0 * low, 1e-9);
            }
        }
    }

    #[test]
    fn test_enharmonic_sharps_and_flats() {
        let pairs = [
            (NoteLetter::C, NoteLetter::D),
            (NoteLetter::D, NoteLetter::E),
            (NoteLetter::F, NoteLetter::G),
            (NoteLetter::G, NoteLetter::A),
            (NoteLetter::A, NoteLetter::B),
        ];
        for (lower, upper) in pairs {
            let sharp = Pitch::new(lower, Some(Accidental::Sharp), 4);
            let flat = Pitch::new(upper, Some(Accidental::Flat), 4);
            assert_eq!(sharp.semitones_from_a4(), flat.semitones_from_a4());
        }
    }

    #[test]
    fn test_semitone_table() {
        let expected = [-9, -8, -7, -6, -5, -4, -3, -2, -1, 0, 1, 2];
        for ((letter, accidental), semis) in ALL_CLASSES.into_iter().zip(expected) {
            assert_eq!(Pitch::new(letter, accidental, 4).semitones_from_a4(), semis);
        }
    }

    #[test]
    fn test_scan_lengths() {
        assert_eq!(NoteSymbol::scan("R"), Some((NoteSymbol::Rest, 1)));
        assert_eq!(NoteSymbol::scan("C").map(|(_, n)| n), Some(1));
        assert_eq!(NoteSymbol::scan("C#").map(|(_, n)| n), Some(2));
        assert_eq!(NoteSymbol::scan("Db4").map(|(_, n)| n), Some(3));
        assert_eq!(NoteSymbol::scan("C45").map(|(_, n)| n), Some(2));
        assert_eq!(NoteSymbol::scan("Z4"), None);
        assert_eq!(NoteSymbol::scan("c4"), None);
        assert_eq!(NoteSymbol::scan(""), None);
    }

    #[test]
    fn test_from_str_decomposes() {
        let symbol: NoteSymbol = "Eb3".parse().unwrap();
        assert_eq!(
            symbol,
            NoteSymbol::Note {
                letter: NoteLetter::E,
                accidental: Some(Accidental::Flat),
                octave: Some(3),
            }
        );
        assert_eq!(
            symbol.pitch(),
            Some(Pitch::new(NoteLetter::E, Some(Accidental::Flat), 3))
        );
    }

    #[test]
    fn test_from_str_rejects_trailing_text() {
        assert!("C4x".parse::<NoteSymbol>().is_err());
        assert!("Rest".parse::<NoteSymbol>().is_err());
        assert!("H".parse::<NoteSymbol>().is_err());
    }

    #[test]
    fn test_default_octave() {
        let symbol: NoteSymbol = "G".parse().unwrap();
        assert_eq!(symbol.pitch().unwrap().octave, DEFAULT_OCTAVE);
        assert_eq!(NoteSymbol::Rest.pitch(), None);
    }
}
