//! # Parser Module
//!
//! Builds a [`Script`] from the lexer's token stream.
//!
//! ## Grammar
//! ```text
//! program     := directive* trackBlock+
//! directive   := Identifier '=' (Number | Identifier) NewLine
//! trackBlock  := ('@track' Identifier trackOption* NewLine)? noteLine+
//! trackOption := Identifier '=' (Number | Identifier)
//! noteLine    := (Note Number)+ BarLine? NewLine
//! ```
//!
//! ## Recovery
//! Melody lines are parsed leniently. A note symbol without a duration, a
//! stray identifier, or a number with no note before it is skipped and
//! parsing continues on the same line. Bar lines are transparent.
//!
//! Hard errors:
//! - a directive after the first `@track` header or note line
//! - a `@track` header with no note line before the next header or end of input
//! - a note token whose text is not a note symbol
//!
//! ## Example
//! ```rust
//! use bzs::{lexer::tokenize, parser::parse};
//!
//! let tokens = tokenize("tempo = 90\n@track lead volume=0.5\nC4 4 | E4 8\n").unwrap();
//! let script = parse(&tokens).unwrap();
//!
//! assert_eq!(script.globals.tempo, Some(90.0));
//! assert_eq!(script.tracks[0].name, "lead");
//! assert_eq!(script.tracks[0].settings.volume, Some(0.5));
//! assert_eq!(script.tracks[0].tokens.len(), 2);
//! ```

use crate::ast::*;
use crate::error::BzsError;
use crate::lexer::{LocatedToken, Token};
use crate::pitch::NoteSymbol;

/// Right-hand side of a `key = value` pair
#[derive(Debug, Clone, Copy, PartialEq)]
enum Value<'t> {
    Number(f64),
    Word(&'t str),
}

/// Track under construction
struct OpenTrack {
    track: Track,
    /// Position of the `@track` keyword, `None` for the implicit track
    header: Option<(usize, usize)>,
    has_note_lines: bool,
}

/// Parser for BZS token streams
pub struct Parser<'t> {
    tokens: &'t [LocatedToken],
    position: usize,
    script: Script,
    open: Option<OpenTrack>,
    content_started: bool,
}

impl<'t> Parser<'t> {
    pub fn new(tokens: &'t [LocatedToken]) -> Self {
        Self {
            tokens,
            position: 0,
            script: Script::default(),
            open: None,
            content_started: false,
        }
    }

    fn current(&self) -> Option<&'t LocatedToken> {
        self.tokens.get(self.position)
    }

    fn peek_token(&self, offset: usize) -> Option<&'t Token> {
        self.tokens.get(self.position + offset).map(|t| &t.token)
    }

    fn advance(&mut self) {
        self.position += 1;
    }

    fn skip_newlines(&mut self) {
        while let Some(Token::NewLine) = self.peek_token(0) {
            self.advance();
        }
    }

    /// Skip the rest of the current line, including its newline
    fn skip_line(&mut self) {
        while let Some(t) = self.current() {
            self.advance();
            if t.token == Token::NewLine {
                break;
            }
        }
    }

    fn at_key_value(&self) -> bool {
        matches!(
            (self.peek_token(0), self.peek_token(1)),
            (Some(Token::Identifier(_)), Some(Token::Equal))
        )
    }

    /// Parse the whole token stream
    pub fn parse(mut self) -> Result<Script, BzsError> {
        loop {
            self.skip_newlines();
            let Some(t) = self.current() else { break };

            match t.token {
                Token::AtTrack => self.parse_track_header()?,
                Token::Identifier(_) if self.at_key_value() => self.parse_directive()?,
                _ => self.parse_note_line()?,
            }
        }

        self.close_track()?;
        Ok(self.script)
    }

    /// Consume `key = value` starting at an identifier. The value is not
    /// consumed if it is missing or of an unusable kind.
    fn parse_key_value(&mut self) -> (String, Option<Value<'t>>) {
        let key = match self.peek_token(0) {
            Some(Token::Identifier(name)) => name.to_ascii_lowercase(),
            _ => String::new(),
        };
        self.advance(); // key
        self.advance(); // =

        let value = match self.peek_token(0) {
            Some(Token::Number(n)) => Some(Value::Number(*n)),
            Some(Token::Identifier(word)) | Some(Token::Note(word)) => Some(Value::Word(word.as_str())),
            _ => None,
        };
        if value.is_some() {
            self.advance();
        }
        (key, value)
    }

    fn parse_directive(&mut self) -> Result<(), BzsError> {
        let Some(start) = self.current() else {
            return Ok(());
        };
        if self.content_started {
            return Err(BzsError::parse(
                start.line,
                start.column,
                "directives must precede melody content",
            ));
        }

        let (key, value) = self.parse_key_value();
        if let Some(value) = value {
            apply_setting(&mut self.script.globals, &key, value);
        }
        self.skip_line();
        Ok(())
    }

    fn parse_track_header(&mut self) -> Result<(), BzsError> {
        let Some(at) = self.current() else {
            return Ok(());
        };
        self.close_track()?;
        self.content_started = true;
        self.advance(); // @track

        let name = match self.peek_token(0) {
            Some(Token::Identifier(name)) | Some(Token::Note(name))
                if self.peek_token(1) != Some(&Token::Equal) =>
            {
                self.advance();
                name.clone()
            }
            _ => format!("unnamed_{}", self.script.tracks.len()),
        };
        let mut track = Track::new(name);

        while let Some(t) = self.current() {
            if t.token == Token::NewLine {
                break;
            }
            if self.at_key_value() {
                let (key, value) = self.parse_key_value();
                if let Some(value) = value {
                    apply_track_option(&mut track, &key, value);
                }
            } else {
                self.advance();
            }
        }
        self.skip_line();

        self.open = Some(OpenTrack {
            track,
            header: Some((at.line, at.column)),
            has_note_lines: false,
        });
        Ok(())
    }

    fn line_has_note(&self) -> bool {
        self.tokens[self.position..]
            .iter()
            .take_while(|t| t.token != Token::NewLine)
            .any(|t| matches!(t.token, Token::Note(_)))
    }

    fn parse_note_line(&mut self) -> Result<(), BzsError> {
        if !self.line_has_note() {
            // Nothing playable on this line
            self.skip_line();
            return Ok(());
        }

        self.content_started = true;
        let mut open = self.open.take().unwrap_or_else(|| OpenTrack {
            track: Track::new(IMPLICIT_TRACK_NAME),
            header: None,
            has_note_lines: false,
        });
        open.has_note_lines = true;

        let mut pending: Option<NoteSymbol> = None;
        while let Some(t) = self.current() {
            self.advance();
            match &t.token {
                Token::NewLine => break,
                Token::Note(text) => {
                    let symbol = text
                        .parse::<NoteSymbol>()
                        .map_err(|message| BzsError::parse(t.line, t.column, message))?;
                    pending = Some(symbol);
                }
                Token::Number(value) => {
                    if let (Some(symbol), Some(denominator)) = (pending.take(), to_denominator(*value)) {
                        open.track.tokens.push(MelodyToken {
                            sound: symbol.pitch().map_or(Sound::Rest, Sound::Note),
                            denominator,
                        });
                    }
                }
                Token::BarLine => {}
                _ => pending = None,
            }
        }

        self.open = Some(open);
        Ok(())
    }

    fn close_track(&mut self) -> Result<(), BzsError> {
        let Some(open) = self.open.take() else {
            return Ok(());
        };
        if let (Some((line, column)), false) = (open.header, open.has_note_lines) {
            return Err(BzsError::parse(
                line,
                column,
                format!("track '{}' has no note lines", open.track.name),
            ));
        }
        if !open.track.tokens.is_empty() {
            self.script.tracks.push(open.track);
        }
        Ok(())
    }
}

/// Duration numbers must be positive integers
fn to_denominator(value: f64) -> Option<u32> {
    if value >= 1.0 && value.fract() == 0.0 && value <= f64::from(u32::MAX) {
        Some(value as u32)
    } else {
        None
    }
}

/// Apply a `tempo`, `waveform` or `volume` setting. Unknown keys and values
/// of the wrong kind are ignored.
fn apply_setting(settings: &mut Settings, key: &str, value: Value<'_>) {
    match (key, value) {
        ("tempo", Value::Number(bpm)) if bpm.is_finite() && bpm > 0.0 => settings.tempo = Some(bpm),
        ("volume", Value::Number(volume)) if !volume.is_nan() => settings.volume = Some(volume.clamp(0.0, 1.0)),
        ("waveform", Value::Word(name)) => {
            if let Ok(waveform) = name.parse::<Waveform>() {
                settings.waveform = Some(waveform);
            }
        }
        _ => {}
    }
}

fn apply_track_option(track: &mut Track, key: &str, value: Value<'_>) {
    match (key, value) {
        ("delay", Value::Number(beats)) if beats.is_finite() && beats >= 0.0 => {
            track.delay_beats = beats
        }
        _ => apply_setting(&mut track.settings, key, value),
    }
}

/// Parse a token stream into a [`Script`]
pub fn parse(tokens: &[LocatedToken]) -> Result<Script, BzsError> {
    Parser::new(tokens).parse()
}
