//! # Timeline Module
//!
//! Lower a parsed [`Script`](crate::ast::Script) into a flat list of timed
//! sound events for a renderer.
//!
//! ## Sub-modules
//! - `types` - [`SoundEvent`] definition
//! - `engine` - Lowering, ordering, and renderer-boundary helpers
//!
//! ## Timing
//! - One beat lasts `60 / tempo` seconds; a quarter note is one beat
//! - A note with denominator `d` lasts `4 / d` beats
//! - A track starts `delay` beats after time 0, using the track's own tempo
//! - All tracks share time 0, so events from different tracks overlap
//!
//! ## Example
//! ```rust
//! use bzs::{lexer::tokenize, parser::parse, timeline::lower, PlayerOptions};
//!
//! let tokens = tokenize("tempo = 60\nC4 4 R 2 A4 8\n").unwrap();
//! let script = parse(&tokens).unwrap();
//! let events = lower(&script, &PlayerOptions::default());
//!
//! assert_eq!(events.len(), 3);
//! assert_eq!(events[1].start_seconds, 1.0);
//! assert!(events[1].is_rest());
//! assert_eq!(events[2].start_seconds, 3.0);
//! assert_eq!(events[2].frequency_hz, Some(440.0));
//! ```
//!
//! ## Related Modules
//! - `ast` - Script, Track, MelodyToken
//! - `pitch` - Frequency mapping

mod engine;
mod types;


pub use engine::{audible, end_seconds, lower};
pub use types::SoundEvent;
