//! # Public API
//!
//! Main entry points for the BZS library.
//!
//! ## Compilation Functions
//!
//! - [`compile()`] - Script text to sound events, default player options
//! - [`compile_with_options()`] - Same, with caller-supplied defaults
//! - [`compile_audible()`] - Events ready for a renderer (rests removed)
//! - [`parse_script()`] - Script text to AST, no lowering
//!
//! ## Typical Usage
//!
//! ```rust
//! use bzs::compile;
//!
//! let source = r#"
//! ## Two voices, the second entering one beat late
//! tempo = 100
//! waveform = triangle
//!
//! @track melody
//! E4 8 D4 8 C4 4 | D4 4 E4 4
//!
//! @track echo delay=1 volume=0.1
//! E3 8 D3 8 C3 4 | D3 4 E3 4
//! "#;
//!
//! let events = compile(source)?;
//! assert_eq!(events.len(), 10);
//! # Ok::<(), bzs::BzsError>(())
//! ```

use crate::ast::Script;
use crate::error::BzsError;
use crate::lexer::tokenize;
use crate::options::PlayerOptions;
use crate::parser::parse;
use crate::timeline::{audible, lower, SoundEvent};

/// Tokenize and parse a script into its AST.
///
/// # Errors
/// Returns [`BzsError::LexError`] or [`BzsError::ParseError`].
pub fn parse_script(source: &str) -> Result<Script, BzsError> {
    let tokens = tokenize(source)?;
    parse(&tokens)
}

/// Compile a script to sound events using [`PlayerOptions::default()`].
///
/// # Pipeline
/// 1. Tokenize source with lexer
/// 2. Parse tokens into AST
/// 3. Lower AST into events sorted by start time
///
/// # Example
/// ```rust
/// use bzs::compile;
///
/// let events = compile("tempo = 60\nC4 4\n")?;
/// assert_eq!(events[0].duration_seconds, 1.0);
/// # Ok::<(), bzs::BzsError>(())
/// ```
///
/// # Errors
/// On any error no events are returned.
pub fn compile(source: &str) -> Result<Vec<SoundEvent>, BzsError> {
    compile_with_options(source, &PlayerOptions::default())
}

/// Compile with caller-supplied defaults for tempo, waveform, and volume.
///
/// The defaults apply only where neither a track option nor a top-level
/// directive sets a value. They are checked with
/// [`PlayerOptions::validated`] first, so a non-positive tempo is a
/// [`BzsError::ConfigError`].
///
/// # Example
/// ```rust
/// use bzs::{compile_with_options, PlayerOptions, Waveform};
///
/// let options = PlayerOptions { tempo: 60.0, waveform: Waveform::Sine, volume: 0.5 };
/// let events = compile_with_options("A4 2", &options)?;
/// assert_eq!(events[0].duration_seconds, 2.0);
/// assert_eq!(events[0].waveform, Waveform::Sine);
/// # Ok::<(), bzs::BzsError>(())
/// ```
pub fn compile_with_options(
    source: &str,
    options: &PlayerOptions,
) -> Result<Vec<SoundEvent>, BzsError> {
    let options = options.validated()?;
    let script = parse_script(source)?;
    Ok(lower(&script, &options))
}

/// Compile and drop rests, leaving only events a renderer should schedule.
///
/// # Example
/// ```rust
/// use bzs::{compile_audible, PlayerOptions};
///
/// let events = compile_audible("C4 4 R 4 E4 4", &PlayerOptions::default())?;
/// assert_eq!(events.len(), 2);
/// assert_eq!(events[1].start_seconds, 1.0);
/// # Ok::<(), bzs::BzsError>(())
/// ```
pub fn compile_audible(
    source: &str,
    options: &PlayerOptions,
) -> Result<Vec<SoundEvent>, BzsError> {
    let events = compile_with_options(source, options)?;
    Ok(audible(&events).copied().collect())
}
