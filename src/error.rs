//! # Error Types
//!
//! This module defines all error types for the BZS compiler.
//!
//! Lexer and parser errors carry the 1-based line and column of the offending
//! token so a UI can point at it.
//!
//! ## Error Types
//! - `LexError` - A character that starts no token
//! - `ParseError` - Grammar violation (directive after melody content, empty `@track` block)
//! - `ConfigError` - Invalid player options
//!
//! ## Usage
//! ```rust
//! use bzs::{compile, BzsError};
//!
//! match compile("C4 4\ntempo = 90\n") {
//!     Ok(events) => println!("{} events", events.len()),
//!     Err(BzsError::ParseError { line, column, message }) => {
//!         eprintln!("Parse error at {}:{}: {}", line, column, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum BzsError {
    /// Lexical error with location information.
    ///
    /// # Example
    /// ```
    /// # use bzs::BzsError;
    /// let err = BzsError::LexError {
    ///     line: 2,
    ///     column: 7,
    ///     message: "Unexpected character: '!'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Lex error at line 2, column 7: Unexpected character: '!'");
    /// ```
    #[error("Lex error at line {line}, column {column}: {message}")]
    LexError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Parse error with location information.
    ///
    /// # Example
    /// ```
    /// # use bzs::BzsError;
    /// let err = BzsError::ParseError {
    ///     line: 3,
    ///     column: 1,
    ///     message: "directives must precede melody content".to_string(),
    /// };
    /// assert_eq!(
    ///     err.to_string(),
    ///     "Parse error at line 3, column 1: directives must precede melody content"
    /// );
    /// ```
    #[error("Parse error at line {line}, column {column}: {message}")]
    ParseError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Invalid player options (YAML syntax or out-of-range values).
    #[error("Invalid options: {0}")]
    ConfigError(String),
}

impl BzsError {
    pub(crate) fn lex(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexError {
            line,
            column,
            message: message.into(),
        }
    }

    pub(crate) fn parse(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            column,
            message: message.into(),
        }
    }
}
