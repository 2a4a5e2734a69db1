//! # Error Types
//!
//! This module defines all error types for the theory engine.
//!
//! Every failure is detected at construction or mutation time and reported
//! synchronously; nothing is ever left half-built.
//!
//! ## Error Types
//! - `ParseError` - Malformed note, chord, interval, scale or tempo text
//! - `RangeError` - A value outside its musical domain (degree, inversion, bpm, ...)
//! - `ConfigError` - Invalid YAML in a passage file
//!
//! ## Usage
//! ```rust
//! use theory::{Chord, TheoryError};
//!
//! match "Xmaj".parse::<Chord>() {
//!     Ok(chord) => println!("{}", chord),
//!     Err(TheoryError::ParseError { input, message }) => {
//!         eprintln!("Could not read '{}': {}", input, message);
//!     }
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TheoryError {
    /// Parse error with the offending input.
    ///
    /// Occurs when note names, chord symbols or other musical text cannot be read.
    ///
    /// # Example
    /// ```
    /// # use theory::TheoryError;
    /// let err = TheoryError::ParseError {
    ///     input: "H4".to_string(),
    ///     message: "unknown note letter 'H'".to_string(),
    /// };
    /// assert_eq!(err.to_string(), "Parse error in 'H4': unknown note letter 'H'");
    /// ```
    #[error("Parse error in '{input}': {message}")]
    ParseError { input: String, message: String },

    /// Out-of-range error.
    ///
    /// Occurs for scale degrees past the end of a scale, inversion counts that
    /// reach the number of voices, non-positive tempos and invalid time signatures.
    ///
    /// # Example
    /// ```
    /// # use theory::TheoryError;
    /// let err = TheoryError::RangeError("bpm must be positive, got 0".to_string());
    /// assert_eq!(err.to_string(), "Out of range: bpm must be positive, got 0");
    /// ```
    #[error("Out of range: {0}")]
    RangeError(String),

    /// Invalid passage configuration.
    ///
    /// Occurs when a passage YAML document is malformed or a step is ambiguous.
    #[error("Invalid passage: {0}")]
    ConfigError(String),
}

impl TheoryError {
    pub(crate) fn parse(input: &str, message: impl Into<String>) -> Self {
        TheoryError::ParseError {
            input: input.to_string(),
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TheoryError>;
