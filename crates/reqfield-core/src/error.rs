//! # Error Types
//!
//! Errors raised by the foundational layer. Higher crates wrap these with
//! `#[from]` in their own error enums.

use thiserror::Error;

/// Error while reading struct-tag text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TagError {
    /// The tag text does not follow the `key:"value"` convention.
    #[error("malformed tag {tag:?}: {reason}")]
    Malformed {
        /// The full tag text that failed to parse.
        tag: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A quoted value contains an escape sequence that cannot be decoded.
    #[error("invalid escape sequence '\\{sequence}' in tag {tag:?}")]
    InvalidEscape {
        /// The full tag text.
        tag: String,
        /// The character following the backslash.
        sequence: char,
    },
}
