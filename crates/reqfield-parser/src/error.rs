//! # Parse Errors

use thiserror::Error;

/// Error while rendering parsed validations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Two failures resolve to the same output key.
    #[error("duplicate field name in parsed validations: {field}")]
    DuplicateFieldName {
        /// The colliding key.
        field: String,
    },
}
