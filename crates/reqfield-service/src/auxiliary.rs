//! # Auxiliary Checks
//!
//! Semantic checks supplied per call and run after the required-field
//! pass, in order. A check records ordinary validation outcomes in the tree
//! and returns `Ok(())`. Returning `Err` means the check itself could not
//! run; the service stops at the first such error.

use std::error::Error as StdError;

use reqfield_core::ValidationTree;
use thiserror::Error;

/// A check that could not be carried out.
#[derive(Error, Debug)]
#[error("auxiliary check failed: {message}")]
pub struct AuxiliaryError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync + 'static>>,
}

impl AuxiliaryError {
    /// An error with a message only.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    /// An error wrapping an underlying cause.
    pub fn with_source(message: impl Into<String>, source: impl Into<Box<dyn StdError + Send + Sync + 'static>>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The message, without the standard prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// A semantic check over one record type.
pub trait AuxiliaryCheck<T: ?Sized> {
    /// Inspect `instance` and append findings to `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`AuxiliaryError`] if the check cannot be carried out.
    fn check(&self, instance: &T, tree: &mut ValidationTree) -> Result<(), AuxiliaryError>;
}

impl<T, F> AuxiliaryCheck<T> for F
where
    T: ?Sized,
    F: Fn(&T, &mut ValidationTree) -> Result<(), AuxiliaryError>,
{
    fn check(&self, instance: &T, tree: &mut ValidationTree) -> Result<(), AuxiliaryError> {
        self(instance, tree)
    }
}

/// Owned, shareable check, as stored by prepared validations.
pub type BoxedCheck<T> = Box<dyn AuxiliaryCheck<T> + Send + Sync>;
