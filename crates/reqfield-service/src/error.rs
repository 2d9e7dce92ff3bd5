//! # Service Errors
//!
//! Everything that can go wrong in a `validate` call other than the
//! validation failures themselves, which travel in the rendered report.

use reqfield_parser::ParseError;
use reqfield_schema::SchemaError;
use reqfield_validator::ValidateError;
use thiserror::Error;

use crate::auxiliary::AuxiliaryError;

/// Top-level error of the validator service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The schema could not be derived.
    #[error("schema construction failed: {0}")]
    Schema(#[from] SchemaError),

    /// The schema and the instance disagree.
    #[error("validation failed: {0}")]
    Validate(#[from] ValidateError),

    /// The report could not be rendered.
    #[error("parsing validations failed: {0}")]
    Parse(#[from] ParseError),

    /// An auxiliary check could not run.
    #[error(transparent)]
    Auxiliary(#[from] AuxiliaryError),

    /// The configuration could not be loaded.
    #[error("invalid configuration: {source}")]
    Config {
        /// Underlying YAML error.
        #[source]
        source: serde_yaml::Error,
    },
}

impl ServiceError {
    /// True for programmer faults: bad tags, a schema paired with the wrong
    /// type, or colliding report keys.
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Schema(_) | Self::Validate(_) | Self::Parse(_))
    }
}
