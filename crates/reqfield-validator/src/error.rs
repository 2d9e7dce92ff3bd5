//! # Validation Errors
//!
//! [`ValidateError`] signals a caller bug: the schema was built for a
//! different type than the instance. [`RequiredFieldError`] is an ordinary
//! validation outcome and lives inside the tree, never on the error channel.

use thiserror::Error;

/// Schema and instance disagree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidateError {
    /// The schema was derived from another record type.
    #[error("schema for {schema_type} cannot validate an instance of {instance_type}")]
    SchemaMismatch {
        /// Type the schema describes.
        schema_type: &'static str,
        /// Type of the instance supplied.
        instance_type: &'static str,
    },

    /// A schema field has no value or no metadata on the instance side.
    #[error("field {field} not found on {record}")]
    FieldNotFound {
        /// Record type name.
        record: &'static str,
        /// Internal field name.
        field: String,
    },
}

/// An unset required field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{field} is required")]
pub struct RequiredFieldError {
    /// External name of the field.
    pub field: String,
}

impl RequiredFieldError {
    /// Error for the field with the given external name.
    pub fn new(field: impl Into<String>) -> Self {
        Self { field: field.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_message() {
        assert_eq!(RequiredFieldError::new("Email").to_string(), "Email is required");
    }

    #[test]
    fn test_mismatch_message_names_both_types() {
        let err = ValidateError::SchemaMismatch {
            schema_type: "SignUp",
            instance_type: "Login",
        };
        let msg = err.to_string();
        assert!(msg.contains("SignUp"));
        assert!(msg.contains("Login"));
    }
}
