//! # Required-Field Validator
//!
//! Lockstep walk over a schema and a live record. Every schema field is
//! visited exactly once per call.

use reqfield_core::{Diagnostics, Record, RecordValue, ValidationTree};
use reqfield_schema::Schema;
use tracing::debug;

use crate::error::{RequiredFieldError, ValidateError};

/// Records unset required fields into a [`ValidationTree`].
#[derive(Debug, Clone, Default)]
pub struct RequiredFieldValidator {
    diagnostics: Diagnostics,
}

impl RequiredFieldValidator {
    /// Create a validator reporting visited fields to `diagnostics`.
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics: diagnostics.for_component("required_field_validator"),
        }
    }

    /// Validate `instance` against `schema`, appending to `tree`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidateError::SchemaMismatch`] if the schema describes a
    /// different record type, and [`ValidateError::FieldNotFound`] if a
    /// schema field cannot be read from the instance. Errors found in
    /// nested records abort the whole call; `tree` may then hold a partial
    /// result and should be discarded.
    pub fn validate(
        &self,
        instance: &dyn RecordValue,
        schema: &Schema,
        tree: &mut ValidationTree,
    ) -> Result<(), ValidateError> {
        let record = instance.record_type();
        if record.type_id() != schema.type_id() {
            return Err(ValidateError::SchemaMismatch {
                schema_type: schema.type_name(),
                instance_type: record.name(),
            });
        }

        for &field in schema.fields() {
            let not_found = || ValidateError::FieldNotFound {
                record: record.name(),
                field: field.to_string(),
            };
            let external_name = schema.external_name(field).ok_or_else(not_found)?;
            let required = schema.is_required(field).ok_or_else(not_found)?;
            let value = instance.field_value(field).ok_or_else(not_found)?;
            let initialized = !value.is_zero();

            self.diagnostics.emit(|component| {
                debug!(
                    component = component,
                    struct_type = record.name(),
                    field_name = field,
                    external_name = external_name,
                    field_is_required = required,
                    field_is_initialized = initialized,
                    "visited field"
                );
            });

            if !initialized {
                if required {
                    tree.add_field_error(external_name, RequiredFieldError::new(external_name));
                }
                continue;
            }

            let (Some(nested_record), Some(nested_schema)) = (value.as_record(), schema.nested(field))
            else {
                continue;
            };

            let mut nested_tree = ValidationTree::new(nested_schema.type_name());
            self.validate(nested_record, nested_schema, &mut nested_tree)?;
            tree.add_nested_tree(external_name, nested_tree);
        }

        Ok(())
    }

    /// Validate into a fresh tree named after the schema's type.
    ///
    /// # Errors
    ///
    /// Same as [`RequiredFieldValidator::validate`].
    pub fn validate_new(
        &self,
        instance: &dyn RecordValue,
        schema: &Schema,
    ) -> Result<ValidationTree, ValidateError> {
        let mut tree = ValidationTree::new(schema.type_name());
        self.validate(instance, schema, &mut tree)?;
        Ok(tree)
    }

    /// Typed form of [`RequiredFieldValidator::validate_new`].
    ///
    /// # Errors
    ///
    /// Same as [`RequiredFieldValidator::validate`].
    pub fn validate_record<T: Record>(&self, instance: &T, schema: &Schema) -> Result<ValidationTree, ValidateError> {
        self.validate_new(instance, schema)
    }
}
