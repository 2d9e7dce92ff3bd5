//! # Schema Generation
//!
//! The traversal shared by every generator. For each field of a record
//! type, in declaration order:
//!
//! 1. Skip it if it is not externally visible.
//! 2. Ask the generator's [`TagRules`] for its external name and required
//!    flag. Rules may also skip a field outright (generated bookkeeping).
//! 3. If the field holds a record, directly or through a nullable
//!    reference, derive the nested schema recursively.
//! 4. Report the detected field to the diagnostics sink.
//!
//! The first error aborts construction. Nothing partial escapes.

use reqfield_core::{Diagnostics, FieldInfo, FieldValue, Introspect, RecordType, RecordValue};
use tracing::debug;

use crate::error::SchemaError;
use crate::schema::Schema;

/// External name and requiredness resolved from one field's tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRule {
    /// Name used in error reports.
    pub external_name: String,
    /// Whether an unset value is a failure.
    pub required: bool,
    /// Tag text that produced this rule, for diagnostics.
    pub tag: String,
}

/// Tag syntax and optionality rules of one serialization format.
pub trait TagRules {
    /// Resolve a visible field's rule. `Ok(None)` skips the field entirely.
    ///
    /// # Errors
    ///
    /// Returns a [`SchemaError`] if the field's tag is missing, empty,
    /// malformed, or lacks a name.
    fn classify(&self, record: RecordType, field: &FieldInfo) -> Result<Option<FieldRule>, SchemaError>;
}

/// Derives a [`Schema`] from a record type.
pub trait SchemaGenerator: Send + Sync {
    /// Derive the schema of `record`.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] met while classifying fields of
    /// `record` or of any nested record type.
    fn build(&self, record: RecordType) -> Result<Schema, SchemaError>;

    /// Derive the schema of `T`.
    fn build_for<T: Introspect>(&self) -> Result<Schema, SchemaError>
    where
        Self: Sized,
    {
        self.build(RecordType::of::<T>())
    }

    /// Derive the schema from an instance, which may be absent.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NilInstance`] when `instance` is `None`.
    fn build_from_instance(&self, instance: Option<&dyn RecordValue>) -> Result<Schema, SchemaError> {
        let instance = instance.ok_or(SchemaError::NilInstance)?;
        self.build(instance.record_type())
    }

    /// Derive the schema from an arbitrary field value, dereferencing
    /// nullable records.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NilInstance`] for a null record reference and
    /// [`SchemaError::NotARecord`] for non-record values.
    fn build_from_value(&self, value: &FieldValue<'_>) -> Result<Schema, SchemaError> {
        match value {
            FieldValue::Record { record, .. } => self.build(record.record_type()),
            FieldValue::NullableRecord(Some(record)) => self.build(record.record_type()),
            FieldValue::NullableRecord(None) => Err(SchemaError::NilInstance),
            FieldValue::Scalar { .. } => Err(SchemaError::NotARecord { kind: "scalar" }),
            FieldValue::Nullable { .. } => Err(SchemaError::NotARecord {
                kind: "nullable_scalar",
            }),
        }
    }
}

/// Run the shared traversal for `record` with the given rules.
///
/// # Errors
///
/// Propagates the first [`SchemaError`] from `rules` at any depth.
pub(crate) fn derive_schema<R: TagRules + ?Sized>(
    rules: &R,
    record: RecordType,
    diagnostics: &Diagnostics,
) -> Result<Schema, SchemaError> {
    let mut draft = Schema::draft(record);

    for field in record.fields() {
        if !field.is_exported() {
            continue;
        }

        let Some(rule) = rules.classify(record, field)? else {
            continue;
        };

        if let Some(nested_type) = field.kind().nested_type() {
            let nested = derive_schema(rules, nested_type, diagnostics)?;
            draft.add_nested(field.name(), nested);
        }

        diagnostics.emit(|component| {
            debug!(
                component = component,
                struct_type = record.name(),
                field_name = field.name(),
                field_kind = field.kind().label(),
                field_tag = rule.tag.as_str(),
                field_is_required = rule.required,
                "detected field on record type"
            );
        });

        draft.add_field(field.name(), rule.external_name, rule.required);
    }

    Ok(draft.finish())
}

/// Look up `key` in a field's tag, mapping syntax errors to [`SchemaError`].
pub(crate) fn lookup_tag(
    record: RecordType,
    field: &FieldInfo,
    key: &'static str,
) -> Result<Option<String>, SchemaError> {
    field
        .tag()
        .lookup(key)
        .map_err(|source| SchemaError::MalformedTag {
            record: record.name(),
            field: field.name(),
            source,
        })
}
