//! # Schema
//!
//! Immutable description of one record type's validatable fields. Keys are
//! internal (Rust) field names; the external name is what error reports use.
//!
//! A field appears only if its generator found a usable tag for it. Fields
//! that are not externally visible are absent, not recorded as optional.

use std::any::TypeId;
use std::collections::BTreeMap;
use std::sync::Arc;

use reqfield_core::RecordType;

/// Per-type validation schema.
#[derive(Debug, Clone)]
pub struct Schema {
    record: RecordType,
    fields: Vec<&'static str>,
    external_names: BTreeMap<&'static str, String>,
    required: BTreeMap<&'static str, bool>,
    nested: BTreeMap<&'static str, Arc<Schema>>,
}

impl Schema {
    /// Start assembling a schema for `record`.
    pub fn draft(record: RecordType) -> SchemaDraft {
        SchemaDraft {
            schema: Schema {
                record,
                fields: Vec::new(),
                external_names: BTreeMap::new(),
                required: BTreeMap::new(),
                nested: BTreeMap::new(),
            },
        }
    }

    /// The record type this schema was derived from.
    pub fn record_type(&self) -> RecordType {
        self.record
    }

    /// Record type name.
    pub fn type_name(&self) -> &'static str {
        self.record.name()
    }

    /// Type identifier of the record.
    pub fn type_id(&self) -> TypeId {
        self.record.type_id()
    }

    /// Recorded fields in declaration order.
    pub fn fields(&self) -> &[&'static str] {
        &self.fields
    }

    /// Number of recorded fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// True if no field was recorded.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// External (report-facing) name of a field.
    pub fn external_name(&self, field: &str) -> Option<&str> {
        self.external_names.get(field).map(String::as_str)
    }

    /// Whether a field is required. `None` if the field is not recorded.
    pub fn is_required(&self, field: &str) -> Option<bool> {
        self.required.get(field).copied()
    }

    /// Nested schema of a record-valued field.
    pub fn nested(&self, field: &str) -> Option<&Arc<Schema>> {
        self.nested.get(field)
    }

    /// Field name to external name.
    pub fn external_names(&self) -> &BTreeMap<&'static str, String> {
        &self.external_names
    }

    /// Field name to required flag.
    pub fn required_fields(&self) -> &BTreeMap<&'static str, bool> {
        &self.required
    }

    /// Field name to nested schema.
    pub fn nested_schemas(&self) -> &BTreeMap<&'static str, Arc<Schema>> {
        &self.nested
    }
}

/// Structural equality: type name and the three field maps. Type identity
/// and declaration order are ignored.
impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.record.name() == other.record.name()
            && self.external_names == other.external_names
            && self.required == other.required
            && self.nested == other.nested
    }
}

impl Eq for Schema {}

/// Mutable assembly stage for a [`Schema`].
///
/// Generators fill a draft field by field and call [`SchemaDraft::finish`]
/// only once every field succeeded.
#[derive(Debug)]
pub struct SchemaDraft {
    schema: Schema,
}

impl SchemaDraft {
    /// Record a field's external name and required flag.
    pub fn field(mut self, field: &'static str, external_name: impl Into<String>, required: bool) -> Self {
        self.add_field(field, external_name, required);
        self
    }

    /// Attach a nested schema to a field.
    pub fn nested(mut self, field: &'static str, schema: impl Into<Arc<Schema>>) -> Self {
        self.add_nested(field, schema);
        self
    }

    /// In-place form of [`SchemaDraft::field`].
    pub fn add_field(&mut self, field: &'static str, external_name: impl Into<String>, required: bool) {
        if !self.schema.external_names.contains_key(field) {
            self.schema.fields.push(field);
        }
        self.schema.external_names.insert(field, external_name.into());
        self.schema.required.insert(field, required);
    }

    /// In-place form of [`SchemaDraft::nested`].
    pub fn add_nested(&mut self, field: &'static str, schema: impl Into<Arc<Schema>>) {
        self.schema.nested.insert(field, schema.into());
    }

    /// Freeze the schema.
    pub fn finish(self) -> Schema {
        self.schema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqfield_core::{impl_record, RecordType};

    #[derive(Default)]
    struct Profile {
        bio: String,
    }

    impl_record!(Profile {
        bio: scalar => r#"json:"bio,omitempty""#,
    });

    #[derive(Default)]
    struct OtherProfile {
        bio: String,
    }

    impl_record!(OtherProfile {
        bio: scalar => r#"json:"bio,omitempty""#,
    });

    #[test]
    fn test_draft_keeps_declaration_order() {
        let schema = Schema::draft(RecordType::of::<Profile>())
            .field("zeta", "zeta", true)
            .field("alpha", "alpha", false)
            .finish();
        assert_eq!(schema.fields(), ["zeta", "alpha"]);
        assert_eq!(schema.len(), 2);
        assert_eq!(schema.is_required("alpha"), Some(false));
        assert_eq!(schema.is_required("missing"), None);
    }

    #[test]
    fn test_refield_does_not_duplicate_order() {
        let schema = Schema::draft(RecordType::of::<Profile>())
            .field("bio", "bio", true)
            .field("bio", "biography", false)
            .finish();
        assert_eq!(schema.fields(), ["bio"]);
        assert_eq!(schema.external_name("bio"), Some("biography"));
    }

    #[test]
    fn test_equality_ignores_type_identity() {
        let a = Schema::draft(RecordType::of::<Profile>()).field("bio", "bio", false).finish();
        let b = Schema::draft(RecordType::of::<OtherProfile>()).field("bio", "bio", false).finish();
        // Different type names, so not equal.
        assert_ne!(a, b);

        let c = Schema::draft(RecordType::of::<Profile>()).field("bio", "bio", false).finish();
        assert_eq!(a, c);
        assert_eq!(a.type_id(), c.type_id());
    }

    #[test]
    fn test_nested_schema_equality_is_structural() {
        let inner = Schema::draft(RecordType::of::<Profile>()).field("bio", "bio", false).finish();
        let a = Schema::draft(RecordType::of::<Profile>())
            .field("bio", "bio", true)
            .nested("bio", inner.clone())
            .finish();
        let b = Schema::draft(RecordType::of::<Profile>())
            .field("bio", "bio", true)
            .nested("bio", Arc::new(inner))
            .finish();
        assert_eq!(a, b);
        assert!(a.nested("bio").is_some());
    }
}
