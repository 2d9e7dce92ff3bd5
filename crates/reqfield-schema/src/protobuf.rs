//! # Protobuf Tag Generator
//!
//! Reads the tags the protobuf compiler attaches to generated message
//! fields:
//!
//! ```text
//! protobuf:"bytes,1,opt,name=first_name,json=firstName,proto3"
//! protobuf_oneof:"contact"
//! ```
//!
//! The external name is the `name=` part. Union fields carry only a
//! `protobuf_oneof` tag whose value is the union's name.
//!
//! ## Requiredness
//!
//! - Union fields are optional.
//! - Optional scalars (`Option<T>`, proto3 `optional`) are optional.
//! - Optional message fields are required unless their tag marks them as a
//!   `oneof` member.
//! - Everything else is required.
//!
//! Generated bookkeeping fields ([`PROTOBUF_GENERATED_FIELDS`]) are skipped.

use reqfield_core::{Diagnostics, FieldInfo, FieldKind, RecordType, TagOptions};

use crate::error::SchemaError;
use crate::generator::{derive_schema, lookup_tag, FieldRule, SchemaGenerator, TagRules};
use crate::schema::Schema;

/// Tag key for regular message fields.
pub const PROTOBUF_TAG: &str = "protobuf";

/// Tag key for union (oneof) fields.
pub const PROTOBUF_ONEOF_TAG: &str = "protobuf_oneof";

/// Tag option marking a union member.
pub const PROTOBUF_ONEOF: &str = "oneof";

/// Prefix of the tag part carrying the field's proto name.
pub const PROTOBUF_NAME_PREFIX: &str = "name=";

/// Internal fields emitted by the protobuf compiler.
pub const PROTOBUF_GENERATED_FIELDS: [&str; 3] = ["state", "size_cache", "unknown_fields"];

/// Schema generator for protobuf-compiled records.
#[derive(Debug, Clone, Default)]
pub struct ProtobufGenerator {
    diagnostics: Diagnostics,
}

impl ProtobufGenerator {
    /// Create a generator reporting detected fields to `diagnostics`.
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics: diagnostics.for_component("schema_protobuf_generator"),
        }
    }

    /// True if `field` is compiler-generated bookkeeping.
    pub fn is_generated_field(field: &str) -> bool {
        PROTOBUF_GENERATED_FIELDS.contains(&field)
    }

    fn classify_union(record: RecordType, field: &FieldInfo) -> Result<FieldRule, SchemaError> {
        let group = lookup_tag(record, field, PROTOBUF_ONEOF_TAG)?.ok_or(SchemaError::MissingTag {
            record: record.name(),
            field: field.name(),
            key: PROTOBUF_ONEOF_TAG,
        })?;
        if group.trim().is_empty() {
            return Err(SchemaError::EmptyTag {
                record: record.name(),
                field: field.name(),
                key: PROTOBUF_ONEOF_TAG,
            });
        }
        Ok(FieldRule {
            external_name: group.trim().to_string(),
            required: false,
            tag: group,
        })
    }
}

impl TagRules for ProtobufGenerator {
    fn classify(&self, record: RecordType, field: &FieldInfo) -> Result<Option<FieldRule>, SchemaError> {
        if Self::is_generated_field(field.name()) {
            return Ok(None);
        }

        if matches!(field.kind(), FieldKind::OneOf) {
            return Self::classify_union(record, field).map(Some);
        }

        let tag = lookup_tag(record, field, PROTOBUF_TAG)?.ok_or(SchemaError::MissingTag {
            record: record.name(),
            field: field.name(),
            key: PROTOBUF_TAG,
        })?;
        if tag.trim().is_empty() {
            return Err(SchemaError::EmptyTag {
                record: record.name(),
                field: field.name(),
                key: PROTOBUF_TAG,
            });
        }

        let options = TagOptions::parse(&tag);
        let external_name = options
            .find_prefixed(PROTOBUF_NAME_PREFIX)
            .filter(|name| !name.is_empty())
            .ok_or(SchemaError::MissingTagName {
                record: record.name(),
                field: field.name(),
            })?
            .to_string();

        let required = match field.kind() {
            FieldKind::Scalar | FieldKind::Record(_) => true,
            FieldKind::NullableRecord(_) => !options.has(PROTOBUF_ONEOF),
            FieldKind::NullableScalar | FieldKind::OneOf => false,
        };

        Ok(Some(FieldRule {
            external_name,
            required,
            tag: tag.clone(),
        }))
    }
}

impl SchemaGenerator for ProtobufGenerator {
    fn build(&self, record: RecordType) -> Result<Schema, SchemaError> {
        derive_schema(self, record, &self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqfield_core::impl_record;

    #[derive(Default)]
    struct Timestamp {
        seconds: i64,
        nanos: i32,
    }

    impl_record!(Timestamp {
        seconds: scalar => r#"protobuf:"varint,1,opt,name=seconds,proto3" json:"seconds,omitempty""#,
        nanos: scalar => r#"protobuf:"varint,2,opt,name=nanos,proto3" json:"nanos,omitempty""#,
    });

    #[derive(Default, PartialEq)]
    enum Contact {
        #[default]
        Unset,
        Phone(String),
    }

    #[derive(Default)]
    struct SignUpRequest {
        state: u8,
        size_cache: i32,
        unknown_fields: Vec<u8>,
        first_name: String,
        middle_name: Option<String>,
        birthdate: Option<Box<Timestamp>>,
        referral: Option<Box<Timestamp>>,
        contact: Option<Contact>,
    }

    impl_record!(SignUpRequest {
        state: scalar,
        size_cache: scalar,
        unknown_fields: scalar,
        first_name: scalar => r#"protobuf:"bytes,1,opt,name=first_name,json=firstName,proto3" json:"first_name,omitempty""#,
        middle_name: optional => r#"protobuf:"bytes,2,opt,name=middle_name,json=middleName,proto3,oneof" json:"middle_name,omitempty""#,
        birthdate: optional_record(Timestamp) => r#"protobuf:"bytes,3,opt,name=birthdate,proto3" json:"birthdate,omitempty""#,
        referral: optional_record(Timestamp) => r#"protobuf:"bytes,4,opt,name=referral,proto3,oneof""#,
        contact: one_of => r#"protobuf_oneof:"contact""#,
    });

    #[derive(Default)]
    struct NoName {
        value: String,
    }

    impl_record!(NoName {
        value: scalar => r#"protobuf:"bytes,1,opt,proto3""#,
    });

    #[test]
    fn test_generated_fields_skipped() {
        let schema = ProtobufGenerator::default().build_for::<SignUpRequest>().unwrap();
        for generated in PROTOBUF_GENERATED_FIELDS {
            assert_eq!(schema.is_required(generated), None, "{generated} must be skipped");
        }
        assert_eq!(
            schema.fields(),
            ["first_name", "middle_name", "birthdate", "referral", "contact"]
        );
    }

    #[test]
    fn test_requiredness_rules() {
        let schema = ProtobufGenerator::default().build_for::<SignUpRequest>().unwrap();
        assert_eq!(schema.is_required("first_name"), Some(true));
        assert_eq!(schema.is_required("middle_name"), Some(false));
        assert_eq!(schema.is_required("birthdate"), Some(true));
        assert_eq!(schema.is_required("referral"), Some(false));
        assert_eq!(schema.is_required("contact"), Some(false));
    }

    #[test]
    fn test_external_names_from_name_part() {
        let schema = ProtobufGenerator::default().build_for::<SignUpRequest>().unwrap();
        assert_eq!(schema.external_name("first_name"), Some("first_name"));
        assert_eq!(schema.external_name("contact"), Some("contact"));
    }

    #[test]
    fn test_nested_message_schema() {
        let schema = ProtobufGenerator::default().build_for::<SignUpRequest>().unwrap();
        let birthdate = schema.nested("birthdate").unwrap();
        assert_eq!(birthdate.type_name(), "Timestamp");
        assert_eq!(birthdate.is_required("seconds"), Some(true));
        assert!(schema.nested("referral").is_some());
    }

    #[test]
    fn test_missing_name_part() {
        let err = ProtobufGenerator::default().build_for::<NoName>().unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingTagName {
                record: "NoName",
                field: "value",
            }
        );
    }

    #[test]
    fn test_is_generated_field() {
        assert!(ProtobufGenerator::is_generated_field("size_cache"));
        assert!(!ProtobufGenerator::is_generated_field("first_name"));
    }

    #[test]
    fn test_contact_default_is_unset() {
        assert!(Contact::default() == Contact::Unset);
        assert!(Contact::Phone(String::new()) != Contact::Unset);
    }
}
