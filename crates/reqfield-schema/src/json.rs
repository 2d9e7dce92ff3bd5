//! # JSON Tag Generator
//!
//! Reads `json:"..."` tags. The external name is the first comma-separated
//! part of the value.
//!
//! | Tag                         | External name | Required |
//! |-----------------------------|---------------|----------|
//! | `json:"email"`              | `email`       | yes      |
//! | `json:"email,omitempty"`    | `email`       | no       |
//! | `json:"-"`                  | field name    | no       |
//! | `json:",omitempty"`         | error: empty tag          |
//! | (no `json` key)             | error: missing tag        |
//!
//! Union (`one_of`) fields are always optional.

use reqfield_core::tag::TagOptions;
use reqfield_core::{Diagnostics, FieldInfo, FieldKind, RecordType};

use crate::error::SchemaError;
use crate::generator::{derive_schema, lookup_tag, FieldRule, SchemaGenerator, TagRules};
use crate::schema::Schema;

/// Tag key read by this generator.
pub const JSON_TAG: &str = "json";

/// Option marking a field optional.
pub const JSON_OMITEMPTY: &str = "omitempty";

/// Value marking a field as skipped by the serializer.
pub const JSON_SKIP: &str = "-";

/// Schema generator for JSON-tagged records.
#[derive(Debug, Clone, Default)]
pub struct JsonGenerator {
    diagnostics: Diagnostics,
}

impl JsonGenerator {
    /// Create a generator reporting detected fields to `diagnostics`.
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics: diagnostics.for_component("schema_json_generator"),
        }
    }
}

impl TagRules for JsonGenerator {
    fn classify(&self, record: RecordType, field: &FieldInfo) -> Result<Option<FieldRule>, SchemaError> {
        let tag = lookup_tag(record, field, JSON_TAG)?.ok_or(SchemaError::MissingTag {
            record: record.name(),
            field: field.name(),
            key: JSON_TAG,
        })?;

        if tag.trim() == JSON_SKIP {
            return Ok(Some(FieldRule {
                external_name: field.name().to_string(),
                required: false,
                tag,
            }));
        }

        let options = TagOptions::parse(&tag);
        if options.name().is_empty() {
            return Err(SchemaError::EmptyTag {
                record: record.name(),
                field: field.name(),
                key: JSON_TAG,
            });
        }

        let required = !options.has(JSON_OMITEMPTY) && !matches!(field.kind(), FieldKind::OneOf);
        Ok(Some(FieldRule {
            external_name: options.name().to_string(),
            required,
            tag: tag.clone(),
        }))
    }
}

impl SchemaGenerator for JsonGenerator {
    fn build(&self, record: RecordType) -> Result<Schema, SchemaError> {
        derive_schema(self, record, &self.diagnostics)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqfield_core::{impl_record, RecordValue};

    #[derive(Default, PartialEq)]
    struct Address {
        street: String,
        unit: Option<u32>,
    }

    impl_record!(Address {
        street: scalar => r#"json:"street""#,
        unit: optional => r#"json:"unit,omitempty""#,
    });

    #[derive(Default)]
    struct Account {
        email: String,
        nickname: String,
        legacy: String,
        address: Address,
        billing: Option<Box<Address>>,
        plan: Option<u8>,
        session: u64,
    }

    impl_record!(Account {
        email: scalar => r#"json:"email""#,
        nickname: scalar => r#"json:"nick_name,omitempty""#,
        legacy: scalar => r#"json:"-""#,
        address: record(Address) => r#"json:"address""#,
        billing: optional_record(Address) => r#"json:"billing,omitempty""#,
        plan: one_of => r#"json:"plan""#,
        session: private,
    });

    #[derive(Default)]
    struct Untagged {
        email: String,
    }

    impl_record!(Untagged {
        email: scalar => r#"protobuf:"bytes,1,opt,name=email,proto3""#,
    });

    #[derive(Default, PartialEq)]
    struct NamelessTag {
        email: String,
    }

    impl_record!(NamelessTag {
        email: scalar => r#"json:",omitempty""#,
    });

    #[derive(Default)]
    struct BrokenTag {
        email: String,
    }

    impl_record!(BrokenTag {
        email: scalar => r#"json:"email"#,
    });

    #[derive(Default)]
    struct NestedBroken {
        inner: NamelessTag,
    }

    impl_record!(NestedBroken {
        inner: record(NamelessTag) => r#"json:"inner""#,
    });

    #[test]
    fn test_external_names_and_requiredness() {
        let schema = JsonGenerator::default().build_for::<Account>().unwrap();
        assert_eq!(schema.type_name(), "Account");
        assert_eq!(schema.external_name("email"), Some("email"));
        assert_eq!(schema.is_required("email"), Some(true));
        assert_eq!(schema.external_name("nickname"), Some("nick_name"));
        assert_eq!(schema.is_required("nickname"), Some(false));
        assert_eq!(schema.external_name("legacy"), Some("legacy"));
        assert_eq!(schema.is_required("legacy"), Some(false));
        assert_eq!(schema.is_required("plan"), Some(false));
    }

    #[test]
    fn test_private_fields_are_absent() {
        let schema = JsonGenerator::default().build_for::<Account>().unwrap();
        assert_eq!(schema.external_name("session"), None);
        assert_eq!(schema.is_required("session"), None);
        assert_eq!(
            schema.fields(),
            ["email", "nickname", "legacy", "address", "billing", "plan"]
        );
    }

    #[test]
    fn test_nested_schemas_for_direct_and_nullable_records() {
        let schema = JsonGenerator::default().build_for::<Account>().unwrap();
        let address = schema.nested("address").unwrap();
        assert_eq!(address.type_name(), "Address");
        assert_eq!(address.is_required("street"), Some(true));
        assert_eq!(address.is_required("unit"), Some(false));
        assert_eq!(schema.nested("billing").unwrap().as_ref(), address.as_ref());
        assert!(schema.nested("email").is_none());
    }

    #[test]
    fn test_missing_tag() {
        let err = JsonGenerator::default().build_for::<Untagged>().unwrap_err();
        assert_eq!(
            err,
            SchemaError::MissingTag {
                record: "Untagged",
                field: "email",
                key: "json",
            }
        );
    }

    #[test]
    fn test_empty_tag_name() {
        let err = JsonGenerator::default().build_for::<NamelessTag>().unwrap_err();
        assert!(matches!(err, SchemaError::EmptyTag { field: "email", .. }));
    }

    #[test]
    fn test_malformed_tag() {
        let err = JsonGenerator::default().build_for::<BrokenTag>().unwrap_err();
        assert!(matches!(err, SchemaError::MalformedTag { field: "email", .. }));
    }

    #[test]
    fn test_nested_error_aborts_construction() {
        let err = JsonGenerator::default().build_for::<NestedBroken>().unwrap_err();
        assert!(matches!(err, SchemaError::EmptyTag { record: "NamelessTag", .. }));
    }

    #[test]
    fn test_schema_idempotent_across_builds() {
        let generator = JsonGenerator::default();
        let first = generator.build_for::<Account>().unwrap();
        let instance = Account::default();
        let second = generator
            .build_from_instance(Some(&instance as &dyn RecordValue))
            .unwrap();
        assert_eq!(first, second);
        assert_eq!(first.external_names(), second.external_names());
        assert_eq!(first.required_fields(), second.required_fields());
        assert_eq!(first.nested_schemas(), second.nested_schemas());
    }

    #[test]
    fn test_build_from_absent_instance() {
        let err = JsonGenerator::default().build_from_instance(None).unwrap_err();
        assert_eq!(err, SchemaError::NilInstance);
    }

    #[test]
    fn test_build_from_value_dereferences() {
        let generator = JsonGenerator::default();
        let account = Account {
            billing: Some(Box::new(Address::default())),
            ..Default::default()
        };
        let billing = account.field_value("billing").unwrap();
        assert_eq!(generator.build_from_value(&billing).unwrap().type_name(), "Address");

        let empty = Account::default();
        let null_billing = empty.field_value("billing").unwrap();
        assert_eq!(
            generator.build_from_value(&null_billing).unwrap_err(),
            SchemaError::NilInstance
        );

        let email = account.field_value("email").unwrap();
        assert!(matches!(
            generator.build_from_value(&email).unwrap_err(),
            SchemaError::NotARecord { .. }
        ));
    }
}
