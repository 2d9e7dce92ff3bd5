//! End-to-end required-field behaviour through the service facade.

use std::collections::BTreeSet;

use reqfield_core::{impl_record, Diagnostics, RecordValue};
use reqfield_parser::{
    FieldPathRenderer, FlattenedRenderer, JsonRenderer, ParseError, RenderedValidations, Renderer, TextRenderer,
};
use reqfield_schema::{JsonGenerator, SchemaGenerator};
use reqfield_service::{ServiceError, ValidatorService};
use serde_json::json;

// ─── Records ─────────────────────────────────────────────────────────

#[derive(Default)]
struct Profile {
    bio: String,
}

impl_record!(Profile {
    bio: scalar => r#"json:"Bio,omitempty""#,
});

#[derive(Default)]
struct Account {
    email: String,
    profile: Option<Box<Profile>>,
}

impl_record!(Account {
    email: scalar => r#"json:"Email""#,
    profile: optional_record(Profile) => r#"json:"Profile""#,
});

#[derive(Default)]
struct Settings {
    theme: String,
    locale: String,
    retries: u32,
    beta: bool,
    nickname: String,
    motto: Option<String>,
    secret: String,
}

impl_record!(Settings {
    theme: scalar => r#"json:"theme""#,
    locale: scalar => r#"json:"locale""#,
    retries: scalar => r#"json:"retries""#,
    beta: scalar => r#"json:"beta""#,
    nickname: scalar => r#"json:"nickname,omitempty""#,
    motto: optional => r#"json:"motto,omitempty""#,
    secret: private,
});

#[derive(Default)]
struct Address {
    street: String,
    city: String,
}

impl_record!(Address {
    street: scalar => r#"json:"street""#,
    city: scalar => r#"json:"city""#,
});

#[derive(Default)]
struct Customer {
    name: String,
    address: Option<Box<Address>>,
}

impl_record!(Customer {
    name: scalar => r#"json:"name""#,
    address: optional_record(Address) => r#"json:"address""#,
});

#[derive(Default, PartialEq)]
struct Branch {
    city: String,
    code: String,
}

impl_record!(Branch {
    city: scalar => r#"json:"city""#,
    code: scalar => r#"json:"code,omitempty""#,
});

#[derive(Default)]
struct Office {
    city: String,
    branch: Branch,
}

impl_record!(Office {
    city: scalar => r#"json:"city""#,
    branch: record(Branch) => r#"json:"branch""#,
});

fn flattened() -> ValidatorService<JsonGenerator, FlattenedRenderer> {
    ValidatorService::new(JsonGenerator::default(), FlattenedRenderer, Diagnostics::disabled())
}

fn field_paths() -> ValidatorService<JsonGenerator, FieldPathRenderer> {
    ValidatorService::new(JsonGenerator::default(), FieldPathRenderer, Diagnostics::disabled())
}

// ─── Properties ──────────────────────────────────────────────────────

#[test]
fn required_defaults_fail_once_each_and_optionals_never() {
    let report = flattened().validate(&Settings::default(), &[]).unwrap().unwrap();
    let keys: BTreeSet<&str> = report.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, BTreeSet::from(["beta", "locale", "retries", "theme"]));
    for (field, messages) in report.iter() {
        assert_eq!(messages, [format!("{field} is required")]);
    }

    let with_optionals = Settings {
        nickname: "n".into(),
        motto: Some(String::new()),
        secret: "s".into(),
        ..Default::default()
    };
    let report = flattened().validate(&with_optionals, &[]).unwrap().unwrap();
    assert_eq!(report.len(), 4);
    assert!(report.get("nickname").is_none());
    assert!(report.get("motto").is_none());
}

#[test]
fn null_required_record_reports_only_itself() {
    let customer = Customer {
        name: "ada".into(),
        address: None,
    };
    let report = field_paths().validate(&customer, &[]).unwrap().unwrap();
    assert_eq!(report.len(), 1);
    assert_eq!(report.get("address").unwrap(), ["address is required"]);
    assert!(report.entries().iter().all(|e| !e.path.starts_with("address.")));
}

#[test]
fn nested_leaf_failure_is_reachable_under_parent() {
    let customer = Customer {
        name: "ada".into(),
        address: Some(Box::new(Address {
            street: String::new(),
            city: "Lagos".into(),
        })),
    };

    let paths = field_paths().validate(&customer, &[]).unwrap().unwrap();
    assert_eq!(paths.len(), 1);
    let entry = &paths.entries()[0];
    assert!(entry.path.starts_with("address"));
    assert_eq!(entry.path, "address.street");
    assert_eq!(entry.messages, ["street is required"]);

    let flat = flattened().validate(&customer, &[]).unwrap().unwrap();
    assert_eq!(flat.len(), 1);
    assert_eq!(flat.get("street").unwrap(), ["street is required"]);

    let service = ValidatorService::new(JsonGenerator::default(), JsonRenderer, Diagnostics::disabled());
    let nested = service.validate(&customer, &[]).unwrap().unwrap();
    assert_eq!(nested, json!({ "address": { "street": ["street is required"] } }));
}

#[test]
fn schemas_from_separate_instances_are_structurally_equal() {
    let generator = JsonGenerator::default();
    let first = Account::default();
    let second = Account {
        email: "set".into(),
        profile: Some(Box::new(Profile::default())),
    };
    let a = generator.build_from_instance(Some(&first as &dyn RecordValue)).unwrap();
    let b = generator.build_from_instance(Some(&second as &dyn RecordValue)).unwrap();
    assert_eq!(a, b);
    assert_eq!(a.external_names(), b.external_names());
    assert_eq!(a.required_fields(), b.required_fields());
    assert_eq!(a.nested_schemas(), b.nested_schemas());
}

#[test]
fn present_profile_with_optional_bio_passes() {
    let account = Account {
        email: "set".into(),
        profile: Some(Box::new(Profile { bio: String::new() })),
    };
    assert!(flattened().validate(&account, &[]).unwrap().is_none());
}

#[test]
fn unset_email_and_null_profile_fail_at_top_level() {
    let report = flattened().validate(&Account::default(), &[]).unwrap().unwrap();
    assert_eq!(report.len(), 2);
    assert_eq!(report.get("Email").unwrap(), ["Email is required"]);
    assert_eq!(report.get("Profile").unwrap(), ["Profile is required"]);
}

#[test]
fn same_name_at_two_levels_is_a_duplicate_when_flattened() {
    let office = Office {
        city: String::new(),
        branch: Branch {
            city: String::new(),
            code: "LOS-1".into(),
        },
    };

    let err = flattened().validate(&office, &[]).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Parse(ParseError::DuplicateFieldName { ref field }) if field == "city"
    ));
    assert!(err.is_internal());

    let paths = field_paths().validate(&office, &[]).unwrap().unwrap();
    assert!(paths.get("city").is_some());
    assert!(paths.get("branch.city").is_some());
}

#[test]
fn repeated_validation_is_stable() {
    let service = field_paths();
    let first = service.validate(&Account::default(), &[]).unwrap();
    let second = service.validate(&Account::default(), &[]).unwrap();
    assert_eq!(first, second);
}

#[test]
fn text_report_lists_every_failed_field() {
    let service = ValidatorService::new(JsonGenerator::default(), TextRenderer, Diagnostics::disabled());
    let text = service.validate(&Account::default(), &[]).unwrap().unwrap();
    assert!(text.starts_with("$fields: {\n"));
    assert!(text.contains("\tEmail: {\n\t\t$errors: [\n\t\t\tEmail is required\n\t\t]\n"));
    assert!(text.contains("\tProfile: {\n\t\t$errors: [\n\t\t\tProfile is required\n\t\t]\n"));
    assert!(text.ends_with('}'));
}

#[test]
fn runtime_renderer_selection() {
    let service = ValidatorService::new(JsonGenerator::default(), Renderer::Flattened, Diagnostics::disabled());
    let report = service.validate(&Account::default(), &[]).unwrap().unwrap();
    assert!(matches!(report, RenderedValidations::Flattened(ref flat) if flat.len() == 2));
    assert_eq!(
        report.to_string(),
        r#"{"Email":["Email is required"],"Profile":["Profile is required"]}"#
    );
}

mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn exactly_the_unset_required_fields_are_reported(
            theme in proptest::option::of("[a-z]{1,8}"),
            locale in proptest::option::of("[a-z]{2}"),
            retries in 0u32..4,
            beta in any::<bool>(),
        ) {
            let settings = Settings {
                theme: theme.clone().unwrap_or_default(),
                locale: locale.clone().unwrap_or_default(),
                retries,
                beta,
                ..Default::default()
            };
            let mut expected = BTreeSet::new();
            if theme.is_none() { expected.insert("theme"); }
            if locale.is_none() { expected.insert("locale"); }
            if retries == 0 { expected.insert("retries"); }
            if !beta { expected.insert("beta"); }

            let report = flattened().validate(&settings, &[]).unwrap();
            match report {
                None => prop_assert!(expected.is_empty()),
                Some(flat) => {
                    let keys: BTreeSet<&str> = flat.iter().map(|(k, _)| k).collect();
                    prop_assert_eq!(keys, expected);
                }
            }
        }
    }
}
