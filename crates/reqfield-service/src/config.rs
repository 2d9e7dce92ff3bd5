//! # Configuration
//!
//! [`ValidatorConfig`] is plain data: build it in code or deserialize it
//! from YAML. Every key is optional.
//!
//! ```yaml
//! tag_format: protobuf
//! cache: cached
//! output: field_paths
//! password:
//!   minimum_length: 12
//!   minimum_caps_count: 1
//! birthdate:
//!   minimum_age: 18
//! ```

use reqfield_core::{Diagnostics, RecordType};
use reqfield_parser::Renderer;
use reqfield_schema::{JsonGenerator, ProtobufGenerator, Schema, SchemaError, SchemaGenerator};
use reqfield_validator::{BirthdatePolicy, FieldChecks, PasswordPolicy};
use serde::{Deserialize, Serialize};

use crate::error::ServiceError;

/// Which struct tags external names are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagFormat {
    /// `json:"..."` tags.
    #[default]
    Json,
    /// `protobuf:"..."` tags emitted by the protobuf compiler.
    Protobuf,
}

/// Whether schemas and prepared validations outlive a single call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CacheMode {
    /// Build once per type, reuse forever.
    #[default]
    Cached,
    /// Rebuild on every call.
    PerCall,
}

/// Validator service settings.
///
/// The password and birthdate policies reach validation through the
/// service's check builders ([`ValidatorService::password_check`] and
/// [`ValidatorService::birthdate_check`]); a policy is only applied to the
/// fields a caller registers a check for.
///
/// [`ValidatorService::password_check`]: crate::ValidatorService::password_check
/// [`ValidatorService::birthdate_check`]: crate::ValidatorService::birthdate_check
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// Tag syntax used for external names and requiredness.
    pub tag_format: TagFormat,
    /// Schema caching behaviour.
    pub cache: CacheMode,
    /// Report shape.
    pub output: Renderer,
    /// Password composition rules.
    pub password: PasswordPolicy,
    /// Accepted age range.
    pub birthdate: BirthdatePolicy,
}

impl ValidatorConfig {
    /// Parse a YAML document.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::Config`] if the document is not valid YAML
    /// or contains unknown keys or values.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ServiceError> {
        serde_yaml::from_str(yaml).map_err(|source| ServiceError::Config { source })
    }

    /// The schema generator for the configured tag format.
    pub fn generator(&self, diagnostics: &Diagnostics) -> ConfiguredGenerator {
        match self.tag_format {
            TagFormat::Json => ConfiguredGenerator::Json(JsonGenerator::new(diagnostics.clone())),
            TagFormat::Protobuf => ConfiguredGenerator::Protobuf(ProtobufGenerator::new(diagnostics.clone())),
        }
    }

    /// The field checks with the configured policies.
    pub fn field_checks(&self) -> FieldChecks {
        FieldChecks::new(self.password, self.birthdate)
    }
}

/// A generator chosen at runtime from [`TagFormat`].
#[derive(Debug, Clone)]
pub enum ConfiguredGenerator {
    /// Reads `json` tags.
    Json(JsonGenerator),
    /// Reads `protobuf` tags.
    Protobuf(ProtobufGenerator),
}

impl SchemaGenerator for ConfiguredGenerator {
    fn build(&self, record: RecordType) -> Result<Schema, SchemaError> {
        match self {
            Self::Json(generator) => generator.build(record),
            Self::Protobuf(generator) => generator.build(record),
        }
    }
}
