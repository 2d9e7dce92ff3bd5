//! # Schema Construction Errors
//!
//! Every variant is fatal to schema construction. No partial schema is ever
//! returned alongside one of these.

use reqfield_core::TagError;
use thiserror::Error;

/// Error while deriving a schema.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// The instance to derive from was absent.
    #[error("record instance cannot be null")]
    NilInstance,

    /// The (dereferenced) instance is not a record.
    #[error("instance must be a record, found {kind}")]
    NotARecord {
        /// Kind label of the value that was supplied.
        kind: &'static str,
    },

    /// A visible field carries no tag under the generator's key.
    #[error("{record}.{field}: {key} tag not found")]
    MissingTag {
        /// Record type name.
        record: &'static str,
        /// Internal field name.
        field: &'static str,
        /// Tag key that was looked up.
        key: &'static str,
    },

    /// The tag is present but yields no usable name.
    #[error("{record}.{field}: {key} tag is empty")]
    EmptyTag {
        /// Record type name.
        record: &'static str,
        /// Internal field name.
        field: &'static str,
        /// Tag key that was looked up.
        key: &'static str,
    },

    /// A protobuf tag has no `name=` part.
    #[error("{record}.{field}: protobuf tag name not found")]
    MissingTagName {
        /// Record type name.
        record: &'static str,
        /// Internal field name.
        field: &'static str,
    },

    /// The tag text could not be parsed.
    #[error("{record}.{field}: {source}")]
    MalformedTag {
        /// Record type name.
        record: &'static str,
        /// Internal field name.
        field: &'static str,
        /// Underlying syntax error.
        #[source]
        source: TagError,
    },
}
