//! # reqfield-schema: Schema Derivation
//!
//! Turns a record type's static field table into a [`Schema`]: for every
//! externally visible field, the name used in error reports, whether the
//! field is required, and a nested schema for record-valued fields.
//!
//! ## Generators
//!
//! Two [`SchemaGenerator`] implementations share one traversal and differ
//! only in how they read tags:
//!
//! - [`JsonGenerator`] reads `json:"name,omitempty"` tags. `omitempty` and
//!   the `-` marker make a field optional.
//! - [`ProtobufGenerator`] reads `protobuf:"...,name=x,..."` tags as emitted
//!   by the protobuf compiler. Union (`oneof`) members and optional scalars
//!   are optional; generated bookkeeping fields are skipped.
//!
//! ## Caching
//!
//! [`SchemaCache`] stores one `Arc<Schema>` per type identifier. Schemas are
//! immutable once built, so concurrent readers need no coordination beyond
//! the cache's read lock.
//!
//! ## Preconditions
//!
//! Record type graphs must be acyclic. A record that (transitively) contains
//! itself recurses without bound during derivation.

pub mod cache;
pub mod error;
pub mod generator;
pub mod json;
pub mod protobuf;
pub mod schema;

pub use cache::SchemaCache;
pub use error::SchemaError;
pub use generator::{FieldRule, SchemaGenerator, TagRules};
pub use json::JsonGenerator;
pub use protobuf::{ProtobufGenerator, PROTOBUF_GENERATED_FIELDS};
pub use schema::{Schema, SchemaDraft};
