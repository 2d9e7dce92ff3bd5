//! # reqfield-core: Foundational Types for Required-Field Validation
//!
//! This crate is the leaf of the reqfield workspace. It defines the
//! capabilities every other crate builds on, and depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **Explicit introspection instead of reflection.** A record type describes
//!    its externally visible fields through [`Introspect`] (static metadata)
//!    and exposes live values through [`RecordValue`] (object safe). The
//!    [`impl_record!`] macro generates both from one field list.
//!
//! 2. **Struct tags are data.** Serialization metadata is carried as the
//!    conventional `key:"value"` tag text and parsed by [`StructTag`]. The
//!    serialization libraries themselves are never consulted.
//!
//! 3. **Validation trees only grow.** [`ValidationTree`] accumulates field
//!    errors and nested subtrees for a single validation call. Nothing is ever
//!    removed, so `has_failed()` is monotonic during a pass.
//!
//! 4. **Injected diagnostics.** Components receive a [`Diagnostics`] handle in
//!    their constructor. There is no process-wide logger state.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `reqfield-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostics;
pub mod error;
pub mod introspect;
pub mod tag;
pub mod tree;

pub use diagnostics::Diagnostics;
pub use error::TagError;
pub use introspect::{FieldInfo, FieldKind, FieldValue, Introspect, Record, RecordType, RecordValue};
pub use tag::{StructTag, TagOptions};
pub use tree::{FieldError, ValidationTree};
