//! # reqfield-parser: Result Parsing
//!
//! Two stages turn a [`ValidationTree`](reqfield_core::ValidationTree) into
//! something a caller can return:
//!
//! 1. **Raw stage.** [`RawParser`] keeps only the failed branches and
//!    stringifies every error, producing [`ParsedValidations`]. A tree that
//!    did not fail parses to `None`.
//! 2. **End stage.** A [`Render`] implementation shapes the parsed tree:
//!
//! | Renderer              | Output                  | Keys                          |
//! |-----------------------|-------------------------|-------------------------------|
//! | [`FlattenedRenderer`] | [`FlattenedValidations`]| external name, any depth      |
//! | [`FieldPathRenderer`] | [`FieldPathList`]       | dot-joined path from the root |
//! | [`TextRenderer`]      | `String`                | indented `$fields`/`$errors`  |
//! | [`JsonRenderer`]      | `serde_json::Value`     | nested objects                |
//!
//! [`Renderer`] selects one of them at runtime.
//!
//! Every renderer iterates keys in sorted order, so output is deterministic.

pub mod error;
pub mod field_path;
pub mod flattened;
pub mod json;
pub mod raw;
pub mod render;
pub mod text;

pub use error::ParseError;
pub use field_path::{BadRequest, FieldPath, FieldPathList, FieldPathRenderer, FieldViolation};
pub use flattened::{FlattenedRenderer, FlattenedValidations};
pub use json::JsonRenderer;
pub use raw::{ParsedValidations, RawParser};
pub use render::{Render, RenderedValidations, Renderer};
pub use text::TextRenderer;
