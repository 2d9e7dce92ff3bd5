//! # End Stage
//!
//! [`Render`] is the seam between parsed validations and the caller's
//! output shape. [`Renderer`] picks a shape at runtime, for callers that
//! read it from configuration.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ParseError;
use crate::field_path::{FieldPathList, FieldPathRenderer};
use crate::flattened::{FlattenedRenderer, FlattenedValidations};
use crate::json::JsonRenderer;
use crate::raw::ParsedValidations;
use crate::text::TextRenderer;

/// Shapes parsed validations into an output value.
pub trait Render: Send + Sync {
    /// The rendered shape.
    type Output;

    /// Render `parsed`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DuplicateFieldName`] if two failures map to the
    /// same key in the output shape.
    fn render(&self, parsed: &ParsedValidations) -> Result<Self::Output, ParseError>;
}

/// Runtime choice of output shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Renderer {
    /// [`FlattenedRenderer`].
    Flattened,
    /// [`FieldPathRenderer`].
    #[default]
    FieldPaths,
    /// [`TextRenderer`].
    Text,
    /// [`JsonRenderer`].
    Json,
}

/// Output of a [`Renderer`].
#[derive(Debug, Clone, PartialEq)]
pub enum RenderedValidations {
    /// Depth-erased map.
    Flattened(FlattenedValidations),
    /// Path-prefixed list.
    FieldPaths(FieldPathList),
    /// Indented text tree.
    Text(String),
    /// Nested JSON objects.
    Json(Value),
}

impl fmt::Display for RenderedValidations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Flattened(flat) => fmt::Display::fmt(flat, f),
            Self::FieldPaths(list) => fmt::Display::fmt(list, f),
            Self::Text(text) => f.write_str(text),
            Self::Json(value) => fmt::Display::fmt(value, f),
        }
    }
}

impl Render for Renderer {
    type Output = RenderedValidations;

    fn render(&self, parsed: &ParsedValidations) -> Result<Self::Output, ParseError> {
        Ok(match self {
            Self::Flattened => RenderedValidations::Flattened(FlattenedRenderer.render(parsed)?),
            Self::FieldPaths => RenderedValidations::FieldPaths(FieldPathRenderer.render(parsed)?),
            Self::Text => RenderedValidations::Text(TextRenderer.render(parsed)?),
            Self::Json => RenderedValidations::Json(JsonRenderer.render(parsed)?),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ParsedValidations {
        ParsedValidations::new("SignUp")
            .with_field("email", ["email is required"])
            .with_nested(
                "profile",
                ParsedValidations::new("Profile").with_field("bio", ["bio is required"]),
            )
    }

    #[test]
    fn test_each_variant_dispatches() {
        let parsed = sample();
        assert!(matches!(
            Renderer::Flattened.render(&parsed).unwrap(),
            RenderedValidations::Flattened(flat) if flat.len() == 2
        ));
        assert!(matches!(
            Renderer::FieldPaths.render(&parsed).unwrap(),
            RenderedValidations::FieldPaths(list) if list.get("profile.bio").is_some()
        ));
        assert!(matches!(
            Renderer::Text.render(&parsed).unwrap(),
            RenderedValidations::Text(text) if text.starts_with("$fields: {")
        ));
        assert!(matches!(
            Renderer::Json.render(&parsed).unwrap(),
            RenderedValidations::Json(Value::Object(_))
        ));
    }

    #[test]
    fn test_display_field_paths() {
        let rendered = Renderer::FieldPaths.render(&sample()).unwrap();
        assert_eq!(rendered.to_string(), "email: email is required; profile.bio: bio is required");
    }

    #[test]
    fn test_renderer_names() {
        let renderer: Renderer = serde_json::from_str("\"field_paths\"").unwrap();
        assert_eq!(renderer, Renderer::FieldPaths);
        assert_eq!(serde_json::to_string(&Renderer::Flattened).unwrap(), "\"flattened\"");
    }
}
