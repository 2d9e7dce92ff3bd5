//! # Nested JSON
//!
//! Keeps the record nesting: a failed field maps to an array of messages,
//! a failed nested record maps to an object of the same shape.
//!
//! ```json
//! { "email": ["email is required"], "profile": { "bio": ["bio is required"] } }
//! ```

use serde_json::{Map, Value};

use crate::error::ParseError;
use crate::raw::ParsedValidations;
use crate::render::Render;

/// Renders nested `serde_json::Value` objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonRenderer;

impl JsonRenderer {
    fn object(parsed: &ParsedValidations) -> Result<Value, ParseError> {
        let mut object = Map::new();
        for (field, messages) in parsed.fields() {
            let messages = messages.iter().cloned().map(Value::String).collect();
            object.insert(field.clone(), Value::Array(messages));
        }
        for (field, nested) in parsed.nested() {
            if object.contains_key(field) {
                return Err(ParseError::DuplicateFieldName { field: field.clone() });
            }
            object.insert(field.clone(), Self::object(nested)?);
        }
        Ok(Value::Object(object))
    }
}

impl Render for JsonRenderer {
    type Output = Value;

    fn render(&self, parsed: &ParsedValidations) -> Result<Self::Output, ParseError> {
        Self::object(parsed)
    }
}
