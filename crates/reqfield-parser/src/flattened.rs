//! # Flattened Map
//!
//! Every failed field, at any depth, keyed by its bare external name. Two
//! failures resolving to the same name are rejected rather than merged.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::error::ParseError;
use crate::raw::ParsedValidations;
use crate::render::Render;

/// External name to messages, depth erased.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FlattenedValidations(BTreeMap<String, Vec<String>>);

impl FlattenedValidations {
    /// Messages for one field.
    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no field failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Failed fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    /// The underlying map.
    pub fn into_inner(self) -> BTreeMap<String, Vec<String>> {
        self.0
    }
}

impl fmt::Display for FlattenedValidations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let json = serde_json::to_string(&self.0).map_err(|_| fmt::Error)?;
        f.write_str(&json)
    }
}

/// Renders [`FlattenedValidations`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FlattenedRenderer;

impl FlattenedRenderer {
    fn collect(parsed: &ParsedValidations, out: &mut BTreeMap<String, Vec<String>>) -> Result<(), ParseError> {
        for (field, messages) in parsed.fields() {
            if out.contains_key(field) {
                return Err(ParseError::DuplicateFieldName { field: field.clone() });
            }
            out.insert(field.clone(), messages.clone());
        }
        for nested in parsed.nested().values() {
            Self::collect(nested, out)?;
        }
        Ok(())
    }
}

impl Render for FlattenedRenderer {
    type Output = FlattenedValidations;

    fn render(&self, parsed: &ParsedValidations) -> Result<Self::Output, ParseError> {
        let mut out = BTreeMap::new();
        Self::collect(parsed, &mut out)?;
        Ok(FlattenedValidations(out))
    }
}
