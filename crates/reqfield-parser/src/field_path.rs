//! # Path-Prefixed List
//!
//! One entry per failed field, keyed by the dot-joined chain of external
//! names from the root record, e.g. `profile.address.street`. This is the
//! shape RPC error details expect: [`FieldPathList::into_bad_request`]
//! expands it into one field violation per message.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::raw::ParsedValidations;
use crate::render::Render;

/// Separator between path segments.
pub const PATH_SEPARATOR: char = '.';

/// Messages for one field, addressed by its full path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldPath {
    /// Dot-joined external names from the root.
    pub path: String,
    /// Error messages in recording order.
    pub messages: Vec<String>,
}

/// Every failed field path, sorted by path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldPathList(Vec<FieldPath>);

impl FieldPathList {
    /// Entries in path order.
    pub fn entries(&self) -> &[FieldPath] {
        &self.0
    }

    /// Messages for one path.
    pub fn get(&self, path: &str) -> Option<&[String]> {
        self.0
            .iter()
            .find(|entry| entry.path == path)
            .map(|entry| entry.messages.as_slice())
    }

    /// Number of failed paths.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if no path failed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Expand into RPC field violations, one per message.
    pub fn into_bad_request(self) -> BadRequest {
        let field_violations = self
            .0
            .into_iter()
            .flat_map(|entry| {
                let field = entry.path;
                entry.messages.into_iter().map(move |description| FieldViolation {
                    field: field.clone(),
                    description,
                })
            })
            .collect();
        BadRequest { field_violations }
    }
}

impl fmt::Display for FieldPathList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", entry.path, entry.messages.join(", "))?;
        }
        Ok(())
    }
}

/// Bad-request error detail, as carried in RPC status details.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BadRequest {
    /// One entry per violated rule.
    pub field_violations: Vec<FieldViolation>,
}

/// A single violated rule on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Dot-joined path to the field.
    pub field: String,
    /// Human-readable reason.
    pub description: String,
}

/// Renders [`FieldPathList`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldPathRenderer;

impl FieldPathRenderer {
    fn collect(parsed: &ParsedValidations, prefix: Option<&str>, out: &mut Vec<FieldPath>) {
        let join = |name: &str| match prefix {
            Some(prefix) => format!("{prefix}{PATH_SEPARATOR}{name}"),
            None => name.to_string(),
        };

        for (field, messages) in parsed.fields() {
            out.push(FieldPath {
                path: join(field.as_str()),
                messages: messages.clone(),
            });
        }
        for (field, nested) in parsed.nested() {
            let path = join(field.as_str());
            Self::collect(nested, Some(path.as_str()), out);
        }
    }
}

impl Render for FieldPathRenderer {
    type Output = FieldPathList;

    fn render(&self, parsed: &ParsedValidations) -> Result<Self::Output, ParseError> {
        let mut out = Vec::new();
        Self::collect(parsed, None, &mut out);
        out.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(FieldPathList(out))
    }
}
