//! # Raw Stage
//!
//! Copies the failed part of a [`ValidationTree`] into plain data: error
//! messages become strings and subtrees that did not fail are dropped.

use std::collections::BTreeMap;

use reqfield_core::{Diagnostics, ValidationTree};
use serde::Serialize;
use tracing::debug;

/// The failed branches of one validation tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedValidations {
    type_name: String,
    fields: BTreeMap<String, Vec<String>>,
    nested: BTreeMap<String, ParsedValidations>,
}

impl ParsedValidations {
    /// An empty node for the given record type.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
            nested: BTreeMap::new(),
        }
    }

    /// Add a field with its messages. Existing messages are kept.
    pub fn with_field<I, S>(mut self, field: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields
            .entry(field.into())
            .or_default()
            .extend(messages.into_iter().map(Into::into));
        self
    }

    /// Add a nested record's parsed validations.
    pub fn with_nested(mut self, field: impl Into<String>, nested: ParsedValidations) -> Self {
        self.nested.insert(field.into(), nested);
        self
    }

    /// Record type the node was parsed from.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Failed fields on this node, keyed by external name.
    pub fn fields(&self) -> &BTreeMap<String, Vec<String>> {
        &self.fields
    }

    /// Failed nested records, keyed by external name.
    pub fn nested(&self) -> &BTreeMap<String, ParsedValidations> {
        &self.nested
    }

    /// True if the node holds neither fields nor nested records.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.nested.is_empty()
    }

    /// Number of messages in this node and all descendants.
    pub fn message_count(&self) -> usize {
        self.fields.values().map(Vec::len).sum::<usize>()
            + self.nested.values().map(ParsedValidations::message_count).sum::<usize>()
    }
}

/// Filters a validation tree down to its failures.
#[derive(Debug, Clone, Default)]
pub struct RawParser {
    diagnostics: Diagnostics,
}

impl RawParser {
    /// Create a parser reporting parsed entries to `diagnostics`.
    pub fn new(diagnostics: Diagnostics) -> Self {
        Self {
            diagnostics: diagnostics.for_component("raw_parser"),
        }
    }

    /// Parse `tree`. Returns `None` if nothing failed.
    pub fn parse(&self, tree: &ValidationTree) -> Option<ParsedValidations> {
        if !tree.has_failed() {
            return None;
        }
        Some(self.parse_node(tree))
    }

    fn parse_node(&self, tree: &ValidationTree) -> ParsedValidations {
        let mut parsed = ParsedValidations::new(tree.type_name());

        for (field, errors) in tree.field_errors() {
            if errors.is_empty() {
                continue;
            }
            let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
            self.diagnostics.emit(|component| {
                debug!(
                    component = component,
                    struct_type = tree.type_name(),
                    field_name = field.as_str(),
                    error_count = messages.len(),
                    "parsed field"
                );
            });
            parsed.fields.insert(field.clone(), messages);
        }

        for (field, nested) in tree.nested() {
            if !nested.has_failed() {
                continue;
            }
            self.diagnostics.emit(|component| {
                debug!(
                    component = component,
                    struct_type = tree.type_name(),
                    field_name = field.as_str(),
                    nested_struct_type = nested.type_name(),
                    "parsed nested record"
                );
            });
            parsed.nested.insert(field.clone(), self.parse_node(nested));
        }

        parsed
    }
}
