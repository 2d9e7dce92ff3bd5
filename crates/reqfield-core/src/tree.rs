//! # Validation Tree
//!
//! Mutable accumulator for one validation call. It mirrors the nesting of
//! the schema it is validated against: field errors are keyed by external
//! name, and each record-valued field gets its own subtree.
//!
//! ## Invariant
//!
//! `has_failed()` is true iff this node has at least one field error or any
//! nested subtree has failed. A nested subtree being present does not imply
//! failure. No operation removes an entry.

use std::collections::BTreeMap;
use std::error::Error;

/// A single error recorded against a field.
pub type FieldError = Box<dyn Error + Send + Sync + 'static>;

/// Per-call tree of field errors and nested subtrees.
#[derive(Debug, Default)]
pub struct ValidationTree {
    type_name: &'static str,
    field_errors: BTreeMap<String, Vec<FieldError>>,
    nested: BTreeMap<String, ValidationTree>,
}

impl ValidationTree {
    /// Create an empty tree for the given record type name.
    pub fn new(type_name: &'static str) -> Self {
        Self {
            type_name,
            field_errors: BTreeMap::new(),
            nested: BTreeMap::new(),
        }
    }

    /// Name of the record type this tree was created for.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Append an error to a field's list, creating the list if absent.
    ///
    /// Empty field names are ignored.
    pub fn add_field_error(&mut self, field: impl Into<String>, error: impl Into<FieldError>) {
        let field = field.into();
        if field.is_empty() {
            return;
        }
        self.field_errors.entry(field).or_default().push(error.into());
    }

    /// Attach a subtree under a field's external name.
    ///
    /// If a subtree already exists under that name, the incoming one is
    /// merged into it so no previously recorded error is lost.
    pub fn add_nested_tree(&mut self, field: impl Into<String>, tree: ValidationTree) {
        let field = field.into();
        if field.is_empty() {
            return;
        }
        match self.nested.get_mut(&field) {
            Some(existing) => existing.merge(tree),
            None => {
                self.nested.insert(field, tree);
            }
        }
    }

    fn merge(&mut self, other: ValidationTree) {
        if self.type_name.is_empty() {
            self.type_name = other.type_name;
        }
        for (field, errors) in other.field_errors {
            self.field_errors.entry(field).or_default().extend(errors);
        }
        for (field, tree) in other.nested {
            self.add_nested_tree(field, tree);
        }
    }

    /// True if this node or any descendant holds a field error.
    pub fn has_failed(&self) -> bool {
        self.field_errors.values().any(|errors| !errors.is_empty())
            || self.nested.values().any(ValidationTree::has_failed)
    }

    /// Field errors recorded directly on this node.
    pub fn field_errors(&self) -> &BTreeMap<String, Vec<FieldError>> {
        &self.field_errors
    }

    /// Errors recorded for one field, if any.
    pub fn field_error(&self, field: &str) -> Option<&[FieldError]> {
        self.field_errors.get(field).map(Vec::as_slice)
    }

    /// Nested subtrees keyed by external name.
    pub fn nested(&self) -> &BTreeMap<String, ValidationTree> {
        &self.nested
    }

    /// The subtree attached under one field, if any.
    pub fn nested_tree(&self, field: &str) -> Option<&ValidationTree> {
        self.nested.get(field)
    }

    /// Total number of recorded errors, descendants included.
    pub fn error_count(&self) -> usize {
        self.field_errors.values().map(Vec::len).sum::<usize>()
            + self.nested.values().map(ValidationTree::error_count).sum::<usize>()
    }
}
