//! # Indented Text Tree
//!
//! Human-readable rendering. Each record opens a `$fields` block; each
//! failed field opens an `$errors` list; each level adds one tab:
//!
//! ```text
//! $fields: {
//! 	email: {
//! 		$errors: [
//! 			email is required
//! 		]
//! 	},
//! 	profile: {
//! 		$fields: {
//! 			bio: {
//! 				$errors: [
//! 					bio is required
//! 				]
//! 			}
//! 		}
//! 	}
//! }
//! ```
//!
//! Literal `\t` and `\n` escape sequences inside messages are unescaped in
//! the final string.

use std::collections::BTreeSet;

use crate::error::ParseError;
use crate::raw::ParsedValidations;
use crate::render::Render;

/// Marker opening a record's field block.
pub const FIELDS_MARKER: &str = "$fields";

/// Marker opening a field's error list.
pub const ERRORS_MARKER: &str = "$errors";

/// Renders the indented text tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl TextRenderer {
    fn write_node(parsed: &ParsedValidations, level: usize, out: &mut String) {
        let base = padding(level);
        let field_pad = padding(level + 1);
        let property_pad = padding(level + 2);
        let error_pad = padding(level + 3);

        out.push_str(&base);
        out.push_str(FIELDS_MARKER);
        out.push_str(": {\n");

        let names: BTreeSet<&String> = parsed.fields().keys().chain(parsed.nested().keys()).collect();
        let last = names.len().saturating_sub(1);

        for (index, name) in names.into_iter().enumerate() {
            let errors = parsed.fields().get(name.as_str());
            let nested = parsed.nested().get(name.as_str());

            out.push_str(&field_pad);
            out.push_str(name);
            out.push_str(": {\n");

            if let Some(errors) = errors {
                out.push_str(&property_pad);
                out.push_str(ERRORS_MARKER);
                out.push_str(": [\n");
                for (i, message) in errors.iter().enumerate() {
                    out.push_str(&error_pad);
                    out.push_str(message);
                    out.push_str(if i + 1 < errors.len() { ",\n" } else { "\n" });
                }
                out.push_str(&property_pad);
                out.push_str(if nested.is_some() { "],\n" } else { "]\n" });
            }

            if let Some(nested) = nested {
                Self::write_node(nested, level + 2, out);
                out.push('\n');
            }

            out.push_str(&field_pad);
            out.push_str(if index < last { "},\n" } else { "}\n" });
        }

        out.push_str(&base);
        out.push('}');
    }
}

impl Render for TextRenderer {
    type Output = String;

    fn render(&self, parsed: &ParsedValidations) -> Result<Self::Output, ParseError> {
        let mut out = String::new();
        Self::write_node(parsed, 0, &mut out);
        Ok(unescape(&out))
    }
}

fn padding(level: usize) -> String {
    "\t".repeat(level)
}

fn unescape(text: &str) -> String {
    text.replace("\\t", "\t").replace("\\n", "\n")
}
