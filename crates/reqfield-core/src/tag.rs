//! # Struct Tags
//!
//! Serialization metadata is attached to every record field as tag text in
//! the conventional form:
//!
//! ```text
//! json:"email,omitempty" protobuf:"bytes,1,opt,name=email,proto3"
//! ```
//!
//! Each entry is a key, a colon, and a double-quoted value. Entries are
//! separated by spaces. Quoted values may contain `\"`, `\\`, `\n`, `\t`
//! and `\r` escapes.
//!
//! Values themselves are usually comma-separated option lists;
//! [`TagOptions`] splits them.

use crate::error::TagError;

/// Borrowed view over a field's full tag text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StructTag<'a>(&'a str);

impl<'a> StructTag<'a> {
    /// Wrap raw tag text.
    pub const fn new(raw: &'a str) -> Self {
        Self(raw)
    }

    /// The raw tag text.
    pub fn as_str(&self) -> &'a str {
        self.0
    }

    /// True if the tag text is empty or whitespace only.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Parse every `key:"value"` entry in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::Malformed`] if an entry is not followed by a
    /// colon and a quoted value, or if a quoted value is unterminated.
    /// Returns [`TagError::InvalidEscape`] for unknown escape sequences.
    pub fn entries(&self) -> Result<Vec<(&'a str, String)>, TagError> {
        let raw = self.0;
        let bytes = raw.as_bytes();
        let mut entries = Vec::new();
        let mut pos = 0;

        loop {
            while pos < bytes.len() && bytes[pos] == b' ' {
                pos += 1;
            }
            if pos >= bytes.len() {
                break;
            }

            let key_start = pos;
            while pos < bytes.len()
                && bytes[pos] > b' '
                && bytes[pos] != b':'
                && bytes[pos] != b'"'
                && bytes[pos] != 0x7f
            {
                pos += 1;
            }
            if pos == key_start {
                return Err(self.malformed(format!("expected key at byte {key_start}")));
            }
            if pos + 1 >= bytes.len() || bytes[pos] != b':' || bytes[pos + 1] != b'"' {
                return Err(self.malformed(format!(
                    "key '{}' is not followed by :\"value\"",
                    &raw[key_start..pos]
                )));
            }
            let key = &raw[key_start..pos];

            // Skip `:"` and scan to the closing quote.
            pos += 2;
            let value_start = pos;
            while pos < bytes.len() && bytes[pos] != b'"' {
                if bytes[pos] == b'\\' {
                    pos += 1;
                }
                pos += 1;
            }
            if pos >= bytes.len() {
                return Err(self.malformed(format!("unterminated value for key '{key}'")));
            }
            let value = self.unescape(&raw[value_start..pos])?;
            pos += 1;

            entries.push((key, value));
        }

        Ok(entries)
    }

    /// Look up the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent, and `Ok(Some(""))` when it
    /// is present with an empty value. The first entry wins if a key repeats.
    ///
    /// # Errors
    ///
    /// Propagates any syntax error from [`StructTag::entries`].
    pub fn lookup(&self, key: &str) -> Result<Option<String>, TagError> {
        Ok(self
            .entries()?
            .into_iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v))
    }

    fn unescape(&self, quoted: &str) -> Result<String, TagError> {
        let mut out = String::with_capacity(quoted.len());
        let mut chars = quoted.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('"') => out.push('"'),
                Some('\\') => out.push('\\'),
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => {
                    return Err(TagError::InvalidEscape {
                        tag: self.0.to_string(),
                        sequence: other,
                    })
                }
                None => return Err(self.malformed("trailing backslash".to_string())),
            }
        }
        Ok(out)
    }

    fn malformed(&self, reason: String) -> TagError {
        TagError::Malformed {
            tag: self.0.to_string(),
            reason,
        }
    }
}

/// A tag value split into its leading name and trailing options.
///
/// `"email,omitempty"` splits into name `email` and options `["omitempty"]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagOptions<'a> {
    name: &'a str,
    options: Vec<&'a str>,
}

impl<'a> TagOptions<'a> {
    /// Split a comma-separated tag value.
    pub fn parse(value: &'a str) -> Self {
        let mut parts = value.split(',');
        let name = parts.next().unwrap_or_default().trim();
        let options = parts.map(str::trim).filter(|p| !p.is_empty()).collect();
        Self { name, options }
    }

    /// The first comma-separated part.
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Every part after the first.
    pub fn options(&self) -> &[&'a str] {
        &self.options
    }

    /// True if any option equals `option` exactly.
    pub fn has(&self, option: &str) -> bool {
        self.options.iter().any(|o| *o == option)
    }

    /// Find the first part (name included) starting with `prefix` and
    /// return what follows it.
    pub fn find_prefixed(&self, prefix: &str) -> Option<&'a str> {
        std::iter::once(self.name)
            .chain(self.options.iter().copied())
            .find_map(|part| part.strip_prefix(prefix))
    }
}
