//! # reqfield-validator: Required-Field Traversal
//!
//! Walks a live record together with its [`Schema`](reqfield_schema::Schema)
//! and records every unset required field in a
//! [`ValidationTree`](reqfield_core::ValidationTree).
//!
//! ## Traversal Rules
//!
//! For every field in the schema:
//!
//! 1. Resolve the external name and required flag. A field the schema lists
//!    but the instance does not expose is a [`ValidateError`].
//! 2. A scalar is initialized iff it differs from `Default::default()`. A
//!    nullable value is initialized iff it is not null. An empty `String` is
//!    therefore unset, while `Some(String::new())` is set.
//! 3. An unset required field gets one `"<external name> is required"` error
//!    and is not descended into.
//! 4. A present record with a nested schema is validated recursively into a
//!    fresh subtree, which is attached whether or not it failed.
//!
//! Required-field errors accumulate; only a schema/instance mismatch aborts.
//!
//! ## Field Checks
//!
//! [`checks`] holds semantic predicates (email, username, password,
//! birthdate) that callers plug in as auxiliary checks.

pub mod checks;
pub mod error;
pub mod validator;

pub use checks::{BirthdatePolicy, FieldChecks, PasswordPolicy};
pub use error::{RequiredFieldError, ValidateError};
pub use validator::RequiredFieldValidator;
