//! # Field Checks
//!
//! Semantic predicates that run after the required-field pass. Each one
//! appends messages to the tree under the external name it is given and
//! never fails: a bad value is a validation outcome, not an error.
//!
//! The policies are plain data so they can be loaded from configuration.

use chrono::{Datelike, NaiveDate, Utc};
use reqfield_core::ValidationTree;
use serde::{Deserialize, Serialize};

/// Message recorded for a malformed email address.
pub const INVALID_MAIL_ADDRESS: &str = "invalid mail address";

/// Message recorded for a username with non-alphanumeric characters.
pub const USERNAME_NOT_ALPHANUMERIC: &str = "username must be alphanumeric";

/// Message recorded for a birthdate in the future.
pub const INVALID_BIRTHDATE: &str = "invalid birthdate";

const LOCAL_PART_SYMBOLS: &str = "!#$%&'*+-/=?^_`{|}~";

// ─── Email ───────────────────────────────────────────────────────────

/// Record [`INVALID_MAIL_ADDRESS`] unless `value` is a `local@domain`
/// address.
pub fn email(field: &str, value: &str, tree: &mut ValidationTree) {
    if !is_valid_mail_address(value) {
        tree.add_field_error(field, INVALID_MAIL_ADDRESS);
    }
}

/// Syntax check for a bare `local@domain` address.
///
/// The local part is a dot-separated run of letters, digits and the usual
/// atom symbols. The domain is one or more dot-separated labels of letters,
/// digits and inner hyphens.
pub fn is_valid_mail_address(value: &str) -> bool {
    let Some((local, domain)) = value.rsplit_once('@') else {
        return false;
    };
    is_valid_local_part(local) && is_valid_domain(domain)
}

fn is_valid_local_part(local: &str) -> bool {
    !local.is_empty()
        && local.split('.').all(|atom| {
            !atom.is_empty()
                && atom
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || LOCAL_PART_SYMBOLS.contains(c))
        })
}

fn is_valid_domain(domain: &str) -> bool {
    !domain.is_empty()
        && domain.split('.').all(|label| {
            !label.is_empty()
                && !label.starts_with('-')
                && !label.ends_with('-')
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

// ─── Username ────────────────────────────────────────────────────────

/// Record [`USERNAME_NOT_ALPHANUMERIC`] if `value` contains anything but
/// ASCII letters and digits.
pub fn username(field: &str, value: &str, tree: &mut ValidationTree) {
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        tree.add_field_error(field, USERNAME_NOT_ALPHANUMERIC);
    }
}

// ─── Password ────────────────────────────────────────────────────────

/// Minimum composition of a password. A zero disables that rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswordPolicy {
    /// Minimum number of characters.
    pub minimum_length: usize,
    /// Minimum number of characters that are neither alphanumeric nor
    /// whitespace.
    pub minimum_special_count: usize,
    /// Minimum number of decimal digits.
    pub minimum_numbers_count: usize,
    /// Minimum number of uppercase letters.
    pub minimum_caps_count: usize,
}

impl PasswordPolicy {
    /// Record one message per violated rule.
    pub fn check(&self, field: &str, password: &str, tree: &mut ValidationTree) {
        let length = password.chars().count();
        if self.minimum_length > 0 && length < self.minimum_length {
            tree.add_field_error(
                field,
                format!("password must be at least {} characters long", self.minimum_length),
            );
        }

        let special = password
            .chars()
            .filter(|c| !c.is_alphanumeric() && !c.is_whitespace())
            .count();
        if self.minimum_special_count > 0 && special < self.minimum_special_count {
            tree.add_field_error(
                field,
                format!(
                    "password must contain at least {} special characters",
                    self.minimum_special_count
                ),
            );
        }

        let numbers = password.chars().filter(char::is_ascii_digit).count();
        if self.minimum_numbers_count > 0 && numbers < self.minimum_numbers_count {
            tree.add_field_error(
                field,
                format!("password must contain at least {} numbers", self.minimum_numbers_count),
            );
        }

        let caps = password.chars().filter(|c| c.is_uppercase()).count();
        if self.minimum_caps_count > 0 && caps < self.minimum_caps_count {
            tree.add_field_error(
                field,
                format!(
                    "password must contain at least {} capital letters",
                    self.minimum_caps_count
                ),
            );
        }
    }
}

// ─── Birthdate ───────────────────────────────────────────────────────

/// Accepted age range, in whole years. A zero disables that bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BirthdatePolicy {
    /// Youngest accepted age.
    pub minimum_age: u32,
    /// Oldest accepted age.
    pub maximum_age: u32,
}

impl BirthdatePolicy {
    /// Check `birthdate` as of `today`.
    ///
    /// A future birthdate records [`INVALID_BIRTHDATE`] and skips the age
    /// bounds.
    pub fn check(&self, field: &str, birthdate: NaiveDate, today: NaiveDate, tree: &mut ValidationTree) {
        if birthdate > today {
            tree.add_field_error(field, INVALID_BIRTHDATE);
            return;
        }

        let age = age_on(birthdate, today);
        if self.minimum_age > 0 && age < self.minimum_age {
            tree.add_field_error(field, format!("must be at least {} years old", self.minimum_age));
        }
        if self.maximum_age > 0 && age > self.maximum_age {
            tree.add_field_error(field, format!("must be at most {} years old", self.maximum_age));
        }
    }
}

/// Whole years elapsed between `birthdate` and `today`. Zero if `today`
/// precedes `birthdate`.
pub fn age_on(birthdate: NaiveDate, today: NaiveDate) -> u32 {
    let mut years = today.year() - birthdate.year();
    if (today.month(), today.day()) < (birthdate.month(), birthdate.day()) {
        years -= 1;
    }
    u32::try_from(years).unwrap_or(0)
}

// ─── Configured Set ──────────────────────────────────────────────────

/// The field checks bundled with their configured policies.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldChecks {
    /// Password composition rules.
    pub password: PasswordPolicy,
    /// Accepted age range.
    pub birthdate: BirthdatePolicy,
}

impl FieldChecks {
    /// Bundle the given policies.
    pub fn new(password: PasswordPolicy, birthdate: BirthdatePolicy) -> Self {
        Self { password, birthdate }
    }

    /// See [`email`].
    pub fn email(&self, field: &str, value: &str, tree: &mut ValidationTree) {
        email(field, value, tree);
    }

    /// See [`username`].
    pub fn username(&self, field: &str, value: &str, tree: &mut ValidationTree) {
        username(field, value, tree);
    }

    /// See [`PasswordPolicy::check`].
    pub fn password(&self, field: &str, value: &str, tree: &mut ValidationTree) {
        self.password.check(field, value, tree);
    }

    /// Check a birthdate against today's date in UTC.
    pub fn birthdate(&self, field: &str, birthdate: NaiveDate, tree: &mut ValidationTree) {
        self.birthdate.check(field, birthdate, Utc::now().date_naive(), tree);
    }
}
