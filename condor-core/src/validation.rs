//! Declarative field validation.
//!
//! Each form lists its fields as a slice of [`Check`]s; the first failing check
//! supplies the inline message for that field.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;

static EMAIL_SHAPE: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_SHAPE
        .as_ref()
        .is_some_and(|re| re.is_match(value.trim()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule<'a> {
    /// Non-blank after trimming.
    Required,
    /// `local@domain.tld` shape. Blank values pass so `Required` owns that message.
    Email,
    MinChars(usize),
    MaxChars(usize),
    /// Parses as a number strictly greater than zero.
    Positive,
    /// Equal to another field's current value.
    Matches(&'a str),
}

impl Rule<'_> {
    #[must_use]
    pub fn holds(&self, value: &str) -> bool {
        let trimmed = value.trim();
        match self {
            Self::Required => !trimmed.is_empty(),
            Self::Email => trimmed.is_empty() || is_email(trimmed),
            Self::MinChars(min) => value.chars().count() >= *min,
            Self::MaxChars(max) => value.chars().count() <= *max,
            Self::Positive => trimmed.parse::<f64>().is_ok_and(|n| n.is_finite() && n > 0.0),
            Self::Matches(other) => value == *other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Check<'a> {
    pub rule: Rule<'a>,
    pub message: &'static str,
}

impl<'a> Check<'a> {
    #[must_use]
    pub const fn new(rule: Rule<'a>, message: &'static str) -> Self {
        Self { rule, message }
    }
}

/// First failing message for `value`, if any.
#[must_use]
pub fn validate(value: &str, checks: &[Check<'_>]) -> Option<&'static str> {
    checks
        .iter()
        .find(|check| !check.rule.holds(value))
        .map(|check| check.message)
}

/// Inline errors keyed by field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, String>,
}

impl FieldErrors {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `checks` against `value` and record the outcome for `field`.
    pub fn check(&mut self, field: &'static str, value: &str, checks: &[Check<'_>]) {
        self.set(field, validate(value, checks).map(str::to_string));
    }

    pub fn set(&mut self, field: &'static str, message: Option<String>) {
        match message {
            Some(message) => {
                self.errors.insert(field, message);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    #[must_use]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> {
        self.errors.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// First message in field order, for a summary banner.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.errors.values().next().map(String::as_str)
    }
}
