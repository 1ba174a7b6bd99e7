//! Field-level validation errors.
//!
//! Validation never stops at the first problem: every failing field
//! contributes one [`FieldError`], collected into [`ValidationErrors`] so a
//! form can show all messages at once.

use serde::Serialize;
use std::fmt;

/// A single failing field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `bundleItems[0].quantity`.
    pub field: String,
    /// The kind of failure.
    pub kind: FieldErrorKind,
    /// Human-readable message.
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    pub fn required(field: &str) -> Self {
        Self::new(
            field,
            FieldErrorKind::Required,
            format!("{} is required", humanize(field)),
        )
    }

    pub fn invalid_type(field: &str, expected: &str) -> Self {
        Self::new(
            field,
            FieldErrorKind::InvalidType,
            format!("{} must be {}", humanize(field), expected),
        )
    }

    pub fn too_short(field: &str, min: usize) -> Self {
        Self::new(
            field,
            FieldErrorKind::TooShort,
            format!("{} must be at least {} characters", humanize(field), min),
        )
    }

    pub fn too_few_items(field: &str, min: usize) -> Self {
        Self::new(
            field,
            FieldErrorKind::TooFewItems,
            format!("Select at least {} {}", min, humanize(field).to_lowercase()),
        )
    }

    pub fn not_positive(field: &str) -> Self {
        Self::new(
            field,
            FieldErrorKind::NotPositive,
            format!("{} must be greater than zero", humanize(field)),
        )
    }

    pub fn too_large(field: &str, max: f64) -> Self {
        Self::new(
            field,
            FieldErrorKind::TooLarge,
            format!("{} must be at most {}", humanize(field), max),
        )
    }

    pub fn pattern_mismatch(field: &str) -> Self {
        Self::new(
            field,
            FieldErrorKind::PatternMismatch,
            format!("{} has an invalid format", humanize(field)),
        )
    }
}

/// Categories of field failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Field is missing or null.
    Required,
    /// Field has the wrong JSON type.
    InvalidType,
    /// String is shorter than its minimum.
    TooShort,
    /// Array has fewer entries than its minimum.
    TooFewItems,
    /// Number is zero or negative.
    NotPositive,
    /// Number exceeds its maximum.
    TooLarge,
    /// String does not match its pattern.
    PatternMismatch,
    /// Cross-field rule failed (e.g. bundle fields given partially).
    Inconsistent,
}

/// All field errors produced by one validation run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self(errors)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// First error reported for `field`.
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.0.iter().find(|e| e.field == field)
    }

    /// Whether `field` failed.
    pub fn has(&self, field: &str) -> bool {
        self.for_field(field).is_some()
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Turn `bundlePrice` or `bundleItems[0].quantity` into `Bundle price` /
/// `Quantity` for messages.
fn humanize(field: &str) -> String {
    let leaf = field.rsplit(['.', ']']).next().unwrap_or(field);
    let leaf = if leaf.is_empty() { field } else { leaf };

    let mut out = String::with_capacity(leaf.len() + 4);
    for (i, c) in leaf.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else if c.is_uppercase() {
            out.push(' ');
            out.extend(c.to_lowercase());
        } else if c == '_' {
            out.push(' ');
        } else {
            out.push(c);
        }
    }
    out
}
