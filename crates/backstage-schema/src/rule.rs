//! Per-field validation rules.
//!
//! A [`Rule`] is a JSON type plus an ordered list of checks. Rules are built
//! with a small builder API and evaluated against `serde_json::Value`s:
//!
//! ```
//! use backstage_schema::Rule;
//!
//! let name = Rule::string().min_len(3).message("Product name must be at least 3 characters");
//! let sizes = Rule::array().items(Rule::string().non_empty());
//! ```

use crate::error::{FieldError, FieldErrorKind};
use crate::schema::Schema;
use regex::Regex;
use serde_json::Value;

/// JSON type a rule expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    String,
    Number,
    Boolean,
    Array,
    Object,
}

impl ValueKind {
    fn matches(&self, value: &Value) -> bool {
        match self {
            ValueKind::String => value.is_string(),
            ValueKind::Number => value.is_number(),
            ValueKind::Boolean => value.is_boolean(),
            ValueKind::Array => value.is_array(),
            ValueKind::Object => value.is_object(),
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ValueKind::String => "a string",
            ValueKind::Number => "a number",
            ValueKind::Boolean => "true or false",
            ValueKind::Array => "a list",
            ValueKind::Object => "an object",
        }
    }
}

#[derive(Debug, Clone)]
enum Check {
    MinLength(usize),
    MinItems(usize),
    Positive,
    Max(f64),
    Pattern(Regex),
    Items(Box<Rule>),
    Fields(Schema),
}

/// Validation rule for a single field.
#[derive(Debug, Clone)]
pub struct Rule {
    kind: ValueKind,
    optional: bool,
    required_message: Option<String>,
    type_message: Option<String>,
    checks: Vec<(Check, Option<String>)>,
}

impl Rule {
    fn of(kind: ValueKind) -> Self {
        Self {
            kind,
            optional: false,
            required_message: None,
            type_message: None,
            checks: Vec::new(),
        }
    }

    pub fn string() -> Self {
        Self::of(ValueKind::String)
    }

    pub fn number() -> Self {
        Self::of(ValueKind::Number)
    }

    pub fn boolean() -> Self {
        Self::of(ValueKind::Boolean)
    }

    pub fn array() -> Self {
        Self::of(ValueKind::Array)
    }

    /// A nested object validated by `schema`.
    pub fn object(schema: Schema) -> Self {
        Self::of(ValueKind::Object).with_check(Check::Fields(schema))
    }

    fn with_check(mut self, check: Check) -> Self {
        self.checks.push((check, None));
        self
    }

    /// Minimum string length in characters.
    pub fn min_len(self, min: usize) -> Self {
        self.with_check(Check::MinLength(min))
    }

    /// Shorthand for `min_len(1)`.
    pub fn non_empty(self) -> Self {
        self.min_len(1)
    }

    /// Minimum number of array entries.
    pub fn min_items(self, min: usize) -> Self {
        self.with_check(Check::MinItems(min))
    }

    /// Validate every array entry with `rule`.
    pub fn items(self, rule: Rule) -> Self {
        self.with_check(Check::Items(Box::new(rule)))
    }

    /// Number must be strictly greater than zero.
    pub fn positive(self) -> Self {
        self.with_check(Check::Positive)
    }

    /// Number must be at most `max`.
    pub fn max(self, max: f64) -> Self {
        self.with_check(Check::Max(max))
    }

    /// String must match `pattern`.
    pub fn pattern(self, pattern: Regex) -> Self {
        self.with_check(Check::Pattern(pattern))
    }

    /// Allow the field to be missing or null.
    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    /// Require the field, undoing [`Rule::optional`].
    pub fn required(mut self) -> Self {
        self.optional = false;
        self
    }

    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// Replace the message of the most recently added check. With no checks
    /// yet, replaces the type-mismatch message.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        let message = message.into();
        match self.checks.last_mut() {
            Some((_, slot)) => *slot = Some(message),
            None => self.type_message = Some(message),
        }
        self
    }

    /// Message used when the field is missing.
    pub fn required_message(mut self, message: impl Into<String>) -> Self {
        self.required_message = Some(message.into());
        self
    }

    /// Evaluate the rule for the field at `path`.
    ///
    /// `value` is `None` when the key is absent. Null counts as absent.
    pub fn check(&self, path: &str, value: Option<&Value>, errors: &mut Vec<FieldError>) {
        let value = match value {
            None | Some(Value::Null) => {
                if !self.optional {
                    errors.push(match &self.required_message {
                        Some(message) => FieldError::new(path, FieldErrorKind::Required, message),
                        None => FieldError::required(path),
                    });
                }
                return;
            }
            Some(value) => value,
        };

        if !self.kind.matches(value) {
            errors.push(match &self.type_message {
                Some(message) => FieldError::new(path, FieldErrorKind::InvalidType, message),
                None => FieldError::invalid_type(path, self.kind.describe()),
            });
            return;
        }

        for (check, message) in &self.checks {
            if let Some(error) = self.run_check(check, path, value, errors) {
                errors.push(match message {
                    Some(message) => FieldError::new(path, error.kind, message),
                    None => error,
                });
                // Later checks on the same field would only repeat the problem.
                return;
            }
        }
    }

    /// Run one check. Nested checks push their own errors and return `None`.
    fn run_check(
        &self,
        check: &Check,
        path: &str,
        value: &Value,
        errors: &mut Vec<FieldError>,
    ) -> Option<FieldError> {
        match check {
            Check::MinLength(min) => {
                let len = value.as_str().map(|s| s.chars().count()).unwrap_or(0);
                (len < *min).then(|| FieldError::too_short(path, *min))
            }
            Check::MinItems(min) => {
                let len = value.as_array().map(Vec::len).unwrap_or(0);
                (len < *min).then(|| FieldError::too_few_items(path, *min))
            }
            Check::Positive => {
                let n = value.as_f64().unwrap_or(0.0);
                (n <= 0.0).then(|| FieldError::not_positive(path))
            }
            Check::Max(max) => {
                let n = value.as_f64().unwrap_or(0.0);
                (n > *max).then(|| FieldError::too_large(path, *max))
            }
            Check::Pattern(re) => {
                let s = value.as_str().unwrap_or_default();
                (!re.is_match(s)).then(|| FieldError::pattern_mismatch(path))
            }
            Check::Items(rule) => {
                if let Some(items) = value.as_array() {
                    for (i, item) in items.iter().enumerate() {
                        rule.check(&format!("{path}[{i}]"), Some(item), errors);
                    }
                }
                None
            }
            Check::Fields(schema) => {
                schema.check_object(path, value, errors);
                None
            }
        }
    }
}
