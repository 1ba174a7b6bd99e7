//! Object schemas: a mapping of field names to [`Rule`]s.

use crate::error::{FieldError, FieldErrorKind, ValidationErrors};
use crate::rule::Rule;
use serde_json::{Map, Value};

/// Cross-field constraint evaluated after all field rules.
#[derive(Debug, Clone, PartialEq)]
pub enum Refinement {
    /// Either every listed field is present, or none of them is.
    AllOrNone { fields: Vec<String>, message: String },
}

impl Refinement {
    fn check(&self, prefix: &str, object: &Map<String, Value>, errors: &mut Vec<FieldError>) {
        match self {
            Refinement::AllOrNone { fields, message } => {
                let present = |f: &String| object.get(f).is_some_and(|v| !v.is_null());
                let count = fields.iter().filter(|f| present(f)).count();
                if count == 0 || count == fields.len() {
                    return;
                }
                for field in fields.iter().filter(|f| !present(f)) {
                    errors.push(FieldError::new(
                        join(prefix, field),
                        FieldErrorKind::Inconsistent,
                        message.clone(),
                    ));
                }
            }
        }
    }
}

/// An ordered set of field rules plus cross-field refinements.
///
/// Fields not named in the schema are ignored.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    fields: Vec<(String, Rule)>,
    refinements: Vec<Refinement>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the rule for `name`.
    pub fn field(mut self, name: impl Into<String>, rule: Rule) -> Self {
        let name = name.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = rule,
            None => self.fields.push((name, rule)),
        }
        self
    }

    /// Require the listed fields to be given together or not at all.
    pub fn all_or_none(mut self, fields: &[&str], message: impl Into<String>) -> Self {
        self.refinements.push(Refinement::AllOrNone {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            message: message.into(),
        });
        self
    }

    /// Mark an existing field as required. Unknown names are ignored.
    pub fn require(mut self, name: &str) -> Self {
        if let Some((_, rule)) = self.fields.iter_mut().find(|(n, _)| n == name) {
            *rule = rule.clone().required();
        }
        self
    }

    /// Copy of this schema with every field optional and no refinements,
    /// for partial updates.
    pub fn partial(&self) -> Self {
        Self {
            fields: self
                .fields
                .iter()
                .map(|(name, rule)| (name.clone(), rule.clone().optional()))
                .collect(),
            refinements: Vec::new(),
        }
    }

    /// Field names in declaration order.
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(name, _)| name.as_str())
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, r)| r)
    }

    pub fn refinements(&self) -> &[Refinement] {
        &self.refinements
    }

    /// Validate a JSON payload.
    pub fn validate(&self, value: &Value) -> Result<(), ValidationErrors> {
        let mut errors = Vec::new();
        self.check_object("", value, &mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            tracing::debug!(count = errors.len(), "payload failed validation");
            Err(ValidationErrors::new(errors))
        }
    }

    /// Validate `value` as an object whose fields live under `prefix`.
    pub(crate) fn check_object(&self, prefix: &str, value: &Value, errors: &mut Vec<FieldError>) {
        let Some(object) = value.as_object() else {
            errors.push(FieldError::invalid_type(
                if prefix.is_empty() { "payload" } else { prefix },
                "an object",
            ));
            return;
        };

        for (name, rule) in &self.fields {
            rule.check(&join(prefix, name), object.get(name), errors);
        }
        for refinement in &self.refinements {
            refinement.check(prefix, object, errors);
        }
    }
}

fn join(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{prefix}.{name}")
    }
}
