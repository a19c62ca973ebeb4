//! Form validation.
//!
//! ```ignore
//! let result = Validator::new()
//!     .field("email", &email)
//!         .required("Email is required")
//!         .email("Enter a valid email address")
//!     .field("password", &password)
//!         .required("Password is required")
//!         .min_length(8, "Password must be at least 8 characters")
//!     .validate();
//! ```

use std::collections::BTreeMap;

use regex::Regex;

type Rule = Box<dyn Fn(&str) -> bool + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ValidationResult {
    #[default]
    Valid,
    Invalid(Vec<FieldError>),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid)
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            Self::Valid => &[],
            Self::Invalid(errors) => errors,
        }
    }

    pub fn first_error(&self) -> Option<&FieldError> {
        self.errors().first()
    }

    /// Message for `field`, if it failed.
    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.errors()
            .iter()
            .find(|e| e.field == field)
            .map(|e| e.message.as_str())
    }
}

struct FieldEntry {
    name: String,
    value: String,
    rules: Vec<(Rule, String)>,
}

#[derive(Default)]
pub struct Validator {
    fields: Vec<FieldEntry>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(self, name: impl Into<String>, value: &str) -> FieldBuilder {
        FieldBuilder {
            validator: self,
            entry: FieldEntry {
                name: name.into(),
                value: value.to_string(),
                rules: Vec::new(),
            },
        }
    }

    /// Check every field; each failing field reports its first failed rule.
    pub fn validate(self) -> ValidationResult {
        let errors: Vec<FieldError> = self
            .fields
            .iter()
            .filter_map(|field| {
                field
                    .rules
                    .iter()
                    .find(|(rule, _)| !rule(&field.value))
                    .map(|(_, message)| FieldError {
                        field: field.name.clone(),
                        message: message.clone(),
                    })
            })
            .collect();

        if errors.is_empty() {
            ValidationResult::Valid
        } else {
            ValidationResult::Invalid(errors)
        }
    }
}

/// Rules for the field most recently added.
pub struct FieldBuilder {
    validator: Validator,
    entry: FieldEntry,
}

impl FieldBuilder {
    /// Add a custom rule; `check` returns true when the value is acceptable.
    pub fn rule<F>(mut self, check: F, msg: impl Into<String>) -> Self
    where
        F: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.entry.rules.push((Box::new(check), msg.into()));
        self
    }

    pub fn required(self, msg: impl Into<String>) -> Self {
        self.rule(|v| !v.trim().is_empty(), msg)
    }

    /// Empty values pass; combine with `required` to demand one.
    pub fn email(self, msg: impl Into<String>) -> Self {
        self.rule(
            |v| v.is_empty() || email_address::EmailAddress::is_valid(v),
            msg,
        )
    }

    pub fn min_length(self, min: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() >= min, msg)
    }

    pub fn max_length(self, max: usize, msg: impl Into<String>) -> Self {
        self.rule(move |v| v.chars().count() <= max, msg)
    }

    pub fn pattern(self, pattern: &Regex, msg: impl Into<String>) -> Self {
        let pattern = pattern.clone();
        self.rule(move |v| pattern.is_match(v), msg)
    }

    pub fn equals(self, other: &str, msg: impl Into<String>) -> Self {
        let other = other.to_string();
        self.rule(move |v| v == other, msg)
    }

    pub fn field(self, name: impl Into<String>, value: &str) -> FieldBuilder {
        self.finish().field(name, value)
    }

    pub fn validate(self) -> ValidationResult {
        self.finish().validate()
    }

    fn finish(self) -> Validator {
        let mut validator = self.validator;
        validator.fields.push(self.entry);
        validator
    }
}

/// Errors shown on a form: one message per field plus an optional message for
/// the form as a whole.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    fields: BTreeMap<String, String>,
    message: Option<String>,
}

impl FormErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_result(result: &ValidationResult) -> Self {
        let mut errors = Self::new();
        for error in result.errors() {
            errors.set(&error.field, &error.message);
        }
        errors
    }

    pub fn set(&mut self, field: &str, message: &str) {
        self.fields.insert(field.to_string(), message.to_string());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields.get(field).map(String::as_str)
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn clear_field(&mut self, field: &str) {
        self.fields.remove(field);
    }

    pub fn clear(&mut self) {
        self.fields.clear();
        self.message = None;
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.message.is_none()
    }
}
