//! Field-level validation error collection.
//!
//! Handlers gather every failing field into a [`FieldErrors`] map before
//! rejecting a payload, so a single 422 response lists all problems at once.
//! Declarative rules (length, range, email) come from the
//! `validator` derive and are folded in via [`FieldErrors::merge`]; rules that
//! need the database (existence, uniqueness) are added by the caller.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use validator::{ValidateLength, ValidationError, ValidationErrors};

use crate::error::CoreError;

/// Field key used for the "at least one copy" print request rule.
pub const COPIES_FIELD: &str = "copies";

/// Message for a print request with zero color and zero black-and-white copies.
pub const COPIES_REQUIRED_MESSAGE: &str =
    "At least one color or black-and-white copy count must be provided.";

/// Ordered map of field name to human-readable messages.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message against `field`.
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.0
            .entry(field.to_string())
            .or_default()
            .push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Pass a required value through, recording a "required" error when absent.
    ///
    /// A field that already failed (wrong type) is not also reported as
    /// missing.
    pub fn require<T>(&mut self, field: &str, value: Option<T>) -> Option<T> {
        if value.is_none() && !self.contains(field) {
            self.add(field, required_message(field));
        }
        value
    }

    /// Like [`require`](Self::require) for text: trims the value and treats
    /// blank strings as missing.
    pub fn require_text(&mut self, field: &str, value: Option<&str>) -> Option<String> {
        let trimmed = value.map(str::trim).filter(|v| !v.is_empty());
        self.require(field, trimmed.map(str::to_string))
    }

    /// Length rule for fields whose wire name cannot be a Rust identifier.
    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: u64) {
        if !value.validate_length(None, Some(max), None) {
            self.add(field, max_length_message(field, max));
        }
    }

    /// Fold the outcome of a `validator` run into this map.
    pub fn merge(&mut self, result: Result<(), ValidationErrors>) {
        if let Err(errors) = result {
            for (field, errs) in errors.field_errors() {
                let field = field.to_string();
                for err in errs.iter() {
                    self.add(&field, describe(&field, err));
                }
            }
        }
    }

    /// `Ok(())` when nothing was recorded, otherwise the collected errors.
    pub fn into_result(self) -> Result<(), CoreError> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(CoreError::InvalidFields(self))
        }
    }

    /// The first message in field order, used as the summary line.
    pub fn first_message(&self) -> Option<&str> {
        self.0
            .values()
            .flat_map(|msgs| msgs.iter())
            .map(String::as_str)
            .next()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = Self::new();
        out.merge(Err(errors));
        out
    }
}

impl From<FieldErrors> for CoreError {
    fn from(errors: FieldErrors) -> Self {
        CoreError::InvalidFields(errors)
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

pub fn required_message(field: &str) -> String {
    format!("The {field} field is required.")
}

pub fn exists_message(field: &str) -> String {
    format!("The selected {field} is invalid.")
}

pub fn unique_message(field: &str) -> String {
    format!("The {field} has already been taken.")
}

pub fn confirmation_message(field: &str) -> String {
    format!("The {field} field confirmation does not match.")
}

pub fn max_length_message(field: &str, max: impl fmt::Display) -> String {
    format!("The {field} field must not be greater than {max} characters.")
}

pub fn integer_message(field: &str) -> String {
    format!("The {field} field must be an integer.")
}

pub fn boolean_message(field: &str) -> String {
    format!("The {field} field must be true or false.")
}

pub fn string_message(field: &str) -> String {
    format!("The {field} field must be a string.")
}

/// Render a `validator` error the way the rest of the API words messages.
fn describe(field: &str, err: &ValidationError) -> String {
    if let Some(message) = &err.message {
        return message.to_string();
    }
    match &*err.code {
        "length" => match (err.params.get("max"), err.params.get("min")) {
            (Some(max), _) => max_length_message(field, max),
            (None, Some(min)) => format!("The {field} field must be at least {min} characters."),
            (None, None) => format!("The {field} field has an invalid length."),
        },
        "range" => match (err.params.get("min"), err.params.get("max")) {
            (Some(min), _) => format!("The {field} field must be at least {min}."),
            (None, Some(max)) => format!("The {field} field must not be greater than {max}."),
            (None, None) => format!("The {field} field is out of range."),
        },
        "email" => format!("The {field} field must be a valid email address."),
        _ => format!("The {field} field is invalid."),
    }
}
