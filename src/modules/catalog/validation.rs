//! Form validation and sanitization.
//!
//! Each entity has a typed form deserialized from the urlencoded body. A form
//! is trimmed, then checked with its `garde` rules; every failed field is
//! reported as a [`FieldError`] and the form is re-rendered as submitted.
//!
//! Form values stay raw. Text is HTML-escaped with [`escape`] only when a
//! valid form is turned into an entity, so everything persisted is escaped
//! and dates are parsed from what the user actually typed.

use garde::{Report, Validate};

use crate::utils;

/// One failed check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A submitted entity form
pub trait CatalogForm: Validate<Context = ()> + Sized {
    /// Strip surrounding whitespace from the fields that are trimmed before checking
    fn trimmed(self) -> Self;
}

/// Trimmed form plus every failure found in it
#[derive(Debug, Clone)]
pub struct Validated<F> {
    pub form: F,
    pub errors: Vec<FieldError>,
}

impl<F> Validated<F> {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Trim and check a submitted form, collecting all field errors
pub fn validate<F: CatalogForm>(form: F) -> Validated<F> {
    let form = form.trimmed();
    let errors = match form.validate() {
        Ok(()) => Vec::new(),
        Err(report) => field_errors(&report),
    };
    Validated { form, errors }
}

/// Flatten a `garde` report into field errors, in field order
pub fn field_errors(report: &Report) -> Vec<FieldError> {
    report
        .iter()
        .map(|(path, error)| FieldError::new(path.to_string(), error.message()))
        .collect()
}

/// Non-empty text
pub fn required(message: &'static str) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value: &str, _: &()| {
        if value.is_empty() {
            return Err(garde::Error::new(message));
        }
        Ok(())
    }
}

/// At least `min` characters
pub fn min_chars(min: usize, message: &'static str) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value: &str, _: &()| {
        if value.chars().count() < min {
            return Err(garde::Error::new(message));
        }
        Ok(())
    }
}

/// Personal name: required and at most 100 characters
pub fn name_part(
    missing: &'static str,
    too_long: &'static str,
) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value: &str, _: &()| {
        if value.is_empty() {
            return Err(garde::Error::new(missing));
        }
        if value.chars().count() > 100 {
            return Err(garde::Error::new(too_long));
        }
        Ok(())
    }
}

/// Empty, or a date in one of the accepted input formats
pub fn optional_date(message: &'static str) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value: &str, _: &()| {
        if value.is_empty() || utils::parse_date(value).is_some() {
            return Ok(());
        }
        Err(garde::Error::new(message))
    }
}

/// Exactly one of `allowed`
pub fn one_of(
    allowed: &'static [&'static str],
    message: &'static str,
) -> impl FnOnce(&str, &()) -> garde::Result {
    move |value: &str, _: &()| {
        if allowed.contains(&value) {
            return Ok(());
        }
        Err(garde::Error::new(message))
    }
}

/// HTML-escape text before it is persisted
pub fn escape(input: &str) -> String {
    html_escape::encode_safe(input).into_owned()
}

/// Reverse [`escape`] to pre-fill a form from a stored entity
pub fn unescape(input: &str) -> String {
    html_escape::decode_html_entities(input).into_owned()
}
