//! Error types for the take-home simulator

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Result type alias for simulator operations
pub type Result<T> = std::result::Result<T, SimulationError>;

#[derive(Error, Debug)]
pub enum SimulationError {

    // =============================
    // Core Pipeline Errors
    // =============================

    #[error("Validation failed: {0}")]
    Validation(#[from] FieldErrors),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    // =============================
    // External Library Conversions
    // =============================

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

//
// ================= Field-level errors =================
//

/// Form fields that can carry a validation error, in form order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    Turnover,
    Ownership,
    MonthlyPayment,
    Expenses,
    Email,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Turnover => "turnover",
            Field::Ownership => "ownership",
            Field::MonthlyPayment => "monthlyPayment",
            Field::Expenses => "expenses",
            Field::Email => "email",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum FieldErrorKind {
    /// A mandatory field is blank
    Required,
    /// The value does not match its expected shape
    InvalidFormat,
    /// The value parsed but is outside the accepted range
    OutOfRange,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: Field, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// Complete set of field errors from one validation pass.
///
/// Errors are kept in form order so `first()` names the field the UI
/// should focus.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn push(&mut self, error: FieldError) {
        self.0.push(error);
        self.0.sort_by_key(|e| e.field);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn first(&self) -> Option<&FieldError> {
        self.0.first()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn contains(&self, field: Field, kind: FieldErrorKind) -> bool {
        self.for_field(field).any(|e| e.kind == kind)
    }

    pub fn into_vec(self) -> Vec<FieldError> {
        self.0
    }
}

impl From<FieldError> for FieldErrors {
    fn from(error: FieldError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for FieldErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_stay_in_form_order() {
        let mut errors = FieldErrors::new();
        errors.push(FieldError::new(Field::Email, FieldErrorKind::InvalidFormat, "bad email"));
        errors.push(FieldError::new(Field::Turnover, FieldErrorKind::Required, "missing"));
        errors.push(FieldError::new(Field::Expenses, FieldErrorKind::Required, "missing"));

        let order: Vec<Field> = errors.iter().map(|e| e.field).collect();
        assert_eq!(order, vec![Field::Turnover, Field::Expenses, Field::Email]);
        assert_eq!(errors.first().map(|e| e.field), Some(Field::Turnover));
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let errors: FieldErrors =
            FieldError::new(Field::MonthlyPayment, FieldErrorKind::Required, "missing").into();

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json[0]["field"], "monthlyPayment");
        assert_eq!(json[0]["kind"], "required");
    }
}
