// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod movie;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use movie::{
    parse_duration_token, validate_duration, validate_movie, validate_name, validate_rating,
    DurationUnit, MovieDraft, MovieId, MovieRecord,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// The fields of a movie form that carry validation rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovieField {
    Name,
    Duration,
    Rating,
}

impl MovieField {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovieField::Name => "name",
            MovieField::Duration => "duration",
            MovieField::Rating => "rating",
        }
    }
}

impl fmt::Display for MovieField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which rule rejected a field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationRule {
    Required,
    TooShort,
    TooLong,
    BadFormat,
    OutOfRange,
}

/// A single field-scoped rejection, carrying the message shown next to the input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    pub field: MovieField,
    pub rule: ValidationRule,
    pub message: &'static str,
}

impl ValidationError {
    pub(crate) fn new(field: MovieField, rule: ValidationRule, message: &'static str) -> Self {
        Self {
            field,
            rule,
            message,
        }
    }
}

/// Every failing field of a draft, at most one message per field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: BTreeMap<MovieField, ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps the first error recorded for a field
    pub fn add(&mut self, error: ValidationError) {
        self.errors.entry(error.field).or_insert(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn get(&self, field: MovieField) -> Option<&ValidationError> {
        self.errors.get(&field)
    }

    pub fn message(&self, field: MovieField) -> Option<&'static str> {
        self.errors.get(&field).map(|e| e.message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.values()
    }

    /// Field name → message, the shape the UI renders inline
    pub fn to_messages(&self) -> BTreeMap<String, String> {
        self.errors
            .iter()
            .map(|(field, error)| (field.to_string(), error.message.to_string()))
            .collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .errors
            .iter()
            .map(|(field, error)| format!("{}: {}", field, error.message))
            .collect();
        write!(f, "{}", parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Domain result type
pub type DomainResult<T> = Result<T, ValidationError>;
