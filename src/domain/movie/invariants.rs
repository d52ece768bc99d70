use regex::Regex;
use std::sync::LazyLock;

use super::entity::MovieDraft;
use crate::domain::{DomainResult, MovieField, ValidationError, ValidationErrors, ValidationRule};

const NAME_MIN_CHARS: usize = 2;
const NAME_MAX_CHARS: usize = 100;

const HOURS_MIN: f64 = 0.1;
const HOURS_MAX: f64 = 12.0;
const MINUTES_MIN: f64 = 1.0;
const MINUTES_MAX: f64 = 720.0;

const RATING_MIN: f64 = 0.0;
const RATING_MAX: f64 = 10.0;

static DURATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+[hmHM]$").expect("duration pattern is valid"));

/// Unit letter of a duration token, case-insensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DurationUnit {
    Hours,
    Minutes,
}

impl DurationUnit {
    fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_lowercase() {
            'h' => Some(DurationUnit::Hours),
            'm' => Some(DurationUnit::Minutes),
            _ => None,
        }
    }
}

/// Splits a token such as `"120m"` into its magnitude and unit
///
/// Returns `None` for anything that is not digits followed by exactly one
/// unit letter.
pub fn parse_duration_token(input: &str) -> Option<(f64, DurationUnit)> {
    if !DURATION_PATTERN.is_match(input) {
        return None;
    }

    let letter = input.chars().last()?;
    let digits = &input[..input.len() - letter.len_utf8()];
    let magnitude = digits.parse::<f64>().ok()?;
    let unit = DurationUnit::from_letter(letter)?;

    Some((magnitude, unit))
}

/// Movie name must be present and 2-100 characters long
pub fn validate_name(input: &str) -> DomainResult<()> {
    if input.is_empty() {
        return Err(ValidationError::new(
            MovieField::Name,
            ValidationRule::Required,
            "Movie name is required",
        ));
    }

    let length = input.chars().count();
    if length < NAME_MIN_CHARS {
        return Err(ValidationError::new(
            MovieField::Name,
            ValidationRule::TooShort,
            "Movie name must be at least 2 characters",
        ));
    }
    if length > NAME_MAX_CHARS {
        return Err(ValidationError::new(
            MovieField::Name,
            ValidationRule::TooLong,
            "Movie name must be at most 100 characters",
        ));
    }

    Ok(())
}

/// Duration must be `<digits><h|m>` with 0.1-12 hours or 1-720 minutes
pub fn validate_duration(input: &str) -> DomainResult<()> {
    if input.is_empty() {
        return Err(ValidationError::new(
            MovieField::Duration,
            ValidationRule::Required,
            "Duration is required",
        ));
    }

    let bad_format = ValidationError::new(
        MovieField::Duration,
        ValidationRule::BadFormat,
        "Invalid format. Use Xh or Xm format",
    );

    let (magnitude, unit) = parse_duration_token(input).ok_or(bad_format)?;

    let in_range = match unit {
        DurationUnit::Hours => (HOURS_MIN..=HOURS_MAX).contains(&magnitude),
        DurationUnit::Minutes => (MINUTES_MIN..=MINUTES_MAX).contains(&magnitude),
    };

    if !in_range {
        return Err(ValidationError::new(
            MovieField::Duration,
            ValidationRule::OutOfRange,
            "Invalid duration. Must be between 1-720 minutes or 0.1-12 hours",
        ));
    }

    Ok(())
}

/// Rating must be a number between 0 and 10 inclusive
pub fn validate_rating(input: Option<f64>) -> DomainResult<()> {
    let rating = match input {
        Some(value) if !value.is_nan() => value,
        _ => {
            return Err(ValidationError::new(
                MovieField::Rating,
                ValidationRule::Required,
                "Rating is required",
            ))
        }
    };

    if rating < RATING_MIN {
        return Err(ValidationError::new(
            MovieField::Rating,
            ValidationRule::OutOfRange,
            "Rating must be at least 0",
        ));
    }
    if rating > RATING_MAX {
        return Err(ValidationError::new(
            MovieField::Rating,
            ValidationRule::OutOfRange,
            "Rating must be at most 10",
        ));
    }

    Ok(())
}

/// Validates all MovieDraft fields
///
/// Every field is checked even after an earlier one fails, so the form can
/// show all messages at once.
pub fn validate_movie(draft: &MovieDraft) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    for result in [
        validate_name(&draft.name),
        validate_duration(&draft.duration),
        validate_rating(draft.rating),
    ] {
        if let Err(error) = result {
            errors.add(error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Rules that must hold for a MovieDraft to be submitted:
///
/// 1. Name is present and 2-100 characters (raw input, no trimming)
/// 2. Duration is digits followed by one of h/H/m/M
/// 3. Hours lie in 0.1-12, minutes in 1-720
/// 4. Rating is a number in 0-10, bounds inclusive
/// 5. At most one message per field; the first failing rule wins
/// 6. Create and edit use the same rules
