// Built-in validators

use crate::{Violation, ViolationKind};
use once_cell::sync::Lazy;
use regex::Regex;

// Common regex patterns
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{10}$").unwrap());

/// Validates that a value is present
pub struct Required;

impl Required {
    /// Present and not blank
    pub fn validate_str<'a>(
        value: Option<&'a str>,
        field: &str,
    ) -> Result<&'a str, Violation> {
        match value {
            Some(v) if !v.trim().is_empty() => Ok(v),
            _ => Err(Violation::new(
                field,
                ViolationKind::MissingField,
                format!("{} is required", field),
            )),
        }
    }

    /// Present
    pub fn validate<'a, T>(value: Option<&'a T>, field: &str) -> Result<&'a T, Violation> {
        value.ok_or_else(|| {
            Violation::new(
                field,
                ViolationKind::MissingField,
                format!("{} is required", field),
            )
        })
    }
}

/// Validates string length in characters, both bounds inclusive
#[derive(Debug, Clone, Copy)]
pub struct Length {
    pub min: usize,
    pub max: usize,
}

impl Length {
    pub fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, value: &str, field: &str) -> Result<(), Violation> {
        let len = value.chars().count();
        if len < self.min || len > self.max {
            Err(Violation::new(
                field,
                ViolationKind::LengthOutOfRange,
                format!(
                    "{} must be between {} and {} characters",
                    field, self.min, self.max
                ),
            ))
        } else {
            Ok(())
        }
    }
}

/// Validates email format
pub struct IsEmail;

impl IsEmail {
    pub fn validate(value: &str, field: &str) -> Result<(), Violation> {
        if EMAIL_REGEX.is_match(value) {
            Ok(())
        } else {
            Err(Violation::new(
                field,
                ViolationKind::InvalidFormat,
                format!("{} must be a valid email address", field),
            ))
        }
    }
}

/// Validates a phone number of exactly ten ASCII digits
pub struct IsPhone;

impl IsPhone {
    pub fn validate(value: &str, field: &str) -> Result<(), Violation> {
        if PHONE_REGEX.is_match(value) {
            Ok(())
        } else {
            Err(Violation::new(
                field,
                ViolationKind::InvalidFormat,
                format!("{} must be exactly 10 digits", field),
            ))
        }
    }
}

/// Validates that a number lies in an inclusive range
#[derive(Debug, Clone, Copy)]
pub struct InRange {
    pub min: f64,
    pub max: f64,
}

impl InRange {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn validate(&self, value: f64, field: &str) -> Result<(), Violation> {
        // NaN compares false both ways, so test containment directly
        if (self.min..=self.max).contains(&value) {
            Ok(())
        } else {
            Err(Violation::new(
                field,
                ViolationKind::OutOfRange,
                format!("{} must be between {} and {}", field, self.min, self.max),
            ))
        }
    }
}
