// Validation errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of rule a field failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ViolationKind {
    /// A mandatory field is absent or blank
    MissingField,
    /// Text length outside its inclusive bounds
    LengthOutOfRange,
    /// Email or phone syntax mismatch
    InvalidFormat,
    /// Number outside its inclusive bounds
    OutOfRange,
    /// Hourly salary below the floor for the person's age tier
    SalaryTierViolation,
    /// Date of birth older than the maximum allowed age
    AgeLimitExceeded,
}

impl ViolationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViolationKind::MissingField => "MissingField",
            ViolationKind::LengthOutOfRange => "LengthOutOfRange",
            ViolationKind::InvalidFormat => "InvalidFormat",
            ViolationKind::OutOfRange => "OutOfRange",
            ViolationKind::SalaryTierViolation => "SalaryTierViolation",
            ViolationKind::AgeLimitExceeded => "AgeLimitExceeded",
        }
    }
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single failed rule for one field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field name that failed validation
    pub field: String,

    /// Rule that failed
    pub kind: ViolationKind,

    /// Human-readable message
    pub message: String,
}

impl Violation {
    /// Create a new violation
    pub fn new(field: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            kind,
            message: message.into(),
        }
    }

    /// Replace the message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.kind)
    }
}

impl std::error::Error for Violation {}

/// Every violation found for one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Violations {
    pub errors: Vec<Violation>,
}

impl Violations {
    /// Create a new violations collection
    pub fn new(errors: Vec<Violation>) -> Self {
        Self { errors }
    }

    /// Check if there are any violations
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of violations
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Add a violation
    pub fn add(&mut self, violation: Violation) {
        self.errors.push(violation);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Violation> {
        self.errors.iter()
    }

    /// Get violations for a specific field
    pub fn get_field_errors(&self, field: &str) -> Vec<&Violation> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Kinds reported for a field, in evaluation order
    pub fn kinds_for(&self, field: &str) -> Vec<ViolationKind> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.kind)
            .collect()
    }

    /// Whether `field` failed with `kind`
    pub fn contains(&self, field: &str, kind: ViolationKind) -> bool {
        self.errors.iter().any(|e| e.field == field && e.kind == kind)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`
    pub fn into_result(self) -> Result<(), Violations> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Convert to the JSON array sent to clients
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.errors
                .iter()
                .map(|e| {
                    serde_json::json!({
                        "field": e.field,
                        "kind": e.kind,
                        "message": e.message,
                    })
                })
                .collect(),
        )
    }
}

impl fmt::Display for Violations {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for error in &self.errors {
            writeln!(f, "{}", error)?;
        }
        Ok(())
    }
}

impl std::error::Error for Violations {}

impl From<Vec<Violation>> for Violations {
    fn from(errors: Vec<Violation>) -> Self {
        Self::new(errors)
    }
}

impl FromIterator<Violation> for Violations {
    fn from_iter<I: IntoIterator<Item = Violation>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Violations {
    type Item = Violation;
    type IntoIter = std::vec::IntoIter<Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a> IntoIterator for &'a Violations {
    type Item = &'a Violation;
    type IntoIter = std::slice::Iter<'a, Violation>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Violations {
        vec![
            Violation::new("Name", ViolationKind::LengthOutOfRange, "Invalid Name"),
            Violation::new(
                "HourlySalary",
                ViolationKind::OutOfRange,
                "Hourly salary does not fall within allowed range.",
            ),
            Violation::new(
                "HourlySalary",
                ViolationKind::SalaryTierViolation,
                "Minimum hourly salary is not valid.",
            ),
        ]
        .into()
    }

    #[test]
    fn test_kind_serializes_by_name() {
        let json = serde_json::to_value(ViolationKind::AgeLimitExceeded).unwrap();
        assert_eq!(json, "AgeLimitExceeded");
        assert_eq!(ViolationKind::MissingField.to_string(), "MissingField");
    }

    #[test]
    fn test_field_queries() {
        let violations = sample();
        assert_eq!(violations.len(), 3);
        assert_eq!(violations.get_field_errors("HourlySalary").len(), 2);
        assert_eq!(
            violations.kinds_for("HourlySalary"),
            vec![ViolationKind::OutOfRange, ViolationKind::SalaryTierViolation]
        );
        assert!(violations.contains("Name", ViolationKind::LengthOutOfRange));
        assert!(!violations.contains("Name", ViolationKind::MissingField));
    }

    #[test]
    fn test_into_result() {
        assert!(Violations::default().into_result().is_ok());
        assert_eq!(sample().into_result().unwrap_err().len(), 3);
    }

    #[test]
    fn test_to_json_shape() {
        let json = sample().to_json();
        let first = &json[0];
        assert_eq!(first["field"], "Name");
        assert_eq!(first["kind"], "LengthOutOfRange");
        assert_eq!(first["message"], "Invalid Name");
        assert_eq!(json.as_array().unwrap().len(), 3);
    }

    #[test]
    fn test_display() {
        let violation = Violation::new("Phone", ViolationKind::InvalidFormat, "Phone is not valid.");
        assert_eq!(violation.to_string(), "Phone: Phone is not valid. (InvalidFormat)");
        assert_eq!(sample().to_string().lines().count(), 3);
    }

    #[test]
    fn test_with_message() {
        let violation = Violation::new("Email", ViolationKind::InvalidFormat, "Email must be a valid email")
            .with_message("Email address is not valid.");
        assert_eq!(violation.message, "Email address is not valid.");
        assert_eq!(violation.kind, ViolationKind::InvalidFormat);
    }
}
