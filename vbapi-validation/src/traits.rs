// Validation traits

use crate::Violations;
use chrono::{Local, NaiveDate};

/// Trait for validatable records
pub trait Validate {
    /// Validate against the reference date in `ctx`
    fn validate_with(&self, ctx: &ValidationContext) -> Result<(), Violations>;

    /// Validate against today's local date
    fn validate(&self) -> Result<(), Violations> {
        self.validate_with(&ValidationContext::today())
    }
}

/// Inputs a rule may depend on besides the record itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationContext {
    /// Reference date for age rules
    pub today: NaiveDate,
}

impl ValidationContext {
    /// Context for the current local date
    pub fn today() -> Self {
        Self {
            today: Local::now().date_naive(),
        }
    }

    /// Context pinned to a fixed date
    pub fn on(today: NaiveDate) -> Self {
        Self { today }
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::today()
    }
}
