// Age arithmetic on calendar dates

use crate::{Violation, ViolationKind};
use chrono::{Months, NaiveDate};

/// The date `years` calendar years before `today`.
///
/// Feb 29 falls back to Feb 28 when the target year is not a leap year.
pub fn years_before(today: NaiveDate, years: u32) -> NaiveDate {
    today
        .checked_sub_months(Months::new(years.saturating_mul(12)))
        .unwrap_or(NaiveDate::MIN)
}

/// Whether someone born on `dob` is at least `years` old on `today`
pub fn has_reached_age(dob: NaiveDate, today: NaiveDate, years: u32) -> bool {
    dob <= years_before(today, years)
}

/// Validates that a birth date is not older than a maximum age
#[derive(Debug, Clone, Copy)]
pub struct MaxAge(pub u32);

impl MaxAge {
    /// Born on or after the date `self.0` years before `today`
    pub fn validate(&self, dob: NaiveDate, today: NaiveDate, field: &str) -> Result<(), Violation> {
        if dob < years_before(today, self.0) {
            Err(Violation::new(
                field,
                ViolationKind::AgeLimitExceeded,
                format!("{} must be within the last {} years", field, self.0),
            ))
        } else {
            Ok(())
        }
    }
}
