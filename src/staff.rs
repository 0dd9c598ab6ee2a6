// Staff record and its rules

use crate::common;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use vbapi_validation::{InRange, RuleSet, Validate, ValidationContext, Violations};

/// Hourly salary bounds for staff, when a salary is given
pub const STAFF_SALARY_RANGE: InRange = InRange {
    min: 30.0,
    max: 400.0,
};

/// A staff member as posted by clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Staff {
    #[serde(alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(alias = "email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(alias = "phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(alias = "hourlySalary", default, skip_serializing_if = "Option::is_none")]
    pub hourly_salary: Option<f64>,
}

static STAFF_RULES: Lazy<RuleSet<Staff>> = Lazy::new(|| {
    RuleSet::new()
        .rule("name_required", |s: &Staff, _| {
            common::name_required(s.name.as_deref())
        })
        .rule("name_length", |s: &Staff, _| {
            common::name_length(s.name.as_deref())
        })
        .rule("email_format", |s: &Staff, _| {
            common::email_format(s.email.as_deref())
        })
        .rule("phone_format", |s: &Staff, _| {
            common::phone_format(s.phone.as_deref())
        })
        .rule("hourly_salary_range", |s: &Staff, _| {
            common::salary_range(s.hourly_salary, STAFF_SALARY_RANGE)
        })
});

/// The rules every staff record is checked against, in order
pub fn staff_rules() -> &'static RuleSet<Staff> {
    &STAFF_RULES
}

impl Validate for Staff {
    fn validate_with(&self, ctx: &ValidationContext) -> Result<(), Violations> {
        STAFF_RULES.validate(self, ctx)
    }
}
