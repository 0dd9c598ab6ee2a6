// Employee record and its rules

use crate::common::{self, DATE_OF_BIRTH, HOURLY_SALARY};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use vbapi_validation::{
    InRange, MaxAge, Required, RuleSet, Validate, ValidationContext, Violation, ViolationKind,
    Violations, has_reached_age,
};

/// Flat hourly salary bounds for employees
pub const EMPLOYEE_SALARY_RANGE: InRange = InRange {
    min: 50.0,
    max: 400.0,
};

/// Oldest allowed age in years
pub const MAX_AGE: MaxAge = MaxAge(65);

/// An employee as posted by clients
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Employee {
    #[serde(alias = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(
        alias = "dateOfBirth",
        default,
        with = "crate::date::optional",
        skip_serializing_if = "Option::is_none"
    )]
    pub date_of_birth: Option<NaiveDate>,

    #[serde(alias = "email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(alias = "phone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    #[serde(alias = "hourlySalary", default, skip_serializing_if = "Option::is_none")]
    pub hourly_salary: Option<f64>,
}

/// Minimum hourly salary by age tier
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SalaryTier {
    /// Age at which the senior floor applies
    pub senior_age: u32,
    pub senior_floor: f64,
    pub junior_floor: f64,
}

impl SalaryTier {
    pub const DEFAULT: SalaryTier = SalaryTier {
        senior_age: 30,
        senior_floor: 200.0,
        junior_floor: 50.0,
    };

    /// Whether someone born on `dob` counts as senior on `today`
    pub fn is_senior(&self, dob: NaiveDate, today: NaiveDate) -> bool {
        has_reached_age(dob, today, self.senior_age)
    }

    pub fn floor_for(&self, dob: NaiveDate, today: NaiveDate) -> f64 {
        if self.is_senior(dob, today) {
            self.senior_floor
        } else {
            self.junior_floor
        }
    }

    pub fn validate(&self, dob: NaiveDate, salary: f64, today: NaiveDate) -> Result<(), Violation> {
        if salary >= self.floor_for(dob, today) {
            Ok(())
        } else {
            Err(Violation::new(
                HOURLY_SALARY,
                ViolationKind::SalaryTierViolation,
                common::SALARY_BELOW_TIER,
            ))
        }
    }
}

impl Default for SalaryTier {
    fn default() -> Self {
        Self::DEFAULT
    }
}

static EMPLOYEE_RULES: Lazy<RuleSet<Employee>> = Lazy::new(|| {
    RuleSet::new()
        .rule("name_required", |e: &Employee, _| {
            common::name_required(e.name.as_deref())
        })
        .rule("name_length", |e: &Employee, _| {
            common::name_length(e.name.as_deref())
        })
        .rule("date_of_birth_required", |e: &Employee, _| {
            Required::validate(e.date_of_birth.as_ref(), DATE_OF_BIRTH)
                .err()
                .map(|v| v.with_message(common::DATE_OF_BIRTH_INVALID))
        })
        .rule("date_of_birth_max_age", |e: &Employee, ctx| {
            MAX_AGE
                .validate(e.date_of_birth?, ctx.today, DATE_OF_BIRTH)
                .err()
                .map(|v| v.with_message(common::BIRTHDATE_INVALID))
        })
        .rule("email_format", |e: &Employee, _| {
            common::email_format(e.email.as_deref())
        })
        .rule("phone_format", |e: &Employee, _| {
            common::phone_format(e.phone.as_deref())
        })
        .rule("hourly_salary_required", |e: &Employee, _| {
            Required::validate(e.hourly_salary.as_ref(), HOURLY_SALARY)
                .err()
                .map(|v| v.with_message(common::SALARY_REQUIRED))
        })
        .rule("hourly_salary_range", |e: &Employee, _| {
            common::salary_range(e.hourly_salary, EMPLOYEE_SALARY_RANGE)
        })
        .rule("hourly_salary_tier", |e: &Employee, ctx| {
            SalaryTier::DEFAULT
                .validate(e.date_of_birth?, e.hourly_salary?, ctx.today)
                .err()
        })
});

/// The rules every employee is checked against, in order
pub fn employee_rules() -> &'static RuleSet<Employee> {
    &EMPLOYEE_RULES
}

impl Validate for Employee {
    fn validate_with(&self, ctx: &ValidationContext) -> Result<(), Violations> {
        EMPLOYEE_RULES.validate(self, ctx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn today() -> ValidationContext {
        ValidationContext::on(ymd(2024, 6, 15))
    }

    fn john() -> Employee {
        Employee {
            name: Some("John Smithson".into()),
            date_of_birth: Some(ymd(1995, 1, 1)),
            email: Some("john@x.com".into()),
            phone: Some("1234567890".into()),
            hourly_salary: Some(60.0),
        }
    }

    #[test]
    fn test_valid_junior() {
        assert!(john().validate_with(&today()).is_ok());
    }

    #[test]
    fn test_optional_contacts_may_be_absent() {
        let employee = Employee {
            email: None,
            phone: None,
            ..john()
        };
        assert!(employee.validate_with(&today()).is_ok());
    }

    #[test]
    fn test_blank_contacts_are_invalid() {
        let employee = Employee {
            email: Some(String::new()),
            phone: Some("          ".into()),
            ..john()
        };
        let violations = employee.validate_with(&today()).unwrap_err();
        assert_eq!(violations.kinds_for("Email"), vec![ViolationKind::InvalidFormat]);
        assert_eq!(violations.kinds_for("Phone"), vec![ViolationKind::InvalidFormat]);
        assert_eq!(violations.len(), 2);
    }

    #[test]
    fn test_empty_record_reports_required_fields() {
        let violations = Employee::default().validate_with(&today()).unwrap_err();
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["Name", "DateOfBirth", "HourlySalary"]);
        assert!(violations.iter().all(|v| v.kind == ViolationKind::MissingField));
        assert_eq!(violations.errors[1].message, "Invalid Date of Birth");
    }

    #[test]
    fn test_senior_boundary() {
        let senior = Employee {
            date_of_birth: Some(ymd(1994, 6, 15)),
            hourly_salary: Some(200.0),
            ..john()
        };
        assert!(senior.validate_with(&today()).is_ok());

        let underpaid = Employee {
            hourly_salary: Some(199.0),
            ..senior
        };
        let violations = underpaid.validate_with(&today()).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.errors[0].kind, ViolationKind::SalaryTierViolation);
        assert_eq!(violations.errors[0].message, "Minimum hourly salary is not valid.");
    }

    #[test]
    fn test_day_before_thirtieth_birthday_is_junior() {
        let employee = Employee {
            date_of_birth: Some(ymd(1994, 6, 16)),
            hourly_salary: Some(50.0),
            ..john()
        };
        assert!(employee.validate_with(&today()).is_ok());
    }

    #[test]
    fn test_age_limit_boundary() {
        let oldest = Employee {
            date_of_birth: Some(ymd(1959, 6, 15)),
            hourly_salary: Some(250.0),
            ..john()
        };
        assert!(oldest.validate_with(&today()).is_ok());

        let too_old = Employee {
            date_of_birth: Some(ymd(1959, 6, 14)),
            ..oldest
        };
        let violations = too_old.validate_with(&today()).unwrap_err();
        assert_eq!(violations.kinds_for(DATE_OF_BIRTH), vec![ViolationKind::AgeLimitExceeded]);
        assert_eq!(violations.errors[0].message, "Birthdate is not valid.");
    }

    #[test]
    fn test_low_junior_salary_fails_both_checks() {
        let employee = Employee {
            hourly_salary: Some(40.0),
            ..john()
        };
        let violations = employee.validate_with(&today()).unwrap_err();
        assert_eq!(
            violations.kinds_for(HOURLY_SALARY),
            vec![ViolationKind::OutOfRange, ViolationKind::SalaryTierViolation]
        );
    }

    #[test]
    fn test_salary_above_range() {
        let employee = Employee {
            hourly_salary: Some(400.5),
            ..john()
        };
        let violations = employee.validate_with(&today()).unwrap_err();
        assert_eq!(violations.kinds_for(HOURLY_SALARY), vec![ViolationKind::OutOfRange]);
    }

    #[test]
    fn test_tier_skipped_without_birth_date() {
        let employee = Employee {
            date_of_birth: None,
            hourly_salary: Some(60.0),
            ..john()
        };
        let violations = employee.validate_with(&today()).unwrap_err();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations.errors[0].field, DATE_OF_BIRTH);
    }

    #[test]
    fn test_tier_floors() {
        let tier = SalaryTier::default();
        let now = ymd(2024, 6, 15);
        assert_eq!(tier.floor_for(ymd(1980, 1, 1), now), 200.0);
        assert_eq!(tier.floor_for(ymd(2000, 1, 1), now), 50.0);
        assert!(tier.validate(ymd(2000, 1, 1), 50.0, now).is_ok());
        assert!(tier.validate(ymd(1980, 1, 1), 150.0, now).is_err());
    }

    #[test]
    fn test_leap_day_birthday() {
        let ctx = ValidationContext::on(ymd(2023, 2, 28));
        assert!(SalaryTier::DEFAULT.is_senior(ymd(1993, 2, 28), ctx.today));
        assert!(!SalaryTier::DEFAULT.is_senior(ymd(1993, 3, 1), ctx.today));

        let ctx = ValidationContext::on(ymd(2024, 2, 29));
        assert!(SalaryTier::DEFAULT.is_senior(ymd(1994, 2, 28), ctx.today));
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(
            employee_rules().names(),
            vec![
                "name_required",
                "name_length",
                "date_of_birth_required",
                "date_of_birth_max_age",
                "email_format",
                "phone_format",
                "hourly_salary_required",
                "hourly_salary_range",
                "hourly_salary_tier",
            ]
        );
    }

    #[test]
    fn test_wire_names() {
        let json = serde_json::to_value(john()).unwrap();
        assert_eq!(json["Name"], "John Smithson");
        assert_eq!(json["DateOfBirth"], "1995-01-01");
        assert_eq!(json["HourlySalary"], 60.0);

        let parsed: Employee = serde_json::from_str(
            r#"{"name":"John Smithson","dateOfBirth":"1995-01-01T00:00:00","hourlySalary":60}"#,
        )
        .unwrap();
        assert_eq!(parsed.date_of_birth, Some(ymd(1995, 1, 1)));
        assert_eq!(parsed.hourly_salary, Some(60.0));
        assert_eq!(parsed.email, None);
    }
}
