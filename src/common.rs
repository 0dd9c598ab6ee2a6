// Field names, messages and rules shared by Employee and Staff

use vbapi_validation::{InRange, IsEmail, IsPhone, Length, Required, Violation};

pub const NAME: &str = "Name";
pub const DATE_OF_BIRTH: &str = "DateOfBirth";
pub const EMAIL: &str = "Email";
pub const PHONE: &str = "Phone";
pub const HOURLY_SALARY: &str = "HourlySalary";

pub const NAME_REQUIRED: &str = "Name is required.";
pub const NAME_INVALID: &str = "Invalid Name";
pub const DATE_OF_BIRTH_INVALID: &str = "Invalid Date of Birth";
pub const BIRTHDATE_INVALID: &str = "Birthdate is not valid.";
pub const EMAIL_INVALID: &str = "Email address is not valid.";
pub const PHONE_INVALID: &str = "Phone is not valid.";
pub const SALARY_REQUIRED: &str = "Hourly salary is required.";
pub const SALARY_OUT_OF_RANGE: &str = "Hourly salary does not fall within allowed range.";
pub const SALARY_BELOW_TIER: &str = "Minimum hourly salary is not valid.";

/// Name length bounds, in characters
pub const NAME_LENGTH: Length = Length { min: 10, max: 250 };

/// The value, unless it is absent or blank
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

pub fn name_required(name: Option<&str>) -> Option<Violation> {
    Required::validate_str(name, NAME)
        .err()
        .map(|v| v.with_message(NAME_REQUIRED))
}

pub fn name_length(name: Option<&str>) -> Option<Violation> {
    NAME_LENGTH
        .validate(present(name)?, NAME)
        .err()
        .map(|v| v.with_message(NAME_INVALID))
}

pub fn email_format(email: Option<&str>) -> Option<Violation> {
    IsEmail::validate(email?, EMAIL)
        .err()
        .map(|v| v.with_message(EMAIL_INVALID))
}

pub fn phone_format(phone: Option<&str>) -> Option<Violation> {
    IsPhone::validate(phone?, PHONE)
        .err()
        .map(|v| v.with_message(PHONE_INVALID))
}

pub fn salary_range(salary: Option<f64>, range: InRange) -> Option<Violation> {
    range
        .validate(salary?, HOURLY_SALARY)
        .err()
        .map(|v| v.with_message(SALARY_OUT_OF_RANGE))
}
