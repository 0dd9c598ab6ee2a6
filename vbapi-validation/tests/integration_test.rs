//! Integration tests for vbapi-validation

use chrono::NaiveDate;
use serde::Deserialize;
use vbapi_core::{Error, HttpRequest};
use vbapi_validation::*;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[derive(Debug, Deserialize)]
struct Applicant {
    name: Option<String>,
    born: Option<NaiveDate>,
    rate: Option<f64>,
}

fn applicant_rules() -> RuleSet<Applicant> {
    RuleSet::new()
        .rule("name_required", |a: &Applicant, _| {
            Required::validate_str(a.name.as_deref(), "name").err()
        })
        .rule("born_max_age", |a: &Applicant, ctx| {
            MaxAge(65).validate(a.born?, ctx.today, "born").err()
        })
        .rule("rate_range", |a: &Applicant, _| {
            InRange::new(50.0, 400.0).validate(a.rate?, "rate").err()
        })
        .rule("rate_tier", |a: &Applicant, ctx| {
            let floor = if has_reached_age(a.born?, ctx.today, 30) { 200.0 } else { 50.0 };
            (a.rate? < floor).then(|| {
                Violation::new("rate", ViolationKind::SalaryTierViolation, "rate below tier floor")
            })
        })
}

impl Validate for Applicant {
    fn validate_with(&self, ctx: &ValidationContext) -> Result<(), Violations> {
        applicant_rules().validate(self, ctx)
    }
}

#[test]
fn test_length_validator() {
    let validator = Length::new(10, 250);
    assert!(validator.validate("John Smithson", "Name").is_ok());
    assert!(validator.validate("Short", "Name").is_err());
}

#[test]
fn test_is_email_validator() {
    assert!(IsEmail::validate("user@example.com", "Email").is_ok());
    assert!(IsEmail::validate("test.user@domain.co.uk", "Email").is_ok());
    assert!(IsEmail::validate("invalid-email", "Email").is_err());
}

#[test]
fn test_is_phone_validator() {
    assert!(IsPhone::validate("0123456789", "Phone").is_ok());
    assert!(IsPhone::validate("(012) 345-6789", "Phone").is_err());
}

#[test]
fn test_tier_boundary() {
    let ctx = ValidationContext::on(date(2024, 6, 15));

    let senior_at_floor = Applicant {
        name: Some("Ann".into()),
        born: Some(date(1994, 6, 15)),
        rate: Some(200.0),
    };
    assert!(senior_at_floor.validate_with(&ctx).is_ok());

    let senior_below = Applicant {
        rate: Some(199.0),
        ..senior_at_floor
    };
    let violations = senior_below.validate_with(&ctx).unwrap_err();
    assert_eq!(violations.kinds_for("rate"), vec![ViolationKind::SalaryTierViolation]);
}

#[test]
fn test_every_rule_reports() {
    let ctx = ValidationContext::on(date(2024, 6, 15));
    let applicant = Applicant {
        name: None,
        born: Some(date(1950, 1, 1)),
        rate: Some(10.0),
    };

    let violations = applicant.validate_with(&ctx).unwrap_err();
    assert!(violations.contains("name", ViolationKind::MissingField));
    assert!(violations.contains("born", ViolationKind::AgeLimitExceeded));
    assert_eq!(
        violations.kinds_for("rate"),
        vec![ViolationKind::OutOfRange, ViolationKind::SalaryTierViolation]
    );
}

#[test]
fn test_evaluation_is_repeatable() {
    let ctx = ValidationContext::on(date(2024, 6, 15));
    let applicant = Applicant {
        name: Some(" ".into()),
        born: None,
        rate: Some(500.0),
    };

    let first = applicant.validate_with(&ctx).unwrap_err();
    let second = applicant.validate_with(&ctx).unwrap_err();
    assert_eq!(first, second);
}

#[test]
fn test_pipe_with_context() {
    let ctx = ValidationContext::on(date(2024, 6, 15));
    let req = HttpRequest::new("POST", "/applicants")
        .with_body(r#"{"name":"Ann","born":"1990-01-01","rate":60}"#);

    let applicant: Applicant = ValidationPipe::parse_with(&req, &ctx).unwrap();
    assert_eq!(applicant.rate, Some(60.0));

    let req = HttpRequest::new("POST", "/applicants")
        .with_body(r#"{"name":"Ann","born":"1980-01-01","rate":60}"#);
    let err = ValidationPipe::parse_with::<Applicant>(&req, &ctx).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));

    let response = err.into_response();
    let body: serde_json::Value = response.body_json().unwrap();
    assert_eq!(body["errors"][0]["kind"], "SalaryTierViolation");
}
