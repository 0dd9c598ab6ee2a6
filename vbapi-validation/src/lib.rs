//! Validation framework for VbApi
//!
//! Field validators that report typed [`Violation`]s, rule sets that run a
//! list of named checks over a record and collect every failure, and a
//! pipe that parses and validates JSON request bodies.
//!
//! # Examples
//!
//! ## Field validators
//!
//! ```
//! use vbapi_validation::{InRange, IsPhone, Length, ViolationKind};
//!
//! assert!(Length::new(10, 250).validate("John Smithson", "Name").is_ok());
//! assert!(IsPhone::validate("1234567890", "Phone").is_ok());
//!
//! let err = InRange::new(30.0, 400.0).validate(20.0, "HourlySalary").unwrap_err();
//! assert_eq!(err.kind, ViolationKind::OutOfRange);
//! ```
//!
//! ## Rule sets
//!
//! ```
//! use vbapi_validation::{IsEmail, RuleSet, ValidationContext, Violations};
//!
//! struct Contact {
//!     email: Option<String>,
//! }
//!
//! let rules = RuleSet::new().rule("email_format", |c: &Contact, _| {
//!     IsEmail::validate(c.email.as_deref()?, "email").err()
//! });
//!
//! let ctx = ValidationContext::today();
//! assert!(rules.validate(&Contact { email: None }, &ctx).is_ok());
//!
//! let violations: Violations = rules.evaluate(&Contact { email: Some("nope".into()) }, &ctx);
//! assert_eq!(violations.len(), 1);
//! ```

pub mod age;
mod errors;
mod pipe;
mod rules;
mod traits;
mod validators;

pub use age::{MaxAge, has_reached_age, years_before};
pub use errors::*;
pub use pipe::*;
pub use rules::*;
pub use traits::*;
pub use validators::*;
