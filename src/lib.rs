//! VbApi - employee and staff record validation service
//!
//! Two JSON endpoints accept a record, run it through a fixed rule set and
//! either echo it back or answer 400 with every violation found.
//!
//! ```
//! use chrono::NaiveDate;
//! use vbapi::prelude::*;
//!
//! let employee = Employee {
//!     name: Some("John Smithson".into()),
//!     date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1),
//!     email: Some("john@x.com".into()),
//!     phone: Some("1234567890".into()),
//!     hourly_salary: Some(60.0),
//! };
//!
//! let ctx = ValidationContext::on(NaiveDate::from_ymd_opt(2015, 6, 1).unwrap());
//! assert!(employee.validate_with(&ctx).is_ok());
//! ```

pub mod common;
pub mod controllers;
pub mod date;
pub mod employee;
pub mod staff;

pub use controllers::{router, router_with};
pub use employee::{Employee, SalaryTier};
pub use staff::Staff;

pub use vbapi_config;
pub use vbapi_core;
pub use vbapi_log;
pub use vbapi_validation;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{Employee, SalaryTier, Staff, router, router_with};
    pub use vbapi_core::{Application, Error, HttpRequest, HttpResponse, Router};
    pub use vbapi_validation::{
        Validate, ValidationContext, ValidationPipe, Violation, ViolationKind, Violations,
    };
}
