// HTTP handlers and the route table

use crate::{Employee, Staff};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::debug;
use vbapi_core::{Error, HttpRequest, HttpResponse, Router};
use vbapi_validation::{Validate, ValidationContext, ValidationPipe};

pub const EMPLOYEES_PATH: &str = "/employees";
pub const STAFF_PATH: &str = "/staff";
pub const EMPLOYEE_ALIAS_PATH: &str = "/api/employee";
pub const STAFF_ALIAS_PATH: &str = "/api/staff";
pub const HEALTH_PATH: &str = "/health";

/// Validate an employee and echo it back
pub async fn create_employee(req: HttpRequest, ctx: ValidationContext) -> Result<HttpResponse, Error> {
    accept::<Employee>(&req, &ctx, "employee")
}

/// Validate a staff record and echo it back
pub async fn create_staff(req: HttpRequest, ctx: ValidationContext) -> Result<HttpResponse, Error> {
    accept::<Staff>(&req, &ctx, "staff")
}

/// Liveness probe
pub async fn health(_req: HttpRequest) -> Result<HttpResponse, Error> {
    HttpResponse::json(&serde_json::json!({"status": "ok"}))
}

fn accept<T>(req: &HttpRequest, ctx: &ValidationContext, kind: &'static str) -> Result<HttpResponse, Error>
where
    T: DeserializeOwned + Serialize + Validate,
{
    let record: T = ValidationPipe::parse_with(req, ctx)?;
    debug!(record = kind, "Record accepted");
    HttpResponse::json(&record)
}

/// Routes validating against the current local date
pub fn router() -> Router {
    router_with(ValidationContext::today)
}

/// Routes taking their validation context from `clock` on every request
pub fn router_with<C>(clock: C) -> Router
where
    C: Fn() -> ValidationContext + Send + Sync + 'static,
{
    let clock = Arc::new(clock);

    let employees = {
        let clock = clock.clone();
        move |req| create_employee(req, clock())
    };
    let staff = {
        let clock = clock.clone();
        move |req| create_staff(req, clock())
    };
    let employee_alias = {
        let clock = clock.clone();
        move |req| create_employee(req, clock())
    };
    let staff_alias = move |req| create_staff(req, clock());

    Router::new()
        .post(EMPLOYEES_PATH, employees)
        .post(STAFF_PATH, staff)
        .post(EMPLOYEE_ALIAS_PATH, employee_alias)
        .post(STAFF_ALIAS_PATH, staff_alias)
        .get(HEALTH_PATH, health)
}
