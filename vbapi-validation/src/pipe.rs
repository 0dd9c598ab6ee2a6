// Validation pipe for request bodies

use crate::{Validate, ValidationContext};
use serde::de::DeserializeOwned;
use tracing::debug;
use vbapi_core::{Error, HttpRequest};

/// Parses a JSON request body and validates it
pub struct ValidationPipe;

impl ValidationPipe {
    /// Parse and validate against today's date
    pub fn parse<T>(req: &HttpRequest) -> Result<T, Error>
    where
        T: DeserializeOwned + Validate,
    {
        Self::parse_with(req, &ValidationContext::today())
    }

    /// Parse and validate against the date in `ctx`
    pub fn parse_with<T>(req: &HttpRequest, ctx: &ValidationContext) -> Result<T, Error>
    where
        T: DeserializeOwned + Validate,
    {
        let parsed: T = serde_json::from_slice(&req.body)
            .map_err(|e| Error::BadRequest(format!("Invalid JSON: {}", e)))?;

        if let Err(violations) = parsed.validate_with(ctx) {
            debug!(
                path = %req.route_path(),
                violations = violations.len(),
                "Request body failed validation"
            );
            return Err(Error::Validation(violations.to_json()));
        }

        Ok(parsed)
    }
}
