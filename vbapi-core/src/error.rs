// Error types for the VbApi HTTP layer

use crate::{HttpResponse, HttpStatus};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Route not found: {0}")]
    RouteNotFound(String),

    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Rejected record; carries the rendered violation list.
    #[error("Validation failed")]
    Validation(serde_json::Value),

    #[error("Payload Too Large: {0}")]
    PayloadTooLarge(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        self.http_status().code()
    }

    /// Get the HttpStatus enum for this error
    pub fn http_status(&self) -> HttpStatus {
        match self {
            Error::RouteNotFound(_) => HttpStatus::NotFound,
            Error::MethodNotAllowed(_) => HttpStatus::MethodNotAllowed,
            Error::BadRequest(_) | Error::Deserialization(_) | Error::Validation(_) => {
                HttpStatus::BadRequest
            }
            Error::PayloadTooLarge(_) => HttpStatus::PayloadTooLarge,
            Error::Serialization(_) | Error::Io(_) => HttpStatus::InternalServerError,
        }
    }

    /// Render the error as a JSON response
    pub fn into_response(self) -> HttpResponse {
        let status = self.status_code();
        let mut body = serde_json::json!({
            "error": self.to_string(),
            "status": status,
        });
        if let Error::Validation(errors) = self {
            body["errors"] = errors;
        }

        HttpResponse::new(status)
            .with_json(&body)
            .unwrap_or_else(|_| HttpResponse::internal_server_error())
    }
}
