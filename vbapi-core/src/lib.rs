//! HTTP core for VbApi
//!
//! A small hyper-based server: request/response wrappers, a path router,
//! an error type that knows its status code, and an [`Application`] that
//! serves a [`Router`] with graceful shutdown.
//!
//! ```
//! use vbapi_core::{Error, HttpRequest, HttpResponse, Router};
//!
//! # tokio_test::block_on(async {
//! let router = Router::new().get("/health", |_req| async {
//!     HttpResponse::json(&serde_json::json!({"status": "ok"}))
//! });
//!
//! let response = router.handle(HttpRequest::new("GET", "/health")).await;
//! assert_eq!(response.status, 200);
//! # Ok::<(), Error>(())
//! # });
//! ```

pub mod application;
pub mod error;
pub mod http;
pub mod routing;
pub mod status;

pub use application::*;
pub use error::*;
pub use http::*;
pub use routing::{HandlerFn, Route, Router};
pub use status::*;
