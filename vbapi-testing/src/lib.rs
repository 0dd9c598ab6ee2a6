//! Testing utilities for VbApi.
//!
//! [`TestClient`] sends requests straight into a [`vbapi_core::Router`]
//! and hands back the rendered response, error bodies included.
//!
//! ```
//! use vbapi_core::{HttpResponse, Router};
//! use vbapi_testing::TestClient;
//!
//! # tokio_test::block_on(async {
//! let router = Router::new().get("/health", |_req| async {
//!     HttpResponse::json(&serde_json::json!({"status": "ok"}))
//! });
//!
//! let client = TestClient::new(router);
//! let response = client.get("/health").await;
//! assert_eq!(response.status(), 200);
//! assert_eq!(client.get("/nope").await.status(), 404);
//! # });
//! ```

mod test_client;

pub use test_client::{TestClient, TestResponse};
