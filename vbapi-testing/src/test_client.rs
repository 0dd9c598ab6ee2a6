// Test HTTP Client

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use vbapi_core::{HttpMethod, HttpRequest, HttpResponse, Router};

/// In-process client that drives a [`Router`] without a socket
#[derive(Clone)]
pub struct TestClient {
    router: Arc<Router>,
}

impl TestClient {
    /// Create a new test client
    pub fn new(router: impl Into<Arc<Router>>) -> Self {
        Self {
            router: router.into(),
        }
    }

    /// Make a GET request
    pub async fn get(&self, path: &str) -> TestResponse {
        self.request(HttpMethod::GET, path, None).await
    }

    /// Make a POST request
    pub async fn post(&self, path: &str, body: impl Into<Vec<u8>>) -> TestResponse {
        self.request(HttpMethod::POST, path, Some(body.into())).await
    }

    /// POST `value` serialized as JSON
    pub async fn post_json<T: Serialize>(&self, path: &str, value: &T) -> TestResponse {
        let body = match serde_json::to_vec(value) {
            Ok(body) => body,
            Err(e) => panic!("failed to serialize test body: {}", e),
        };
        let req = HttpRequest::new(HttpMethod::POST.as_str(), path)
            .with_header("Content-Type", "application/json")
            .with_body(body);
        self.send(req).await
    }

    /// Make a request with custom method
    pub async fn request(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> TestResponse {
        let req = HttpRequest::new(method.as_str(), path).with_body(body.unwrap_or_default());
        self.send(req).await
    }

    /// Send a prepared request
    pub async fn send(&self, req: HttpRequest) -> TestResponse {
        TestResponse(self.router.handle(req).await)
    }
}

/// Rendered response, errors included
#[derive(Debug, Clone)]
pub struct TestResponse(pub HttpResponse);

impl TestResponse {
    /// Get the status code
    pub fn status(&self) -> u16 {
        self.0.status
    }

    pub fn is_success(&self) -> bool {
        self.0.is_success()
    }

    /// Panic unless the status is `expected`
    pub fn assert_status(&self, expected: u16) -> &Self {
        assert_eq!(
            self.0.status,
            expected,
            "unexpected status, body: {}",
            self.body_string()
        );
        self
    }

    /// Get the response body as string
    pub fn body_string(&self) -> String {
        String::from_utf8_lossy(&self.0.body).into_owned()
    }

    /// Get the response body as JSON
    pub fn body_json<T: DeserializeOwned>(&self) -> Result<T, String> {
        serde_json::from_slice(&self.0.body).map_err(|e| format!("Deserialization error: {}", e))
    }

    /// Get a header value, ignoring case
    pub fn header(&self, key: &str) -> Option<&str> {
        self.0
            .headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(key))
            .map(|(_, value)| value.as_str())
    }

    pub fn into_inner(self) -> HttpResponse {
        self.0
    }
}
