//! Integration tests for EchoEats.
//!
//! The storefront router is driven in-process with `tower::ServiceExt`, so
//! no server or network is needed:
//!
//! ```bash
//! cargo test -p echoeats-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_menu` - Public menu browsing
//! - `storefront_auth` - Sign in, sign up, profile
//! - `storefront_cart` - Cart and checkout
//! - `storefront_locations` - Saved locations
//! - `storefront_assistant` - Ordering assistant

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use echoeats_core::KeyValueStore;
use echoeats_core::auth::{DEMO_EMAIL, DEMO_PASSWORD};
use echoeats_storefront::config::StorefrontConfig;
use echoeats_storefront::middleware::SESSION_COOKIE_NAME;
use echoeats_storefront::state::AppState;
use serde_json::{Value, json};
use tower::ServiceExt;

/// One visitor talking to an in-process storefront.
///
/// Carries the session cookie between requests like a browser would.
pub struct TestClient {
    app: Router,
    cookie: Option<String>,
}

/// Status and decoded JSON body of a response. Non-JSON bodies come back as
/// a JSON string.
pub struct TestResponse {
    pub status: StatusCode,
    pub body: Value,
}

impl TestClient {
    /// A visitor on a fresh storefront with an in-memory store.
    ///
    /// # Panics
    ///
    /// Panics if the application state cannot be built.
    #[must_use]
    pub fn new() -> Self {
        Self::with_store(echoeats_core::MemoryStore::new())
    }

    /// A visitor on a fresh storefront backed by `store`.
    ///
    /// # Panics
    ///
    /// Panics if the application state cannot be built.
    #[allow(clippy::unwrap_used)]
    pub fn with_store(store: impl KeyValueStore + Send + 'static) -> Self {
        let state = AppState::new(StorefrontConfig::default(), store).unwrap();
        Self::for_app(echoeats_storefront::app(state))
    }

    /// Another visitor on an existing router.
    #[must_use]
    pub const fn for_app(app: Router) -> Self {
        Self { app, cookie: None }
    }

    /// The router this visitor talks to.
    #[must_use]
    pub fn app(&self) -> Router {
        self.app.clone()
    }

    /// Send a request, remembering any session cookie the server sets.
    ///
    /// # Panics
    ///
    /// Panics if the router fails or the body cannot be read.
    #[allow(clippy::unwrap_used)]
    pub async fn send(&mut self, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            request = request.header(header::COOKIE, cookie);
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();

        if let Some(set_cookie) = response.headers().get(header::SET_COOKIE) {
            let pair = set_cookie
                .to_str()
                .unwrap()
                .split(';')
                .next()
                .unwrap_or_default()
                .to_owned();
            let cleared = pair == format!("{SESSION_COOKIE_NAME}=");
            self.cookie = (!cleared).then_some(pair);
        }

        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));

        TestResponse { status, body }
    }

    pub async fn get(&mut self, uri: &str) -> TestResponse {
        self.send(Method::GET, uri, None).await
    }

    pub async fn post(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::POST, uri, Some(body)).await
    }

    pub async fn put(&mut self, uri: &str, body: Value) -> TestResponse {
        self.send(Method::PUT, uri, Some(body)).await
    }

    pub async fn delete(&mut self, uri: &str) -> TestResponse {
        self.send(Method::DELETE, uri, None).await
    }

    /// Sign in with the demo account.
    ///
    /// # Panics
    ///
    /// Panics if the login is rejected.
    pub async fn login_demo(&mut self) -> TestResponse {
        let response = self
            .post(
                "/api/auth/login",
                json!({ "email": DEMO_EMAIL, "password": DEMO_PASSWORD }),
            )
            .await;
        assert_eq!(response.status, StatusCode::OK, "demo login failed");
        response
    }

    /// True while the client holds a session cookie.
    #[must_use]
    pub const fn has_session(&self) -> bool {
        self.cookie.is_some()
    }
}

impl Default for TestClient {
    fn default() -> Self {
        Self::new()
    }
}
