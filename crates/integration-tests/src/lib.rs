//! Integration tests for the Fino Integrino site and admin panel.
//!
//! Both applications run in-process against one shared
//! [`MemoryContentClient`], so an edit made through the panel is visible to
//! the storefront on the next request, as with the shared `PostgreSQL` store.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p fino-integrino-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]
#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use tower::ServiceExt;
use tower_sessions::MemoryStore;

use fino_integrino_admin::config::AdminConfig;
use fino_integrino_admin::middleware::configure_session_layer;
use fino_integrino_admin::password::hash_password;
use fino_integrino_content::{ContentClient, MemoryContentClient};
use fino_integrino_storefront::config::{ContentSource, StorefrontConfig};

/// Editor password accepted by [`admin_app`].
pub const ADMIN_PASSWORD: &str = "integral breadsticks";

/// A shared store with both applications wired to it.
pub struct TestSite {
    pub store: Arc<MemoryContentClient>,
    pub storefront: Router,
    pub admin: Router,
}

impl TestSite {
    /// Storefront reading hero, products and retailers from the store, and
    /// the remaining sections from `content_dir`.
    pub fn new(content_dir: &Path) -> Self {
        let store = Arc::new(MemoryContentClient::new());
        Self {
            storefront: storefront_app(store.clone(), content_dir),
            admin: admin_app(store.clone()),
            store,
        }
    }
}

/// Storefront in store mode over `client`.
pub fn storefront_app(client: Arc<dyn ContentClient>, content_dir: &Path) -> Router {
    let mut config = StorefrontConfig::local(content_dir);
    config.content_source = ContentSource::Store;
    let state = fino_integrino_storefront::state::AppState::new(config, Some(client)).unwrap();
    fino_integrino_storefront::routes::app(state)
}

/// Storefront serving only the published documents in `content_dir`.
pub fn static_storefront_app(content_dir: &Path) -> Router {
    let config = StorefrontConfig::local(content_dir);
    let state = fino_integrino_storefront::state::AppState::new(config, None).unwrap();
    fino_integrino_storefront::routes::app(state)
}

/// Admin panel over `client`, with in-memory sessions.
pub fn admin_app(client: Arc<dyn ContentClient>) -> Router {
    let config = AdminConfig::local(hash_password(ADMIN_PASSWORD).unwrap());
    let state = fino_integrino_admin::state::AppState::new(config, client);
    fino_integrino_admin::routes::app(state, configure_session_layer(MemoryStore::default(), false))
}

/// Buffered response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

impl TestResponse {
    pub fn location(&self) -> &str {
        self.headers[header::LOCATION].to_str().unwrap()
    }
}

/// Send one request. `form` is sent url-encoded.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    form: Option<&str>,
) -> TestResponse {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", "198.51.100.20");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let body = match form {
        Some(form) => {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(form.to_owned())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

/// Shorthand for a GET without a session.
pub async fn get(app: &Router, uri: &str) -> TestResponse {
    send(app, "GET", uri, None, None).await
}

/// Log in to the admin panel and return the session cookie pair.
pub async fn login(admin: &Router) -> String {
    let form = format!("password={}", ADMIN_PASSWORD.replace(' ', "+"));
    let response = send(admin, "POST", "/login", None, Some(&form)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER, "login failed");
    response.headers[header::SET_COOKIE]
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_owned()
}
