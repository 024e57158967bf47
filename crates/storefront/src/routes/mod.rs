//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Page shell (?section=<id>, ?admin=true)
//! GET  /content/{document}     - Published section document (hero.json, ...)
//! GET  /health                 - Liveness
//! GET  /health/ready           - Readiness (content source reachable)
//! GET  /static/*               - Stylesheet and images
//! ```

pub mod content;
pub mod health;
pub mod home;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id_middleware, security_headers_middleware};
use crate::state::AppState;

/// Static assets, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/storefront/static";

/// Create the page and document routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/content/{document}", get(content::document))
}

/// Build the full application with middleware.
///
/// Sentry layers are added by the binary so tests run without a client.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use tower::ServiceExt;
    use url::Url;

    use fino_integrino_content::{ContentClient, MemoryContentClient};

    use super::*;
    use crate::config::{ContentSource, StorefrontConfig};

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    fn static_app(dir: &std::path::Path) -> Router {
        app(AppState::new(StorefrontConfig::local(dir), None).unwrap())
    }

    #[tokio::test]
    async fn test_page_renders_defaults_without_documents() {
        let dir = tempfile::tempdir().unwrap();
        let (status, headers, body) = get(static_app(dir.path()), "/").await;

        assert_eq!(status, StatusCode::OK);
        assert!(headers.contains_key("x-request-id"));
        assert!(headers.contains_key(header::CONTENT_SECURITY_POLICY));
        assert!(body.contains("Premium Healthy Food Solutions for Your Business"));
        assert!(body.contains("Where to Buy Our Products"));
        assert!(body.contains("Quality Through Actions"));
    }

    #[tokio::test]
    async fn test_page_uses_published_documents() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("partnership.json"),
            r#"{"title": "Build a Private Label With Us"}"#,
        )
        .unwrap();

        let (_, _, body) = get(static_app(dir.path()), "/").await;
        assert!(body.contains("Build a Private Label With Us"));
        assert!(!body.contains("Grow Your Business with Us"));
    }

    #[tokio::test]
    async fn test_nav_highlights_requested_section() {
        let dir = tempfile::tempdir().unwrap();
        let (_, _, body) = get(static_app(dir.path()), "/?section=story").await;

        assert!(body.contains(r#"href="/?section=story#story" class="nav-link active""#));
        assert!(body.contains(r#"href="/?section=home#home" class="nav-link""#));
    }

    #[tokio::test]
    async fn test_admin_flag_redirects_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::local(dir.path());
        config.admin_panel_url = Some(Url::parse("https://admin.finointegrino.rs/").unwrap());
        let app = app(AppState::new(config, None).unwrap());

        let (status, headers, _) = get(app, "/?admin=true").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "https://admin.finointegrino.rs/");
    }

    #[tokio::test]
    async fn test_admin_flag_ignored_without_panel() {
        let dir = tempfile::tempdir().unwrap();
        let (status, _, body) = get(static_app(dir.path()), "/?admin=true").await;

        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Our Product Range"));
    }

    #[tokio::test]
    async fn test_content_document_served() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("where-to-buy.json"), r#"{"title": "Shops"}"#).unwrap();
        let app = static_app(dir.path());

        let (status, headers, body) = get(app.clone(), "/content/where-to-buy.json").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(headers[header::CONTENT_TYPE], "application/json");
        assert_eq!(body, r#"{"title": "Shops"}"#);

        let (status, _, _) = get(app.clone(), "/content/story.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, _) = get(app, "/content/secrets.json").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_readiness_tracks_content_store() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = StorefrontConfig::local(dir.path());
        config.content_source = ContentSource::Store;
        let memory = Arc::new(MemoryContentClient::new());
        let client: Arc<dyn ContentClient> = memory.clone();
        let app = app(AppState::new(config, Some(client)).unwrap());

        let (status, _, _) = get(app.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::OK);

        memory.set_unavailable(true);
        let (status, _, _) = get(app.clone(), "/health/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);

        // The page still renders from defaults
        let (status, _, body) = get(app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Integral Breadsticks"));
    }
}
