//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                     - Liveness
//! GET  /health/ready               - Readiness (content store reachable)
//!
//! # Auth (single shared password)
//! GET  /login                      - Login page
//! POST /login                      - Check password (rate limited)
//! POST /logout                     - End session
//!
//! # Panel (login required)
//! GET  /                           - Redirect to the first tab
//! GET  /{tab}                      - Tab page (?edit=<id> opens a row)
//! POST /{tab}                      - Create
//! POST /{tab}/{id}                 - Update
//! GET  /{tab}/{id}/delete          - Delete confirmation
//! POST /{tab}/{id}/delete          - Delete (confirm=yes)
//! POST /hero/{id}/activate         - Make a hero row live
//!
//! GET  /static/*                   - Stylesheet and flash script
//! ```
//!
//! Every mutation answers with a redirect back to its tab and leaves a
//! [`Notice`] in the session flash slot.

pub mod auth;
pub mod health;
pub mod hero;
pub mod images;
pub mod products;
pub mod retailers;

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, http::Request, response::Redirect, routing::get};
use chrono::Utc;
use serde::Deserialize;
use tower_http::services::ServeDir;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tower_sessions::{Session, SessionManagerLayer, SessionStore};
use tracing::Level;

use fino_integrino_core::SiteImage;

use crate::error::Result;
use crate::filters;
use crate::middleware::{security_headers_middleware, take_flash};
use crate::models::Flash;
use crate::panel::{Notice, Tab};
use crate::state::AppState;

/// Static assets, relative to the workspace root.
pub const STATIC_DIR: &str = "crates/admin/static";

// =============================================================================
// Shared Views
// =============================================================================

/// A tab in the panel navigation.
#[derive(Debug, Clone)]
pub struct TabLink {
    pub path: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Tab navigation with `active` highlighted.
#[must_use]
pub fn tab_links(active: Tab) -> Vec<TabLink> {
    Tab::ALL
        .into_iter()
        .map(|tab| TabLink {
            path: tab.path(),
            label: tab.label(),
            active: tab == active,
        })
        .collect()
}

/// The flash message as rendered, with the time it has left on screen.
#[derive(Debug, Clone)]
pub struct FlashView {
    pub kind: &'static str,
    pub text: String,
    pub remaining_ms: i64,
}

impl FlashView {
    fn from_flash(flash: &Flash) -> Option<Self> {
        let remaining = flash.remaining(Utc::now())?;
        Some(Self {
            kind: if flash.notice.is_error() {
                "error"
            } else {
                "success"
            },
            text: flash.notice.text.clone(),
            remaining_ms: remaining.num_milliseconds(),
        })
    }

    /// A notice raised while rendering the page itself.
    fn immediate(notice: Notice) -> Option<Self> {
        Self::from_flash(&Flash::new(notice, Utc::now()))
    }
}

/// Pop the flash for the page being rendered.
///
/// A load failure on the page itself takes the slot instead.
async fn page_flash(session: &Session, load_error: Option<Notice>) -> Result<Option<FlashView>> {
    let pending = take_flash(session).await?;
    Ok(match load_error {
        Some(notice) => FlashView::immediate(notice),
        None => pending.as_ref().and_then(FlashView::from_flash),
    })
}

/// `?edit=<id>` on a tab page.
#[derive(Debug, Default, Deserialize)]
pub struct EditQuery {
    pub edit: Option<String>,
}

/// An entry in an image picker.
#[derive(Debug, Clone)]
pub struct ImageOption {
    pub id: String,
    pub name: String,
}

fn image_options(images: &[SiteImage]) -> Vec<ImageOption> {
    images
        .iter()
        .map(|image| ImageOption {
            id: image.id.to_string(),
            name: image.name.clone(),
        })
        .collect()
}

/// Delete confirmation page, shared by all tabs.
#[derive(Template, WebTemplate)]
#[template(path = "confirm_delete.html")]
pub struct ConfirmDeleteTemplate {
    pub tabs: Vec<TabLink>,
    pub flash: Option<FlashView>,
    pub prompt: &'static str,
    pub item_name: String,
    pub action: String,
    pub cancel: &'static str,
}

impl ConfirmDeleteTemplate {
    fn new(tab: Tab, prompt: &'static str, item_name: String, action: String) -> Self {
        Self {
            tabs: tab_links(tab),
            flash: None,
            prompt,
            item_name,
            action,
            cancel: tab.path(),
        }
    }
}

/// Where a mutation sends the editor next.
///
/// A failed update reopens the row so the input can be corrected.
fn after_update(tab: Tab, id: impl std::fmt::Display, notice: &Notice) -> Redirect {
    if notice.is_error() {
        Redirect::to(&format!("{}?edit={id}", tab.path()))
    } else {
        Redirect::to(tab.path())
    }
}

// =============================================================================
// Router
// =============================================================================

/// Create the panel routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to(Tab::Images.path()) }))
        .merge(auth::router())
        .merge(images::router())
        .merge(hero::router())
        .merge(products::router())
        .merge(retailers::router())
}

/// Build the full application with middleware.
///
/// The session layer is passed in so tests can use an in-memory store.
/// Sentry layers are added by the binary.
pub fn app<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .merge(routes())
        .nest_service("/static", ServeDir::new(STATIC_DIR))
        .layer(axum::middleware::from_fn(security_headers_middleware))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(
                    |response: &axum::http::Response<_>,
                     latency: std::time::Duration,
                     span: &tracing::Span| {
                        span.record("status", response.status().as_u16());
                        span.record(
                            "latency_ms",
                            u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                        );
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .on_response(response, latency, span);
                    },
                ),
        )
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{HeaderMap, Request, StatusCode, header};
    use tower::ServiceExt;
    use tower_sessions::MemoryStore;

    use fino_integrino_content::{ContentClient, MemoryContentClient};

    use super::*;
    use crate::config::AdminConfig;
    use crate::middleware::configure_session_layer;
    use crate::password::hash_password;

    pub const PASSWORD: &str = "correct horse battery";

    /// A panel wired to an in-memory store, plus a handle on the store.
    pub fn test_app() -> (Router, Arc<MemoryContentClient>) {
        let memory = Arc::new(MemoryContentClient::new());
        let client: Arc<dyn ContentClient> = memory.clone();
        let config = AdminConfig::local(hash_password(PASSWORD).unwrap());
        let layer = configure_session_layer(MemoryStore::default(), false);
        (app(AppState::new(config, client), layer), memory)
    }

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

    /// Send a request, carrying the cookie of a previous response.
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
            .header("x-forwarded-for", "203.0.113.7");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        let body = match form {
            Some(form) => {
                builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
                Body::from(form.to_string())
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
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        TestResponse {
            status,
            headers,
            body: String::from_utf8(body.to_vec()).unwrap(),
        }
    }

    /// Log in and return the session cookie pair.
    pub async fn login(app: &Router) -> String {
        let response = send(
            app,
            "POST",
            "/login",
            None,
            Some(&format!("password={}", PASSWORD.replace(' ', "+"))),
        )
        .await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        session_cookie(&response.headers).unwrap()
    }

    /// The `name=value` part of the session cookie, if one was set.
    pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
        headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find(|value| value.starts_with(crate::middleware::SESSION_COOKIE_NAME))
            .and_then(|value| value.split(';').next())
            .map(String::from)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::{StatusCode, header};

    use super::test_support::{login, send, test_app};
    use super::*;

    #[test]
    fn test_exactly_one_tab_active() {
        for tab in Tab::ALL {
            let links = tab_links(tab);
            assert_eq!(links.iter().filter(|link| link.active).count(), 1);
        }
    }

    #[tokio::test]
    async fn test_panel_requires_login() {
        let (app, _) = test_app();

        for uri in ["/images", "/hero", "/products", "/retailers"] {
            let response = send(&app, "GET", uri, None, None).await;
            assert_eq!(response.status, StatusCode::SEE_OTHER, "{uri}");
            assert_eq!(response.location(), "/login");
        }

        let response = send(&app, "POST", "/images", None, Some("name=x")).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER);
        assert_eq!(response.location(), "/login");
    }

    #[tokio::test]
    async fn test_root_redirects_to_images() {
        let (app, _) = test_app();
        let cookie = login(&app).await;

        let response = send(&app, "GET", "/", Some(&cookie), None).await;
        assert_eq!(response.location(), "/images");
    }

    #[tokio::test]
    async fn test_security_headers_on_panel() {
        let (app, _) = test_app();
        let response = send(&app, "GET", "/login", None, None).await;

        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.headers[header::X_FRAME_OPTIONS], "DENY");
        assert_eq!(response.headers[header::CACHE_CONTROL], "no-store");
        assert!(
            response.headers[header::CONTENT_SECURITY_POLICY]
                .to_str()
                .unwrap()
                .contains("script-src 'self'")
        );
    }

    #[tokio::test]
    async fn test_flash_shown_once() {
        let (app, _) = test_app();
        let cookie = login(&app).await;

        let response = send(
            &app,
            "POST",
            "/images",
            Some(&cookie),
            Some("name=Box&url=%2Fstatic%2Fbox.jpg&alt_text=&category=product"),
        )
        .await;
        assert_eq!(response.location(), "/images");

        let page = send(&app, "GET", "/images", Some(&cookie), None).await;
        assert!(page.body.contains("Image added successfully"));
        assert!(page.body.contains("data-remaining-ms"));

        let again = send(&app, "GET", "/images", Some(&cookie), None).await;
        assert!(!again.body.contains("Image added successfully"));
    }

    #[tokio::test]
    async fn test_load_failure_shown_as_error() {
        let (app, memory) = test_app();
        let cookie = login(&app).await;
        memory.set_unavailable(true);

        let page = send(&app, "GET", "/retailers", Some(&cookie), None).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Failed to load retailers"));
        assert!(page.body.contains("flash-error"));
    }
}
