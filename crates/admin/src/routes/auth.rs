//! Authentication route handlers for admin.
//!
//! The panel has a single editor role guarded by one shared password, stored
//! as an Argon2 hash in `ADMIN_PASSWORD_HASH`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::filters;
use crate::middleware::{clear_current_admin, login_rate_limiter, set_current_admin};
use crate::models::{CurrentAdmin, session_keys};
use crate::panel::Tab;
use crate::password::verify_password;
use crate::state::AppState;

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<&'static str>,
}

#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub password: String,
}

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(login_page).merge(post(login).layer(login_rate_limiter())),
        )
        .route("/logout", post(logout))
}

/// Render the login page, or skip it when already logged in.
///
/// GET /login
async fn login_page(session: Session) -> Result<Response> {
    let admin: Option<CurrentAdmin> = session.get(session_keys::CURRENT_ADMIN).await?;
    if admin.is_some() {
        return Ok(Redirect::to(Tab::Images.path()).into_response());
    }
    Ok(LoginTemplate { error: None }.into_response())
}

/// Check the password and start a session.
///
/// POST /login
#[instrument(skip_all)]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    if !verify_password(&form.password, &state.config().password_hash) {
        tracing::warn!("Rejected admin login");
        return Ok((
            StatusCode::UNAUTHORIZED,
            LoginTemplate {
                error: Some("Incorrect password"),
            },
        )
            .into_response());
    }

    set_current_admin(&session, &CurrentAdmin::now()).await?;
    tracing::info!("Admin logged in");
    Ok(Redirect::to(Tab::Images.path()).into_response())
}

/// Logout and clear session.
///
/// POST /logout
async fn logout(session: Session) -> Result<Redirect> {
    clear_current_admin(&session).await?;
    Ok(Redirect::to("/login"))
}
