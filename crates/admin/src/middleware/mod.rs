//! HTTP middleware stack for admin.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. `TraceLayer` (request tracing with status and latency)
//! 3. Session layer (tower-sessions with `PostgreSQL` store)
//! 4. Security headers (strict CSP, no caching)
//! 5. Login rate limit (on `/login` only)
//! 6. [`RequireAdminAuth`] extractor on every panel handler

pub mod auth;
pub mod flash;
pub mod rate_limit;
pub mod security_headers;
pub mod session;

pub use auth::{RequireAdminAuth, clear_current_admin, set_current_admin};
pub use flash::{set_flash, take_flash};
pub use rate_limit::login_rate_limiter;
pub use security_headers::security_headers_middleware;
pub use session::{SESSION_COOKIE_NAME, configure_session_layer, create_session_layer};
