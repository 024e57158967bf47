//! The page shell: navigation, sections and the admin entry point.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tracing::instrument;
use url::Url;

use fino_integrino_core::SectionId;

use crate::content::{Page, resolve_page};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::state::AppState;

/// Query parameters read by the shell.
#[derive(Debug, Default, Deserialize)]
pub struct ShellQuery {
    /// Highlighted navigation item.
    pub section: Option<String>,
    /// `true` asks for the admin panel instead of the site.
    pub admin: Option<String>,
}

/// What one request to `/` renders. Decided once from the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shell {
    Site { active: SectionId },
    Admin(Url),
}

impl Shell {
    /// Decide between the public site and the admin panel.
    ///
    /// The admin flag is ignored when no admin panel is configured.
    #[must_use]
    pub fn from_query(query: &ShellQuery, admin_panel_url: Option<&Url>) -> Self {
        if query.admin.as_deref() == Some("true") {
            if let Some(url) = admin_panel_url {
                return Self::Admin(url.clone());
            }
            tracing::warn!("Admin panel requested but ADMIN_PANEL_URL is not set");
        }

        Self::Site {
            active: SectionId::parse_or_home(query.section.as_deref()),
        }
    }
}

/// A navigation link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub id: &'static str,
    pub label: &'static str,
    pub active: bool,
}

/// Navigation in page order, with exactly one item active.
#[must_use]
pub fn nav_items(active: SectionId) -> Vec<NavItem> {
    SectionId::ALL
        .into_iter()
        .map(|section| NavItem {
            id: section.as_str(),
            label: section.label(),
            active: section == active,
        })
        .collect()
}

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub page: Page,
    pub nav: Vec<NavItem>,
}

/// Display the site, or send the visitor to the admin panel.
#[instrument(skip(state))]
pub async fn home(State(state): State<AppState>, Query(query): Query<ShellQuery>) -> Response {
    match Shell::from_query(&query, state.config().admin_panel_url.as_ref()) {
        Shell::Admin(url) => {
            add_breadcrumb("navigation", "Redirected to admin panel", None);
            Redirect::to(url.as_str()).into_response()
        }
        Shell::Site { active } => {
            let page = resolve_page(state.provider()).await;
            HomeTemplate {
                page,
                nav: nav_items(active),
            }
            .into_response()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn query(section: Option<&str>, admin: Option<&str>) -> ShellQuery {
        ShellQuery {
            section: section.map(String::from),
            admin: admin.map(String::from),
        }
    }

    #[test]
    fn test_active_section_from_query() {
        assert_eq!(
            Shell::from_query(&query(Some("story"), None), None),
            Shell::Site {
                active: SectionId::Story
            }
        );
        assert_eq!(
            Shell::from_query(&query(Some("pricing"), None), None),
            Shell::Site {
                active: SectionId::Home
            }
        );
        assert_eq!(
            Shell::from_query(&query(None, None), None),
            Shell::Site {
                active: SectionId::Home
            }
        );
    }

    #[test]
    fn test_admin_flag_needs_configured_panel() {
        let admin = Url::parse("https://admin.finointegrino.rs/").unwrap();

        assert_eq!(
            Shell::from_query(&query(None, Some("true")), Some(&admin)),
            Shell::Admin(admin.clone())
        );
        assert_eq!(
            Shell::from_query(&query(None, Some("true")), None),
            Shell::Site {
                active: SectionId::Home
            }
        );
        assert_eq!(
            Shell::from_query(&query(None, Some("1")), Some(&admin)),
            Shell::Site {
                active: SectionId::Home
            }
        );
    }

    #[test]
    fn test_exactly_one_nav_item_active() {
        for section in SectionId::ALL {
            let nav = nav_items(section);
            assert_eq!(nav.len(), 5);
            let active: Vec<_> = nav.iter().filter(|item| item.active).collect();
            assert_eq!(active.len(), 1);
            assert_eq!(active[0].id, section.as_str());
        }
    }
}
