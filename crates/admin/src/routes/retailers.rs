//! Retailers tab.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use tower_sessions::Session;
use tracing::instrument;

use fino_integrino_core::{ImageCategory, Retailer, RetailerId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAdminAuth, set_flash};
use crate::panel::{DeleteForm, EditState, RetailerForm, RetailersManager, Tab, image_choices};
use crate::state::AppState;

use super::{
    ConfirmDeleteTemplate, EditQuery, FlashView, ImageOption, TabLink, after_update,
    image_options, page_flash, tab_links,
};

#[derive(Debug, Clone)]
pub struct RetailerRow {
    pub id: String,
    pub form: RetailerForm,
    pub domestic: bool,
    pub is_active: bool,
    pub editing: bool,
}

impl RetailerRow {
    fn new(retailer: &Retailer, editing: EditState<RetailerId>) -> Self {
        Self {
            id: retailer.id.to_string(),
            form: RetailerForm::from(retailer),
            domestic: retailer.is_domestic(),
            is_active: retailer.is_active,
            editing: editing.is_editing(retailer.id),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "retailers.html")]
pub struct RetailersTemplate {
    pub tabs: Vec<TabLink>,
    pub flash: Option<FlashView>,
    pub rows: Vec<RetailerRow>,
    pub logos: Vec<ImageOption>,
}

/// Build the retailers router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/retailers", get(index).post(create))
        .route("/retailers/{id}", post(update))
        .route("/retailers/{id}/delete", get(confirm_delete).post(delete))
}

/// GET /retailers
#[instrument(skip_all)]
async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Query(query): Query<EditQuery>,
) -> Result<RetailersTemplate> {
    let client = state.content();
    let manager = RetailersManager::new(client);
    let (retailers, choices) = tokio::join!(
        manager.load(),
        image_choices(client, ImageCategory::Retailer)
    );
    let (retailers, load_error) = match retailers {
        Ok(retailers) => (retailers, None),
        Err(notice) => (Vec::new(), Some(notice)),
    };
    let editing = EditState::from_query(query.edit.as_deref(), retailers.iter().map(|r| r.id));

    Ok(RetailersTemplate {
        tabs: tab_links(Tab::Retailers),
        flash: page_flash(&session, load_error).await?,
        rows: retailers
            .iter()
            .map(|retailer| RetailerRow::new(retailer, editing))
            .collect(),
        logos: image_options(&choices),
    })
}

/// POST /retailers
#[instrument(skip_all)]
async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Form(form): Form<RetailerForm>,
) -> Result<Redirect> {
    let notice = RetailersManager::new(state.content()).create(&form).await;
    set_flash(&session, notice).await?;
    Ok(Redirect::to(Tab::Retailers.path()))
}

/// POST /retailers/{id}
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<RetailerId>,
    Form(form): Form<RetailerForm>,
) -> Result<Redirect> {
    let notice = RetailersManager::new(state.content()).update(id, &form).await;
    let redirect = after_update(Tab::Retailers, id, &notice);
    set_flash(&session, notice).await?;
    Ok(redirect)
}

/// GET /retailers/{id}/delete
#[instrument(skip(state))]
async fn confirm_delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<RetailerId>,
) -> Result<Response> {
    let retailer = RetailersManager::new(state.content())
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("retailer {id}")))?;

    Ok(ConfirmDeleteTemplate::new(
        Tab::Retailers,
        "Delete this retailer?",
        retailer.name,
        format!("/retailers/{id}/delete"),
    )
    .into_response())
}

/// POST /retailers/{id}/delete
#[instrument(skip(state, session, form))]
async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<RetailerId>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect> {
    if let Some(notice) = RetailersManager::new(state.content()).delete(id, &form).await {
        set_flash(&session, notice).await?;
    }
    Ok(Redirect::to(Tab::Retailers.path()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use fino_integrino_content::{ContentClient, Visibility};

    use super::super::test_support::{login, send, test_app};

    const MAXI: &str = "name=Maxi&type=Supermarket+Chain&locations=300%2B+stores&country=Serbia&logo_id=&is_active=on";

    #[tokio::test]
    async fn test_retailer_listed_with_market() {
        let (app, _) = test_app();
        let cookie = login(&app).await;
        send(&app, "POST", "/retailers", Some(&cookie), Some(MAXI)).await;

        let page = send(&app, "GET", "/retailers", Some(&cookie), None).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Retailer added successfully"));
        assert!(page.body.contains("Maxi"));
        assert!(page.body.contains("Domestic"));
    }

    #[tokio::test]
    async fn test_missing_field_rejected_without_store_write() {
        let (app, memory) = test_app();
        let cookie = login(&app).await;
        let before = memory.calls();

        send(
            &app,
            "POST",
            "/retailers",
            Some(&cookie),
            Some("name=Idea&type=Supermarket&locations=&country=Serbia"),
        )
        .await;

        assert_eq!(memory.calls(), before);
        assert!(memory.list_retailers(Visibility::All).await.unwrap().is_empty());
        let page = send(&app, "GET", "/retailers", Some(&cookie), None).await;
        assert!(page.body.contains("All fields are required"));
    }

    #[tokio::test]
    async fn test_update_twice_is_stable() {
        let (app, memory) = test_app();
        let cookie = login(&app).await;
        send(&app, "POST", "/retailers", Some(&cookie), Some(MAXI)).await;
        let id = memory.list_retailers(Visibility::All).await.unwrap()[0].id;

        let edit = MAXI.replace("Serbia", "Montenegro");
        for _ in 0..2 {
            let response = send(
                &app,
                "POST",
                &format!("/retailers/{id}"),
                Some(&cookie),
                Some(&edit),
            )
            .await;
            assert_eq!(response.location(), "/retailers");
        }

        let retailers = memory.list_retailers(Visibility::All).await.unwrap();
        assert_eq!(retailers.len(), 1);
        assert_eq!(retailers[0].country, "Montenegro");
        assert!(!retailers[0].is_domestic());
    }
}
