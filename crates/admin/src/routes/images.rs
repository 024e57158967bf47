//! Images tab: the shared image library.

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

use fino_integrino_core::{ImageCategory, ImageId, SiteImage};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAdminAuth, set_flash};
use crate::panel::{DeleteForm, EditState, ImageForm, ImagesManager, Tab};
use crate::state::AppState;

use super::{
    ConfirmDeleteTemplate, EditQuery, FlashView, TabLink, after_update, page_flash, tab_links,
};

// =============================================================================
// Views
// =============================================================================

#[derive(Debug, Clone)]
pub struct CategoryOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone)]
pub struct ImageRow {
    pub id: String,
    pub name: String,
    pub url: String,
    pub alt_text: String,
    pub category: &'static str,
    pub editing: bool,
}

/// Images of one category, in display order.
#[derive(Debug, Clone)]
pub struct ImageGroup {
    pub label: &'static str,
    pub images: Vec<ImageRow>,
}

fn group_images(images: &[SiteImage], editing: EditState<ImageId>) -> Vec<ImageGroup> {
    ImageCategory::ALL
        .into_iter()
        .map(|category| ImageGroup {
            label: category.label(),
            images: images
                .iter()
                .filter(|image| image.category == category)
                .map(|image| ImageRow {
                    id: image.id.to_string(),
                    name: image.name.clone(),
                    url: image.url.clone(),
                    alt_text: image.alt_text.clone().unwrap_or_default(),
                    category: image.category.as_str(),
                    editing: editing.is_editing(image.id),
                })
                .collect(),
        })
        .collect()
}

#[derive(Template, WebTemplate)]
#[template(path = "images.html")]
pub struct ImagesTemplate {
    pub tabs: Vec<TabLink>,
    pub flash: Option<FlashView>,
    pub groups: Vec<ImageGroup>,
    pub categories: Vec<CategoryOption>,
}

/// Build the images router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", get(index).post(create))
        .route("/images/{id}", post(update))
        .route("/images/{id}/delete", get(confirm_delete).post(delete))
}

// =============================================================================
// Handlers
// =============================================================================

/// GET /images
#[instrument(skip_all)]
async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Query(query): Query<EditQuery>,
) -> Result<ImagesTemplate> {
    let (images, load_error) = match ImagesManager::new(state.content()).load().await {
        Ok(images) => (images, None),
        Err(notice) => (Vec::new(), Some(notice)),
    };
    let editing = EditState::from_query(query.edit.as_deref(), images.iter().map(|i| i.id));

    Ok(ImagesTemplate {
        tabs: tab_links(Tab::Images),
        flash: page_flash(&session, load_error).await?,
        groups: group_images(&images, editing),
        categories: ImageCategory::ALL
            .into_iter()
            .map(|category| CategoryOption {
                value: category.as_str(),
                label: category.label(),
            })
            .collect(),
    })
}

/// POST /images
#[instrument(skip_all)]
async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Form(form): Form<ImageForm>,
) -> Result<Redirect> {
    let notice = ImagesManager::new(state.content()).create(&form).await;
    set_flash(&session, notice).await?;
    Ok(Redirect::to(Tab::Images.path()))
}

/// POST /images/{id}
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<ImageId>,
    Form(form): Form<ImageForm>,
) -> Result<Redirect> {
    let notice = ImagesManager::new(state.content()).update(id, &form).await;
    let redirect = after_update(Tab::Images, id, &notice);
    set_flash(&session, notice).await?;
    Ok(redirect)
}

/// GET /images/{id}/delete
#[instrument(skip(state))]
async fn confirm_delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<ImageId>,
) -> Result<Response> {
    let image = ImagesManager::new(state.content())
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("image {id}")))?;

    Ok(ConfirmDeleteTemplate::new(
        Tab::Images,
        "Are you sure you want to delete this image? Products, retailers and hero \
         content using it will lose their picture.",
        image.name,
        format!("/images/{id}/delete"),
    )
    .into_response())
}

/// POST /images/{id}/delete
#[instrument(skip(state, session, form))]
async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<ImageId>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect> {
    if let Some(notice) = ImagesManager::new(state.content()).delete(id, &form).await {
        set_flash(&session, notice).await?;
    }
    Ok(Redirect::to(Tab::Images.path()))
}
