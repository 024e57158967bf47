//! Hero Content tab.

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

use fino_integrino_core::{HeroContent, HeroContentId, ImageCategory};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAdminAuth, set_flash};
use crate::panel::{DeleteForm, EditState, HeroForm, HeroManager, Tab, image_choices};
use crate::state::AppState;

use super::{
    ConfirmDeleteTemplate, EditQuery, FlashView, ImageOption, TabLink, after_update, image_options,
    page_flash, tab_links,
};

#[derive(Debug, Clone)]
pub struct HeroRow {
    pub id: String,
    pub headline: String,
    pub subheadline: String,
    pub image_id: String,
    pub cta_primary_text: String,
    pub cta_secondary_text: String,
    pub is_active: bool,
    pub editing: bool,
}

impl HeroRow {
    fn new(hero: &HeroContent, editing: EditState<HeroContentId>) -> Self {
        Self {
            id: hero.id.to_string(),
            headline: hero.headline.clone(),
            subheadline: hero.subheadline.clone(),
            image_id: hero.image_id.map(|id| id.to_string()).unwrap_or_default(),
            cta_primary_text: hero.cta_primary_text.clone(),
            cta_secondary_text: hero.cta_secondary_text.clone(),
            is_active: hero.is_active,
            editing: editing.is_editing(hero.id),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "hero.html")]
pub struct HeroTemplate {
    pub tabs: Vec<TabLink>,
    pub flash: Option<FlashView>,
    pub rows: Vec<HeroRow>,
    pub images: Vec<ImageOption>,
}

/// Build the hero router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/hero", get(index).post(create))
        .route("/hero/{id}", post(update))
        .route("/hero/{id}/activate", post(activate))
        .route("/hero/{id}/delete", get(confirm_delete).post(delete))
}

/// GET /hero
#[instrument(skip_all)]
async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Query(query): Query<EditQuery>,
) -> Result<HeroTemplate> {
    let client = state.content();
    let manager = HeroManager::new(client);
    let (heroes, choices) = tokio::join!(
        manager.load(),
        image_choices(client, ImageCategory::Hero)
    );
    let (heroes, load_error) = match heroes {
        Ok(heroes) => (heroes, None),
        Err(notice) => (Vec::new(), Some(notice)),
    };
    let editing = EditState::from_query(query.edit.as_deref(), heroes.iter().map(|h| h.id));

    Ok(HeroTemplate {
        tabs: tab_links(Tab::Hero),
        flash: page_flash(&session, load_error).await?,
        rows: heroes.iter().map(|hero| HeroRow::new(hero, editing)).collect(),
        images: image_options(&choices),
    })
}

/// POST /hero
#[instrument(skip_all)]
async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Form(form): Form<HeroForm>,
) -> Result<Redirect> {
    let notice = HeroManager::new(state.content()).create(&form).await;
    set_flash(&session, notice).await?;
    Ok(Redirect::to(Tab::Hero.path()))
}

/// POST /hero/{id}
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<HeroContentId>,
    Form(form): Form<HeroForm>,
) -> Result<Redirect> {
    let notice = HeroManager::new(state.content()).update(id, &form).await;
    let redirect = after_update(Tab::Hero, id, &notice);
    set_flash(&session, notice).await?;
    Ok(redirect)
}

/// POST /hero/{id}/activate
#[instrument(skip(state, session))]
async fn activate(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<HeroContentId>,
) -> Result<Redirect> {
    let notice = HeroManager::new(state.content()).activate(id).await;
    set_flash(&session, notice).await?;
    Ok(Redirect::to(Tab::Hero.path()))
}

/// GET /hero/{id}/delete
#[instrument(skip(state))]
async fn confirm_delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<HeroContentId>,
) -> Result<Response> {
    let hero = HeroManager::new(state.content())
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("hero content {id}")))?;

    let prompt = if hero.is_active {
        "Delete the live hero content? The site falls back to the default hero until \
         another one is activated."
    } else {
        "Delete this hero content?"
    };
    Ok(ConfirmDeleteTemplate::new(
        Tab::Hero,
        prompt,
        hero.headline,
        format!("/hero/{id}/delete"),
    )
    .into_response())
}

/// POST /hero/{id}/delete
#[instrument(skip(state, session, form))]
async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<HeroContentId>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect> {
    if let Some(notice) = HeroManager::new(state.content()).delete(id, &form).await {
        set_flash(&session, notice).await?;
    }
    Ok(Redirect::to(Tab::Hero.path()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::http::StatusCode;

    use fino_integrino_content::ContentClient;
    use fino_integrino_core::NewHeroContent;

    use super::super::test_support::{login, send, test_app};
    use super::*;

    fn new_hero(headline: &str, is_active: bool) -> NewHeroContent {
        NewHeroContent {
            headline: headline.to_string(),
            subheadline: String::new(),
            image_id: None,
            cta_primary_text: "Partner with Us".to_string(),
            cta_secondary_text: "Find Our Products".to_string(),
            is_active,
        }
    }

    #[tokio::test]
    async fn test_activate_switches_live_hero() {
        let (app, memory) = test_app();
        let spring = memory.create_hero(new_hero("Spring", true)).await.unwrap();
        let autumn = memory.create_hero(new_hero("Autumn", false)).await.unwrap();
        let cookie = login(&app).await;

        let response = send(
            &app,
            "POST",
            &format!("/hero/{}/activate", autumn.id),
            Some(&cookie),
            None,
        )
        .await;
        assert_eq!(response.location(), "/hero");

        let live = memory.active_hero().await.unwrap().unwrap();
        assert_eq!(live.id, autumn.id);
        assert_ne!(live.id, spring.id);

        let page = send(&app, "GET", "/hero", Some(&cookie), None).await;
        assert_eq!(page.status, StatusCode::OK);
        assert!(page.body.contains("Hero content is now live"));
    }

    #[tokio::test]
    async fn test_blank_ctas_get_defaults() {
        let (app, memory) = test_app();
        let cookie = login(&app).await;

        send(
            &app,
            "POST",
            "/hero",
            Some(&cookie),
            Some("headline=Baked+in+Belgrade&subheadline=&image_id=&cta_primary_text=&cta_secondary_text=&is_active=on"),
        )
        .await;

        let live = memory.active_hero().await.unwrap().unwrap();
        assert_eq!(live.headline, "Baked in Belgrade");
        assert_eq!(live.cta_primary_text, "Partner with Us");
        assert_eq!(live.cta_secondary_text, "Find Our Products");
    }
}
