//! Products tab.

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

use fino_integrino_core::{ImageCategory, Product, ProductId};

use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::{RequireAdminAuth, set_flash};
use crate::panel::{DeleteForm, EditState, ProductForm, ProductsManager, Tab, image_choices};
use crate::state::AppState;

use super::{
    ConfirmDeleteTemplate, EditQuery, FlashView, ImageOption, TabLink, after_update,
    image_options, page_flash, tab_links,
};

#[derive(Debug, Clone)]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub image_id: String,
    pub flavors: Vec<String>,
    pub benefits: Vec<String>,
    /// Comma-joined, as the edit form expects.
    pub flavors_input: String,
    pub benefits_input: String,
    pub is_active: bool,
    pub editing: bool,
}

impl ProductRow {
    fn new(product: &Product, editing: EditState<ProductId>) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            image_id: product.image_id.map(|id| id.to_string()).unwrap_or_default(),
            flavors: product.flavors.clone(),
            benefits: product.benefits.clone(),
            flavors_input: product.flavors.join(", "),
            benefits_input: product.benefits.join(", "),
            is_active: product.is_active,
            editing: editing.is_editing(product.id),
        }
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "products.html")]
pub struct ProductsTemplate {
    pub tabs: Vec<TabLink>,
    pub flash: Option<FlashView>,
    pub rows: Vec<ProductRow>,
    pub images: Vec<ImageOption>,
}

/// Build the products router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/products", get(index).post(create))
        .route("/products/{id}", post(update))
        .route("/products/{id}/delete", get(confirm_delete).post(delete))
}

/// GET /products
#[instrument(skip_all)]
async fn index(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Query(query): Query<EditQuery>,
) -> Result<ProductsTemplate> {
    let client = state.content();
    let manager = ProductsManager::new(client);
    let (products, choices) = tokio::join!(
        manager.load(),
        image_choices(client, ImageCategory::Product)
    );
    let (products, load_error) = match products {
        Ok(products) => (products, None),
        Err(notice) => (Vec::new(), Some(notice)),
    };
    let editing = EditState::from_query(query.edit.as_deref(), products.iter().map(|p| p.id));

    Ok(ProductsTemplate {
        tabs: tab_links(Tab::Products),
        flash: page_flash(&session, load_error).await?,
        rows: products
            .iter()
            .map(|product| ProductRow::new(product, editing))
            .collect(),
        images: image_options(&choices),
    })
}

/// POST /products
#[instrument(skip_all)]
async fn create(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let notice = ProductsManager::new(state.content()).create(&form).await;
    set_flash(&session, notice).await?;
    Ok(Redirect::to(Tab::Products.path()))
}

/// POST /products/{id}
#[instrument(skip(state, session, form))]
async fn update(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let notice = ProductsManager::new(state.content()).update(id, &form).await;
    let redirect = after_update(Tab::Products, id, &notice);
    set_flash(&session, notice).await?;
    Ok(redirect)
}

/// GET /products/{id}/delete
#[instrument(skip(state))]
async fn confirm_delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    Path(id): Path<ProductId>,
) -> Result<Response> {
    let product = ProductsManager::new(state.content())
        .find(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))?;

    Ok(ConfirmDeleteTemplate::new(
        Tab::Products,
        "Are you sure you want to delete this product?",
        product.name,
        format!("/products/{id}/delete"),
    )
    .into_response())
}

/// POST /products/{id}/delete
#[instrument(skip(state, session, form))]
async fn delete(
    State(state): State<AppState>,
    RequireAdminAuth(_admin): RequireAdminAuth,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<DeleteForm>,
) -> Result<Redirect> {
    if let Some(notice) = ProductsManager::new(state.content()).delete(id, &form).await {
        set_flash(&session, notice).await?;
    }
    Ok(Redirect::to(Tab::Products.path()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fino_integrino_content::{ContentClient, Visibility};

    use super::super::test_support::{login, send, test_app};

    #[tokio::test]
    async fn test_create_product_from_form() {
        let (app, memory) = test_app();
        let cookie = login(&app).await;

        let response = send(
            &app,
            "POST",
            "/products",
            Some(&cookie),
            Some("name=Grissini&description=Whole+grain+breadsticks&image_id=&flavors=Sesame%2C+Rosemary%2C&benefits=High+fiber&is_active=on"),
        )
        .await;
        assert_eq!(response.location(), "/products");

        let products = memory.list_products(Visibility::All).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].flavors, vec!["Sesame", "Rosemary"]);
        assert!(products[0].is_active);

        let page = send(&app, "GET", "/products", Some(&cookie), None).await;
        assert!(page.body.contains("Product added successfully"));
        assert!(page.body.contains("Grissini"));
        assert!(page.body.contains("Rosemary"));
    }

    #[tokio::test]
    async fn test_unchecked_box_deactivates() {
        let (app, memory) = test_app();
        let cookie = login(&app).await;
        send(
            &app,
            "POST",
            "/products",
            Some(&cookie),
            Some("name=Crackers&description=Spelt&is_active=on"),
        )
        .await;
        let id = memory.list_products(Visibility::All).await.unwrap()[0].id;

        send(
            &app,
            "POST",
            &format!("/products/{id}"),
            Some(&cookie),
            Some("name=Crackers&description=Spelt"),
        )
        .await;

        assert!(memory.list_products(Visibility::ActiveOnly).await.unwrap().is_empty());
    }
}
