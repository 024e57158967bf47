//! `PostgreSQL` content client.
//!
//! Queries are built at runtime with `sqlx::query_as` so the crate compiles
//! without a live database. Rows are read into internal row types and then
//! converted to the domain entities from `fino-integrino-core`.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use fino_integrino_core::{
    HeroChanges, HeroContent, HeroContentId, ImageCategory, ImageChanges, ImageId, NewHeroContent,
    NewImage, NewProduct, NewRetailer, Product, ProductChanges, ProductId, Retailer,
    RetailerChanges, RetailerId, SiteImage,
};

use crate::error::map_write_error;
use crate::{ContentClient, ContentError, ImageFilter, Visibility};

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

// =============================================================================
// Internal Row Types
// =============================================================================

const IMAGE_COLUMNS: &str =
    "id, name, url, alt_text, category, display_order, created_at, updated_at";

const PRODUCT_COLUMNS: &str = "id, name, description, image_id, flavors, benefits, \
     display_order, is_active, created_at, updated_at";

const RETAILER_COLUMNS: &str = "id, name, type AS kind, locations, country, logo_id, \
     display_order, is_active, created_at, updated_at";

const HERO_COLUMNS: &str = "id, headline, subheadline, image_id, cta_primary_text, \
     cta_secondary_text, is_active, created_at, updated_at";

#[derive(Debug, sqlx::FromRow)]
struct ImageRow {
    id: Uuid,
    name: String,
    url: String,
    alt_text: Option<String>,
    category: ImageCategory,
    display_order: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ImageRow> for SiteImage {
    fn from(row: ImageRow) -> Self {
        Self {
            id: ImageId::new(row.id),
            name: row.name,
            url: row.url,
            alt_text: row.alt_text,
            category: row.category,
            display_order: row.display_order,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: Uuid,
    name: String,
    description: String,
    image_id: Option<Uuid>,
    flavors: Vec<String>,
    benefits: Vec<String>,
    display_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            image_id: row.image_id.map(ImageId::new),
            flavors: row.flavors,
            benefits: row.benefits,
            display_order: row.display_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RetailerRow {
    id: Uuid,
    name: String,
    kind: String,
    locations: String,
    country: String,
    logo_id: Option<Uuid>,
    display_order: i32,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<RetailerRow> for Retailer {
    fn from(row: RetailerRow) -> Self {
        Self {
            id: RetailerId::new(row.id),
            name: row.name,
            kind: row.kind,
            locations: row.locations,
            country: row.country,
            logo_id: row.logo_id.map(ImageId::new),
            display_order: row.display_order,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HeroRow {
    id: Uuid,
    headline: String,
    subheadline: String,
    image_id: Option<Uuid>,
    cta_primary_text: String,
    cta_secondary_text: String,
    is_active: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HeroRow> for HeroContent {
    fn from(row: HeroRow) -> Self {
        Self {
            id: HeroContentId::new(row.id),
            headline: row.headline,
            subheadline: row.subheadline,
            image_id: row.image_id.map(ImageId::new),
            cta_primary_text: row.cta_primary_text,
            cta_secondary_text: row.cta_secondary_text,
            is_active: row.is_active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

fn found<T, R: Into<T>>(row: Option<R>) -> Result<T, ContentError> {
    row.map(Into::into).ok_or(ContentError::NotFound)
}

const fn affected(rows: u64) -> Result<(), ContentError> {
    if rows == 0 {
        Err(ContentError::NotFound)
    } else {
        Ok(())
    }
}

// =============================================================================
// Client
// =============================================================================

/// Content client backed by a `PostgreSQL` pool.
#[derive(Debug, Clone)]
pub struct PgContentClient {
    pool: PgPool,
}

impl PgContentClient {
    /// Create a new client over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect using a connection string.
    ///
    /// # Errors
    ///
    /// Returns `ContentError::Database` if the connection cannot be established.
    pub async fn connect(database_url: &SecretString) -> Result<Self, ContentError> {
        Ok(Self::new(create_pool(database_url).await?))
    }

    /// The underlying pool, for migrations and session storage.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl ContentClient for PgContentClient {
    async fn ping(&self) -> Result<(), ContentError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    // ---- Images ----

    async fn list_images(&self, filter: ImageFilter) -> Result<Vec<SiteImage>, ContentError> {
        let rows = sqlx::query_as::<_, ImageRow>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images \
             WHERE ($1::image_category IS NULL OR category = $1) \
             ORDER BY category, display_order, created_at, id"
        ))
        .bind(filter.category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_image(&self, id: ImageId) -> Result<Option<SiteImage>, ContentError> {
        let row = sqlx::query_as::<_, ImageRow>(&format!(
            "SELECT {IMAGE_COLUMNS} FROM images WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create_image(&self, image: NewImage) -> Result<SiteImage, ContentError> {
        let row = sqlx::query_as::<_, ImageRow>(&format!(
            "INSERT INTO images (name, url, alt_text, category, display_order) \
             VALUES ($1, $2, $3, $4, $5) \
             RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(image.name.trim())
        .bind(image.url.trim())
        .bind(image.alt_text)
        .bind(image.category)
        .bind(image.display_order)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        tracing::info!(image_id = %row.id, category = %row.category, "Image created");
        Ok(row.into())
    }

    async fn update_image(
        &self,
        id: ImageId,
        changes: ImageChanges,
    ) -> Result<SiteImage, ContentError> {
        let row = sqlx::query_as::<_, ImageRow>(&format!(
            "UPDATE images \
             SET name = $2, url = $3, alt_text = $4, category = $5, updated_at = now() \
             WHERE id = $1 \
             RETURNING {IMAGE_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name.trim())
        .bind(changes.url.trim())
        .bind(changes.alt_text)
        .bind(changes.category)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        found(row)
    }

    async fn delete_image(&self, id: ImageId) -> Result<(), ContentError> {
        // References are cleared by ON DELETE SET NULL.
        let result = sqlx::query("DELETE FROM images WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected())
    }

    // ---- Products ----

    async fn list_products(&self, visibility: Visibility) -> Result<Vec<Product>, ContentError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products \
             WHERE (NOT $1 OR is_active) \
             ORDER BY display_order, created_at, id"
        ))
        .bind(visibility == Visibility::ActiveOnly)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ContentError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "INSERT INTO products \
             (name, description, image_id, flavors, benefits, display_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(product.name.trim())
        .bind(product.description)
        .bind(product.image_id)
        .bind(product.flavors)
        .bind(product.benefits)
        .bind(product.display_order)
        .bind(product.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        tracing::info!(product_id = %row.id, "Product created");
        Ok(row.into())
    }

    async fn update_product(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Product, ContentError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "UPDATE products \
             SET name = $2, description = $3, image_id = $4, flavors = $5, benefits = $6, \
                 is_active = $7, updated_at = now() \
             WHERE id = $1 \
             RETURNING {PRODUCT_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name.trim())
        .bind(changes.description)
        .bind(changes.image_id)
        .bind(changes.flavors)
        .bind(changes.benefits)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        found(row)
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected())
    }

    // ---- Retailers ----

    async fn list_retailers(
        &self,
        visibility: Visibility,
    ) -> Result<Vec<Retailer>, ContentError> {
        let rows = sqlx::query_as::<_, RetailerRow>(&format!(
            "SELECT {RETAILER_COLUMNS} FROM retailers \
             WHERE (NOT $1 OR is_active) \
             ORDER BY display_order, created_at, id"
        ))
        .bind(visibility == Visibility::ActiveOnly)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn create_retailer(&self, retailer: NewRetailer) -> Result<Retailer, ContentError> {
        let row = sqlx::query_as::<_, RetailerRow>(&format!(
            "INSERT INTO retailers \
             (name, type, locations, country, logo_id, display_order, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6, $7) \
             RETURNING {RETAILER_COLUMNS}"
        ))
        .bind(retailer.name.trim())
        .bind(retailer.kind.trim())
        .bind(retailer.locations.trim())
        .bind(retailer.country.trim())
        .bind(retailer.logo_id)
        .bind(retailer.display_order)
        .bind(retailer.is_active)
        .fetch_one(&self.pool)
        .await
        .map_err(map_write_error)?;

        tracing::info!(retailer_id = %row.id, "Retailer created");
        Ok(row.into())
    }

    async fn update_retailer(
        &self,
        id: RetailerId,
        changes: RetailerChanges,
    ) -> Result<Retailer, ContentError> {
        let row = sqlx::query_as::<_, RetailerRow>(&format!(
            "UPDATE retailers \
             SET name = $2, type = $3, locations = $4, country = $5, logo_id = $6, \
                 is_active = $7, updated_at = now() \
             WHERE id = $1 \
             RETURNING {RETAILER_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.name.trim())
        .bind(changes.kind.trim())
        .bind(changes.locations.trim())
        .bind(changes.country.trim())
        .bind(changes.logo_id)
        .bind(changes.is_active)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        found(row)
    }

    async fn delete_retailer(&self, id: RetailerId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM retailers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected())
    }

    // ---- Hero ----

    async fn list_hero(&self) -> Result<Vec<HeroContent>, ContentError> {
        let rows = sqlx::query_as::<_, HeroRow>(&format!(
            "SELECT {HERO_COLUMNS} FROM hero_content ORDER BY created_at DESC, id"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn active_hero(&self) -> Result<Option<HeroContent>, ContentError> {
        let row = sqlx::query_as::<_, HeroRow>(&format!(
            "SELECT {HERO_COLUMNS} FROM hero_content WHERE is_active LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Into::into))
    }

    async fn create_hero(&self, hero: NewHeroContent) -> Result<HeroContent, ContentError> {
        let mut tx = self.pool.begin().await?;

        if hero.is_active {
            sqlx::query("UPDATE hero_content SET is_active = FALSE, updated_at = now() WHERE is_active")
                .execute(&mut *tx)
                .await?;
        }

        let row = sqlx::query_as::<_, HeroRow>(&format!(
            "INSERT INTO hero_content \
             (headline, subheadline, image_id, cta_primary_text, cta_secondary_text, is_active) \
             VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING {HERO_COLUMNS}"
        ))
        .bind(hero.headline.trim())
        .bind(hero.subheadline)
        .bind(hero.image_id)
        .bind(hero.cta_primary_text)
        .bind(hero.cta_secondary_text)
        .bind(hero.is_active)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        tracing::info!(hero_id = %row.id, active = row.is_active, "Hero content created");
        Ok(row.into())
    }

    async fn update_hero(
        &self,
        id: HeroContentId,
        changes: HeroChanges,
    ) -> Result<HeroContent, ContentError> {
        let row = sqlx::query_as::<_, HeroRow>(&format!(
            "UPDATE hero_content \
             SET headline = $2, subheadline = $3, image_id = $4, cta_primary_text = $5, \
                 cta_secondary_text = $6, updated_at = now() \
             WHERE id = $1 \
             RETURNING {HERO_COLUMNS}"
        ))
        .bind(id)
        .bind(changes.headline.trim())
        .bind(changes.subheadline)
        .bind(changes.image_id)
        .bind(changes.cta_primary_text)
        .bind(changes.cta_secondary_text)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_write_error)?;

        found(row)
    }

    async fn activate_hero(&self, id: HeroContentId) -> Result<HeroContent, ContentError> {
        let mut tx = self.pool.begin().await?;

        let exists: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM hero_content WHERE id = $1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(ContentError::NotFound);
        }

        sqlx::query(
            "UPDATE hero_content SET is_active = FALSE, updated_at = now() \
             WHERE is_active AND id <> $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let row = sqlx::query_as::<_, HeroRow>(&format!(
            "UPDATE hero_content SET is_active = TRUE, updated_at = now() \
             WHERE id = $1 \
             RETURNING {HERO_COLUMNS}"
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_write_error)?;

        tx.commit().await?;

        tracing::info!(hero_id = %id, "Hero content activated");
        Ok(row.into())
    }

    async fn delete_hero(&self, id: HeroContentId) -> Result<(), ContentError> {
        let result = sqlx::query("DELETE FROM hero_content WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        affected(result.rows_affected())
    }
}
