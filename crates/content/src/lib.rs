//! Fino Integrino Content - Typed access to the content store.
//!
//! The content store holds four collections: `images`, `products`,
//! `retailers` and `hero_content`. Everything that reads or writes them goes
//! through the [`ContentClient`] trait:
//!
//! - [`PgContentClient`] - `PostgreSQL` via sqlx, used in production
//! - [`MemoryContentClient`] - in-process store with identical semantics, used in
//!   tests and local previews
//!
//! # Contract
//!
//! Every operation returns either data or a [`ContentError`]. A failed mutation
//! leaves the store unchanged. Callers re-fetch after a successful mutation
//! rather than patching local copies.
//!
//! Lists are ordered by `display_order` ascending, then `created_at`, then id.
//! Images are additionally grouped by category first.
//!
//! # Migrations
//!
//! [`MIGRATOR`] embeds `crates/content/migrations/` and is run via:
//! ```bash
//! fino-cli migrate
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

mod error;
pub mod memory;
pub mod pg;
pub mod seed;

use async_trait::async_trait;

use fino_integrino_core::{
    HeroChanges, HeroContent, HeroContentId, ImageCategory, ImageChanges, ImageId, NewHeroContent,
    NewImage, NewProduct, NewRetailer, Product, ProductChanges, ProductId, Retailer,
    RetailerChanges, RetailerId, SiteImage,
};

pub use error::ContentError;
pub use memory::MemoryContentClient;
pub use pg::{PgContentClient, create_pool};
pub use seed::{SeedError, SeedFile, SeedSummary, apply_seed};

/// Embedded migrations for the content database.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Which rows of a collection with an `is_active` flag to return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Visibility {
    /// Every row, for the admin panel.
    #[default]
    All,
    /// Only rows shown on the public site.
    ActiveOnly,
}

impl Visibility {
    #[must_use]
    pub const fn admits(self, is_active: bool) -> bool {
        match self {
            Self::All => true,
            Self::ActiveOnly => is_active,
        }
    }
}

/// Filter for listing images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ImageFilter {
    pub category: Option<ImageCategory>,
}

impl ImageFilter {
    /// Every image, in category then display order.
    #[must_use]
    pub const fn all() -> Self {
        Self { category: None }
    }

    /// Images of one category.
    #[must_use]
    pub const fn category(category: ImageCategory) -> Self {
        Self {
            category: Some(category),
        }
    }
}

/// Typed access to the content store.
///
/// Implementations must be safe to share across request handlers.
#[async_trait]
pub trait ContentClient: Send + Sync {
    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), ContentError>;

    // ---- Images ----

    async fn list_images(&self, filter: ImageFilter) -> Result<Vec<SiteImage>, ContentError>;

    async fn find_image(&self, id: ImageId) -> Result<Option<SiteImage>, ContentError>;

    async fn create_image(&self, image: NewImage) -> Result<SiteImage, ContentError>;

    /// Returns [`ContentError::NotFound`] if the id does not exist.
    async fn update_image(
        &self,
        id: ImageId,
        changes: ImageChanges,
    ) -> Result<SiteImage, ContentError>;

    /// Deletes the image and clears every product, retailer and hero reference to it.
    ///
    /// Returns [`ContentError::NotFound`] if the id does not exist.
    async fn delete_image(&self, id: ImageId) -> Result<(), ContentError>;

    // ---- Products ----

    async fn list_products(&self, visibility: Visibility) -> Result<Vec<Product>, ContentError>;

    async fn create_product(&self, product: NewProduct) -> Result<Product, ContentError>;

    async fn update_product(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Product, ContentError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), ContentError>;

    // ---- Retailers ----

    async fn list_retailers(&self, visibility: Visibility)
    -> Result<Vec<Retailer>, ContentError>;

    async fn create_retailer(&self, retailer: NewRetailer) -> Result<Retailer, ContentError>;

    async fn update_retailer(
        &self,
        id: RetailerId,
        changes: RetailerChanges,
    ) -> Result<Retailer, ContentError>;

    async fn delete_retailer(&self, id: RetailerId) -> Result<(), ContentError>;

    // ---- Hero ----

    /// All hero rows, newest first.
    async fn list_hero(&self) -> Result<Vec<HeroContent>, ContentError>;

    /// The hero row shown on the public site, if any.
    async fn active_hero(&self) -> Result<Option<HeroContent>, ContentError>;

    /// Creating an active row deactivates the previous one.
    async fn create_hero(&self, hero: NewHeroContent) -> Result<HeroContent, ContentError>;

    async fn update_hero(
        &self,
        id: HeroContentId,
        changes: HeroChanges,
    ) -> Result<HeroContent, ContentError>;

    /// Make this row the active hero, deactivating any other.
    async fn activate_hero(&self, id: HeroContentId) -> Result<HeroContent, ContentError>;

    async fn delete_hero(&self, id: HeroContentId) -> Result<(), ContentError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_admits() {
        assert!(Visibility::All.admits(false));
        assert!(Visibility::ActiveOnly.admits(true));
        assert!(!Visibility::ActiveOnly.admits(false));
    }
}
