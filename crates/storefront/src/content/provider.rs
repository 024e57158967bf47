//! Content providers: where page sections come from.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use fino_integrino_content::{ContentClient, ContentError, ImageFilter, Visibility};
use fino_integrino_core::{
    HeroContent, ImageCategory, ImageId, Product, Retailer, SiteImage, partition_retailers,
};

use super::documents::{
    HeroDocument, PartnershipDocument, ProductsDocument, StoryDocument, WhereToBuyDocument,
};
use super::loader::StaticContentLoader;
use super::sections::{
    HeroSection, ImageView, InternationalEntry, PartnershipSection, ProductCard, ProductsSection,
    RetailerCard, StorySection, WhereToBuySection,
};

/// Resolves the content of each page section.
///
/// `None` means the section could not be resolved; the caller renders the
/// section's default copy.
#[async_trait]
pub trait ContentProvider: Send + Sync {
    async fn hero(&self) -> Option<HeroSection>;

    async fn products(&self) -> Option<ProductsSection>;

    async fn story(&self) -> Option<StorySection>;

    async fn partnership(&self) -> Option<PartnershipSection>;

    async fn where_to_buy(&self) -> Option<WhereToBuySection>;

    /// Whether the backing source is reachable, for readiness probes.
    async fn ready(&self) -> bool;
}

// =============================================================================
// Static documents
// =============================================================================

/// Every section from published JSON documents.
#[derive(Debug, Clone)]
pub struct StaticContentProvider {
    loader: StaticContentLoader,
}

impl StaticContentProvider {
    #[must_use]
    pub const fn new(loader: StaticContentLoader) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl ContentProvider for StaticContentProvider {
    async fn hero(&self) -> Option<HeroSection> {
        self.loader.load_section::<HeroDocument>().await
    }

    async fn products(&self) -> Option<ProductsSection> {
        self.loader.load_section::<ProductsDocument>().await
    }

    async fn story(&self) -> Option<StorySection> {
        self.loader.load_section::<StoryDocument>().await
    }

    async fn partnership(&self) -> Option<PartnershipSection> {
        self.loader.load_section::<PartnershipDocument>().await
    }

    async fn where_to_buy(&self) -> Option<WhereToBuySection> {
        self.loader.load_section::<WhereToBuyDocument>().await
    }

    async fn ready(&self) -> bool {
        true
    }
}

// =============================================================================
// Content store
// =============================================================================

/// Hero, products and retailers from the content store.
///
/// The store has no model for the story and partnership sections, so those
/// still come from the published documents.
pub struct StoreContentProvider {
    client: Arc<dyn ContentClient>,
    documents: StaticContentLoader,
}

impl StoreContentProvider {
    pub fn new(client: Arc<dyn ContentClient>, documents: StaticContentLoader) -> Self {
        Self { client, documents }
    }

    /// Images of one category keyed by id, for resolving references.
    async fn images(
        &self,
        category: ImageCategory,
    ) -> Result<HashMap<ImageId, SiteImage>, ContentError> {
        let images = self.client.list_images(ImageFilter::category(category)).await?;
        Ok(images.into_iter().map(|image| (image.id, image)).collect())
    }
}

fn log_failure(section: &str, error: &ContentError) {
    tracing::error!(section, error = %error, "Failed to resolve section from content store");
}

/// Resolve an optional image reference, falling back to the placeholder.
fn resolve_image(
    id: Option<ImageId>,
    images: &HashMap<ImageId, SiteImage>,
    alt: &str,
) -> ImageView {
    id.and_then(|id| images.get(&id))
        .map_or_else(|| ImageView::placeholder(alt), ImageView::from)
}

fn hero_section(hero: &HeroContent, image: Option<&SiteImage>) -> HeroSection {
    let defaults = HeroSection::default();
    HeroSection {
        heading: hero.headline.clone(),
        subheading: hero.subheadline.clone(),
        image: image.map_or_else(|| ImageView::placeholder(&hero.headline), ImageView::from),
        cta_primary: hero.cta_primary_text.clone(),
        cta_secondary: hero.cta_secondary_text.clone(),
        ..defaults
    }
}

fn product_card(product: Product, images: &HashMap<ImageId, SiteImage>) -> ProductCard {
    ProductCard {
        image: resolve_image(product.image_id, images, &product.name),
        name: product.name,
        description: product.description,
        flavors: product.flavors,
        benefits: product.benefits,
    }
}

fn retailer_card(retailer: Retailer, logos: &HashMap<ImageId, SiteImage>) -> RetailerCard {
    RetailerCard {
        logo: resolve_image(retailer.logo_id, logos, &retailer.name),
        name: retailer.name,
        kind: Some(retailer.kind),
        locations: Some(retailer.locations),
        url: None,
    }
}

#[async_trait]
impl ContentProvider for StoreContentProvider {
    async fn hero(&self) -> Option<HeroSection> {
        let hero = match self.client.active_hero().await {
            Ok(Some(hero)) => hero,
            Ok(None) => {
                tracing::warn!("No active hero content in store");
                return None;
            }
            Err(e) => {
                log_failure("hero", &e);
                return None;
            }
        };

        let image = match hero.image_id {
            Some(id) => self.client.find_image(id).await.unwrap_or_else(|e| {
                log_failure("hero", &e);
                None
            }),
            None => None,
        };

        Some(hero_section(&hero, image.as_ref()))
    }

    async fn products(&self) -> Option<ProductsSection> {
        let (products, images) = tokio::join!(
            self.client.list_products(Visibility::ActiveOnly),
            self.images(ImageCategory::Product),
        );
        let products = products.map_err(|e| log_failure("products", &e)).ok()?;
        let images = images
            .map_err(|e| log_failure("products", &e))
            .unwrap_or_default();

        // Heading copy is not in the store
        let mut section = self
            .documents
            .load_section::<ProductsDocument>()
            .await
            .unwrap_or_default();
        section.items = products
            .into_iter()
            .map(|product| product_card(product, &images))
            .collect();
        Some(section)
    }

    async fn story(&self) -> Option<StorySection> {
        self.documents.load_section::<StoryDocument>().await
    }

    async fn partnership(&self) -> Option<PartnershipSection> {
        self.documents.load_section::<PartnershipDocument>().await
    }

    async fn where_to_buy(&self) -> Option<WhereToBuySection> {
        let (retailers, logos) = tokio::join!(
            self.client.list_retailers(Visibility::ActiveOnly),
            self.images(ImageCategory::Retailer),
        );
        let retailers = retailers
            .map_err(|e| log_failure("where-to-buy", &e))
            .ok()?;
        let logos = logos
            .map_err(|e| log_failure("where-to-buy", &e))
            .unwrap_or_default();

        let partition = partition_retailers(retailers);
        let defaults = WhereToBuySection::default();
        let domestic = partition
            .domestic
            .into_iter()
            .map(|r| retailer_card(r, &logos))
            .collect();
        let international = if partition.international.is_empty() {
            defaults.international
        } else {
            partition
                .international
                .into_iter()
                .map(|r| InternationalEntry {
                    country: r.country,
                    name: Some(r.name),
                    detail: r.locations,
                })
                .collect()
        };

        Some(WhereToBuySection {
            domestic,
            international,
            ..defaults
        })
    }

    async fn ready(&self) -> bool {
        match self.client.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Content store not ready");
                false
            }
        }
    }
}
