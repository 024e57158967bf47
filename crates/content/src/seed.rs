//! Seed the content store from a YAML file.
//!
//! Products, retailers and the hero refer to images by name; names are resolved
//! to ids as images are inserted. Positions in each list become `display_order`.
//!
//! ```yaml
//! images:
//!   - name: hero-main
//!     url: https://images.pexels.com/photos/1.jpeg
//!     category: hero
//! hero:
//!   headline: Premium Healthy Food Solutions for Your Business
//!   image: hero-main
//! products:
//!   - name: Integral Breadsticks
//!     flavors: [Sesame, Poppy Seeds]
//! retailers:
//!   - name: Idea
//!     type: Supermarket Chain
//!     locations: 200+ stores
//! ```

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;
use tracing::{info, instrument};

use fino_integrino_core::{
    DOMESTIC_COUNTRY, ImageCategory, ImageId, NewHeroContent, NewImage, NewProduct, NewRetailer,
    ValidationError,
};

use crate::{ContentClient, ContentError};

/// Errors raised while loading or applying a seed file.
#[derive(Debug, Error)]
pub enum SeedError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse seed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid seed file: {}", .0.join("; "))]
    Invalid(Vec<String>),

    #[error("{entity} '{name}': {source}")]
    Validation {
        entity: &'static str,
        name: String,
        source: ValidationError,
    },

    #[error(transparent)]
    Content(#[from] ContentError),
}

fn default_true() -> bool {
    true
}

fn default_country() -> String {
    DOMESTIC_COUNTRY.to_owned()
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedImage {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub alt_text: Option<String>,
    pub category: ImageCategory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedHero {
    pub headline: String,
    #[serde(default)]
    pub subheadline: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cta_primary_text: String,
    #[serde(default)]
    pub cta_secondary_text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedProduct {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub flavors: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SeedRetailer {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub locations: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

/// Parsed seed file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedFile {
    #[serde(default)]
    pub images: Vec<SeedImage>,
    #[serde(default)]
    pub hero: Option<SeedHero>,
    #[serde(default)]
    pub products: Vec<SeedProduct>,
    #[serde(default)]
    pub retailers: Vec<SeedRetailer>,
}

impl SeedFile {
    /// Parse a seed file from YAML text.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Yaml` if the text is not a valid seed document.
    pub fn from_yaml(text: &str) -> Result<Self, SeedError> {
        Ok(serde_yaml::from_str(text)?)
    }

    /// Read and parse a seed file.
    ///
    /// # Errors
    ///
    /// Returns `SeedError::Io` if the file cannot be read and `SeedError::Yaml`
    /// if it cannot be parsed.
    pub async fn from_path(path: impl AsRef<Path>) -> Result<Self, SeedError> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| SeedError::Io {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_yaml(&text)
    }

    /// Check image references and duplicate image names without touching the store.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        let mut names = HashSet::new();

        for image in &self.images {
            if !names.insert(image.name.as_str()) {
                errors.push(format!("Duplicate image name: {}", image.name));
            }
        }

        let mut check = |owner: &str, image: Option<&String>| {
            if let Some(image) = image
                && !names.contains(image.as_str())
            {
                errors.push(format!("{owner} refers to unknown image '{image}'"));
            }
        };

        if let Some(hero) = &self.hero {
            check("Hero", hero.image.as_ref());
        }
        for product in &self.products {
            check(&format!("Product '{}'", product.name), product.image.as_ref());
        }
        for retailer in &self.retailers {
            check(&format!("Retailer '{}'", retailer.name), retailer.logo.as_ref());
        }

        errors
    }
}

/// Counts of inserted rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub images: usize,
    pub products: usize,
    pub retailers: usize,
    pub hero: bool,
}

fn position(index: usize) -> i32 {
    i32::try_from(index).unwrap_or(i32::MAX)
}

fn validated<T>(
    entity: &'static str,
    name: &str,
    value: T,
    check: impl FnOnce(&T) -> Result<(), ValidationError>,
) -> Result<T, SeedError> {
    check(&value).map_err(|source| SeedError::Validation {
        entity,
        name: name.to_owned(),
        source,
    })?;
    Ok(value)
}

/// Insert everything in `seed` through `client`.
///
/// The whole file is validated before the first write.
///
/// # Errors
///
/// Returns `SeedError::Invalid` or `SeedError::Validation` before any write if
/// the file is inconsistent, and `SeedError::Content` if the store rejects a write.
#[instrument(skip_all, fields(images = seed.images.len(), products = seed.products.len(), retailers = seed.retailers.len()))]
pub async fn apply_seed(
    client: &dyn ContentClient,
    seed: &SeedFile,
) -> Result<SeedSummary, SeedError> {
    let errors = seed.validate();
    if !errors.is_empty() {
        return Err(SeedError::Invalid(errors));
    }

    // Per-category positions, matching how the admin panel appends images.
    let mut category_counts: HashMap<ImageCategory, usize> = HashMap::new();
    let mut images = Vec::with_capacity(seed.images.len());
    for image in &seed.images {
        let slot = category_counts.entry(image.category).or_default();
        let new = NewImage {
            name: image.name.clone(),
            url: image.url.clone(),
            alt_text: image.alt_text.clone(),
            category: image.category,
            display_order: position(*slot),
        };
        *slot += 1;
        images.push(validated("Image", &image.name, new, NewImage::validate)?);
    }

    let hero = match &seed.hero {
        Some(hero) => {
            let new = NewHeroContent {
                headline: hero.headline.clone(),
                subheadline: hero.subheadline.clone(),
                image_id: None,
                cta_primary_text: hero.cta_primary_text.clone(),
                cta_secondary_text: hero.cta_secondary_text.clone(),
                is_active: true,
            };
            let new = validated("Hero", &hero.headline, new, NewHeroContent::validate)?;
            Some((new, hero.image.as_ref()))
        }
        None => None,
    };

    let mut products = Vec::with_capacity(seed.products.len());
    for (index, product) in seed.products.iter().enumerate() {
        let new = NewProduct {
            name: product.name.clone(),
            description: product.description.clone(),
            image_id: None,
            flavors: product.flavors.clone(),
            benefits: product.benefits.clone(),
            display_order: position(index),
            is_active: product.is_active,
        };
        let new = validated("Product", &product.name, new, NewProduct::validate)?;
        products.push((new, product.image.as_ref()));
    }

    let mut retailers = Vec::with_capacity(seed.retailers.len());
    for (index, retailer) in seed.retailers.iter().enumerate() {
        let new = NewRetailer {
            name: retailer.name.clone(),
            kind: retailer.kind.clone(),
            locations: retailer.locations.clone(),
            country: retailer.country.clone(),
            logo_id: None,
            display_order: position(index),
            is_active: retailer.is_active,
        };
        let new = validated("Retailer", &retailer.name, new, NewRetailer::validate)?;
        retailers.push((new, retailer.logo.as_ref()));
    }

    let mut ids: HashMap<String, ImageId> = HashMap::new();
    let mut summary = SeedSummary::default();

    for new in images {
        let name = new.name.clone();
        let created = client.create_image(new).await?;
        ids.insert(name, created.id);
        summary.images += 1;
    }

    let resolve = |name: Option<&String>| name.and_then(|name| ids.get(name).copied());

    if let Some((mut new, image)) = hero {
        new.image_id = resolve(image);
        client.create_hero(new).await?;
        summary.hero = true;
    }

    for (mut new, image) in products {
        new.image_id = resolve(image);
        client.create_product(new).await?;
        summary.products += 1;
    }

    for (mut new, logo) in retailers {
        new.logo_id = resolve(logo);
        client.create_retailer(new).await?;
        summary.retailers += 1;
    }

    info!(?summary, "Seed applied");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ImageFilter, MemoryContentClient, Visibility};

    const SEED: &str = r"
images:
  - name: hero-main
    url: https://images.pexels.com/photos/1.jpeg
    category: hero
  - name: breadsticks
    url: /images/breadsticks.jpg
    alt_text: Integral breadsticks
    category: product
  - name: bars
    url: /images/bars.jpg
    category: product
hero:
  headline: Premium Healthy Food Solutions for Your Business
  image: hero-main
  cta_primary_text: Request Catalog
products:
  - name: Integral Breadsticks
    image: breadsticks
    flavors: [Sesame, Poppy Seeds]
  - name: Oat Bars - Classic
    image: bars
    is_active: false
retailers:
  - name: Idea
    type: Supermarket Chain
    locations: 200+ stores
  - name: Konzum
    type: Supermarket Chain
    locations: 50+ stores
    country: Croatia
";

    #[tokio::test]
    async fn test_apply_seed_inserts_everything() {
        let client = MemoryContentClient::new();
        let seed = SeedFile::from_yaml(SEED).unwrap();

        let summary = apply_seed(&client, &seed).await.unwrap();
        assert_eq!(
            summary,
            SeedSummary {
                images: 3,
                products: 2,
                retailers: 2,
                hero: true
            }
        );

        let products = client.list_products(Visibility::All).await.unwrap();
        assert_eq!(products.len(), 2);
        assert!(products[0].image_id.is_some());
        assert_eq!(products[1].display_order, 1);
        assert!(!products[1].is_active);

        let retailers = client.list_retailers(Visibility::All).await.unwrap();
        assert_eq!(retailers[0].country, "Serbia");
        assert_eq!(retailers[1].country, "Croatia");

        let product_images = client
            .list_images(ImageFilter::category(ImageCategory::Product))
            .await
            .unwrap();
        let orders: Vec<_> = product_images.iter().map(|i| i.display_order).collect();
        assert_eq!(orders, vec![0, 1]);

        let hero = client.active_hero().await.unwrap().unwrap();
        assert_eq!(hero.cta_primary_text, "Request Catalog");
        assert!(hero.image_id.is_some());
    }

    #[tokio::test]
    async fn test_unknown_image_reference_writes_nothing() {
        let client = MemoryContentClient::new();
        let seed = SeedFile::from_yaml(
            r"
products:
  - name: Ghost
    image: missing
",
        )
        .unwrap();

        let err = apply_seed(&client, &seed).await.unwrap_err();
        assert!(matches!(err, SeedError::Invalid(ref errors) if errors.len() == 1));
        assert_eq!(client.calls().mutations, 0);
    }

    #[tokio::test]
    async fn test_invalid_image_writes_nothing() {
        let client = MemoryContentClient::new();
        let seed = SeedFile::from_yaml(
            r"
images:
  - name: x
    url: ''
    category: hero
",
        )
        .unwrap();

        let err = apply_seed(&client, &seed).await.unwrap_err();
        assert!(matches!(err, SeedError::Validation { entity: "Image", .. }));
        assert_eq!(client.calls().mutations, 0);
    }

    #[test]
    fn test_duplicate_image_names_reported() {
        let seed = SeedFile::from_yaml(
            r"
images:
  - { name: a, url: /a.jpg, category: hero }
  - { name: a, url: /b.jpg, category: story }
",
        )
        .unwrap();
        assert_eq!(seed.validate(), vec!["Duplicate image name: a".to_owned()]);
    }
}
