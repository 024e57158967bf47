//! Site images and their categories.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::id::ImageId;
use super::validation::{ValidationError, is_blank, is_image_url};

/// Where an image is used on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "postgres", derive(sqlx::Type))]
#[cfg_attr(
    feature = "postgres",
    sqlx(type_name = "image_category", rename_all = "lowercase")
)]
#[serde(rename_all = "lowercase")]
pub enum ImageCategory {
    Hero,
    Product,
    Retailer,
    Story,
}

impl ImageCategory {
    /// All categories in display order.
    pub const ALL: [Self; 4] = [Self::Hero, Self::Product, Self::Retailer, Self::Story];

    /// The lowercase wire/storage form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hero => "hero",
            Self::Product => "product",
            Self::Retailer => "retailer",
            Self::Story => "story",
        }
    }

    /// Human-readable label for the admin panel.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::Product => "Product",
            Self::Retailer => "Retailer",
            Self::Story => "Story",
        }
    }
}

impl std::fmt::Display for ImageCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown image category string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid image category: {0}")]
pub struct ImageCategoryError(pub String);

impl std::str::FromStr for ImageCategory {
    type Err = ImageCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "hero" => Ok(Self::Hero),
            "product" => Ok(Self::Product),
            "retailer" => Ok(Self::Retailer),
            "story" => Ok(Self::Story),
            other => Err(ImageCategoryError(other.to_owned())),
        }
    }
}

/// A stored image reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteImage {
    pub id: ImageId,
    pub name: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub category: ImageCategory,
    pub display_order: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SiteImage {
    /// Alt text, falling back to the image name.
    #[must_use]
    pub fn alt(&self) -> &str {
        self.alt_text
            .as_deref()
            .filter(|alt| !alt.trim().is_empty())
            .unwrap_or(&self.name)
    }
}

/// Fields for a new image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewImage {
    pub name: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub category: ImageCategory,
    pub display_order: i32,
}

impl NewImage {
    /// Check required fields and the URL form.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name or URL is missing or the URL
    /// is neither absolute http(s) nor a site path.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name_and_url(&self.name, &self.url)
    }
}

/// Editable fields of an existing image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageChanges {
    pub name: String,
    pub url: String,
    pub alt_text: Option<String>,
    pub category: ImageCategory,
}

impl ImageChanges {
    /// Same checks as [`NewImage::validate`].
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name or URL is missing or malformed.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name_and_url(&self.name, &self.url)
    }
}

impl From<&SiteImage> for ImageChanges {
    fn from(image: &SiteImage) -> Self {
        Self {
            name: image.name.clone(),
            url: image.url.clone(),
            alt_text: image.alt_text.clone(),
            category: image.category,
        }
    }
}

fn validate_name_and_url(name: &str, url: &str) -> Result<(), ValidationError> {
    if is_blank(name) || is_blank(url) {
        return Err(ValidationError::new("Name and URL are required"));
    }
    if !is_image_url(url) {
        return Err(ValidationError::new(
            "URL must start with http://, https:// or /",
        ));
    }
    Ok(())
}
