//! Editing rules for the admin panel, independent of HTTP.
//!
//! One manager per tab. Every manager follows the same contract:
//!
//! - Forms are validated first. A validation failure returns an error
//!   [`Notice`] and no store call is made.
//! - Store results are mapped to a success or error [`Notice`]; failures are
//!   logged and never propagate past the manager.
//! - Nothing is cached. Handlers redirect after a mutation and the next page
//!   load lists the collection again.

mod hero;
mod images;
mod products;
mod retailers;

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use fino_integrino_content::{ContentClient, ContentError, ImageFilter};
use fino_integrino_core::{ImageCategory, ImageId, SiteImage, ValidationError};

pub use hero::{HeroForm, HeroManager};
pub use images::{ImageForm, ImagesManager};
pub use products::{ProductForm, ProductsManager};
pub use retailers::{RetailerForm, RetailersManager};

// =============================================================================
// Notices
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Error,
}

/// The single message shown above the active tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    #[must_use]
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    #[must_use]
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }

    #[must_use]
    pub const fn is_error(&self) -> bool {
        matches!(self.kind, NoticeKind::Error)
    }
}

impl From<ValidationError> for Notice {
    fn from(err: ValidationError) -> Self {
        Self::error(err.message())
    }
}

/// Map a store result to a notice, logging the failure.
fn outcome<T>(result: Result<T, ContentError>, success: &str, failure: &str) -> Notice {
    match result {
        Ok(_) => Notice::success(success),
        Err(e) => {
            tracing::warn!(error = %e, "{failure}");
            Notice::error(failure)
        }
    }
}

// =============================================================================
// Tabs and edit focus
// =============================================================================

/// Admin panel tabs, each on its own page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Images,
    Hero,
    Products,
    Retailers,
}

impl Tab {
    pub const ALL: [Self; 4] = [Self::Images, Self::Hero, Self::Products, Self::Retailers];

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Images => "/images",
            Self::Hero => "/hero",
            Self::Products => "/products",
            Self::Retailers => "/retailers",
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Images => "Images",
            Self::Hero => "Hero Content",
            Self::Products => "Products",
            Self::Retailers => "Retailers",
        }
    }
}

/// Which row of a tab, if any, is open for editing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState<Id> {
    #[default]
    Listing,
    Editing(Id),
}

impl<Id: Copy + PartialEq + FromStr> EditState<Id> {
    /// Resolve `?edit=<id>` against the ids currently listed.
    ///
    /// Unknown or malformed ids fall back to `Listing`.
    pub fn from_query(edit: Option<&str>, listed: impl IntoIterator<Item = Id>) -> Self {
        let Some(id) = edit.and_then(|raw| raw.parse::<Id>().ok()) else {
            return Self::Listing;
        };
        if listed.into_iter().any(|candidate| candidate == id) {
            Self::Editing(id)
        } else {
            Self::Listing
        }
    }

    pub fn is_editing(&self, id: Id) -> bool {
        matches!(self, Self::Editing(current) if *current == id)
    }
}

// =============================================================================
// Form helpers
// =============================================================================

/// Body of a delete POST. Only `confirm=yes` deletes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteForm {
    pub confirm: Option<String>,
}

impl DeleteForm {
    #[must_use]
    pub fn is_confirmed(&self) -> bool {
        self.confirm.as_deref() == Some("yes")
    }
}

/// HTML checkboxes are absent when unchecked.
fn checked(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.trim(), "on" | "true" | "1" | "yes"))
}

/// An optional image picked from a select; empty means none.
fn image_ref(raw: &str) -> Result<Option<ImageId>, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    raw.parse()
        .map(Some)
        .map_err(|_| ValidationError::new("Selected image is invalid"))
}

fn optional_text(raw: &str) -> Option<String> {
    let raw = raw.trim();
    (!raw.is_empty()).then(|| raw.to_string())
}

fn display_order(count: usize) -> i32 {
    i32::try_from(count).unwrap_or(i32::MAX)
}

/// Images offered in a tab's picker. A failed lookup leaves the picker empty.
pub async fn image_choices(client: &dyn ContentClient, category: ImageCategory) -> Vec<SiteImage> {
    match client.list_images(ImageFilter::category(category)).await {
        Ok(images) => images,
        Err(e) => {
            tracing::warn!(error = %e, %category, "Failed to load image choices");
            Vec::new()
        }
    }
}
