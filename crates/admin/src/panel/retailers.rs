//! Retailers tab.

use serde::Deserialize;

use fino_integrino_content::{ContentClient, ContentError, Visibility};
use fino_integrino_core::{NewRetailer, Retailer, RetailerChanges, RetailerId, ValidationError};

use super::{DeleteForm, Notice, checked, display_order, image_ref, outcome};

/// Add/edit retailer form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RetailerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub locations: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub logo_id: String,
    pub is_active: Option<String>,
}

impl RetailerForm {
    /// # Errors
    ///
    /// Returns the editor-facing validation message.
    pub fn to_new(&self) -> Result<NewRetailer, ValidationError> {
        let retailer = NewRetailer {
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            locations: self.locations.trim().to_string(),
            country: self.country.trim().to_string(),
            logo_id: image_ref(&self.logo_id)?,
            display_order: 0,
            is_active: checked(self.is_active.as_deref()),
        };
        retailer.validate()?;
        Ok(retailer)
    }

    /// # Errors
    ///
    /// Returns the editor-facing validation message.
    pub fn to_changes(&self) -> Result<RetailerChanges, ValidationError> {
        let changes = RetailerChanges {
            name: self.name.trim().to_string(),
            kind: self.kind.trim().to_string(),
            locations: self.locations.trim().to_string(),
            country: self.country.trim().to_string(),
            logo_id: image_ref(&self.logo_id)?,
            is_active: checked(self.is_active.as_deref()),
        };
        changes.validate()?;
        Ok(changes)
    }
}

impl From<&Retailer> for RetailerForm {
    fn from(retailer: &Retailer) -> Self {
        Self {
            name: retailer.name.clone(),
            kind: retailer.kind.clone(),
            locations: retailer.locations.clone(),
            country: retailer.country.clone(),
            logo_id: retailer.logo_id.map(|id| id.to_string()).unwrap_or_default(),
            is_active: retailer.is_active.then(|| "on".to_string()),
        }
    }
}

pub struct RetailersManager<'a> {
    client: &'a dyn ContentClient,
}

impl<'a> RetailersManager<'a> {
    #[must_use]
    pub const fn new(client: &'a dyn ContentClient) -> Self {
        Self { client }
    }

    /// # Errors
    ///
    /// Returns an error notice if the store cannot be read.
    pub async fn load(&self) -> Result<Vec<Retailer>, Notice> {
        self.client
            .list_retailers(Visibility::All)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load retailers");
                Notice::error("Failed to load retailers")
            })
    }

    /// # Errors
    ///
    /// Returns the store error.
    pub async fn find(&self, id: RetailerId) -> Result<Option<Retailer>, ContentError> {
        let retailers = self.client.list_retailers(Visibility::All).await?;
        Ok(retailers.into_iter().find(|retailer| retailer.id == id))
    }

    pub async fn create(&self, form: &RetailerForm) -> Notice {
        let retailer = match form.to_new() {
            Ok(retailer) => retailer,
            Err(e) => return e.into(),
        };
        outcome(
            self.append(retailer).await,
            "Retailer added successfully",
            "Failed to add retailer",
        )
    }

    async fn append(&self, mut retailer: NewRetailer) -> Result<Retailer, ContentError> {
        let existing = self.client.list_retailers(Visibility::All).await?;
        retailer.display_order = display_order(existing.len());
        self.client.create_retailer(retailer).await
    }

    pub async fn update(&self, id: RetailerId, form: &RetailerForm) -> Notice {
        let changes = match form.to_changes() {
            Ok(changes) => changes,
            Err(e) => return e.into(),
        };
        outcome(
            self.client.update_retailer(id, changes).await,
            "Retailer updated successfully",
            "Failed to update retailer",
        )
    }

    pub async fn delete(&self, id: RetailerId, form: &DeleteForm) -> Option<Notice> {
        if !form.is_confirmed() {
            return None;
        }
        Some(outcome(
            self.client.delete_retailer(id).await,
            "Retailer deleted successfully",
            "Failed to delete retailer",
        ))
    }
}
