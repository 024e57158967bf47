//! Images tab.

use serde::Deserialize;

use fino_integrino_content::{ContentClient, ContentError, ImageFilter};
use fino_integrino_core::{
    ImageCategory, ImageChanges, ImageId, NewImage, SiteImage, ValidationError,
};

use super::{DeleteForm, Notice, display_order, optional_text, outcome};

/// Add/edit image form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub alt_text: String,
    /// Blank means `hero`, the first option in the picker.
    #[serde(default)]
    pub category: String,
}

impl ImageForm {
    fn category(&self) -> Result<ImageCategory, ValidationError> {
        if self.category.trim().is_empty() {
            return Ok(ImageCategory::Hero);
        }
        self.category
            .parse()
            .map_err(|_| ValidationError::new("Unknown image category"))
    }

    /// Validated insert, with `display_order` still to be assigned.
    ///
    /// # Errors
    ///
    /// Returns the editor-facing validation message.
    pub fn to_new(&self) -> Result<NewImage, ValidationError> {
        let image = NewImage {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            alt_text: optional_text(&self.alt_text),
            category: self.category()?,
            display_order: 0,
        };
        image.validate()?;
        Ok(image)
    }

    /// Validated update.
    ///
    /// # Errors
    ///
    /// Returns the editor-facing validation message.
    pub fn to_changes(&self) -> Result<ImageChanges, ValidationError> {
        let changes = ImageChanges {
            name: self.name.trim().to_string(),
            url: self.url.trim().to_string(),
            alt_text: optional_text(&self.alt_text),
            category: self.category()?,
        };
        changes.validate()?;
        Ok(changes)
    }
}

/// Image library editor.
pub struct ImagesManager<'a> {
    client: &'a dyn ContentClient,
}

impl<'a> ImagesManager<'a> {
    #[must_use]
    pub const fn new(client: &'a dyn ContentClient) -> Self {
        Self { client }
    }

    /// Every image, grouped by category.
    ///
    /// # Errors
    ///
    /// Returns an error notice if the store cannot be read.
    pub async fn load(&self) -> Result<Vec<SiteImage>, Notice> {
        self.client
            .list_images(ImageFilter::all())
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load images");
                Notice::error("Failed to load images")
            })
    }

    /// One image, for the delete confirmation page.
    ///
    /// # Errors
    ///
    /// Returns the store error.
    pub async fn find(&self, id: ImageId) -> Result<Option<SiteImage>, ContentError> {
        self.client.find_image(id).await
    }

    /// Add an image at the end of its category.
    pub async fn create(&self, form: &ImageForm) -> Notice {
        let image = match form.to_new() {
            Ok(image) => image,
            Err(e) => return e.into(),
        };
        outcome(
            self.append(image).await,
            "Image added successfully",
            "Failed to add image",
        )
    }

    async fn append(&self, mut image: NewImage) -> Result<SiteImage, ContentError> {
        let siblings = self
            .client
            .list_images(ImageFilter::category(image.category))
            .await?;
        image.display_order = display_order(siblings.len());
        self.client.create_image(image).await
    }

    pub async fn update(&self, id: ImageId, form: &ImageForm) -> Notice {
        let changes = match form.to_changes() {
            Ok(changes) => changes,
            Err(e) => return e.into(),
        };
        outcome(
            self.client.update_image(id, changes).await,
            "Image updated successfully",
            "Failed to update image",
        )
    }

    /// Delete after confirmation. Returns `None` when the form was not
    /// confirmed, in which case the store is not touched.
    ///
    /// Products, retailers and hero rows using the image lose their reference.
    pub async fn delete(&self, id: ImageId, form: &DeleteForm) -> Option<Notice> {
        if !form.is_confirmed() {
            return None;
        }
        Some(outcome(
            self.client.delete_image(id).await,
            "Image deleted successfully",
            "Failed to delete image",
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fino_integrino_content::MemoryContentClient;

    use super::*;
    use crate::panel::NoticeKind;

    fn form(name: &str, url: &str, alt: &str, category: &str) -> ImageForm {
        ImageForm {
            name: name.to_string(),
            url: url.to_string(),
            alt_text: alt.to_string(),
            category: category.to_string(),
        }
    }

    fn confirmed() -> DeleteForm {
        DeleteForm {
            confirm: Some("yes".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_appends_to_category() {
        let client = MemoryContentClient::new();
        let manager = ImagesManager::new(&client);

        for name in ["hero-a", "hero-b"] {
            let notice = manager
                .create(&form(name, "https://cdn.example.com/a.jpg", "", "hero"))
                .await;
            assert_eq!(notice.kind, NoticeKind::Success);
        }
        manager
            .create(&form("box", "/static/box.jpg", "", "product"))
            .await;

        let notice = manager
            .create(&form("X", "https://cdn.example.com/y.jpg", "Z", "hero"))
            .await;
        assert_eq!(notice, Notice::success("Image added successfully"));

        let heroes = client
            .list_images(ImageFilter::category(ImageCategory::Hero))
            .await
            .unwrap();
        let matching: Vec<_> = heroes.iter().filter(|image| image.name == "X").collect();
        assert_eq!(matching.len(), 1);
        assert_eq!(matching[0].url, "https://cdn.example.com/y.jpg");
        assert_eq!(matching[0].alt_text.as_deref(), Some("Z"));
        assert_eq!(matching[0].display_order, 2);
    }

    #[tokio::test]
    async fn test_missing_url_makes_no_store_call() {
        let client = MemoryContentClient::new();
        let manager = ImagesManager::new(&client);

        let notice = manager.create(&form("hero-main", "  ", "", "hero")).await;

        assert_eq!(notice, Notice::error("Name and URL are required"));
        assert_eq!(client.calls().total(), 0);
    }

    #[tokio::test]
    async fn test_unknown_category_rejected() {
        let client = MemoryContentClient::new();
        let manager = ImagesManager::new(&client);

        let notice = manager
            .create(&form("banner", "/static/banner.jpg", "", "banner"))
            .await;
        assert!(notice.is_error());
        assert_eq!(client.calls().total(), 0);
    }

    #[tokio::test]
    async fn test_rejected_insert_reports_failure() {
        let client = MemoryContentClient::new();
        let manager = ImagesManager::new(&client);
        client.reject_next_mutation();

        let notice = manager
            .create(&form("hero-main", "/static/hero.jpg", "", "hero"))
            .await;
        assert_eq!(notice, Notice::error("Failed to add image"));
        assert!(manager.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_unknown_id_leaves_list() {
        let client = MemoryContentClient::new();
        let manager = ImagesManager::new(&client);
        manager
            .create(&form("hero-main", "/static/hero.jpg", "", "hero"))
            .await;
        let before = manager.load().await.unwrap();

        let notice = manager.delete(ImageId::generate(), &confirmed()).await;

        assert_eq!(notice, Some(Notice::error("Failed to delete image")));
        assert_eq!(manager.load().await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_unconfirmed_delete_is_ignored() {
        let client = MemoryContentClient::new();
        let manager = ImagesManager::new(&client);
        manager
            .create(&form("hero-main", "/static/hero.jpg", "", "hero"))
            .await;
        let id = manager.load().await.unwrap()[0].id;
        client.reset_calls();

        assert_eq!(manager.delete(id, &DeleteForm::default()).await, None);
        assert_eq!(client.calls().total(), 0);
        assert_eq!(manager.load().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_changes_fields() {
        let client = MemoryContentClient::new();
        let manager = ImagesManager::new(&client);
        manager
            .create(&form("hero-main", "/static/hero.jpg", "", "hero"))
            .await;
        let id = manager.load().await.unwrap()[0].id;

        let notice = manager
            .update(id, &form("hero-main", "/static/hero-2.jpg", "Breadsticks", "hero"))
            .await;
        assert_eq!(notice, Notice::success("Image updated successfully"));

        let image = manager.find(id).await.unwrap().unwrap();
        assert_eq!(image.url, "/static/hero-2.jpg");
        assert_eq!(image.alt_text.as_deref(), Some("Breadsticks"));
    }
}
