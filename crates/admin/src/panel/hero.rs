//! Hero Content tab.
//!
//! Several hero rows may exist; exactly one is live at a time. Creating an
//! active row or activating an existing one retires the previous one.

use serde::Deserialize;

use fino_integrino_content::{ContentClient, ContentError};
use fino_integrino_core::{HeroChanges, HeroContent, HeroContentId, NewHeroContent, ValidationError};

use super::{DeleteForm, Notice, checked, image_ref, outcome};

const DEFAULT_CTA_PRIMARY: &str = "Partner with Us";
const DEFAULT_CTA_SECONDARY: &str = "Find Our Products";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HeroForm {
    #[serde(default)]
    pub headline: String,
    #[serde(default)]
    pub subheadline: String,
    #[serde(default)]
    pub image_id: String,
    #[serde(default)]
    pub cta_primary_text: String,
    #[serde(default)]
    pub cta_secondary_text: String,
    /// Only read when creating.
    pub is_active: Option<String>,
}

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

impl HeroForm {
    /// # Errors
    ///
    /// Returns the editor-facing validation message.
    pub fn to_new(&self) -> Result<NewHeroContent, ValidationError> {
        let hero = NewHeroContent {
            headline: self.headline.trim().to_string(),
            subheadline: self.subheadline.trim().to_string(),
            image_id: image_ref(&self.image_id)?,
            cta_primary_text: or_default(&self.cta_primary_text, DEFAULT_CTA_PRIMARY),
            cta_secondary_text: or_default(&self.cta_secondary_text, DEFAULT_CTA_SECONDARY),
            is_active: checked(self.is_active.as_deref()),
        };
        hero.validate()?;
        Ok(hero)
    }

    /// # Errors
    ///
    /// Returns the editor-facing validation message.
    pub fn to_changes(&self) -> Result<HeroChanges, ValidationError> {
        let changes = HeroChanges {
            headline: self.headline.trim().to_string(),
            subheadline: self.subheadline.trim().to_string(),
            image_id: image_ref(&self.image_id)?,
            cta_primary_text: or_default(&self.cta_primary_text, DEFAULT_CTA_PRIMARY),
            cta_secondary_text: or_default(&self.cta_secondary_text, DEFAULT_CTA_SECONDARY),
        };
        changes.validate()?;
        Ok(changes)
    }
}

pub struct HeroManager<'a> {
    client: &'a dyn ContentClient,
}

impl<'a> HeroManager<'a> {
    #[must_use]
    pub const fn new(client: &'a dyn ContentClient) -> Self {
        Self { client }
    }

    /// All hero rows, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error notice if the store cannot be read.
    pub async fn load(&self) -> Result<Vec<HeroContent>, Notice> {
        self.client.list_hero().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to load hero content");
            Notice::error("Failed to load hero content")
        })
    }

    /// # Errors
    ///
    /// Returns the store error.
    pub async fn find(&self, id: HeroContentId) -> Result<Option<HeroContent>, ContentError> {
        let heroes = self.client.list_hero().await?;
        Ok(heroes.into_iter().find(|hero| hero.id == id))
    }

    pub async fn create(&self, form: &HeroForm) -> Notice {
        let hero = match form.to_new() {
            Ok(hero) => hero,
            Err(e) => return e.into(),
        };
        outcome(
            self.client.create_hero(hero).await,
            "Hero content added successfully",
            "Failed to add hero content",
        )
    }

    pub async fn update(&self, id: HeroContentId, form: &HeroForm) -> Notice {
        let changes = match form.to_changes() {
            Ok(changes) => changes,
            Err(e) => return e.into(),
        };
        outcome(
            self.client.update_hero(id, changes).await,
            "Hero content updated successfully",
            "Failed to update hero content",
        )
    }

    pub async fn activate(&self, id: HeroContentId) -> Notice {
        outcome(
            self.client.activate_hero(id).await,
            "Hero content is now live",
            "Failed to activate hero content",
        )
    }

    pub async fn delete(&self, id: HeroContentId, form: &DeleteForm) -> Option<Notice> {
        if !form.is_confirmed() {
            return None;
        }
        Some(outcome(
            self.client.delete_hero(id).await,
            "Hero content deleted successfully",
            "Failed to delete hero content",
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fino_integrino_content::MemoryContentClient;

    use super::*;

    fn form(headline: &str, active: bool) -> HeroForm {
        HeroForm {
            headline: headline.to_string(),
            subheadline: "Integral breadsticks and oat bars".to_string(),
            is_active: active.then(|| "on".to_string()),
            ..HeroForm::default()
        }
    }

    #[tokio::test]
    async fn test_create_fills_default_calls_to_action() {
        let client = MemoryContentClient::new();
        let manager = HeroManager::new(&client);

        let notice = manager.create(&form("Acta Non Verba", true)).await;
        assert_eq!(notice, Notice::success("Hero content added successfully"));

        let hero = client.active_hero().await.unwrap().unwrap();
        assert_eq!(hero.headline, "Acta Non Verba");
        assert_eq!(hero.cta_primary_text, DEFAULT_CTA_PRIMARY);
        assert_eq!(hero.cta_secondary_text, DEFAULT_CTA_SECONDARY);
    }

    #[tokio::test]
    async fn test_activate_switches_live_row() {
        let client = MemoryContentClient::new();
        let manager = HeroManager::new(&client);
        manager.create(&form("Spring", true)).await;
        manager.create(&form("Summer", false)).await;

        let summer = manager
            .load()
            .await
            .unwrap()
            .into_iter()
            .find(|hero| hero.headline == "Summer")
            .unwrap();
        assert_eq!(
            manager.activate(summer.id).await,
            Notice::success("Hero content is now live")
        );

        let live: Vec<_> = manager
            .load()
            .await
            .unwrap()
            .into_iter()
            .filter(|hero| hero.is_active)
            .collect();
        assert_eq!(live.len(), 1);
        assert_eq!(live[0].headline, "Summer");
    }

    #[tokio::test]
    async fn test_blank_headline_makes_no_store_call() {
        let client = MemoryContentClient::new();
        let manager = HeroManager::new(&client);

        let notice = manager.update(HeroContentId::generate(), &form(" ", false)).await;
        assert_eq!(notice, Notice::error("Headline is required"));
        assert_eq!(client.calls().total(), 0);
    }

    #[tokio::test]
    async fn test_update_unknown_row_fails() {
        let client = MemoryContentClient::new();
        let manager = HeroManager::new(&client);

        let notice = manager
            .update(HeroContentId::generate(), &form("Headline", false))
            .await;
        assert_eq!(notice, Notice::error("Failed to update hero content"));
    }
}
