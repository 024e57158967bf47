//! Hero banner content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{HeroContentId, ImageId};
use super::validation::{ValidationError, is_blank};

/// Hero banner copy. The public site shows the active row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroContent {
    pub id: HeroContentId,
    pub headline: String,
    pub subheadline: String,
    pub image_id: Option<ImageId>,
    pub cta_primary_text: String,
    pub cta_secondary_text: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewHeroContent {
    pub headline: String,
    pub subheadline: String,
    pub image_id: Option<ImageId>,
    pub cta_primary_text: String,
    pub cta_secondary_text: String,
    pub is_active: bool,
}

impl NewHeroContent {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the headline is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_headline(&self.headline)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroChanges {
    pub headline: String,
    pub subheadline: String,
    pub image_id: Option<ImageId>,
    pub cta_primary_text: String,
    pub cta_secondary_text: String,
}

impl HeroChanges {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the headline is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_headline(&self.headline)
    }
}

impl From<&HeroContent> for HeroChanges {
    fn from(hero: &HeroContent) -> Self {
        Self {
            headline: hero.headline.clone(),
            subheadline: hero.subheadline.clone(),
            image_id: hero.image_id,
            cta_primary_text: hero.cta_primary_text.clone(),
            cta_secondary_text: hero.cta_secondary_text.clone(),
        }
    }
}

fn validate_headline(headline: &str) -> Result<(), ValidationError> {
    if is_blank(headline) {
        return Err(ValidationError::new("Headline is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hero_requires_headline() {
        let changes = HeroChanges {
            headline: String::new(),
            subheadline: "Sub".to_owned(),
            image_id: None,
            cta_primary_text: "Request Catalog".to_owned(),
            cta_secondary_text: "Learn More".to_owned(),
        };
        assert_eq!(
            changes.validate(),
            Err(ValidationError::new("Headline is required"))
        );
    }
}
