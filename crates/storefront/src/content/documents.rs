//! Published section documents.
//!
//! One JSON document per section, named by [`SectionId::document`]. Every field
//! is optional; a field that is absent or blank keeps the section's default
//! copy. Unknown fields make the document malformed.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use fino_integrino_core::SectionId;

use super::markdown::render_markdown;
use super::sections::{
    HeroSection, ImageView, PartnershipSection, ProductCard, ProductsSection, RetailerCard, Stat,
    StorySection, WhereToBuySection,
};

/// A document that fills one section's view model.
pub trait SectionDocument: DeserializeOwned + Send {
    /// Section this document belongs to.
    const SECTION: SectionId;

    type Section: Default + Send;

    /// Merge the document over the section defaults.
    fn into_section(self) -> Self::Section;
}

/// Strictly parse `bytes` as the document for `section`.
///
/// # Errors
///
/// Returns the parse error if the document is not valid for that section.
pub fn validate_document(section: SectionId, bytes: &[u8]) -> Result<(), serde_json::Error> {
    match section {
        SectionId::Home => serde_json::from_slice::<HeroDocument>(bytes).map(drop),
        SectionId::Products => serde_json::from_slice::<ProductsDocument>(bytes).map(drop),
        SectionId::Story => serde_json::from_slice::<StoryDocument>(bytes).map(drop),
        SectionId::Partnership => serde_json::from_slice::<PartnershipDocument>(bytes).map(drop),
        SectionId::Buy => serde_json::from_slice::<WhereToBuyDocument>(bytes).map(drop),
    }
}

/// Keep `current` unless `value` has text.
fn merge(current: &mut String, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        *current = value;
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// hero.json
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroDocument {
    pub heading: Option<String>,
    pub subheading: Option<String>,
    pub organic_stat: Option<String>,
    pub sugars_stat: Option<String>,
    pub countries_stat: Option<String>,
}

impl SectionDocument for HeroDocument {
    const SECTION: SectionId = SectionId::Home;
    type Section = HeroSection;

    fn into_section(self) -> HeroSection {
        let mut hero = HeroSection::default();
        merge(&mut hero.heading, self.heading);
        merge(&mut hero.subheading, self.subheading);

        if let Some(stat) = hero.stats.get_mut(0) {
            merge(&mut stat.value, self.organic_stat);
        }
        if let Some(stat) = hero.stats.get_mut(1) {
            merge(&mut stat.value, self.sugars_stat);
        }
        if let Some(countries) = non_blank(self.countries_stat) {
            // The third figure reports reach; a published country count replaces it.
            if let Some(stat) = hero.stats.get_mut(2) {
                *stat = Stat::new(countries, "Countries");
            }
        }
        hero
    }
}

// =============================================================================
// products.json
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductItemDocument {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub image: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProductsDocument {
    pub title: Option<String>,
    pub description: Option<String>,
    pub items: Option<Vec<ProductItemDocument>>,
}

impl SectionDocument for ProductsDocument {
    const SECTION: SectionId = SectionId::Products;
    type Section = ProductsSection;

    fn into_section(self) -> ProductsSection {
        let mut products = ProductsSection::default();
        merge(&mut products.title, self.title);
        merge(&mut products.description, self.description);

        if let Some(items) = self.items {
            products.items = items
                .into_iter()
                .filter(|item| !item.name.trim().is_empty())
                .map(|item| ProductCard {
                    image: ImageView::or_placeholder(item.image.as_deref(), item.name.clone()),
                    name: item.name,
                    description: item.description,
                    flavors: Vec::new(),
                    benefits: Vec::new(),
                })
                .collect();
        }
        products
    }
}

// =============================================================================
// story.json
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StoryDocument {
    pub title: Option<String>,
    /// Markdown.
    pub content: Option<String>,
    pub image: Option<String>,
}

impl SectionDocument for StoryDocument {
    const SECTION: SectionId = SectionId::Story;
    type Section = StorySection;

    fn into_section(self) -> StorySection {
        let mut story = StorySection::default();
        merge(&mut story.title, self.title);
        if let Some(content) = non_blank(self.content) {
            story.body_html = render_markdown(&content);
        }
        if let Some(url) = non_blank(self.image) {
            story.image = ImageView::new(url, story.image.alt.clone());
        }
        story
    }
}

// =============================================================================
// partnership.json
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartnershipDocument {
    pub title: Option<String>,
    pub description: Option<String>,
}

impl SectionDocument for PartnershipDocument {
    const SECTION: SectionId = SectionId::Partnership;
    type Section = PartnershipSection;

    fn into_section(self) -> PartnershipSection {
        let mut partnership = PartnershipSection::default();
        merge(&mut partnership.title, self.title);
        merge(&mut partnership.description, self.description);
        partnership
    }
}

// =============================================================================
// where-to-buy.json
// =============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RetailerLinkDocument {
    #[serde(default)]
    pub name: String,
    pub url: Option<String>,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhereToBuyDocument {
    pub title: Option<String>,
    pub retailers: Option<Vec<RetailerLinkDocument>>,
}

impl SectionDocument for WhereToBuyDocument {
    const SECTION: SectionId = SectionId::Buy;
    type Section = WhereToBuySection;

    fn into_section(self) -> WhereToBuySection {
        let mut section = WhereToBuySection::default();
        merge(&mut section.title, self.title);

        if let Some(retailers) = self.retailers {
            section.domestic = retailers
                .into_iter()
                .filter(|r| !r.name.trim().is_empty())
                .map(|r| RetailerCard {
                    logo: ImageView::or_placeholder(r.logo.as_deref(), r.name.clone()),
                    url: non_blank(r.url),
                    name: r.name,
                    kind: None,
                    locations: None,
                })
                .collect();
        }
        section
    }
}
