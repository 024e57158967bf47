//! Section content: sources, documents and view models.
//!
//! ```text
//! ContentProvider ─┬─ StaticContentProvider ── StaticContentLoader ── <dir>|<url>/<document>.json
//!                  └─ StoreContentProvider ─── ContentClient (hero, products, retailers)
//!                                          └── StaticContentLoader (story, partnership)
//! ```
//!
//! [`resolve_page`] asks the provider for every section concurrently and
//! substitutes default copy for any section that did not resolve.

pub mod documents;
pub mod loader;
pub mod markdown;
pub mod provider;
pub mod schema;
pub mod sections;

pub use documents::SectionDocument;
pub use loader::{LoaderError, StaticContentLoader};
pub use provider::{ContentProvider, StaticContentProvider, StoreContentProvider};
pub use sections::{
    HeroSection, PLACEHOLDER_IMAGE, PartnershipSection, ProductsSection, StorySection,
    WhereToBuySection,
};

/// Every section of the public page, fully resolved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub hero: HeroSection,
    pub products: ProductsSection,
    pub story: StorySection,
    pub partnership: PartnershipSection,
    pub where_to_buy: WhereToBuySection,
}

/// Resolve all sections, falling back to defaults section by section.
pub async fn resolve_page(provider: &dyn ContentProvider) -> Page {
    let (hero, products, story, partnership, where_to_buy) = tokio::join!(
        provider.hero(),
        provider.products(),
        provider.story(),
        provider.partnership(),
        provider.where_to_buy(),
    );

    Page {
        hero: hero.unwrap_or_default(),
        products: products.unwrap_or_default(),
        story: story.unwrap_or_default(),
        partnership: partnership.unwrap_or_default(),
        where_to_buy: where_to_buy.unwrap_or_default(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_documents_render_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let provider = StaticContentProvider::new(StaticContentLoader::from_dir(dir.path()));

        assert_eq!(resolve_page(&provider).await, Page::default());
    }

    #[tokio::test]
    async fn test_sections_fall_back_independently() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("story.json"), r#"{"title": "Since 2014"}"#).unwrap();
        std::fs::write(dir.path().join("hero.json"), "[]").unwrap();

        let provider = StaticContentProvider::new(StaticContentLoader::from_dir(dir.path()));
        let page = resolve_page(&provider).await;

        assert_eq!(page.story.title, "Since 2014");
        assert_eq!(page.hero, HeroSection::default());
        assert_eq!(page.products, ProductsSection::default());
    }
}
