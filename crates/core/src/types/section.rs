//! Page sections and navigation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A section of the public page, in navigation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    #[default]
    Home,
    Products,
    Story,
    Partnership,
    Buy,
}

/// Unrecognised section id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown section: {0}")]
pub struct UnknownSection(pub String);

impl SectionId {
    /// Every section in navigation order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Products,
        Self::Story,
        Self::Partnership,
        Self::Buy,
    ];

    /// Anchor id used in the page and in `?section=`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Products => "products",
            Self::Story => "story",
            Self::Partnership => "partnership",
            Self::Buy => "buy",
        }
    }

    /// Navigation label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Products => "Products",
            Self::Story => "Our Story",
            Self::Partnership => "Partner with Us",
            Self::Buy => "Where to Buy",
        }
    }

    /// Name of the published content document, without the `.json` suffix.
    #[must_use]
    pub const fn document(self) -> &'static str {
        match self {
            Self::Home => "hero",
            Self::Products => "products",
            Self::Story => "story",
            Self::Partnership => "partnership",
            Self::Buy => "where-to-buy",
        }
    }

    /// Look up a section by its content document name.
    #[must_use]
    pub fn from_document(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|section| section.document() == name)
    }

    /// Parse a query value, falling back to [`SectionId::Home`].
    #[must_use]
    pub fn parse_or_home(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl std::fmt::Display for SectionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SectionId {
    type Err = UnknownSection;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|section| section.as_str() == s)
            .ok_or_else(|| UnknownSection(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_order_and_labels() {
        let labels: Vec<_> = SectionId::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec!["Home", "Products", "Our Story", "Partner with Us", "Where to Buy"]
        );
    }

    #[test]
    fn test_parse_or_home() {
        assert_eq!(SectionId::parse_or_home(Some("story")), SectionId::Story);
        assert_eq!(SectionId::parse_or_home(Some("admin")), SectionId::Home);
        assert_eq!(SectionId::parse_or_home(None), SectionId::Home);
    }

    #[test]
    fn test_document_names() {
        assert_eq!(SectionId::Home.document(), "hero");
        assert_eq!(SectionId::Buy.document(), "where-to-buy");
        assert_eq!(SectionId::from_document("where-to-buy"), Some(SectionId::Buy));
        assert_eq!(SectionId::from_document("missing"), None);
    }
}
