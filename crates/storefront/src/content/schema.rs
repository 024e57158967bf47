//! Authoring schema for the section documents.
//!
//! Git-based CMS editors read this to build their forms. It must describe the
//! same fields the [`documents`](super::documents) module accepts.

use serde::Serialize;

use fino_integrino_core::SectionId;

/// Field widget types understood by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    String,
    Textarea,
    Image,
    Object,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: &'static str,
    pub label: &'static str,
    #[serde(rename = "type")]
    pub kind: FieldKind,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub list: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

impl Field {
    const fn scalar(name: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            label,
            kind,
            list: false,
            fields: Vec::new(),
        }
    }

    const fn string(name: &'static str, label: &'static str) -> Self {
        Self::scalar(name, label, FieldKind::String)
    }

    const fn textarea(name: &'static str, label: &'static str) -> Self {
        Self::scalar(name, label, FieldKind::Textarea)
    }

    const fn image(name: &'static str, label: &'static str) -> Self {
        Self::scalar(name, label, FieldKind::Image)
    }

    fn object_list(name: &'static str, label: &'static str, fields: Vec<Self>) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Object,
            list: true,
            fields,
        }
    }
}

/// One section document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collection {
    pub name: &'static str,
    pub label: &'static str,
    /// Path relative to the content root, e.g. `content/hero.json`.
    pub path: String,
    pub format: &'static str,
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CmsSchema {
    pub media_root: &'static str,
    pub collections: Vec<Collection>,
}

fn fields_for(section: SectionId) -> (&'static str, Vec<Field>) {
    match section {
        SectionId::Home => (
            "Hero Section",
            vec![
                Field::string("heading", "Main Heading"),
                Field::textarea("subheading", "Subheading"),
                Field::string("organic_stat", "Organic %"),
                Field::string("sugars_stat", "Added Sugars"),
                Field::string("countries_stat", "Countries"),
            ],
        ),
        SectionId::Products => (
            "Products Section",
            vec![
                Field::string("title", "Section Title"),
                Field::textarea("description", "Section Description"),
                Field::object_list(
                    "items",
                    "Products",
                    vec![
                        Field::string("name", "Product Name"),
                        Field::textarea("description", "Description"),
                        Field::image("image", "Image"),
                    ],
                ),
            ],
        ),
        SectionId::Story => (
            "Our Story Section",
            vec![
                Field::string("title", "Section Title"),
                Field::textarea("content", "Story Content"),
                Field::image("image", "Image"),
            ],
        ),
        SectionId::Partnership => (
            "Partnership Section",
            vec![
                Field::string("title", "Section Title"),
                Field::textarea("description", "Section Description"),
            ],
        ),
        SectionId::Buy => (
            "Where to Buy Section",
            vec![
                Field::string("title", "Section Title"),
                Field::object_list(
                    "retailers",
                    "Retailers",
                    vec![
                        Field::string("name", "Retailer Name"),
                        Field::string("url", "Website URL"),
                        Field::image("logo", "Logo"),
                    ],
                ),
            ],
        ),
    }
}

/// The authoring contract for every section document.
#[must_use]
pub fn cms_schema() -> CmsSchema {
    let collections = SectionId::ALL
        .into_iter()
        .map(|section| {
            let (label, fields) = fields_for(section);
            Collection {
                name: section.document(),
                label,
                path: format!("content/{}.json", section.document()),
                format: "json",
                fields,
            }
        })
        .collect();

    CmsSchema {
        media_root: "uploads",
        collections,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::content::documents::validate_document;

    /// A document with every schema field filled in.
    fn sample(fields: &[Field]) -> serde_json::Value {
        let map = fields
            .iter()
            .map(|field| {
                let value = if field.list {
                    serde_json::Value::Array(vec![sample(&field.fields)])
                } else {
                    serde_json::Value::String(format!("sample {}", field.name))
                };
                (field.name.to_string(), value)
            })
            .collect();
        serde_json::Value::Object(map)
    }

    #[test]
    fn test_one_collection_per_section() {
        let schema = cms_schema();
        let names: Vec<_> = schema.collections.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["hero", "products", "story", "partnership", "where-to-buy"]
        );
        assert_eq!(schema.collections[4].path, "content/where-to-buy.json");
    }

    #[test]
    fn test_schema_matches_document_parsers() {
        for (section, collection) in SectionId::ALL.into_iter().zip(cms_schema().collections) {
            let doc = serde_json::to_vec(&sample(&collection.fields)).unwrap();
            assert!(
                validate_document(section, &doc).is_ok(),
                "{} schema does not parse",
                collection.name
            );
        }
    }

    #[test]
    fn test_serializes_editor_shape() {
        let json = serde_json::to_value(cms_schema()).unwrap();
        let items = &json["collections"][1]["fields"][2];
        assert_eq!(items["type"], "object");
        assert_eq!(items["list"], true);
        assert_eq!(items["fields"][2]["type"], "image");
        assert!(json["collections"][0]["fields"][0].get("list").is_none());
    }
}
