//! Products shown in the product range.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{ImageId, ProductId};
use super::validation::{ValidationError, is_blank};

/// A product line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    pub image_id: Option<ImageId>,
    pub flavors: Vec<String>,
    pub benefits: Vec<String>,
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub image_id: Option<ImageId>,
    pub flavors: Vec<String>,
    pub benefits: Vec<String>,
    pub display_order: i32,
    pub is_active: bool,
}

impl NewProduct {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

/// Editable fields of an existing product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChanges {
    pub name: String,
    pub description: String,
    pub image_id: Option<ImageId>,
    pub flavors: Vec<String>,
    pub benefits: Vec<String>,
    pub is_active: bool,
}

impl ProductChanges {
    /// # Errors
    ///
    /// Returns a [`ValidationError`] when the name is missing.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_name(&self.name)
    }
}

impl From<&Product> for ProductChanges {
    fn from(product: &Product) -> Self {
        Self {
            name: product.name.clone(),
            description: product.description.clone(),
            image_id: product.image_id,
            flavors: product.flavors.clone(),
            benefits: product.benefits.clone(),
            is_active: product.is_active,
        }
    }
}

fn validate_name(name: &str) -> Result<(), ValidationError> {
    if is_blank(name) {
        return Err(ValidationError::new("Product name is required"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_requires_name() {
        let changes = ProductChanges {
            name: " ".to_owned(),
            description: String::new(),
            image_id: None,
            flavors: vec![],
            benefits: vec![],
            is_active: true,
        };
        assert_eq!(
            changes.validate(),
            Err(ValidationError::new("Product name is required"))
        );
    }

    #[test]
    fn test_product_allows_empty_lists() {
        let product = NewProduct {
            name: "Oat Bars".to_owned(),
            description: String::new(),
            image_id: None,
            flavors: vec![],
            benefits: vec![],
            display_order: 0,
            is_active: false,
        };
        assert!(product.validate().is_ok());
    }
}
