//! Products tab.

use serde::Deserialize;

use fino_integrino_content::{ContentClient, ContentError, Visibility};
use fino_integrino_core::{
    NewProduct, Product, ProductChanges, ProductId, ValidationError, parse_list,
};

use super::{DeleteForm, Notice, checked, display_order, image_ref, outcome};

/// Add/edit product form. Flavors and benefits are comma-separated.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_id: String,
    #[serde(default)]
    pub flavors: String,
    #[serde(default)]
    pub benefits: String,
    pub is_active: Option<String>,
}

impl ProductForm {
    /// # Errors
    ///
    /// Returns the editor-facing validation message.
    pub fn to_new(&self) -> Result<NewProduct, ValidationError> {
        let product = NewProduct {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            image_id: image_ref(&self.image_id)?,
            flavors: parse_list(&self.flavors),
            benefits: parse_list(&self.benefits),
            display_order: 0,
            is_active: checked(self.is_active.as_deref()),
        };
        product.validate()?;
        Ok(product)
    }

    /// # Errors
    ///
    /// Returns the editor-facing validation message.
    pub fn to_changes(&self) -> Result<ProductChanges, ValidationError> {
        let changes = ProductChanges {
            name: self.name.trim().to_string(),
            description: self.description.trim().to_string(),
            image_id: image_ref(&self.image_id)?,
            flavors: parse_list(&self.flavors),
            benefits: parse_list(&self.benefits),
            is_active: checked(self.is_active.as_deref()),
        };
        changes.validate()?;
        Ok(changes)
    }
}

pub struct ProductsManager<'a> {
    client: &'a dyn ContentClient,
}

impl<'a> ProductsManager<'a> {
    #[must_use]
    pub const fn new(client: &'a dyn ContentClient) -> Self {
        Self { client }
    }

    /// Every product, hidden ones included.
    ///
    /// # Errors
    ///
    /// Returns an error notice if the store cannot be read.
    pub async fn load(&self) -> Result<Vec<Product>, Notice> {
        self.client
            .list_products(Visibility::All)
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to load products");
                Notice::error("Failed to load products")
            })
    }

    /// # Errors
    ///
    /// Returns the store error.
    pub async fn find(&self, id: ProductId) -> Result<Option<Product>, ContentError> {
        let products = self.client.list_products(Visibility::All).await?;
        Ok(products.into_iter().find(|product| product.id == id))
    }

    pub async fn create(&self, form: &ProductForm) -> Notice {
        let product = match form.to_new() {
            Ok(product) => product,
            Err(e) => return e.into(),
        };
        outcome(
            self.append(product).await,
            "Product added successfully",
            "Failed to add product",
        )
    }

    async fn append(&self, mut product: NewProduct) -> Result<Product, ContentError> {
        let existing = self.client.list_products(Visibility::All).await?;
        product.display_order = display_order(existing.len());
        self.client.create_product(product).await
    }

    pub async fn update(&self, id: ProductId, form: &ProductForm) -> Notice {
        let changes = match form.to_changes() {
            Ok(changes) => changes,
            Err(e) => return e.into(),
        };
        outcome(
            self.client.update_product(id, changes).await,
            "Product updated successfully",
            "Failed to update product",
        )
    }

    pub async fn delete(&self, id: ProductId, form: &DeleteForm) -> Option<Notice> {
        if !form.is_confirmed() {
            return None;
        }
        Some(outcome(
            self.client.delete_product(id).await,
            "Product deleted successfully",
            "Failed to delete product",
        ))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use fino_integrino_content::MemoryContentClient;

    use super::*;

    fn form(name: &str, active: bool) -> ProductForm {
        ProductForm {
            name: name.to_string(),
            description: "Whole grain".to_string(),
            flavors: "Classic, Sesame,, Rosemary".to_string(),
            benefits: "High Fiber".to_string(),
            is_active: active.then(|| "on".to_string()),
            ..ProductForm::default()
        }
    }

    #[tokio::test]
    async fn test_create_parses_lists_and_orders() {
        let client = MemoryContentClient::new();
        let manager = ProductsManager::new(&client);

        manager.create(&form("Integral Breadsticks", true)).await;
        let notice = manager.create(&form("Oat Bars - Classic", false)).await;
        assert_eq!(notice, Notice::success("Product added successfully"));

        let products = manager.load().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[1].name, "Oat Bars - Classic");
        assert_eq!(products[1].display_order, 1);
        assert!(!products[1].is_active);
        assert_eq!(products[0].flavors, vec!["Classic", "Sesame", "Rosemary"]);
    }

    #[tokio::test]
    async fn test_unchecked_box_hides_product() {
        let client = MemoryContentClient::new();
        let manager = ProductsManager::new(&client);
        manager.create(&form("Integral Breadsticks", true)).await;
        let id = manager.load().await.unwrap()[0].id;

        let notice = manager.update(id, &form("Integral Breadsticks", false)).await;
        assert_eq!(notice, Notice::success("Product updated successfully"));
        assert!(
            client
                .list_products(Visibility::ActiveOnly)
                .await
                .unwrap()
                .is_empty()
        );
    }

    #[tokio::test]
    async fn test_invalid_image_makes_no_store_call() {
        let client = MemoryContentClient::new();
        let manager = ProductsManager::new(&client);
        let mut bad = form("Integral Breadsticks", true);
        bad.image_id = "not-an-id".to_string();

        let notice = manager.create(&bad).await;
        assert_eq!(notice, Notice::error("Selected image is invalid"));
        assert_eq!(client.calls().total(), 0);
    }

    #[tokio::test]
    async fn test_store_outage_reported() {
        let client = MemoryContentClient::new();
        let manager = ProductsManager::new(&client);
        client.set_unavailable(true);

        assert_eq!(
            manager.load().await.unwrap_err(),
            Notice::error("Failed to load products")
        );
        assert_eq!(
            manager.create(&form("Integral Breadsticks", true)).await,
            Notice::error("Failed to add product")
        );
    }
}
