//! In-process content client.
//!
//! Mirrors [`PgContentClient`](crate::PgContentClient) semantics: the same
//! ordering, `NotFound` on unknown ids, and reference clearing when an image is
//! deleted. It also counts calls and can simulate outages and rejected writes,
//! which the tests use to check that failed validation issues no store call.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;

use fino_integrino_core::{
    HeroChanges, HeroContent, HeroContentId, ImageChanges, ImageId, NewHeroContent, NewImage,
    NewProduct, NewRetailer, Product, ProductChanges, ProductId, Retailer, RetailerChanges,
    RetailerId, SiteImage,
};

use crate::{ContentClient, ContentError, ImageFilter, Visibility};

#[derive(Debug, Default)]
struct Store {
    images: Vec<SiteImage>,
    products: Vec<Product>,
    retailers: Vec<Retailer>,
    heroes: Vec<HeroContent>,
    clock: Option<DateTime<Utc>>,
}

impl Store {
    /// Strictly increasing timestamps so insertion order is stable.
    fn tick(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let next = match self.clock {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        };
        self.clock = Some(next);
        next
    }

    fn image_exists(&self, id: Option<ImageId>) -> bool {
        id.is_none_or(|id| self.images.iter().any(|image| image.id == id))
    }

    fn check_image_ref(&self, id: Option<ImageId>) -> Result<(), ContentError> {
        if self.image_exists(id) {
            Ok(())
        } else {
            Err(ContentError::Conflict(
                "referenced image does not exist".to_owned(),
            ))
        }
    }
}

/// Snapshot of how many calls reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CallCounts {
    pub reads: usize,
    pub mutations: usize,
}

impl CallCounts {
    #[must_use]
    pub const fn total(self) -> usize {
        self.reads + self.mutations
    }
}

/// Content client holding everything in memory.
#[derive(Debug, Default)]
pub struct MemoryContentClient {
    store: RwLock<Store>,
    reads: AtomicUsize,
    mutations: AtomicUsize,
    unavailable: AtomicBool,
    reject_next_mutation: AtomicBool,
}

impl MemoryContentClient {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls made so far.
    #[must_use]
    pub fn calls(&self) -> CallCounts {
        CallCounts {
            reads: self.reads.load(Ordering::SeqCst),
            mutations: self.mutations.load(Ordering::SeqCst),
        }
    }

    /// Zero the call counters.
    pub fn reset_calls(&self) {
        self.reads.store(0, Ordering::SeqCst);
        self.mutations.store(0, Ordering::SeqCst);
    }

    /// Make every subsequent call fail with [`ContentError::Unavailable`].
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Make the next mutation fail with [`ContentError::Conflict`] without changing anything.
    pub fn reject_next_mutation(&self) {
        self.reject_next_mutation.store(true, Ordering::SeqCst);
    }

    fn begin_read(&self) -> Result<(), ContentError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.check_available()
    }

    fn begin_mutation(&self) -> Result<(), ContentError> {
        self.mutations.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        if self.reject_next_mutation.swap(false, Ordering::SeqCst) {
            return Err(ContentError::Conflict("write rejected by store".to_owned()));
        }
        Ok(())
    }

    fn check_available(&self) -> Result<(), ContentError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(ContentError::Unavailable(
                "in-memory store is offline".to_owned(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl ContentClient for MemoryContentClient {
    async fn ping(&self) -> Result<(), ContentError> {
        self.begin_read()
    }

    // ---- Images ----

    async fn list_images(&self, filter: ImageFilter) -> Result<Vec<SiteImage>, ContentError> {
        self.begin_read()?;
        let store = self.store.read().await;
        let mut images: Vec<_> = store
            .images
            .iter()
            .filter(|image| filter.category.is_none_or(|c| image.category == c))
            .cloned()
            .collect();
        images.sort_by_key(|image| {
            (
                image.category,
                image.display_order,
                image.created_at,
                image.id,
            )
        });
        Ok(images)
    }

    async fn find_image(&self, id: ImageId) -> Result<Option<SiteImage>, ContentError> {
        self.begin_read()?;
        let store = self.store.read().await;
        Ok(store.images.iter().find(|image| image.id == id).cloned())
    }

    async fn create_image(&self, image: NewImage) -> Result<SiteImage, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        let now = store.tick();
        let created = SiteImage {
            id: ImageId::generate(),
            name: image.name.trim().to_owned(),
            url: image.url.trim().to_owned(),
            alt_text: image.alt_text,
            category: image.category,
            display_order: image.display_order,
            created_at: now,
            updated_at: now,
        };
        store.images.push(created.clone());
        Ok(created)
    }

    async fn update_image(
        &self,
        id: ImageId,
        changes: ImageChanges,
    ) -> Result<SiteImage, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        let now = store.tick();
        let image = store
            .images
            .iter_mut()
            .find(|image| image.id == id)
            .ok_or(ContentError::NotFound)?;
        image.name = changes.name.trim().to_owned();
        image.url = changes.url.trim().to_owned();
        image.alt_text = changes.alt_text;
        image.category = changes.category;
        image.updated_at = now;
        Ok(image.clone())
    }

    async fn delete_image(&self, id: ImageId) -> Result<(), ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        let before = store.images.len();
        store.images.retain(|image| image.id != id);
        if store.images.len() == before {
            return Err(ContentError::NotFound);
        }

        let reference = Some(id);
        for product in store.products.iter_mut().filter(|p| p.image_id == reference) {
            product.image_id = None;
        }
        for retailer in store.retailers.iter_mut().filter(|r| r.logo_id == reference) {
            retailer.logo_id = None;
        }
        for hero in store.heroes.iter_mut().filter(|h| h.image_id == reference) {
            hero.image_id = None;
        }
        Ok(())
    }

    // ---- Products ----

    async fn list_products(&self, visibility: Visibility) -> Result<Vec<Product>, ContentError> {
        self.begin_read()?;
        let store = self.store.read().await;
        let mut products: Vec<_> = store
            .products
            .iter()
            .filter(|product| visibility.admits(product.is_active))
            .cloned()
            .collect();
        products.sort_by_key(|p| (p.display_order, p.created_at, p.id));
        Ok(products)
    }

    async fn create_product(&self, product: NewProduct) -> Result<Product, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        store.check_image_ref(product.image_id)?;
        let now = store.tick();
        let created = Product {
            id: ProductId::generate(),
            name: product.name.trim().to_owned(),
            description: product.description,
            image_id: product.image_id,
            flavors: product.flavors,
            benefits: product.benefits,
            display_order: product.display_order,
            is_active: product.is_active,
            created_at: now,
            updated_at: now,
        };
        store.products.push(created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Product, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        if !store.products.iter().any(|product| product.id == id) {
            return Err(ContentError::NotFound);
        }
        store.check_image_ref(changes.image_id)?;
        let now = store.tick();
        let product = store
            .products
            .iter_mut()
            .find(|product| product.id == id)
            .ok_or(ContentError::NotFound)?;
        product.name = changes.name.trim().to_owned();
        product.description = changes.description;
        product.image_id = changes.image_id;
        product.flavors = changes.flavors;
        product.benefits = changes.benefits;
        product.is_active = changes.is_active;
        product.updated_at = now;
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        let before = store.products.len();
        store.products.retain(|product| product.id != id);
        if store.products.len() == before {
            return Err(ContentError::NotFound);
        }
        Ok(())
    }

    // ---- Retailers ----

    async fn list_retailers(
        &self,
        visibility: Visibility,
    ) -> Result<Vec<Retailer>, ContentError> {
        self.begin_read()?;
        let store = self.store.read().await;
        let mut retailers: Vec<_> = store
            .retailers
            .iter()
            .filter(|retailer| visibility.admits(retailer.is_active))
            .cloned()
            .collect();
        retailers.sort_by_key(|r| (r.display_order, r.created_at, r.id));
        Ok(retailers)
    }

    async fn create_retailer(&self, retailer: NewRetailer) -> Result<Retailer, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        store.check_image_ref(retailer.logo_id)?;
        let now = store.tick();
        let created = Retailer {
            id: RetailerId::generate(),
            name: retailer.name.trim().to_owned(),
            kind: retailer.kind.trim().to_owned(),
            locations: retailer.locations.trim().to_owned(),
            country: retailer.country.trim().to_owned(),
            logo_id: retailer.logo_id,
            display_order: retailer.display_order,
            is_active: retailer.is_active,
            created_at: now,
            updated_at: now,
        };
        store.retailers.push(created.clone());
        Ok(created)
    }

    async fn update_retailer(
        &self,
        id: RetailerId,
        changes: RetailerChanges,
    ) -> Result<Retailer, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        if !store.retailers.iter().any(|retailer| retailer.id == id) {
            return Err(ContentError::NotFound);
        }
        store.check_image_ref(changes.logo_id)?;
        let now = store.tick();
        let retailer = store
            .retailers
            .iter_mut()
            .find(|retailer| retailer.id == id)
            .ok_or(ContentError::NotFound)?;
        retailer.name = changes.name.trim().to_owned();
        retailer.kind = changes.kind.trim().to_owned();
        retailer.locations = changes.locations.trim().to_owned();
        retailer.country = changes.country.trim().to_owned();
        retailer.logo_id = changes.logo_id;
        retailer.is_active = changes.is_active;
        retailer.updated_at = now;
        Ok(retailer.clone())
    }

    async fn delete_retailer(&self, id: RetailerId) -> Result<(), ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        let before = store.retailers.len();
        store.retailers.retain(|retailer| retailer.id != id);
        if store.retailers.len() == before {
            return Err(ContentError::NotFound);
        }
        Ok(())
    }

    // ---- Hero ----

    async fn list_hero(&self) -> Result<Vec<HeroContent>, ContentError> {
        self.begin_read()?;
        let store = self.store.read().await;
        let mut heroes = store.heroes.clone();
        heroes.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(heroes)
    }

    async fn active_hero(&self) -> Result<Option<HeroContent>, ContentError> {
        self.begin_read()?;
        let store = self.store.read().await;
        Ok(store.heroes.iter().find(|hero| hero.is_active).cloned())
    }

    async fn create_hero(&self, hero: NewHeroContent) -> Result<HeroContent, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        store.check_image_ref(hero.image_id)?;
        let now = store.tick();
        if hero.is_active {
            for other in store.heroes.iter_mut().filter(|h| h.is_active) {
                other.is_active = false;
                other.updated_at = now;
            }
        }
        let created = HeroContent {
            id: HeroContentId::generate(),
            headline: hero.headline.trim().to_owned(),
            subheadline: hero.subheadline,
            image_id: hero.image_id,
            cta_primary_text: hero.cta_primary_text,
            cta_secondary_text: hero.cta_secondary_text,
            is_active: hero.is_active,
            created_at: now,
            updated_at: now,
        };
        store.heroes.push(created.clone());
        Ok(created)
    }

    async fn update_hero(
        &self,
        id: HeroContentId,
        changes: HeroChanges,
    ) -> Result<HeroContent, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        if !store.heroes.iter().any(|hero| hero.id == id) {
            return Err(ContentError::NotFound);
        }
        store.check_image_ref(changes.image_id)?;
        let now = store.tick();
        let hero = store
            .heroes
            .iter_mut()
            .find(|hero| hero.id == id)
            .ok_or(ContentError::NotFound)?;
        hero.headline = changes.headline.trim().to_owned();
        hero.subheadline = changes.subheadline;
        hero.image_id = changes.image_id;
        hero.cta_primary_text = changes.cta_primary_text;
        hero.cta_secondary_text = changes.cta_secondary_text;
        hero.updated_at = now;
        Ok(hero.clone())
    }

    async fn activate_hero(&self, id: HeroContentId) -> Result<HeroContent, ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        if !store.heroes.iter().any(|hero| hero.id == id) {
            return Err(ContentError::NotFound);
        }
        let now = store.tick();
        let mut activated = None;
        for hero in &mut store.heroes {
            if hero.id == id {
                hero.is_active = true;
                hero.updated_at = now;
                activated = Some(hero.clone());
            } else if hero.is_active {
                hero.is_active = false;
                hero.updated_at = now;
            }
        }
        activated.ok_or(ContentError::NotFound)
    }

    async fn delete_hero(&self, id: HeroContentId) -> Result<(), ContentError> {
        self.begin_mutation()?;
        let mut store = self.store.write().await;
        let before = store.heroes.len();
        store.heroes.retain(|hero| hero.id != id);
        if store.heroes.len() == before {
            return Err(ContentError::NotFound);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use fino_integrino_core::ImageCategory;

    use super::*;

    fn new_image(name: &str, category: ImageCategory, display_order: i32) -> NewImage {
        NewImage {
            name: name.to_owned(),
            url: format!("/images/{name}.jpg"),
            alt_text: None,
            category,
            display_order,
        }
    }

    fn new_retailer(name: &str, country: &str, display_order: i32) -> NewRetailer {
        NewRetailer {
            name: name.to_owned(),
            kind: "Supermarket Chain".to_owned(),
            locations: "100+ stores".to_owned(),
            country: country.to_owned(),
            logo_id: None,
            display_order,
            is_active: true,
        }
    }

    fn new_product(name: &str, image_id: Option<ImageId>, is_active: bool) -> NewProduct {
        NewProduct {
            name: name.to_owned(),
            description: String::new(),
            image_id,
            flavors: vec!["Sesame".to_owned()],
            benefits: vec!["High Fiber".to_owned()],
            display_order: 0,
            is_active,
        }
    }

    #[tokio::test]
    async fn test_images_ordered_by_category_then_position() {
        let client = MemoryContentClient::new();
        client
            .create_image(new_image("story", ImageCategory::Story, 0))
            .await
            .unwrap();
        client
            .create_image(new_image("hero-b", ImageCategory::Hero, 1))
            .await
            .unwrap();
        client
            .create_image(new_image("hero-a", ImageCategory::Hero, 0))
            .await
            .unwrap();

        let names: Vec<_> = client
            .list_images(ImageFilter::all())
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.name)
            .collect();
        assert_eq!(names, vec!["hero-a", "hero-b", "story"]);

        let heroes = client
            .list_images(ImageFilter::category(ImageCategory::Hero))
            .await
            .unwrap();
        assert_eq!(heroes.len(), 2);
    }

    #[tokio::test]
    async fn test_equal_display_order_keeps_insertion_order() {
        let client = MemoryContentClient::new();
        for name in ["Idea", "Maxi", "Tempo"] {
            client
                .create_retailer(new_retailer(name, "Serbia", 0))
                .await
                .unwrap();
        }
        let names: Vec<_> = client
            .list_retailers(Visibility::All)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, vec!["Idea", "Maxi", "Tempo"]);
    }

    #[tokio::test]
    async fn test_active_only_excludes_inactive_products() {
        let client = MemoryContentClient::new();
        client
            .create_product(new_product("Visible", None, true))
            .await
            .unwrap();
        client
            .create_product(new_product("Hidden", None, false))
            .await
            .unwrap();

        let active = client.list_products(Visibility::ActiveOnly).await.unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "Visible");
        assert_eq!(client.list_products(Visibility::All).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_unknown_id_is_not_found_and_changes_nothing() {
        let client = MemoryContentClient::new();
        client
            .create_retailer(new_retailer("Idea", "Serbia", 0))
            .await
            .unwrap();
        let before = client.list_retailers(Visibility::All).await.unwrap();

        let result = client.delete_retailer(RetailerId::generate()).await;
        assert!(matches!(result, Err(ContentError::NotFound)));

        let after = client.list_retailers(Visibility::All).await.unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let client = MemoryContentClient::new();
        let result = client
            .update_image(
                ImageId::generate(),
                ImageChanges {
                    name: "x".to_owned(),
                    url: "/x.jpg".to_owned(),
                    alt_text: None,
                    category: ImageCategory::Hero,
                },
            )
            .await;
        assert!(matches!(result, Err(ContentError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_image_clears_references() {
        let client = MemoryContentClient::new();
        let image = client
            .create_image(new_image("bars", ImageCategory::Product, 0))
            .await
            .unwrap();
        let product = client
            .create_product(new_product("Oat Bars", Some(image.id), true))
            .await
            .unwrap();
        let hero = client
            .create_hero(NewHeroContent {
                headline: "Headline".to_owned(),
                subheadline: String::new(),
                image_id: Some(image.id),
                cta_primary_text: String::new(),
                cta_secondary_text: String::new(),
                is_active: true,
            })
            .await
            .unwrap();

        client.delete_image(image.id).await.unwrap();

        let products = client.list_products(Visibility::All).await.unwrap();
        assert_eq!(products[0].id, product.id);
        assert_eq!(products[0].image_id, None);
        let active = client.active_hero().await.unwrap().unwrap();
        assert_eq!(active.id, hero.id);
        assert_eq!(active.image_id, None);
    }

    #[tokio::test]
    async fn test_dangling_image_reference_is_rejected() {
        let client = MemoryContentClient::new();
        let result = client
            .create_product(new_product("Ghost", Some(ImageId::generate()), true))
            .await;
        assert!(matches!(result, Err(ContentError::Conflict(_))));
        assert!(client.list_products(Visibility::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_single_active_hero() {
        let client = MemoryContentClient::new();
        let hero = |headline: &str| NewHeroContent {
            headline: headline.to_owned(),
            subheadline: String::new(),
            image_id: None,
            cta_primary_text: String::new(),
            cta_secondary_text: String::new(),
            is_active: true,
        };
        let first = client.create_hero(hero("First")).await.unwrap();
        let second = client.create_hero(hero("Second")).await.unwrap();
        assert_eq!(client.active_hero().await.unwrap().unwrap().id, second.id);

        client.activate_hero(first.id).await.unwrap();
        let all = client.list_hero().await.unwrap();
        assert_eq!(all.iter().filter(|h| h.is_active).count(), 1);
        assert_eq!(client.active_hero().await.unwrap().unwrap().id, first.id);
    }

    #[tokio::test]
    async fn test_unavailable_and_rejected_mutation() {
        let client = MemoryContentClient::new();
        client.set_unavailable(true);
        let err = client.list_images(ImageFilter::all()).await.unwrap_err();
        assert!(err.is_unavailable());
        client.set_unavailable(false);

        client.reject_next_mutation();
        assert!(
            client
                .create_image(new_image("x", ImageCategory::Hero, 0))
                .await
                .is_err()
        );
        assert!(client.list_images(ImageFilter::all()).await.unwrap().is_empty());
        client
            .create_image(new_image("x", ImageCategory::Hero, 0))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_call_counts() {
        let client = MemoryContentClient::new();
        client.list_images(ImageFilter::all()).await.unwrap();
        client
            .create_image(new_image("x", ImageCategory::Hero, 0))
            .await
            .unwrap();
        assert_eq!(
            client.calls(),
            CallCounts {
                reads: 1,
                mutations: 1
            }
        );
        client.reset_calls();
        assert_eq!(client.calls().total(), 0);
    }
}
