use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;

use bazaar_core::{ProductId, StoreError};
use bazaar_products::{Product, ProductDraft};

use super::ProductStore;

#[derive(Debug, Default)]
struct Catalog {
    last_id: i64,
    products: BTreeMap<ProductId, Product>,
}

/// In-memory product catalog for tests/dev. Lists in id order.
#[derive(Debug, Default)]
pub struct InMemoryProductStore {
    inner: RwLock<Catalog>,
}

impl InMemoryProductStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let catalog = self
            .inner
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(catalog.products.values().cloned().collect())
    }

    async fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        let catalog = self
            .inner
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        catalog.products.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut catalog = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        catalog.last_id += 1;
        let product = Product::from_draft(ProductId::from_raw(catalog.last_id), draft);
        catalog.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, StoreError> {
        let mut catalog = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        let slot = catalog.products.get_mut(&id).ok_or(StoreError::NotFound)?;
        *slot = Product::from_draft(id, draft);
        Ok(slot.clone())
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let mut catalog = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        catalog
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(name: &str, price: u64) -> ProductDraft {
        ProductDraft::new(name, "", price).unwrap()
    }

    #[tokio::test]
    async fn create_update_delete_lifecycle() {
        let store = InMemoryProductStore::new();
        let created = store.create(draft("Widget", 100)).await.unwrap();
        assert_eq!(store.get(created.id).await.unwrap().name, "Widget");

        let updated = store.update(created.id, draft("Gadget", 250)).await.unwrap();
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.price, 250);

        store.delete(created.id).await.unwrap();
        assert_eq!(store.get(created.id).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn missing_products_are_not_found() {
        let store = InMemoryProductStore::new();
        let ghost = ProductId::from_raw(42);
        assert_eq!(store.update(ghost, draft("X", 1)).await, Err(StoreError::NotFound));
        assert_eq!(store.delete(ghost).await, Err(StoreError::NotFound));
    }

    #[tokio::test]
    async fn list_is_ordered_by_id() {
        let store = InMemoryProductStore::new();
        store.create(draft("B", 1)).await.unwrap();
        store.create(draft("A", 1)).await.unwrap();
        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|p| p.name).collect();
        assert_eq!(names, ["B", "A"]);
    }
}
