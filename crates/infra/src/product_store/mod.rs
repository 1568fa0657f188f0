//! Product catalog storage.

use async_trait::async_trait;

use bazaar_core::{ProductId, StoreError};
use bazaar_products::{Product, ProductDraft};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryProductStore;
pub use postgres::PostgresProductStore;

/// Catalog persistence. Mutations are admin-only at the HTTP layer; the
/// store itself does not know about roles.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn list(&self) -> Result<Vec<Product>, StoreError>;

    async fn get(&self, id: ProductId) -> Result<Product, StoreError>;

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError>;

    /// Replace all fields. `NotFound` when no such product exists.
    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, StoreError>;

    /// `NotFound` when no such product exists.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;
}
