//! Order storage with ownership-constrained access.
//!
//! Every single-order operation takes an [`OwnershipScope`] and must match on
//! both the order id and (unless elevated) the owner. A scoped miss is
//! `StoreError::NotFound`, exactly like a nonexistent order.

use async_trait::async_trait;

use bazaar_auth::OwnershipScope;
use bazaar_core::{OrderId, ProductId, StoreError, UserId};
use bazaar_sales::{Order, OrderStatus};

pub mod in_memory;
pub mod postgres;

pub use in_memory::InMemoryOrderStore;
pub use postgres::PostgresOrderStore;

#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Create a `pending` order owned by `owner`.
    async fn place(&self, owner: UserId, product_id: ProductId) -> Result<Order, StoreError>;

    /// All orders owned by `owner`, oldest first.
    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Order>, StoreError>;

    async fn find(&self, id: OrderId, scope: OwnershipScope) -> Result<Order, StoreError>;

    async fn cancel(&self, id: OrderId, scope: OwnershipScope) -> Result<Order, StoreError>;

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        scope: OwnershipScope,
    ) -> Result<Order, StoreError>;
}
