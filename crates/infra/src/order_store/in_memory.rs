use std::collections::BTreeMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use bazaar_auth::OwnershipScope;
use bazaar_core::{OrderId, ProductId, StoreError, UserId};
use bazaar_sales::{Order, OrderStatus};

use super::OrderStore;

#[derive(Debug, Default)]
struct Orders {
    last_id: i64,
    orders: BTreeMap<OrderId, Order>,
}

impl Orders {
    /// Scoped lookup: a foreign order is indistinguishable from a missing one.
    fn scoped_mut(&mut self, id: OrderId, scope: OwnershipScope) -> Result<&mut Order, StoreError> {
        self.orders
            .get_mut(&id)
            .filter(|order| scope.permits(order.user_id))
            .ok_or(StoreError::NotFound)
    }
}

/// In-memory order store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryOrderStore {
    inner: RwLock<Orders>,
}

impl InMemoryOrderStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderStore for InMemoryOrderStore {
    async fn place(&self, owner: UserId, product_id: ProductId) -> Result<Order, StoreError> {
        let mut orders = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;

        orders.last_id += 1;
        let order = Order {
            id: OrderId::from_raw(orders.last_id),
            user_id: owner,
            product_id,
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        };
        orders.orders.insert(order.id, order.clone());
        Ok(order)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Order>, StoreError> {
        let orders = self
            .inner
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        Ok(orders
            .orders
            .values()
            .filter(|o| o.user_id == owner)
            .cloned()
            .collect())
    }

    async fn find(&self, id: OrderId, scope: OwnershipScope) -> Result<Order, StoreError> {
        let orders = self
            .inner
            .read()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        orders
            .orders
            .get(&id)
            .filter(|order| scope.permits(order.user_id))
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn cancel(&self, id: OrderId, scope: OwnershipScope) -> Result<Order, StoreError> {
        self.update_status(id, OrderStatus::Cancelled, scope).await
    }

    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        scope: OwnershipScope,
    ) -> Result<Order, StoreError> {
        let mut orders = self
            .inner
            .write()
            .map_err(|_| StoreError::unavailable("lock poisoned"))?;
        let order = orders.scoped_mut(id, scope)?;
        order.status = status;
        Ok(order.clone())
    }
}
