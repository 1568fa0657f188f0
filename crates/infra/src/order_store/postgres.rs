//! Postgres-backed order store (`orders` table).
//!
//! The ownership constraint is part of each statement's `WHERE` clause:
//! `$2` is the owner id, or NULL for an elevated scope.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use bazaar_auth::OwnershipScope;
use bazaar_core::{OrderId, ProductId, StoreError, UserId};
use bazaar_sales::{Order, OrderStatus};

use super::OrderStore;
use crate::db::map_sqlx_error;

const ORDER_COLUMNS: &str = "id, user_id, product_id, status, created_at";

pub struct PostgresOrderStore {
    pool: PgPool,
}

impl PostgresOrderStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn order_from_row(row: &PgRow) -> Result<Order, StoreError> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let status: String = row.try_get("status").map_err(map_sqlx_error)?;
    Ok(Order {
        id: OrderId::from_raw(id),
        user_id: UserId::from_raw(row.try_get("user_id").map_err(map_sqlx_error)?),
        product_id: ProductId::from_raw(row.try_get("product_id").map_err(map_sqlx_error)?),
        status: status
            .parse::<OrderStatus>()
            .map_err(|e| StoreError::unavailable(format!("order {id}: {e}")))?,
        created_at: row.try_get("created_at").map_err(map_sqlx_error)?,
    })
}

fn owner_param(scope: OwnershipScope) -> Option<i64> {
    scope.owner_filter().map(UserId::get)
}

#[async_trait]
impl OrderStore for PostgresOrderStore {
    #[tracing::instrument(skip(self))]
    async fn place(&self, owner: UserId, product_id: ProductId) -> Result<Order, StoreError> {
        let sql = format!(
            "INSERT INTO orders (user_id, product_id, status) VALUES ($1, $2, $3) RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(owner.get())
            .bind(product_id.get())
            .bind(OrderStatus::Pending.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        order_from_row(&row)
    }

    async fn list_for_owner(&self, owner: UserId) -> Result<Vec<Order>, StoreError> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE user_id = $1 ORDER BY id");
        let rows = sqlx::query(&sql)
            .bind(owner.get())
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(order_from_row).collect()
    }

    async fn find(&self, id: OrderId, scope: OwnershipScope) -> Result<Order, StoreError> {
        let sql = format!(
            "SELECT {ORDER_COLUMNS} FROM orders WHERE id = $1 AND ($2::BIGINT IS NULL OR user_id = $2)"
        );
        let row = sqlx::query(&sql)
            .bind(id.get())
            .bind(owner_param(scope))
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;

        order_from_row(&row)
    }

    async fn cancel(&self, id: OrderId, scope: OwnershipScope) -> Result<Order, StoreError> {
        self.update_status(id, OrderStatus::Cancelled, scope).await
    }

    #[tracing::instrument(skip(self))]
    async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
        scope: OwnershipScope,
    ) -> Result<Order, StoreError> {
        let sql = format!(
            "UPDATE orders SET status = $3 WHERE id = $1 AND ($2::BIGINT IS NULL OR user_id = $2) RETURNING {ORDER_COLUMNS}"
        );
        let row = sqlx::query(&sql)
            .bind(id.get())
            .bind(owner_param(scope))
            .bind(status.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;

        order_from_row(&row)
    }
}
