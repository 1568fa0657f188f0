//! Postgres-backed product catalog (`products` table).

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};

use bazaar_core::{ProductId, StoreError};
use bazaar_products::{Product, ProductDraft};

use super::ProductStore;
use crate::db::map_sqlx_error;

pub struct PostgresProductStore {
    pool: PgPool,
}

impl PostgresProductStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn price_column(draft: &ProductDraft) -> Result<i64, StoreError> {
    i64::try_from(draft.price()).map_err(|_| StoreError::unavailable("price exceeds column range"))
}

fn product_from_row(row: &PgRow) -> Result<Product, StoreError> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let price: i64 = row.try_get("price").map_err(map_sqlx_error)?;
    Ok(Product {
        id: ProductId::from_raw(id),
        name: row.try_get("name").map_err(map_sqlx_error)?,
        description: row.try_get("description").map_err(map_sqlx_error)?,
        price: u64::try_from(price)
            .map_err(|_| StoreError::unavailable(format!("negative price stored for product {id}")))?,
    })
}

#[async_trait]
impl ProductStore for PostgresProductStore {
    async fn list(&self) -> Result<Vec<Product>, StoreError> {
        let rows = sqlx::query("SELECT id, name, description, price FROM products ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        rows.iter().map(product_from_row).collect()
    }

    async fn get(&self, id: ProductId) -> Result<Product, StoreError> {
        let row = sqlx::query("SELECT id, name, description, price FROM products WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_error)?
            .ok_or(StoreError::NotFound)?;

        product_from_row(&row)
    }

    async fn create(&self, draft: ProductDraft) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            INSERT INTO products (name, description, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, description, price
            "#,
        )
        .bind(draft.name())
        .bind(draft.description())
        .bind(price_column(&draft)?)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_error)?;

        product_from_row(&row)
    }

    async fn update(&self, id: ProductId, draft: ProductDraft) -> Result<Product, StoreError> {
        let row = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, description = $3, price = $4
            WHERE id = $1
            RETURNING id, name, description, price
            "#,
        )
        .bind(id.get())
        .bind(draft.name())
        .bind(draft.description())
        .bind(price_column(&draft)?)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_error)?
        .ok_or(StoreError::NotFound)?;

        product_from_row(&row)
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.get())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_error)?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
