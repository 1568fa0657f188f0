//! Infrastructure layer: credential, catalog and order storage.
//!
//! Each store has an in-memory implementation (tests/dev) and a Postgres one
//! (sqlx). Both honour the same port contracts.

pub mod credential_store;
pub mod db;
pub mod order_store;
pub mod product_store;

mod integration_tests;

pub use credential_store::{InMemoryCredentialStore, PostgresCredentialStore};
pub use order_store::{InMemoryOrderStore, OrderStore, PostgresOrderStore};
pub use product_store::{InMemoryProductStore, PostgresProductStore, ProductStore};
