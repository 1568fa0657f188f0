//! `bazaar-core` — shared domain building blocks.
//!
//! Identifiers, the domain error model and the store error shared by every
//! other crate. No IO.

pub mod error;
pub mod id;

pub use error::{DomainError, StoreError};
pub use id::{OrderId, ProductId, UserId};
