//! Products domain module.
//!
//! Catalog entries and their validation rules, implemented as plain domain
//! logic (no IO, no HTTP, no storage).

pub mod product;

pub use product::{MAX_PRICE, Product, ProductDraft};
