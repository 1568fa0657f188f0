//! Sales domain module.
//!
//! Customer orders and their status lifecycle. Ownership enforcement lives in
//! the stores (see `bazaar_auth::OwnershipScope`); this crate only models the
//! values.

pub mod order;

pub use order::{Order, OrderStatus};
