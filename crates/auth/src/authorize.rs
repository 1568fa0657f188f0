//! Role gate decision for admin-only operations.
//!
//! - No IO (the caller performs the store lookup and hands in its outcome)
//! - No panics
//! - Fails closed: an indeterminate lookup never counts as "not admin"

use thiserror::Error;

use bazaar_core::{StoreError, UserId};

/// Proof that the admin gate admitted a given user for the current request.
///
/// Only [`authorize_admin`] can construct one; it is the sole way to obtain an
/// elevated [`OwnershipScope`](crate::OwnershipScope).
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AdminGrant {
    user_id: UserId,
}

impl AdminGrant {
    pub fn user_id(&self) -> UserId {
        self.user_id
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("not authorized for this action")]
    Forbidden,

    /// The role could not be determined (store down, or the user vanished).
    #[error("role lookup failed: {0}")]
    Indeterminate(String),
}

/// Decide whether `user_id` may pass an admin gate, given the store's answer.
pub fn authorize_admin(
    user_id: UserId,
    admin_flag: Result<bool, StoreError>,
) -> Result<AdminGrant, AuthzError> {
    match admin_flag {
        Ok(true) => Ok(AdminGrant { user_id }),
        Ok(false) => Err(AuthzError::Forbidden),
        Err(StoreError::NotFound) => Err(AuthzError::Indeterminate(format!(
            "user {user_id} not found"
        ))),
        Err(e) => Err(AuthzError::Indeterminate(e.to_string())),
    }
}
