use serde::{Deserialize, Serialize};

use bazaar_core::{DomainError, ProductId};

const MAX_NAME_LEN: usize = 200;

/// Upper bound on prices; keeps them representable in a signed 64-bit column.
pub const MAX_PRICE: u64 = i64::MAX as u64;

/// Validated product fields, before the store assigns an id.
///
/// Used for both creation and full replacement (`PUT`). Only constructible
/// through [`ProductDraft::new`], so every draft has passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDraft {
    name: String,
    description: String,
    price: u64,
}

impl ProductDraft {
    /// Trim and validate raw input.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: u64,
    ) -> Result<Self, DomainError> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LEN {
            return Err(DomainError::validation(format!(
                "product name cannot exceed {MAX_NAME_LEN} characters"
            )));
        }

        if price > MAX_PRICE {
            return Err(DomainError::validation("price is out of range"));
        }

        Ok(Self {
            name,
            description: description.into().trim().to_string(),
            price,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Price in smallest currency unit (e.g., cents).
    pub fn price(&self) -> u64 {
        self.price
    }
}

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
}

impl Product {
    pub fn from_draft(id: ProductId, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            price: draft.price,
        }
    }
}
