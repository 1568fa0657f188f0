//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// malformed identifiers). Storage and transport concerns have their own error types.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// The bare description, without the kind prefix `Display` adds.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(msg) | Self::InvalidId(msg) => msg,
        }
    }
}

/// Persistence-port failure, shared by every store abstraction.
///
/// Stores map their backend errors onto these three outcomes; callers decide
/// how each one surfaces (e.g. `NotFound` on an owner-scoped query is the
/// anti-enumeration "not found", never "forbidden").
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A uniqueness constraint rejected the write.
    #[error("duplicate record")]
    Duplicate,

    /// No row matched the (possibly owner-constrained) lookup.
    #[error("record not found")]
    NotFound,

    /// The backend could not be reached or returned something inconsistent.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_drops_the_kind_prefix() {
        let err = DomainError::validation("invalid email format");
        assert_eq!(err.to_string(), "validation failed: invalid email format");
        assert_eq!(err.message(), "invalid email format");
        assert_eq!(DomainError::invalid_id("abc").message(), "abc");
    }
}
