use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use bazaar_core::UserId;

use crate::token::TokenError;

/// JWT claims carried by a bearer token.
///
/// Deliberately role-free: admin status is re-read from the credential store
/// on every admin-gated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the user identifier, as a decimal string.
    pub sub: String,

    /// Issued-at (unix seconds).
    pub iat: i64,

    /// Expiration (unix seconds).
    pub exp: i64,

    /// Unique token id.
    pub jti: Uuid,
}

impl TokenClaims {
    pub fn new(user_id: UserId, issued_at: DateTime<Utc>, ttl: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
            jti: Uuid::new_v4(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Parse the subject back into a user identifier.
    pub fn subject(&self) -> Result<UserId, TokenError> {
        self.sub.parse().map_err(|_| TokenError::InvalidSubject)
    }
}

/// Deterministically validate the time window of decoded claims.
///
/// Signature verification happens before this; this only looks at the clock.
/// Expiry is strict: a token is dead at the second it expires.
pub fn validate_claims(claims: &TokenClaims, now: DateTime<Utc>) -> Result<(), TokenError> {
    if claims.exp <= claims.iat {
        return Err(TokenError::Malformed);
    }
    if now.timestamp() >= claims.exp {
        return Err(TokenError::Expired);
    }
    Ok(())
}
