//! Token Service: HS256-signed, 24h bearer tokens.
//!
//! Stateless. No refresh, no revocation list; a token lives until `exp`.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use bazaar_core::UserId;

use crate::claims::{TokenClaims, validate_claims};

/// Lifetime of every issued token.
pub const TOKEN_TTL_HOURS: i64 = 24;

/// Why a token was rejected or could not be issued.
///
/// The variants exist for internal logs only; over the network every
/// verification failure is the same "invalid token".
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    #[error("signing key must not be empty")]
    EmptyKey,

    #[error("token is malformed")]
    Malformed,

    #[error("token signature does not verify")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token subject is not a user id")]
    InvalidSubject,

    #[error("token encoding failed: {0}")]
    Encoding(String),
}

/// Process-wide token signing secret.
///
/// Provisioned once at startup and never mutated. `Debug` is redacted.
#[derive(Clone)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let secret = secret.into();
        if secret.is_empty() {
            return Err(TokenError::EmptyKey);
        }
        Ok(Self(secret))
    }

    fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl core::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str("SigningKey(<redacted>)")
    }
}

/// A freshly minted bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Verifies bearer tokens (the seam the identity middleware depends on).
pub trait TokenVerifier: Send + Sync {
    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError>;
}

/// Issues and verifies HS256 bearer tokens with a single signing key.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenService {
    pub fn new(key: &SigningKey) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Expiry is checked by `validate_claims` against an injectable clock,
        // strictly and without leeway.
        validation.validate_exp = false;
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(key.as_bytes()),
            decoding: DecodingKey::from_secret(key.as_bytes()),
            validation,
            ttl: Duration::hours(TOKEN_TTL_HOURS),
        }
    }

    pub fn issue(&self, user_id: UserId) -> Result<IssuedToken, TokenError> {
        self.issue_at(user_id, Utc::now())
    }

    pub fn issue_at(&self, user_id: UserId, now: DateTime<Utc>) -> Result<IssuedToken, TokenError> {
        let claims = TokenClaims::new(user_id, now, self.ttl);
        let expires_at = claims.expires_at().ok_or(TokenError::Malformed)?;

        let token = jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    pub fn verify(&self, token: &str) -> Result<UserId, TokenError> {
        self.verify_at(token, Utc::now())
    }
}

impl TokenVerifier for TokenService {
    /// Signature first, then expiry, then subject.
    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map_err(classify)?;

        validate_claims(&data.claims, now)?;
        data.claims.subject()
    }
}

fn classify(err: jsonwebtoken::errors::Error) -> TokenError {
    match err.kind() {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> TokenService {
        TokenService::new(&SigningKey::new(secret).unwrap())
    }

    #[test]
    fn issued_token_verifies_to_its_subject() {
        let tokens = service("test-secret");
        let issued = tokens.issue(UserId::from_raw(17)).unwrap();
        assert_eq!(tokens.verify(&issued.token), Ok(UserId::from_raw(17)));
    }

    #[test]
    fn expiry_is_twenty_four_hours_after_issuance() {
        let tokens = service("test-secret");
        let now = Utc::now();
        let issued = tokens.issue_at(UserId::from_raw(1), now).unwrap();
        assert_eq!(issued.expires_at.timestamp(), (now + Duration::hours(24)).timestamp());
    }

    #[test]
    fn expired_token_fails_despite_intact_signature() {
        let tokens = service("test-secret");
        let now = Utc::now();
        let issued = tokens
            .issue_at(UserId::from_raw(1), now - Duration::hours(25))
            .unwrap();

        assert_eq!(tokens.verify_at(&issued.token, now), Err(TokenError::Expired));
    }

    #[test]
    fn token_is_dead_exactly_at_expiry() {
        let tokens = service("test-secret");
        let now = Utc::now();
        let issued = tokens.issue_at(UserId::from_raw(1), now).unwrap();

        let last_valid = issued.expires_at - Duration::seconds(1);
        assert!(tokens.verify_at(&issued.token, last_valid).is_ok());
        assert_eq!(
            tokens.verify_at(&issued.token, issued.expires_at),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn token_from_another_key_is_rejected() {
        let ours = service("secret-one");
        let theirs = service("secret-two");
        let issued = theirs.issue(UserId::from_raw(1)).unwrap();

        assert_eq!(ours.verify(&issued.token), Err(TokenError::BadSignature));
    }

    #[test]
    fn bad_signature_wins_over_expiry() {
        let ours = service("secret-one");
        let theirs = service("secret-two");
        let now = Utc::now();
        let stale = theirs
            .issue_at(UserId::from_raw(1), now - Duration::hours(48))
            .unwrap();

        assert_eq!(ours.verify_at(&stale.token, now), Err(TokenError::BadSignature));
    }

    #[test]
    fn garbage_and_tampered_tokens_are_rejected() {
        let tokens = service("test-secret");
        assert_eq!(tokens.verify("not-a-token"), Err(TokenError::Malformed));
        assert_eq!(tokens.verify(""), Err(TokenError::Malformed));

        let issued = tokens.issue(UserId::from_raw(1)).unwrap();
        let other = tokens.issue(UserId::from_raw(2)).unwrap();
        let forged_payload = other.token.split('.').nth(1).unwrap();
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        parts[1] = forged_payload;
        let tampered = parts.join(".");
        assert_eq!(tokens.verify(&tampered), Err(TokenError::BadSignature));
    }

    #[test]
    fn empty_signing_key_is_refused() {
        assert_eq!(SigningKey::new("").unwrap_err(), TokenError::EmptyKey);
        assert_eq!(format!("{:?}", SigningKey::new("s3cr3t").unwrap()), "SigningKey(<redacted>)");
    }
}
