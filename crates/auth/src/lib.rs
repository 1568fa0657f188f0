//! `bazaar-auth` — authentication/authorization core.
//!
//! Password hashing, bearer-token issuance/verification, the admin role gate
//! and the ownership scope. Decoupled from HTTP; storage is reached only
//! through the [`CredentialStore`] port.

pub mod authorize;
pub mod claims;
pub mod email;
pub mod ownership;
pub mod password;
pub mod service;
pub mod store;
pub mod token;

pub use authorize::{AdminGrant, AuthzError, authorize_admin};
pub use claims::{TokenClaims, validate_claims};
pub use email::Email;
pub use ownership::OwnershipScope;
pub use password::{PasswordDigest, PasswordError, PasswordHasher};
pub use service::{AuthError, AuthService};
pub use store::{CredentialStore, StoredCredential};
pub use token::{IssuedToken, SigningKey, TOKEN_TTL_HOURS, TokenError, TokenService, TokenVerifier};
