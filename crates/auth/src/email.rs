use core::fmt;

use serde::Serialize;

use bazaar_core::DomainError;

const MAX_LEN: usize = 254;

/// A syntactically valid, normalized (trimmed, lower-cased) email address.
///
/// Used as the login key, so normalization keeps `Alice@Example.com` and
/// `alice@example.com` the same account.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Email(String);

impl Email {
    pub fn parse(raw: &str) -> Result<Self, DomainError> {
        let email = raw.trim().to_lowercase();

        if email.is_empty() {
            return Err(DomainError::validation("email is required"));
        }
        if email.len() > MAX_LEN || email.chars().any(char::is_whitespace) {
            return Err(DomainError::validation("invalid email format"));
        }

        let Some((local, domain)) = email.split_once('@') else {
            return Err(DomainError::validation("invalid email format"));
        };
        if local.is_empty() || domain.contains('@') || !valid_domain(domain) {
            return Err(DomainError::validation("invalid email format"));
        }

        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

fn valid_domain(domain: &str) -> bool {
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|label| {
            !label.is_empty() && !label.starts_with('-') && !label.ends_with('-')
        })
}

impl fmt::Display for Email {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_case_and_whitespace() {
        let email = Email::parse("  Alice@Example.COM ").unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn rejects_malformed_addresses() {
        for raw in [
            "",
            "   ",
            "invalid-email",
            "@example.com",
            "alice@",
            "alice@localhost",
            "alice@@example.com",
            "a@b@example.com",
            "alice@exa mple.com",
            "alice@.example.com",
            "alice@example..com",
            "alice@-example.com",
        ] {
            assert!(Email::parse(raw).is_err(), "{raw:?} should be rejected");
        }
    }

    #[test]
    fn accepts_plus_addressing_and_subdomains() {
        assert!(Email::parse("bob+shop@mail.example.co.uk").is_ok());
    }
}
