//! Process configuration, read once at startup from the environment.

use std::net::SocketAddr;

use thiserror::Error;

use bazaar_auth::{PasswordError, PasswordHasher, SigningKey};

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set to a non-empty value")]
    MissingSecret,

    #[error("invalid {name}: {reason}")]
    Invalid { name: &'static str, reason: String },

    #[error(transparent)]
    Hasher(#[from] PasswordError),
}

/// Startup configuration.
///
/// No `Debug`: it holds the signing key and possibly database credentials.
pub struct ApiConfig {
    pub signing_key: SigningKey,
    pub bind_addr: SocketAddr,
    /// Postgres when set, in-memory stores otherwise.
    pub database_url: Option<String>,
    pub password_cost: PasswordCost,
}

/// Argon2 cost overrides; unset fields fall back to the library defaults.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordCost {
    pub m_cost: Option<u32>,
    pub t_cost: Option<u32>,
    pub p_cost: Option<u32>,
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let secret = lookup("JWT_SECRET").unwrap_or_default();
        let signing_key = SigningKey::new(secret).map_err(|_| ConfigError::MissingSecret)?;

        let bind_addr = lookup("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e: std::net::AddrParseError| ConfigError::Invalid {
                name: "BIND_ADDR",
                reason: e.to_string(),
            })?;

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let password_cost = PasswordCost {
            m_cost: parse_cost(&lookup, "PASSWORD_HASH_M_COST")?,
            t_cost: parse_cost(&lookup, "PASSWORD_HASH_T_COST")?,
            p_cost: parse_cost(&lookup, "PASSWORD_HASH_P_COST")?,
        };

        Ok(Self {
            signing_key,
            bind_addr,
            database_url,
            password_cost,
        })
    }

    pub fn password_hasher(&self) -> Result<PasswordHasher, ConfigError> {
        let cost = self.password_cost;
        if cost == PasswordCost::default() {
            return Ok(PasswordHasher::default());
        }
        Ok(PasswordHasher::with_cost(
            cost.m_cost.unwrap_or(PasswordHasher::DEFAULT_M_COST),
            cost.t_cost.unwrap_or(PasswordHasher::DEFAULT_T_COST),
            cost.p_cost.unwrap_or(PasswordHasher::DEFAULT_P_COST),
        )?)
    }
}

fn parse_cost(
    lookup: &impl Fn(&str) -> Option<String>,
    name: &'static str,
) -> Result<Option<u32>, ConfigError> {
    lookup(name)
        .map(|raw| {
            raw.trim().parse::<u32>().map_err(|e| ConfigError::Invalid {
                name,
                reason: e.to_string(),
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<ApiConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn secret_is_mandatory() {
        assert!(matches!(config(&[]), Err(ConfigError::MissingSecret)));
        assert!(matches!(
            config(&[("JWT_SECRET", "")]),
            Err(ConfigError::MissingSecret)
        ));
    }

    #[test]
    fn defaults_apply_when_only_the_secret_is_set() {
        let cfg = config(&[("JWT_SECRET", "s3cr3t")]).unwrap();
        assert_eq!(cfg.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert!(cfg.database_url.is_none());
        assert_eq!(cfg.password_cost, PasswordCost::default());
        assert!(cfg.password_hasher().is_ok());
    }

    #[test]
    fn blank_database_url_means_in_memory() {
        let cfg = config(&[("JWT_SECRET", "s3cr3t"), ("DATABASE_URL", "  ")]).unwrap();
        assert!(cfg.database_url.is_none());
    }

    #[test]
    fn malformed_values_are_reported_by_name() {
        let err = config(&[("JWT_SECRET", "s3cr3t"), ("BIND_ADDR", "nowhere")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("BIND_ADDR"));

        let err = config(&[("JWT_SECRET", "s3cr3t"), ("PASSWORD_HASH_T_COST", "many")])
            .err()
            .unwrap();
        assert!(err.to_string().contains("PASSWORD_HASH_T_COST"));
    }

    #[test]
    fn partial_cost_override_keeps_other_defaults() {
        let cfg = config(&[("JWT_SECRET", "s3cr3t"), ("PASSWORD_HASH_M_COST", "64")]).unwrap();
        assert_eq!(cfg.password_cost.m_cost, Some(64));
        assert!(cfg.password_hasher().is_ok());

        let cfg = config(&[("JWT_SECRET", "s3cr3t"), ("PASSWORD_HASH_P_COST", "0")]).unwrap();
        assert!(matches!(cfg.password_hasher(), Err(ConfigError::Hasher(_))));
    }
}
