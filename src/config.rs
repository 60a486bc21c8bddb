//! Service configuration from environment variables (with `.env` support)

use crate::auth::jwt::DEFAULT_TOKEN_TTL_SECS;
use anyhow::{bail, Context, Result};
use bcrypt::DEFAULT_COST;
use chrono::Duration;
use std::env;
use std::ops::RangeInclusive;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use tracing::warn;

const DEV_JWT_SECRET: &str = "dev-secret-change-in-production-minimum-32-characters";

/// Work factors bcrypt accepts
const BCRYPT_COST_RANGE: RangeInclusive<u32> = 4..=31;

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_secs: i64,
    pub bcrypt_cost: u32,
    pub catalog_path: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| "0.0.0.0".to_string());

        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse::<u16>()
            .context("Invalid PORT")?;

        let jwt_secret = match lookup("JWT_SECRET").filter(|s| !s.trim().is_empty()) {
            Some(secret) => secret,
            None => {
                warn!("⚠️  JWT_SECRET not set, using development secret. CHANGE IN PRODUCTION!");
                DEV_JWT_SECRET.to_string()
            }
        };

        let jwt_ttl_secs = lookup("JWT_TTL_SECS")
            .map(|v| v.parse::<i64>())
            .transpose()
            .context("Invalid JWT_TTL_SECS")?
            .filter(|&v| v > 0)
            .unwrap_or(DEFAULT_TOKEN_TTL_SECS);
        if Duration::try_seconds(jwt_ttl_secs).is_none() {
            bail!("Invalid JWT_TTL_SECS: {jwt_ttl_secs} is out of range");
        }

        let bcrypt_cost = lookup("BCRYPT_COST")
            .map(|v| v.parse::<u32>())
            .transpose()
            .context("Invalid BCRYPT_COST")?
            .unwrap_or(DEFAULT_COST);
        if !BCRYPT_COST_RANGE.contains(&bcrypt_cost) {
            bail!(
                "Invalid BCRYPT_COST: {bcrypt_cost} is outside {}..={}",
                BCRYPT_COST_RANGE.start(),
                BCRYPT_COST_RANGE.end()
            );
        }

        let catalog_path = lookup("CATALOG_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            bind_addr,
            port,
            jwt_secret,
            jwt_ttl_secs,
            bcrypt_cost,
            catalog_path,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.bind_addr, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address {}:{}", self.bind_addr, self.port))
    }
}

/// Load `.env` from the working directory (and parents), then from the crate root
pub fn load_env() {
    let _ = dotenv::dotenv();

    let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
    if manifest_env.exists() {
        let _ = dotenv::from_path(&manifest_env);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup_from(&[])).unwrap();

        assert_eq!(config.port, 3000);
        assert_eq!(config.bind_addr, "0.0.0.0");
        assert_eq!(config.jwt_secret, DEV_JWT_SECRET);
        assert_eq!(config.jwt_ttl_secs, 3600);
        assert_eq!(config.bcrypt_cost, DEFAULT_COST);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.socket_addr().unwrap().port(), 3000);
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("BIND_ADDR", "127.0.0.1"),
            ("PORT", "8081"),
            ("JWT_SECRET", "s3cret"),
            ("JWT_TTL_SECS", "120"),
            ("BCRYPT_COST", "4"),
            ("CATALOG_PATH", "/tmp/books.json"),
        ]))
        .unwrap();

        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:8081");
        assert_eq!(config.jwt_secret, "s3cret");
        assert_eq!(config.jwt_ttl_secs, 120);
        assert_eq!(config.bcrypt_cost, 4);
        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/books.json")));
    }

    #[test]
    fn test_invalid_port_rejected() {
        let result = Config::from_lookup(lookup_from(&[("PORT", "not-a-port")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_non_positive_ttl_falls_back() {
        let config = Config::from_lookup(lookup_from(&[("JWT_TTL_SECS", "0")])).unwrap();
        assert_eq!(config.jwt_ttl_secs, 3600);
    }

    #[test]
    fn test_out_of_range_ttl_rejected() {
        let huge = i64::MAX.to_string();
        let result = Config::from_lookup(lookup_from(&[("JWT_TTL_SECS", huge.as_str())]));
        let err = result.unwrap_err();
        assert!(err.to_string().contains("JWT_TTL_SECS"));
    }

    #[test]
    fn test_bcrypt_cost_bounds() {
        for cost in ["3", "32", "0"] {
            let result = Config::from_lookup(lookup_from(&[("BCRYPT_COST", cost)]));
            assert!(result.is_err(), "cost {cost} should be rejected");
        }

        for cost in ["4", "31"] {
            let config = Config::from_lookup(lookup_from(&[("BCRYPT_COST", cost)])).unwrap();
            assert_eq!(config.bcrypt_cost.to_string(), cost);
        }
    }
}
