//! JWT Token Handler
//! Mission: Generate and validate time-limited identity tokens

use crate::auth::models::Claims;
use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Default token lifetime: one hour
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// JWT Handler for token operations
pub struct JwtHandler {
    secret: String,
    ttl: Duration,
}

impl JwtHandler {
    /// Create a new JWT handler with secret key and one-hour tokens
    pub fn new(secret: String) -> Self {
        Self {
            secret,
            ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
        }
    }

    /// Create a handler with a custom token lifetime; it must be positive and fit a `Duration`
    pub fn with_ttl(secret: String, ttl_secs: i64) -> Result<Self> {
        if ttl_secs <= 0 {
            bail!("Token ttl must be positive, got {ttl_secs}s");
        }
        let ttl = Duration::try_seconds(ttl_secs)
            .with_context(|| format!("Token ttl out of range: {ttl_secs}s"))?;

        Ok(Self { secret, ttl })
    }

    pub fn ttl_secs(&self) -> i64 {
        self.ttl.num_seconds()
    }

    /// Generate a JWT token for a username, returning the token and its lifetime in seconds
    pub fn generate_token(&self, username: &str) -> Result<(String, i64)> {
        self.generate_token_at(username, Utc::now())
    }

    /// Generate a token as if issued at `now`
    pub fn generate_token_at(&self, username: &str, now: DateTime<Utc>) -> Result<(String, i64)> {
        let expiration = now
            .checked_add_signed(self.ttl)
            .context("Invalid timestamp")?;

        let claims = Claims {
            sub: username.to_string(),
            iat: now.timestamp(),
            exp: expiration.timestamp(),
        };

        debug!(
            "Generating JWT for {}, expires in {}s",
            username,
            self.ttl.num_seconds()
        );

        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")?;

        Ok((token, self.ttl.num_seconds()))
    }

    /// Validate a JWT token and extract claims
    pub fn validate_token(&self, token: &str) -> Result<Claims> {
        self.validate_token_at(token, Utc::now())
    }

    /// Validate a token against an explicit clock reading
    pub fn validate_token_at(&self, token: &str, now: DateTime<Utc>) -> Result<Claims> {
        // Expiry is checked below against `now` instead of the system clock.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.leeway = 0;

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid token")?;

        if decoded.claims.exp <= now.timestamp() {
            bail!("Token expired for {}", decoded.claims.sub);
        }

        debug!("Validated JWT for {}", decoded.claims.sub);

        Ok(decoded.claims)
    }
}
