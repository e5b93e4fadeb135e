//! Identity token generation and validation.
//!
//! Tokens are HMAC-signed JWTs carrying a [`Claims`] payload. Every decode
//! failure (bad signature, expired, malformed, unknown role) is a plain
//! error; callers must not tell them apart in responses.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use voltguard_core::roles::Role;
use voltguard_core::types::DbId;

use crate::config::{parse_or, ConfigError};

/// JWT claims embedded in every access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the user's internal database id.
    pub sub: DbId,
    pub email: String,
    pub role: Role,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4).
    pub jti: String,
}

/// Configuration for token signing and validation.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// One of HS256, HS384, HS512.
    pub algorithm: Algorithm,
    /// Token lifetime in hours (default: 24).
    pub expiration_hours: i64,
}

const DEFAULT_EXPIRATION_HOURS: i64 = 24;

impl JwtConfig {
    /// Load token configuration through `lookup`.
    ///
    /// | Env Var                | Required | Default |
    /// |------------------------|----------|---------|
    /// | `JWT_SECRET_KEY`       | **yes**  | --      |
    /// | `JWT_ALGORITHM`        | no       | `HS256` |
    /// | `JWT_EXPIRATION_HOURS` | no       | `24`    |
    pub fn from_lookup<F>(lookup: &F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = lookup("JWT_SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("JWT_SECRET_KEY"))?;

        let algorithm = match lookup("JWT_ALGORITHM") {
            None => Algorithm::HS256,
            Some(name) => parse_hmac_algorithm(&name).ok_or_else(|| ConfigError::Invalid {
                var: "JWT_ALGORITHM",
                value: name.clone(),
                reason: "expected HS256, HS384 or HS512".into(),
            })?,
        };

        let expiration_hours: i64 =
            parse_or(lookup, "JWT_EXPIRATION_HOURS", DEFAULT_EXPIRATION_HOURS)?;
        if expiration_hours <= 0 {
            return Err(ConfigError::Invalid {
                var: "JWT_EXPIRATION_HOURS",
                value: expiration_hours.to_string(),
                reason: "must be positive".into(),
            });
        }

        Ok(Self {
            secret,
            algorithm,
            expiration_hours,
        })
    }

    /// Token lifetime in seconds, as reported to clients in `expires_in`.
    pub fn expires_in_secs(&self) -> i64 {
        self.expiration_hours * 3600
    }
}

fn parse_hmac_algorithm(name: &str) -> Option<Algorithm> {
    match name.trim().to_ascii_uppercase().as_str() {
        "HS256" => Some(Algorithm::HS256),
        "HS384" => Some(Algorithm::HS384),
        "HS512" => Some(Algorithm::HS512),
        _ => None,
    }
}

/// Generate an access token for the given user, issued now.
pub fn generate_access_token(
    user_id: DbId,
    email: &str,
    role: Role,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    generate_access_token_at(user_id, email, role, config, chrono::Utc::now().timestamp())
}

/// Generate an access token with an explicit issue time (Unix seconds).
pub fn generate_access_token_at(
    user_id: DbId,
    email: &str,
    role: Role,
    config: &JwtConfig,
    issued_at: i64,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        role,
        exp: issued_at + config.expires_in_secs(),
        iat: issued_at,
        jti: Uuid::new_v4().to_string(),
    };

    encode(
        &Header::new(config.algorithm),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Validate and decode an access token, returning the embedded [`Claims`].
///
/// Checks the signature, the algorithm and the expiration.
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::new(config.algorithm),
    )?;
    Ok(token_data.claims)
}
