//! HS256 bearer-token implementation of `IdentityProvider`.
//!
//! Verifies tokens carrying `{username, role}` claims and can issue them
//! for operators and tests. The core never calls `issue`.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use domains::models::{Identity, Role};
use domains::traits::IdentityProvider;
use domains::AppError;

/// Failure to mint a token. Verification failures are not errors of this
/// kind; they surface as `AppError::Forbidden` through the port.
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("token issuance failed: {0}")]
    Issue(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// Username.
    sub: String,
    role: Role,
    /// Expiry, seconds since the Unix epoch.
    exp: i64,
}

/// Verifies (and issues) HS256 tokens from a shared secret.
pub struct JwtIdentityProvider {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtIdentityProvider {
    pub fn new(secret: &SecretString) -> Self {
        let bytes = secret.expose_secret().as_bytes();
        Self {
            encoding: EncodingKey::from_secret(bytes),
            decoding: DecodingKey::from_secret(bytes),
            validation: Validation::new(Algorithm::HS256),
        }
    }

    /// Mints a token for `username` that expires after `ttl`.
    pub fn issue(&self, username: &str, role: Role, ttl: Duration) -> Result<String, TokenError> {
        let claims = Claims {
            sub: username.to_string(),
            role,
            exp: (Utc::now() + ttl).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }
}

#[async_trait]
impl IdentityProvider for JwtIdentityProvider {
    async fn verify(&self, token: &str) -> Result<Identity, AppError> {
        let data = decode::<Claims>(token, &self.decoding, &self.validation)
            .map_err(|err| AppError::Forbidden(format!("invalid or expired token: {err}")))?;
        Ok(Identity {
            username: data.claims.sub,
            role: data.claims.role,
        })
    }
}
