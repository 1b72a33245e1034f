use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when verifying a caller's identity
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("Missing bearer token")]
    MissingToken,

    #[error("Invalid token: {0}")]
    InvalidToken(#[from] jsonwebtoken::errors::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

/// Verifies bearer tokens and yields the authenticated user id
///
/// Mutating catalog operations require an identity; absence must be
/// rejected with Unauthorized by the caller.
#[derive(Clone)]
pub struct IdentityVerifier {
    decoding_key: DecodingKey,
}

impl IdentityVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Extract and verify the user id from an Authorization header value
    pub fn current_user_id(&self, authorization: Option<&str>) -> Result<String, IdentityError> {
        let token = authorization
            .and_then(|header| header.strip_prefix("Bearer "))
            .ok_or(IdentityError::MissingToken)?;

        let data = decode::<Claims>(token, &self.decoding_key, &Validation::default())?;
        Ok(data.claims.sub)
    }
}
