//! Bearer token extraction and JWT validation.

use super::error::ApiError;
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    /// User id.
    sub: String,
    /// Expiry, seconds since the epoch.
    exp: usize,
}

/// Validate the request's bearer JWT and return the authenticated user id.
pub fn authenticate(headers: &HeaderMap, secret: &str) -> Result<Uuid, ApiError> {
    let token = bearer_token(headers)?;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|err| ApiError::Unauthorized(format!("invalid bearer token: {}", err)))?;

    Uuid::parse_str(&data.claims.sub)
        .map_err(|_| ApiError::Unauthorized("token subject is not a user id".to_string()))
}

fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let header = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("missing authorization header".to_string()))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            ApiError::Unauthorized("authorization header is not a bearer token".to_string())
        })
}

/// Mint a token for a user. Used by operational tooling and tests; the
/// backend itself only validates.
pub fn issue_token(
    user_id: Uuid,
    secret: &str,
    ttl: Duration,
) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        exp: chrono::Utc::now().timestamp() as usize + ttl.as_secs() as usize,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}
