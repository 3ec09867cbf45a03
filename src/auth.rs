// ABOUTME: JWT-based authentication for the Trailfit API
// ABOUTME: Handles token generation, validation and claim extraction for the identity gate
//
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Authentication
//!
//! JWT bearer-token validation for the request layer. The identity provider is
//! treated as a black box: any party holding the signing secret can mint
//! tokens, and the server trusts the identity fields carried in the claims.
//! User rows are synced (upserted) from those claims by the auth middleware.

use crate::errors::{AppError, AppResult, ErrorCode};
use crate::models::UpsertUser;
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims for an authenticated user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// User ID (UUID string)
    pub sub: String,
    /// User email
    pub email: String,
    /// Given name, if the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Family name, if the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Avatar URL, if the provider supplies one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image_url: Option<String>,
    /// Issued-at timestamp (seconds since epoch)
    pub iat: i64,
    /// Expiration timestamp (seconds since epoch)
    pub exp: i64,
}

impl Claims {
    /// Identity fields for the user-sync upsert
    ///
    /// # Errors
    ///
    /// Returns an error if `sub` is not a valid UUID.
    pub fn identity(&self) -> AppResult<UpsertUser> {
        let id = Uuid::parse_str(&self.sub)
            .map_err(|e| AppError::auth_invalid(format!("Invalid subject claim: {e}")))?;
        Ok(UpsertUser {
            id,
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            profile_image_url: self.profile_image_url.clone(),
        })
    }
}

/// Authentication result with user context
#[derive(Debug, Clone)]
pub struct AuthResult {
    /// Authenticated user ID
    pub user_id: Uuid,
    /// Identity fields carried by the token
    pub identity: UpsertUser,
}

/// Manages JWT token generation and validation
#[derive(Clone)]
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expiry_hours: i64,
}

impl AuthManager {
    /// Create a new auth manager with the given HS256 signing secret
    #[must_use]
    pub fn new(jwt_secret: &[u8], token_expiry_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(jwt_secret),
            decoding_key: DecodingKey::from_secret(jwt_secret),
            token_expiry_hours,
        }
    }

    /// Generate a signed token for the given identity
    ///
    /// Used by the test harness and local tooling; in deployment the identity
    /// provider mints tokens with the shared secret.
    ///
    /// # Errors
    ///
    /// Returns an error if JWT encoding fails.
    pub fn generate_token(&self, identity: &UpsertUser) -> AppResult<String> {
        let now = Utc::now();
        let expiry = now + Duration::hours(self.token_expiry_hours);
        let claims = Claims {
            sub: identity.id.to_string(),
            email: identity.email.clone(),
            first_name: identity.first_name.clone(),
            last_name: identity.last_name.clone(),
            profile_image_url: identity.profile_image_url.clone(),
            iat: now.timestamp(),
            exp: expiry.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
    }

    /// Validate a token and extract its claims
    ///
    /// # Errors
    ///
    /// Returns an error if the token is expired, malformed, or carries an
    /// invalid signature.
    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => {
                    AppError::new(ErrorCode::AuthExpired, "Authentication token has expired")
                }
                _ => AppError::auth_invalid(format!("Invalid authentication token: {e}")),
            })
    }
}

/// Extract the token from an `Authorization: Bearer` header value
///
/// # Errors
///
/// Returns an error if the header does not carry a bearer token.
pub fn extract_bearer_token(auth_header: &str) -> AppResult<&str> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::auth_invalid("Authorization header must use Bearer scheme"))?
        .trim();
    if token.is_empty() {
        return Err(AppError::auth_invalid("Empty bearer token"));
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_identity() -> UpsertUser {
        UpsertUser {
            id: Uuid::new_v4(),
            email: "hiker@example.com".into(),
            first_name: Some("Alex".into()),
            last_name: None,
            profile_image_url: None,
        }
    }

    #[test]
    fn test_token_round_trip() {
        let manager = AuthManager::new(b"test-secret", 24);
        let identity = test_identity();
        let token = manager.generate_token(&identity).unwrap();
        let claims = manager.validate_token(&token).unwrap();
        assert_eq!(claims.sub, identity.id.to_string());
        assert_eq!(claims.email, identity.email);
        assert_eq!(claims.identity().unwrap().id, identity.id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = AuthManager::new(b"test-secret", 24);
        let other = AuthManager::new(b"other-secret", 24);
        let token = manager.generate_token(&test_identity()).unwrap();
        assert!(other.validate_token(&token).is_err());
    }

    #[test]
    fn test_expired_token_rejected() {
        let manager = AuthManager::new(b"test-secret", -1);
        let token = manager.generate_token(&test_identity()).unwrap();
        let err = manager.validate_token(&token).unwrap_err();
        assert_eq!(err.code, ErrorCode::AuthExpired);
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc").unwrap(), "abc");
        assert_eq!(extract_bearer_token("Bearer   spaced  ").unwrap(), "spaced");
        assert!(extract_bearer_token("Basic abc").is_err());
        assert!(extract_bearer_token("Bearer ").is_err());
        assert!(extract_bearer_token("").is_err());
    }
}
