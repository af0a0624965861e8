//! Bearer token authentication module
//!
//! Provides the `TokenIssuer` for signing and validating HS256 bearer tokens
//! and the `OptionalAuth` extractor for Axum handlers. Tokens are issued by
//! `POST /login` and carry the username in the `sub` claim.

pub mod password;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

/// Claims carried by issued tokens
///
/// There is no `exp` claim: a token stays valid until the signing secret
/// rotates.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (username)
    pub sub: String,
    /// Issued-at time (seconds since epoch)
    pub iat: i64,
}

/// Signs and validates HS256 bearer tokens with a shared secret
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenIssuer {
    /// Create a token issuer from the signing secret
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Issued tokens carry no exp claim
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Issue a signed token for the given username
    pub fn issue(&self, username: &str) -> Result<String, ApiError> {
        let claims = Claims {
            sub: username.to_string(),
            iat: chrono::Utc::now().timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!(error = %e, "Failed to sign token");
            ApiError::internal("Failed to issue token")
        })
    }

    /// Validate a token and extract its claims
    pub fn validate(&self, token: &str) -> Result<Claims, ApiError> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    ApiError::auth_error("AUTH_INVALID_TOKEN", "Invalid token signature")
                }
                _ => ApiError::auth_error(
                    "AUTH_INVALID_TOKEN",
                    format!("Token validation failed: {}", e),
                ),
            },
        )?;

        Ok(token_data.claims)
    }
}

/// Extract the Bearer token from the Authorization header
fn extract_bearer_token(parts: &Parts) -> Result<&str, ApiError> {
    let auth_header = parts
        .headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| {
            ApiError::auth_error("AUTH_MISSING_TOKEN", "Missing Authorization header")
        })?;

    let auth_value = auth_header.to_str().map_err(|_| {
        ApiError::auth_error(
            "AUTH_INVALID_TOKEN",
            "Invalid Authorization header encoding",
        )
    })?;

    auth_value.strip_prefix("Bearer ").ok_or_else(|| {
        ApiError::auth_error(
            "AUTH_INVALID_TOKEN",
            "Authorization header must use Bearer scheme",
        )
    })
}

/// Identity attached to a request after the auth gate has run.
///
/// When the deployment requires auth, the extractor validates the
/// `Authorization: Bearer <token>` header and rejects the request with 401
/// and a structured error code on any failure. When the deployment runs
/// open, the header is ignored entirely and the identity is `None`.
pub struct OptionalAuth(pub Option<String>);

impl OptionalAuth {
    /// Identity for log lines; "anonymous" when the deployment runs open
    pub fn actor(&self) -> &str {
        self.0.as_deref().unwrap_or("anonymous")
    }
}

impl FromRequestParts<AppState> for OptionalAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        if !state.require_auth {
            return Ok(OptionalAuth(None));
        }

        let token = extract_bearer_token(parts)?;
        let claims = state.token_issuer.validate(token)?;

        Ok(OptionalAuth(Some(claims.sub)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> TokenIssuer {
        TokenIssuer::new(b"unit-test-secret")
    }

    #[test]
    fn test_issue_and_validate_roundtrip() {
        let issuer = issuer();
        let token = issuer.issue("alice").unwrap();

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert!(claims.iat > 0);
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let err = issuer().validate("not-a-valid-token").unwrap_err();
        match err {
            ApiError::AuthError { code, .. } => assert_eq!(code, "AUTH_INVALID_TOKEN"),
            other => panic!(
                "Expected AuthError with AUTH_INVALID_TOKEN, got: {:?}",
                other
            ),
        }
    }

    #[test]
    fn test_token_from_other_secret_is_rejected() {
        let token = TokenIssuer::new(b"other-secret").issue("alice").unwrap();

        let err = issuer().validate(&token).unwrap_err();
        match err {
            ApiError::AuthError { code, .. } => assert_eq!(code, "AUTH_INVALID_TOKEN"),
            other => panic!(
                "Expected AuthError with AUTH_INVALID_TOKEN, got: {:?}",
                other
            ),
        }
    }

    #[test]
    fn test_tampered_token_is_rejected() {
        let issuer = issuer();
        let token = issuer.issue("alice").unwrap();

        // Flip the final signature character
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(issuer.validate(&tampered).is_err());
    }

    #[test]
    fn test_extract_bearer_token_missing_header() {
        let (parts, _) = axum::http::Request::builder()
            .body(())
            .unwrap()
            .into_parts();

        let err = extract_bearer_token(&parts).unwrap_err();
        match err {
            ApiError::AuthError { code, .. } => assert_eq!(code, "AUTH_MISSING_TOKEN"),
            other => panic!(
                "Expected AuthError with AUTH_MISSING_TOKEN, got: {:?}",
                other
            ),
        }
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        let (parts, _) = axum::http::Request::builder()
            .header("Authorization", "Basic dXNlcjpwYXNz")
            .body(())
            .unwrap()
            .into_parts();

        let err = extract_bearer_token(&parts).unwrap_err();
        match err {
            ApiError::AuthError { code, .. } => assert_eq!(code, "AUTH_INVALID_TOKEN"),
            other => panic!(
                "Expected AuthError with AUTH_INVALID_TOKEN, got: {:?}",
                other
            ),
        }
    }

    #[test]
    fn test_extract_bearer_token_success() {
        let (parts, _) = axum::http::Request::builder()
            .header("Authorization", "Bearer my-bearer-token")
            .body(())
            .unwrap()
            .into_parts();

        let token = extract_bearer_token(&parts).unwrap();
        assert_eq!(token, "my-bearer-token");
    }
}
