//! Session token service
//!
//! Sessions are HS256 JWT bearer tokens. The subject is the user's email; the
//! display name and avatar ride along so the user row can be refreshed on
//! every authenticated request.

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::debug;
use crate::config::settings::AuthConfig;
use crate::models::user::UserIdentity;
use crate::utils::errors::{Result, StarCastError};

/// Claims carried by a session token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
}

#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    issuer: String,
    token_ttl_seconds: i64,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("issuer", &self.issuer)
            .field("token_ttl_seconds", &self.token_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    /// Create a new AuthService instance
    pub fn new(config: &AuthConfig) -> Result<Self> {
        if config.jwt_secret.is_empty() {
            return Err(StarCastError::Config("JWT secret is not configured".to_string()));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.issuer.as_str()]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
            issuer: config.issuer.clone(),
            token_ttl_seconds: i64::try_from(config.token_ttl_seconds).unwrap_or(i64::MAX),
        })
    }

    /// Sign a session token for `identity`
    pub fn issue(&self, identity: &UserIdentity) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: identity.email.clone(),
            name: identity.name.clone(),
            picture: identity.image.clone(),
            iat: now,
            exp: now.saturating_add(self.token_ttl_seconds),
            iss: self.issuer.clone(),
        };

        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    /// Check signature, expiry and issuer, returning the asserted identity
    pub fn verify(&self, token: &str) -> Result<UserIdentity> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() {
            return Err(StarCastError::Unauthenticated);
        }

        debug!(email = %claims.sub, "Session token verified");
        Ok(UserIdentity {
            email: claims.sub,
            name: claims.name,
            image: claims.picture,
        })
    }

    /// Token from an `Authorization: Bearer ...` header value
    pub fn bearer_token(header_value: &str) -> Option<&str> {
        let (scheme, token) = header_value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("bearer") {
            return None;
        }
        let token = token.trim();
        (!token.is_empty()).then_some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            issuer: "starcast".to_string(),
            token_ttl_seconds: 3600,
        }
    }

    fn identity() -> UserIdentity {
        UserIdentity {
            email: "vera@example.com".to_string(),
            name: Some("Vera Rubin".to_string()),
            image: None,
        }
    }

    #[test]
    fn test_issue_then_verify() {
        let auth = AuthService::new(&config()).unwrap();
        let token = auth.issue(&identity()).unwrap();
        assert_eq!(auth.verify(&token).unwrap(), identity());
    }

    #[test]
    fn test_rejects_other_secret() {
        let token = AuthService::new(&config()).unwrap().issue(&identity()).unwrap();

        let mut other = config();
        other.jwt_secret = "ffffffffffffffffffffffffffffffff".to_string();
        let result = AuthService::new(&other).unwrap().verify(&token);
        assert_matches!(result, Err(StarCastError::Token(_)));
    }

    #[test]
    fn test_rejects_other_issuer() {
        let token = AuthService::new(&config()).unwrap().issue(&identity()).unwrap();

        let mut other = config();
        other.issuer = "someone-else".to_string();
        assert!(AuthService::new(&other).unwrap().verify(&token).is_err());
    }

    #[test]
    fn test_rejects_expired_token() {
        let auth = AuthService::new(&config()).unwrap();
        let past = Utc::now().timestamp() - 7200;
        let claims = Claims {
            sub: "vera@example.com".to_string(),
            name: None,
            picture: None,
            iat: past,
            exp: past + 60,
            iss: "starcast".to_string(),
        };
        let token = encode(&Header::default(), &claims, &auth.encoding_key).unwrap();

        assert_matches!(auth.verify(&token), Err(StarCastError::Token(_)));
    }

    #[test]
    fn test_missing_secret() {
        let mut cfg = config();
        cfg.jwt_secret.clear();
        assert_matches!(AuthService::new(&cfg), Err(StarCastError::Config(_)));
    }

    #[test]
    fn test_bearer_token_parsing() {
        assert_eq!(AuthService::bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(AuthService::bearer_token("bearer   abc"), Some("abc"));
        assert_eq!(AuthService::bearer_token("Basic abc"), None);
        assert_eq!(AuthService::bearer_token("Bearer "), None);
        assert_eq!(AuthService::bearer_token("abc"), None);
    }
}
