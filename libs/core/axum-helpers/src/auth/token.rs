use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

const MAX_TTL_SECS: u64 = 10 * 365 * 24 * 60 * 60;

/// Claims carried by every issued token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthClaims {
    #[serde(rename = "userId")]
    pub user_id: Uuid,
    #[serde(rename = "isAdmin")]
    pub is_admin: bool,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Sign(#[source] jsonwebtoken::errors::Error),

    #[error("token rejected: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Issues and verifies HS256 tokens.
///
/// Stateless: no allow/deny lists, a token is valid until `exp`.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &JwtConfig) -> Self {
        // Clamped so `iat + ttl` cannot overflow.
        let ttl_secs = config.token_ttl_secs.min(MAX_TTL_SECS) as i64;
        Self {
            encoding: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding: DecodingKey::from_secret(config.secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Sign a token for `user_id`, embedding the admin flag.
    pub fn issue(&self, user_id: Uuid, is_admin: bool) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = AuthClaims {
            user_id,
            is_admin,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(TokenError::Sign)
    }

    /// Check signature and expiry, returning the decoded claims.
    pub fn verify(&self, token: &str) -> Result<AuthClaims, TokenError> {
        decode::<AuthClaims>(token, &self.decoding, &Validation::new(Algorithm::HS256))
            .map(|data| data.claims)
            .map_err(TokenError::Invalid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new(&JwtConfig::new("0123456789abcdef0123456789abcdef").unwrap())
    }

    #[test]
    fn test_issue_then_verify_carries_claims() {
        let tokens = service();
        let user_id = Uuid::now_v7();

        let token = tokens.issue(user_id, true).unwrap();
        let claims = tokens.verify(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
        assert!(claims.is_admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_claims_use_camel_case_keys() {
        let claims = AuthClaims {
            user_id: Uuid::nil(),
            is_admin: false,
            iat: 0,
            exp: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("userId").is_some());
        assert_eq!(json["isAdmin"], false);
    }

    #[test]
    fn test_verify_rejects_foreign_signature() {
        let other = TokenService::new(
            &JwtConfig::new("another-secret-that-is-also-32-chars-long").unwrap(),
        );
        let token = other.issue(Uuid::now_v7(), true).unwrap();

        assert!(matches!(service().verify(&token), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        assert!(service().verify("not.a.token").is_err());
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        let tokens = service();
        let now = Utc::now().timestamp();
        let claims = AuthClaims {
            user_id: Uuid::now_v7(),
            is_admin: true,
            iat: now - 7200,
            exp: now - 3600,
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &tokens.encoding).unwrap();

        assert!(tokens.verify(&token).is_err());
    }
}
