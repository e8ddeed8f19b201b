//! JWT 토큰 관리 서비스 구현
//!
//! 액세스 토큰과 리프레시 토큰의 생성과 검증을 담당합니다.
//! 두 토큰 모두 같은 `JWT_SECRET`으로 HS256 서명되며 수명만 다릅니다.

use std::sync::Arc;

use chrono::Utc;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;

use crate::config::JwtConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::models::token::{TokenClaims, TokenPair};

/// 토큰 검증 실패 원인
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is not valid")]
    Invalid,
}

/// JWT 토큰 관리 서비스
pub struct TokenService {
    secret: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl TokenService {
    pub fn new(secret: String, access_ttl_seconds: i64, refresh_ttl_seconds: i64) -> Self {
        Self {
            secret,
            access_ttl_seconds,
            refresh_ttl_seconds,
        }
    }

    /// 환경 변수(`JWT_SECRET`, `JWT_ACCESS_EXPIRES_IN`, `JWT_REFRESH_EXPIRES_IN`)로 생성합니다.
    pub fn from_env() -> Self {
        Self::new(
            JwtConfig::secret(),
            JwtConfig::access_expires_in_seconds(),
            JwtConfig::refresh_expires_in_seconds(),
        )
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    pub fn create_access_token(&self, user_id: &str) -> AppResult<String> {
        self.sign(user_id, self.access_ttl_seconds)
    }

    pub fn create_refresh_token(&self, user_id: &str) -> AppResult<String> {
        self.sign(user_id, self.refresh_ttl_seconds)
    }

    pub fn create_token_pair(&self, user_id: &str) -> AppResult<TokenPair> {
        Ok(TokenPair {
            access_token: self.create_access_token(user_id)?,
            refresh_token: self.create_refresh_token(user_id)?,
        })
    }

    fn sign(&self, user_id: &str, ttl_seconds: i64) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let claims = TokenClaims {
            id: user_id.to_string(),
            iat: now,
            exp: now + ttl_seconds,
            jti: uuid::Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            log::error!("JWT 서명 실패: {}", e);
            AppError::InternalError("Internal server error".to_string())
        })
    }

    /// 토큰을 검증하고 사용자 ID를 반환합니다.
    pub fn verify_token(&self, token: &str) -> Result<String, TokenError> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims.id)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        })
    }

    /// `Authorization` 헤더 값에서 토큰을 꺼냅니다. `Bearer ` 접두사는 없어도 됩니다.
    pub fn extract_bearer_token(auth_header: &str) -> &str {
        auth_header
            .strip_prefix("Bearer ")
            .unwrap_or(auth_header)
            .trim()
    }
}

impl Service for TokenService {
    fn name(&self) -> &str {
        "token"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> TokenService {
        TokenService::new("test-secret".to_string(), 900, 604_800)
    }

    #[test]
    fn test_access_token_roundtrip() {
        let service = service();
        let token = service.create_access_token("user-1").unwrap();

        assert_eq!(service.verify_token(&token), Ok("user-1".to_string()));
    }

    #[test]
    fn test_tokens_are_unique_per_issue() {
        let service = service();
        let pair = service.create_token_pair("user-1").unwrap();
        let again = service.create_token_pair("user-1").unwrap();

        assert_ne!(pair.access_token, pair.refresh_token);
        assert_ne!(pair.refresh_token, again.refresh_token);
    }

    #[test]
    fn test_expired_token_is_reported_as_expired() {
        let service = TokenService::new("test-secret".to_string(), -60, -60);
        let token = service.create_access_token("user-1").unwrap();

        assert_eq!(service.verify_token(&token), Err(TokenError::Expired));
    }

    #[test]
    fn test_foreign_signature_is_invalid() {
        let foreign = TokenService::new("other-secret".to_string(), 900, 900);
        let token = foreign.create_access_token("user-1").unwrap();

        assert_eq!(service().verify_token(&token), Err(TokenError::Invalid));
        assert_eq!(service().verify_token("garbage"), Err(TokenError::Invalid));
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(TokenService::extract_bearer_token("Bearer abc.def"), "abc.def");
        assert_eq!(TokenService::extract_bearer_token("abc.def"), "abc.def");
    }
}
