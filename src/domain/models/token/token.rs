//! JWT 클레임과 발급된 토큰 쌍

use serde::{Deserialize, Serialize};

/// 액세스/리프레시 토큰 공통 클레임
///
/// `jti`는 토큰마다 새로 생성되어, 같은 초에 발급된 토큰도 서로 다른 문자열이 됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims {
    /// 사용자 ID
    pub id: String,
    pub iat: i64,
    pub exp: i64,
    pub jti: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}
