use serde::{Deserialize, Serialize};

/// 인증 성공 응답. 리프레시 토큰은 본문이 아닌 `refreshToken` 쿠키로 전달됩니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
}
