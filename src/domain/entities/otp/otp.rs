//! 일회용 인증 코드(OTP) 엔티티
//!
//! 사용자당 한 건만 존재합니다(`user_id` 유니크). 재발급하면 기존 문서가 교체되고,
//! 검증에 성공하거나 만료가 확인되면 삭제됩니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Otp {
    #[serde(rename = "_id")]
    pub id: String,
    pub user_id: String,
    /// bcrypt 해시. 코드 원문은 저장하지 않습니다.
    pub code_hash: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Otp {
    pub fn new(user_id: &str, code_hash: String) -> Self {
        let now = DateTime::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            code_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// 마지막 발급 시각(`updated_at`)으로부터 `window_minutes`가 지났는지 확인합니다.
    pub fn is_expired(&self, now: DateTime, window_minutes: i64) -> bool {
        let window_millis = window_minutes.saturating_mul(60_000);
        now.timestamp_millis() - self.updated_at.timestamp_millis() > window_millis
    }
}
