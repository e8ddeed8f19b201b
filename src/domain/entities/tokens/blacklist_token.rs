//! 폐기된 토큰 엔티티
//!
//! 토큰 원문 대신 SHA-256 해시를 저장합니다. `token_hash`의 유니크 인덱스가
//! 같은 토큰의 중복 폐기(동시 리프레시)를 막습니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BlacklistToken {
    #[serde(rename = "_id")]
    pub id: String,
    pub token_hash: String,
    pub user_id: String,
    pub created_at: DateTime,
}

impl BlacklistToken {
    pub fn new(token: &str, user_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            token_hash: hash_token(token),
            user_id: user_id.to_string(),
            created_at: DateTime::now(),
        }
    }
}

/// 토큰 문자열의 SHA-256 16진수 해시
pub fn hash_token(token: &str) -> String {
    let digest = Sha256::digest(token.as_bytes());
    format!("{:x}", digest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_token_is_stable_hex() {
        let first = hash_token("header.payload.signature");
        let second = hash_token("header.payload.signature");

        assert_eq!(first, second);
        assert_eq!(first.len(), 64);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, hash_token("header.payload.other"));
    }

    #[test]
    fn test_blacklist_entry_never_stores_raw_token() {
        let entry = BlacklistToken::new("raw-token", "user-1");

        assert_ne!(entry.token_hash, "raw-token");
        assert_eq!(entry.token_hash, hash_token("raw-token"));
        assert_eq!(entry.user_id, "user-1");
    }
}
