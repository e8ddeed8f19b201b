//! User Entity Implementation
//!
//! 이메일/비밀번호로 가입한 플랫폼 사용자입니다.

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 사용자 엔티티
///
/// `users` 컬렉션에 저장되며 `email`에 유니크 인덱스가 걸려 있습니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct User {
    #[serde(rename = "_id")]
    pub id: String,
    /// 사용자 이메일 (unique)
    pub email: String,
    /// 표시 이름. 가입 시 이메일의 로컬 파트로 채워집니다.
    pub name: String,
    /// bcrypt 해시
    pub password_hash: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl User {
    /// 새 로컬 사용자 생성
    pub fn new(email: String, password_hash: String) -> Self {
        let now = DateTime::now();
        let name = Self::name_from_email(&email);

        Self {
            id: uuid::Uuid::new_v4().to_string(),
            email,
            name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// `"jane.doe@example.com"` → `"jane.doe"`
    pub fn name_from_email(email: &str) -> String {
        email.split('@').next().unwrap_or(email).to_string()
    }
}
