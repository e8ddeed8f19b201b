//! # Domain Layer Module
//!
//! 도메인 계층을 구성하는 모듈로, 영속 엔티티와 API 계약(DTO), 인증/외부 연동 모델을 담습니다.
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── Entities  - MongoDB에 저장되는 문서 (User, Otp, CleanupEvent, Settlement ...)
//! ├── DTOs      - HTTP 요청/응답 계약 (camelCase JSON)
//! └── Models    - 토큰 클레임, 인증 사용자, Nominatim 응답
//!      │
//!      ▼
//! Application Layer (Services)
//!      │
//!      ▼
//! Infrastructure Layer (Repositories, DB, Cache)
//! ```
//!
//! ## 규칙
//!
//! - 엔티티의 ID는 UUID v4 문자열이며 `_id` 필드에 저장됩니다.
//! - 엔티티의 시각은 `bson::DateTime`, DTO의 시각은 `chrono::DateTime<Utc>`(RFC 3339)입니다.
//!   변환은 [`crate::utils::time`]을 사용합니다.
//! - 입력 DTO는 `validator::Validate`를 구현하고, 핸들러에서 `payload.validate()?`로 검증합니다.

pub mod entities;
pub mod dto;
pub mod models;
