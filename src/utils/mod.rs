//! 공통 유틸리티 함수 모듈
//!
//! # Modules
//!
//! - [`string_utils`] - 쿼리/입력 문자열 정리와 UUID 검증
//! - [`time`] - `bson::DateTime` ↔ `chrono::DateTime<Utc>` 변환
//! - [`retry`] - 선형 백오프 재시도 (Nominatim 호출)

pub mod string_utils;
pub mod time;
pub mod retry;
