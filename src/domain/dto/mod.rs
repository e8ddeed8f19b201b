//! HTTP 요청/응답 DTO
//!
//! 모든 JSON 필드는 camelCase입니다.

pub mod auth;
pub mod otp;
pub mod cleanup_events;
