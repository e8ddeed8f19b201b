//! 비즈니스 로직을 담당하는 서비스 계층 모듈
//!
//! 서비스는 생성자에서 저장소/인프라 trait 객체를 받고, 기동 시
//! [`crate::core::registry::ServiceLocator`]에 등록되어 `instance()`로 조회됩니다.
//!
//! - [`auth`] - 가입/로그인, JWT 발급과 검증, 리프레시 교체, 요청 인증
//! - [`otp`] - 일회용 코드 발급/검증
//! - [`cleanup_events`] - 클린업 이벤트와 참가 관리, 캐시
//! - [`mail`] - SMTP 메일 발송
//! - [`geocoding`] - Nominatim 역지오코딩 (선형 백오프 재시도)
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AuthService;
//!
//! let tokens = AuthService::instance().sign_in(request).await?;
//! ```

pub mod auth;
pub mod otp;
pub mod cleanup_events;
pub mod mail;
pub mod geocoding;
