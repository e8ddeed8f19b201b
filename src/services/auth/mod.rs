//! 인증 및 보안 서비스 모듈
//!
//! - [`TokenService`] - JWT 액세스/리프레시 토큰 발급과 검증
//! - [`AuthService`] - 회원가입, 로그인, 토큰 갱신(폐기 목록 포함), 요청 인증, 비밀번호 재설정
//!
//! # Examples
//!
//! ```rust,ignore
//! use crate::services::auth::AuthService;
//!
//! let auth_service = AuthService::instance();
//! let tokens = auth_service.sign_in(request).await?;
//! ```

pub mod token_service;
pub mod auth_service;

pub use token_service::*;
pub use auth_service::*;
