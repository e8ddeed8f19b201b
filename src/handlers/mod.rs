//! # HTTP Request Handlers Module
//!
//! HTTP 요청을 처리하는 핸들러 함수들입니다. 요청 본문/쿼리를 `validator`로 검증하고,
//! 서비스를 `instance()`로 가져와 호출한 뒤 JSON으로 응답합니다.
//!
//! ```text
//! Client ──▶ Routes (+AuthMiddleware) ──▶ Handlers ──▶ Services ──▶ Repositories
//! ```
//!
//! 모든 에러는 `AppError`로 전파되어 `{"statusCode", "message", "error"}` 본문이 됩니다.
//!
//! ## 모듈 구성
//!
//! - **`auth`**: `POST /auth/sign-up`, `/auth/sign-in`, `/auth/refresh-token`, `/auth/reset-password`
//! - **`otp`**: `POST /otp/send`, `/otp/check`
//! - **`cleanup_events`**: `/cleanup-event` 이하 생성/수정/조회/목록/참가
//!
//! ```rust,ignore
//! #[post("/sign-in")]
//! pub async fn sign_in(payload: web::Json<SignInRequest>) -> Result<HttpResponse, AppError> {
//!     payload.validate()?;
//!     let tokens = AuthService::instance().sign_in(payload.into_inner()).await?;
//!     Ok(token_response(tokens))
//! }
//! ```

pub mod auth;
pub mod otp;
pub mod cleanup_events;
