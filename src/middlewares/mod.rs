//! 미들웨어 모듈
//!
//! ActixWeb 요청 처리 파이프라인에서 사용하는 미들웨어를 제공합니다.
//!
//! # 제공 미들웨어
//!
//! ### 인증 미들웨어 (AuthMiddleware)
//! - `Authorization` 헤더의 액세스 토큰 검증 (`Bearer ` 접두사는 선택)
//! - 폐기 목록 확인 및 사용자 조회
//! - 사용자 정보를 request extension에 저장
//!
//! # 사용 방법
//!
//! ```rust,ignore
//! use actix_web::{web, App};
//! use crate::middlewares::AuthMiddleware;
//!
//! App::new()
//!     .service(
//!         web::scope("/otp")
//!             .wrap(AuthMiddleware::required())
//!             .route("/send", web::post().to(send_otp))
//!     )
//!     .service(
//!         web::resource("/cleanup-event/{id}")
//!             .route(web::get().to(get_cleanup_event))
//!     )
//! ```

pub mod auth_middleware;
mod auth_inner;

pub use auth_middleware::AuthMiddleware;
