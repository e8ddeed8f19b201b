//! API 라우트 설정 모듈
//!
//! 기능별 엔드포인트를 스코프로 묶어 등록합니다.
//!
//! | 스코프 | 인증 | 엔드포인트 |
//! |--------|------|------------|
//! | `/auth` | `reset-password`만 필요 | `sign-up`, `sign-in`, `refresh-token`, `reset-password` |
//! | `/otp` | 스코프 전체 필요 | `send`, `check` |
//! | `/cleanup-event` | 쓰기만 필요 | `create`, `{id}`, `{id}/take-part`, 목록 |
//! | `/health` | 불필요 | 헬스체크 |
//!
//! JSON 본문과 쿼리 문자열 파싱 실패는 표준 에러 본문의 400 응답으로 바뀝니다.
//!
//! # Examples
//!
//! ```rust,ignore
//! use actix_web::App;
//!
//! let app = App::new().configure(configure_all_routes);
//! ```

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::{web, HttpRequest};
use serde_json::json;

use crate::core::errors::AppError;
use crate::handlers;
use crate::middlewares::AuthMiddleware;

/// 모든 라우트를 설정합니다
pub fn configure_all_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler));

    // Health check endpoint
    cfg.service(health_check);

    configure_auth_routes(cfg);
    configure_otp_routes(cfg);
    configure_cleanup_event_routes(cfg);
}

/// 인증 라우트
///
/// ```bash
/// curl -X POST http://localhost:4000/auth/sign-in \
///   -H "Content-Type: application/json" \
///   -d '{"email":"user@example.com","password":"secret1"}'
/// ```
fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(handlers::auth::sign_up)
            .service(handlers::auth::sign_in)
            .service(handlers::auth::refresh_token)
            .service(handlers::auth::reset_password),
    );
}

fn configure_otp_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/otp")
            .wrap(AuthMiddleware::required())
            .service(handlers::otp::send_otp)
            .service(handlers::otp::check_otp),
    );
}

/// 클린업 이벤트 라우트
///
/// `/create`는 `/{id}`보다 먼저 등록해야 합니다.
fn configure_cleanup_event_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/cleanup-event")
            .service(handlers::cleanup_events::create_cleanup_event)
            .service(handlers::cleanup_events::get_cleanup_events)
            .service(handlers::cleanup_events::take_part)
            .service(handlers::cleanup_events::leave)
            .service(handlers::cleanup_events::get_cleanup_event)
            .service(handlers::cleanup_events::update_cleanup_event),
    );
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("JSON 본문 파싱 실패: {}", err);
    AppError::ValidationError(err.to_string()).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::debug!("쿼리 문자열 파싱 실패: {}", err);
    AppError::ValidationError(err.to_string()).into()
}

/// 서비스 상태를 확인하는 헬스체크 엔드포인트
///
/// ```bash
/// curl http://localhost:4000/health
/// ```
///
/// Response:
/// ```json
/// {
///   "status": "healthy",
///   "service": "cleanup_platform_backend",
///   "version": "0.1.0",
///   "timestamp": "2025-01-01T00:00:00Z"
/// }
/// ```
#[actix_web::get("/health")]
async fn health_check() -> actix_web::HttpResponse {
    actix_web::HttpResponse::Ok().json(json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, App};
    use serde_json::Value;

    #[actix_web::test]
    async fn test_health_check() {
        let app = test::init_service(App::new().configure(configure_all_routes)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["service"], "cleanup_platform_backend");
    }
}
