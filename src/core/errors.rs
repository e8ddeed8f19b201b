//! # Application Error Handling System
//!
//! 백엔드 서비스 전역에서 사용하는 통합 에러 타입입니다.
//! 서비스 계층은 `AppError`를 반환하고, 핸들러는 그대로 전파하면
//! [`actix_web::ResponseError`] 구현을 통해 HTTP 응답으로 변환됩니다.
//!
//! ## HTTP 응답 매핑
//!
//! | AppError | HTTP Status | 사용 시나리오 |
//! |----------|-------------|---------------|
//! | `ValidationError` | 400 Bad Request | 입력값 검증 실패, 형식이 잘못된 토큰 |
//! | `AuthenticationError` | 401 Unauthorized | 토큰 없음/만료/폐기 |
//! | `AuthorizationError` | 403 Forbidden | 잘못된 리프레시 토큰, 이벤트 소유권 없음 |
//! | `NotFound` | 404 Not Found | 사용자, OTP, 이벤트, 정착지 없음 |
//! | `ConflictError` | 409 Conflict | 중복 이메일, 잘못된 코드, 지오펜스 불일치 |
//! | `DatabaseError` | 500 | MongoDB 오류 (메시지는 응답에 노출하지 않음) |
//! | `RedisError` | 500 | 캐시 오류 (메시지는 응답에 노출하지 않음) |
//! | `ExternalServiceError` | 500 | Nominatim, SMTP 실패 |
//! | `InternalError` | 500 | 그 밖의 예상치 못한 오류 |
//!
//! ## 응답 형식
//!
//! ```json
//! { "statusCode": 409, "message": "Email already exists", "error": "Conflict" }
//! ```

use actix_web::http::StatusCode;
use actix_web::ResponseError;
use thiserror::Error;
use validator::ValidationErrors;

/// 애플리케이션 전역 에러 타입
///
/// 각 변형은 응답 메시지로 그대로 쓰이는 문자열을 담습니다.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AppError {
    /// 데이터베이스 관련 에러
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Redis 캐시 관련 에러
    #[error("Redis error: {0}")]
    RedisError(String),

    /// 입력값 검증 에러
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// 리소스 찾을 수 없음 에러
    #[error("Not found: {0}")]
    NotFound(String),

    /// 충돌/중복 에러
    #[error("Conflict error: {0}")]
    ConflictError(String),

    /// 인증 실패 에러
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// 권한 부족 에러
    #[error("Authorization error: {0}")]
    AuthorizationError(String),

    /// 외부 서비스 에러 (Nominatim, SMTP)
    #[error("External service error: {0}")]
    ExternalServiceError(String),

    /// 내부 서버 에러
    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    /// 접두사 없는 원본 메시지
    pub fn message(&self) -> &str {
        match self {
            AppError::DatabaseError(msg)
            | AppError::RedisError(msg)
            | AppError::ValidationError(msg)
            | AppError::NotFound(msg)
            | AppError::ConflictError(msg)
            | AppError::AuthenticationError(msg)
            | AppError::AuthorizationError(msg)
            | AppError::ExternalServiceError(msg)
            | AppError::InternalError(msg) => msg,
        }
    }

    /// 클라이언트에게 노출할 메시지
    ///
    /// 인프라 에러의 상세 내용은 로그에만 남깁니다.
    pub fn public_message(&self) -> &str {
        match self {
            AppError::DatabaseError(_) | AppError::RedisError(_) => "Internal server error",
            other => other.message(),
        }
    }

    /// 5xx 계열 에러인지 확인
    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthenticationError(_) => StatusCode::UNAUTHORIZED,
            AppError::AuthorizationError(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// HTTP 에러 응답을 생성합니다.
    ///
    /// 5xx 에러는 상세 원인을 서버 로그에 기록합니다.
    fn error_response(&self) -> actix_web::HttpResponse {
        let status = self.status_code();

        if status.is_server_error() {
            log::error!("{}", self);
        }

        actix_web::HttpResponse::build(status).json(serde_json::json!({
            "statusCode": status.as_u16(),
            "message": self.public_message(),
            "error": status.canonical_reason().unwrap_or("Error"),
        }))
    }
}

impl From<ValidationErrors> for AppError {
    /// `validator` 에러를 한 줄 메시지로 변환합니다.
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(flatten_validation_errors(&errors))
    }
}

/// 중첩된 검증 에러를 `field: message` 목록으로 펼칩니다.
///
/// `ValidationErrors`는 필드 순서를 보존하지 않으므로 필드 경로 순으로 정렬합니다.
pub fn flatten_validation_errors(errors: &ValidationErrors) -> String {
    let mut messages = Vec::new();
    collect_validation_messages(errors, "", &mut messages);
    messages.sort();

    if messages.is_empty() {
        "Invalid input data".to_string()
    } else {
        messages.join("; ")
    }
}

fn collect_validation_messages(errors: &ValidationErrors, prefix: &str, out: &mut Vec<String>) {
    use validator::ValidationErrorsKind;

    for (field, kind) in errors.errors() {
        let path = if prefix.is_empty() {
            field.to_string()
        } else {
            format!("{}.{}", prefix, field)
        };

        match kind {
            ValidationErrorsKind::Field(field_errors) => {
                for error in field_errors {
                    let message = error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| error.code.to_string());
                    if path == "__all__" {
                        out.push(message);
                    } else {
                        out.push(format!("{}: {}", path, message));
                    }
                }
            }
            ValidationErrorsKind::Struct(nested) => {
                collect_validation_messages(nested, &path, out);
            }
            ValidationErrorsKind::List(items) => {
                for (index, nested) in items {
                    collect_validation_messages(nested, &format!("{}[{}]", path, index), out);
                }
            }
        }
    }
}

/// 편의성을 위한 Result 타입 별칭
pub type AppResult<T> = Result<T, AppError>;

/// 외부 라이브러리 에러를 AppError로 변환하는 확장 trait
///
/// ```rust,ignore
/// let json = serde_json::to_string(&event).context("Failed to serialize cleanup event")?;
/// ```
pub trait ErrorContext<T> {
    /// 컨텍스트 정보와 함께 에러를 변환합니다.
    fn context(self, msg: &str) -> AppResult<T>;

    /// 클로저를 사용하여 지연 평가된 컨텍스트를 제공합니다.
    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn context(self, msg: &str) -> AppResult<T> {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", msg, e)))
    }

    fn with_context<F>(self, f: F) -> AppResult<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| AppError::InternalError(format!("{}: {}", f(), e)))
    }
}
