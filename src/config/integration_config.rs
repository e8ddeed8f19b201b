//! 외부 연동 설정 (SMTP 메일, Nominatim 역지오코딩)

use std::env;
use std::time::Duration;

/// SMTP 메일 발송 설정
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub host: String,
    pub port: u16,
    pub username: Option<String>,
    pub password: Option<String>,
    /// `"Cleanup Platform <noreply@example.com>"` 형식도 허용
    pub from: String,
}

impl MailConfig {
    /// `MAIL_HOST`, `MAIL_PORT`, `MAIL_USER`, `MAIL_PASSWORD`, `MAIL_FROM`
    pub fn from_env() -> Self {
        Self {
            host: env::var("MAIL_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("MAIL_PORT")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(587),
            username: env::var("MAIL_USER").ok().filter(|value| !value.is_empty()),
            password: env::var("MAIL_PASSWORD").ok().filter(|value| !value.is_empty()),
            from: env::var("MAIL_FROM")
                .unwrap_or_else(|_| "Cleanup Platform <noreply@localhost>".to_string()),
        }
    }

    /// 인증 정보가 있을 때만 STARTTLS 릴레이를 사용합니다.
    pub fn has_credentials(&self) -> bool {
        self.username.is_some() && self.password.is_some()
    }
}

/// Nominatim 역지오코딩 설정
#[derive(Debug, Clone)]
pub struct GeocodingConfig {
    pub url: String,
    pub user_agent: String,
    pub accept_language: String,
    /// 최초 요청 이후 재시도 횟수
    pub retries: u32,
    /// 재시도 지연 단위. n번째 재시도는 `n * retry_delay`만큼 기다립니다.
    pub retry_delay: Duration,
    pub request_timeout: Duration,
}

impl GeocodingConfig {
    pub fn from_env() -> Self {
        Self {
            url: env::var("NOMINATIM_URL")
                .ok()
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| "https://nominatim.openstreetmap.org/reverse".to_string()),
            user_agent: env::var("NOMINATIM_USER_AGENT")
                .unwrap_or_else(|_| format!("cleanup-platform-backend/{}", env!("CARGO_PKG_VERSION"))),
            accept_language: env::var("NOMINATIM_ACCEPT_LANGUAGE").unwrap_or_else(|_| "uk".to_string()),
            retries: env::var("NOMINATIM_RETRIES")
                .ok()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(3),
            retry_delay: Duration::from_millis(
                env::var("NOMINATIM_RETRY_DELAY_MS")
                    .ok()
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(1000),
            ),
            request_timeout: Duration::from_secs(
                env::var("NOMINATIM_TIMEOUT_SECONDS")
                    .ok()
                    .and_then(|raw| raw.parse().ok())
                    .unwrap_or(10),
            ),
        }
    }
}
