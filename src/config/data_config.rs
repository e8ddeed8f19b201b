//! 데이터 및 서버 설정 관리 모듈
//!
//! 실행 환경, 서버 바인딩, MongoDB, Redis, 캐시 TTL 설정을 관리합니다.

use std::env;

/// 애플리케이션 실행 환경
#[derive(Debug, Clone, PartialEq)]
pub enum Environment {
    /// 개발 환경
    Development,
    /// 테스트 환경
    Test,
    /// 스테이징 환경
    Staging,
    /// 프로덕션 환경
    Production,
}

impl Environment {
    /// 현재 실행 환경을 감지합니다.
    ///
    /// `ENVIRONMENT` 또는 `NODE_ENV` 환경 변수를 확인하며,
    /// 설정되지 않은 경우 `Development`를 기본값으로 사용합니다.
    pub fn current() -> Self {
        let raw = env::var("ENVIRONMENT")
            .or_else(|_| env::var("NODE_ENV"))
            .unwrap_or_else(|_| "development".to_string());
        Self::from_str(&raw)
    }

    /// 문자열에서 Environment를 생성합니다. (대소문자 무관)
    ///
    /// 알 수 없는 값은 `Production`으로 취급합니다.
    pub fn from_str(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Environment::Development,
            "test" | "testing" => Environment::Test,
            "staging" | "stage" => Environment::Staging,
            _ => Environment::Production,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Environment::Production)
    }
}

/// 패스워드 해싱 설정
pub struct PasswordConfig;

impl PasswordConfig {
    /// 회원 비밀번호용 bcrypt cost (4-15, 기본값 8)
    pub fn bcrypt_cost() -> u32 {
        env::var("BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or(8)
    }
}

/// 서버 바인딩 설정
pub struct ServerConfig;

impl ServerConfig {
    /// 서버가 바인딩할 포트 (기본값: 4000)
    pub fn port() -> u16 {
        env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(4000)
    }

    /// 서버가 바인딩할 호스트 주소 (기본값: "0.0.0.0")
    pub fn host() -> String {
        env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string())
    }

    /// 워커 스레드 수 (기본값: 4)
    pub fn workers() -> usize {
        env::var("SERVER_WORKERS")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|workers: &usize| *workers > 0)
            .unwrap_or(4)
    }

    pub fn bind_address() -> String {
        format!("{}:{}", Self::host(), Self::port())
    }

    /// CORS 허용 Origin 목록 (쉼표 구분)
    pub fn allowed_origins() -> Vec<String> {
        env::var("CORS_ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect()
    }
}

/// 요청 속도 제한 설정
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimitConfig {
    pub per_second: u64,
    pub burst_size: u32,
}

impl RateLimitConfig {
    /// `RATE_LIMIT_PER_SECOND` (기본값 100), `RATE_LIMIT_BURST_SIZE` (기본값 200)
    pub fn from_env() -> Self {
        let per_second = env::var("RATE_LIMIT_PER_SECOND")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(100);

        let burst_size = env::var("RATE_LIMIT_BURST_SIZE")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|value| *value > 0)
            .unwrap_or(200);

        Self { per_second, burst_size }
    }
}

/// MongoDB 연결 설정
pub struct DatabaseConfig;

impl DatabaseConfig {
    pub fn uri() -> String {
        env::var("MONGODB_URI").unwrap_or_else(|_| "mongodb://localhost:27017".to_string())
    }

    pub fn database_name() -> String {
        env::var("DATABASE_NAME").unwrap_or_else(|_| "cleanup_platform_dev".to_string())
    }
}

/// Redis 연결 설정
pub struct RedisConfig;

impl RedisConfig {
    pub fn host() -> String {
        env::var("REDIS_HOST").unwrap_or_else(|_| "localhost".to_string())
    }

    pub fn port() -> u16 {
        env::var("REDIS_PORT")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .unwrap_or(6379)
    }

    /// `REDIS_URL`이 있으면 우선 사용하고, 없으면 호스트/포트로 조합합니다.
    pub fn url() -> String {
        env::var("REDIS_URL").unwrap_or_else(|_| Self::url_from(&Self::host(), Self::port()))
    }

    pub fn url_from(host: &str, port: u16) -> String {
        format!("redis://{}:{}", host, port)
    }
}

/// 캐시 TTL 설정
pub struct CacheConfig;

impl CacheConfig {
    /// 클린업 이벤트 캐시 TTL (초, 기본값 300)
    pub fn cleanup_event_ttl_seconds() -> u64 {
        env::var("CLEANUP_EVENT_CACHE_TTL")
            .ok()
            .and_then(|raw| raw.parse().ok())
            .filter(|ttl: &u64| *ttl > 0)
            .unwrap_or(300)
    }
}
