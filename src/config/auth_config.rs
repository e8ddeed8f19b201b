//! # Authentication Configuration Module
//!
//! JWT 토큰, 리프레시 쿠키, OTP 관련 설정을 관리하는 모듈입니다.
//!
//! ## 환경 변수
//!
//! ```bash
//! export JWT_SECRET="your-super-secret-jwt-key"
//! export JWT_ACCESS_EXPIRES_IN="15m"     # 초 단위 숫자 또는 s/m/h/d 접미사
//! export JWT_REFRESH_EXPIRES_IN="7d"
//! export OTP_EXPIRES_IN_MINUTES="15"
//! export OTP_BCRYPT_COST="10"
//! ```

use std::env;

use crate::config::Environment;

pub struct JwtConfig;

impl JwtConfig {
    pub fn secret() -> String {
        env::var("JWT_SECRET").unwrap_or_else(|_| {
            log::warn!("JWT_SECRET not set, using default (not secure for production!)");
            "your-secret-key".to_string()
        })
    }

    /// 액세스 토큰 수명 (초, 기본값 15분)
    pub fn access_expires_in_seconds() -> i64 {
        Self::duration_from_env("JWT_ACCESS_EXPIRES_IN", 15 * 60)
    }

    /// 리프레시 토큰 수명 (초, 기본값 7일)
    pub fn refresh_expires_in_seconds() -> i64 {
        Self::duration_from_env("JWT_REFRESH_EXPIRES_IN", 7 * 24 * 60 * 60)
    }

    fn duration_from_env(key: &str, default_seconds: i64) -> i64 {
        match env::var(key) {
            Ok(raw) => parse_duration_seconds(&raw).unwrap_or_else(|| {
                log::warn!("{} 값 '{}'을 해석할 수 없습니다. 기본값 {}초 사용", key, raw, default_seconds);
                default_seconds
            }),
            Err(_) => default_seconds,
        }
    }
}

/// `"900"`, `"30s"`, `"15m"`, `"1h"`, `"7d"` 형식의 기간을 초 단위로 변환합니다.
///
/// 0 이하이거나 형식이 잘못된 경우 `None`을 반환합니다.
pub fn parse_duration_seconds(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let (digits, multiplier) = match raw.chars().last()? {
        's' => (&raw[..raw.len() - 1], 1),
        'm' => (&raw[..raw.len() - 1], 60),
        'h' => (&raw[..raw.len() - 1], 60 * 60),
        'd' => (&raw[..raw.len() - 1], 24 * 60 * 60),
        c if c.is_ascii_digit() => (raw, 1),
        _ => return None,
    };

    let value = digits.trim().parse::<i64>().ok()?;
    if value <= 0 {
        return None;
    }
    value.checked_mul(multiplier)
}

/// 리프레시 토큰 쿠키 설정
pub struct CookieConfig;

impl CookieConfig {
    pub const REFRESH_TOKEN_COOKIE: &'static str = "refreshToken";

    /// 프로덕션 환경에서만 Secure 속성을 붙입니다.
    pub fn secure() -> bool {
        Environment::current().is_production()
    }
}

/// OTP 설정
pub struct OtpConfig;

impl OtpConfig {
    /// 발급 후 코드가 유효한 시간 (분, 기본값 15)
    pub fn expires_in_minutes() -> i64 {
        env::var("OTP_EXPIRES_IN_MINUTES")
            .ok()
            .and_then(|raw| raw.parse::<i64>().ok())
            .filter(|minutes| *minutes > 0)
            .unwrap_or(15)
    }

    /// OTP 해싱용 bcrypt cost (기본값 10)
    pub fn bcrypt_cost() -> u32 {
        env::var("OTP_BCRYPT_COST")
            .ok()
            .and_then(|raw| raw.parse::<u32>().ok())
            .filter(|cost| (4..=15).contains(cost))
            .unwrap_or(10)
    }
}
