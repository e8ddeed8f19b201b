//! # Configuration Module
//!
//! 환경 변수 기반 설정값을 중앙에서 관리하는 모듈입니다.
//! 설정 구조체는 대부분 값을 갖지 않는 타입이며, 호출 시점에 환경 변수를 읽습니다.
//!
//! ## 모듈 구성
//!
//! - [`data_config`] - 실행 환경, 서버, MongoDB, Redis, 캐시 설정
//! - [`auth_config`] - JWT, 리프레시 쿠키, OTP 설정
//! - [`integration_config`] - SMTP 메일, Nominatim 역지오코딩 설정
//!
//! ## 환경 변수 설정 가이드
//!
//! ```bash
//! # 서버
//! export HOST="0.0.0.0"
//! export PORT="4000"
//! export ENVIRONMENT="production"   # development, test, staging, production
//!
//! # 저장소
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//! export DATABASE_NAME="cleanup_platform"
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//!
//! # 인증
//! export JWT_SECRET="your-super-secret-key"
//! export JWT_ACCESS_EXPIRES_IN="15m"
//! export JWT_REFRESH_EXPIRES_IN="7d"
//!
//! # 메일
//! export MAIL_HOST="smtp.example.com"
//! export MAIL_USER="mailer"
//! export MAIL_PASSWORD="secret"
//! export MAIL_FROM="Cleanup Platform <noreply@example.com>"
//!
//! # 역지오코딩
//! export NOMINATIM_URL="https://nominatim.openstreetmap.org/reverse"
//! ```

pub mod data_config;
pub mod auth_config;
pub mod integration_config;

pub use data_config::*;
pub use auth_config::*;
pub use integration_config::*;
