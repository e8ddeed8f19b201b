//! 클린업 플랫폼 백엔드
//!
//! 지역 정화(클린업) 행사를 조직하고 참여하기 위한 REST API 서버입니다.
//!
//! # Features
//!
//! - **인증**: 이메일/비밀번호 가입과 로그인, bcrypt 해시
//! - **JWT**: 액세스/리프레시 토큰, 리프레시 교체와 영구 폐기 목록
//! - **OTP**: 6자리 코드 메일 발송과 시간 제한 검증
//! - **클린업 이벤트**: 생성/수정/조회/참가, Nominatim 역지오코딩 기반 지오펜스
//! - **MongoDB**: 영구 저장 (다중 컬렉션 쓰기는 트랜잭션)
//! - **Redis**: 이벤트 조회 캐시와 쓰기 시 무효화
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐
//! │   HTTP Routes   │ ← REST API 엔드포인트 + AuthMiddleware
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Handlers     │ ← 요청 검증/응답 구성
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │    Services     │ ← 비즈니스 로직 (Mailer, Geocoder, Cache trait 의존)
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │  Repositories   │ ← *Store trait + MongoDB 구현
//! └─────────────────┘
//!          │
//!          ▼
//! ┌─────────────────┐
//! │ MongoDB + Redis │ ← 저장소
//! └─────────────────┘
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use cleanup_platform_backend::services::cleanup_events::CleanupEventService;
//!
//! let service = CleanupEventService::instance();
//! let details = service.get_cleanup_event_by_id(&event_id).await?;
//! ```

pub mod core;
pub mod config;
pub mod db;
pub mod caching;
pub mod domain;
pub mod repositories;
pub mod services;
pub mod utils;
pub mod routes;
pub mod handlers;
pub mod middlewares;

#[cfg(test)]
pub mod testing;
