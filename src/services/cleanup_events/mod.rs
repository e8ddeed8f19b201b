//! 클린업 이벤트 서비스 모듈
//!
//! 이벤트 생성/수정(지오펜스 검증 포함), 캐시 우선 조회, 목록 검색, 참가 관리를 제공합니다.

pub mod cleanup_event_service;

pub use cleanup_event_service::*;
