//! # Core Framework Module
//!
//! 백엔드 서비스의 공통 기반을 제공하는 모듈입니다.
//!
//! ## 모듈 구성
//!
//! ### [`registry`] - 서비스 레지스트리
//! - **ServiceLocator**: 기동 시 생성한 `Arc<T>` 인스턴스를 타입으로 보관
//! - **Service / Repository trait**: 기동 시 초기화 훅 (`init`)
//!
//! ### [`errors`] - 통합 에러 처리
//! - **AppError**: 애플리케이션 전역 에러 타입
//! - **HTTP 통합**: Actix-Web `ResponseError` 구현으로 상태 코드 자동 매핑
//! - **검증 에러 변환**: `validator` 에러를 단일 메시지로 변환

pub mod errors;
pub mod registry;

pub use errors::*;
pub use registry::*;
