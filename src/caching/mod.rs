//! 캐싱 계층 모듈
//!
//! Redis를 백엔드로 하는 캐시와, 서비스 계층이 의존하는 [`Cache`] trait을 제공합니다.
//!
//! # 키 규칙
//!
//! - `cleanup-event:{id}` - 클린업 이벤트 상세 (TTL: `CLEANUP_EVENT_CACHE_TTL`)
//! - `cleanup-events:{sha256(query)}` - 목록 조회 결과
//!
//! # 환경 설정
//!
//! ```bash
//! REDIS_HOST=localhost
//! REDIS_PORT=6379
//! # 또는
//! REDIS_URL=redis://localhost:6379
//! ```

pub mod redis;

use async_trait::async_trait;

use crate::core::errors::AppResult;

/// 문자열 기반 캐시 인터페이스
///
/// 직렬화는 호출자가 담당합니다.
#[async_trait]
pub trait Cache: Send + Sync {
    async fn get_string(&self, key: &str) -> AppResult<Option<String>>;

    async fn set_string_with_expiry(&self, key: &str, value: &str, seconds: u64) -> AppResult<()>;

    async fn del(&self, key: &str) -> AppResult<()>;

    /// glob 패턴과 일치하는 모든 키를 삭제하고, 삭제한 키 개수를 반환합니다.
    async fn del_pattern(&self, pattern: &str) -> AppResult<usize>;
}
