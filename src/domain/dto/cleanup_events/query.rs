//! 클린업 이벤트 목록 조회 쿼리

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use validator::Validate;

use crate::domain::entities::cleanup_events::EventStatus;
use crate::utils::string_utils::{deserialize_optional_string, validate_uuid};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    Name,
    StartDate,
    EndDate,
}

impl SortBy {
    /// 정렬 대상 문서 필드
    pub fn field(&self) -> &'static str {
        match self {
            SortBy::Name => "name",
            SortBy::StartDate => "start_date",
            SortBy::EndDate => "end_date",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn direction(&self) -> i32 {
        match self {
            SortOrder::Asc => 1,
            SortOrder::Desc => -1,
        }
    }
}

/// `GET /cleanup-event` 쿼리 파라미터
///
/// `sortBy`가 없으면 저장 순서를 그대로 사용합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GetCleanupEventsQuery {
    #[serde(default, deserialize_with = "deserialize_optional_string")]
    pub name: Option<String>,

    pub status: Option<EventStatus>,

    #[validate(custom(function = "validate_uuid"))]
    pub settlement_id: Option<String>,

    #[validate(custom(function = "validate_uuid"))]
    pub region_id: Option<String>,

    /// 이 시각 이후에 시작하는 이벤트
    pub start_date: Option<DateTime<Utc>>,

    /// 이 시각 이전에 끝나는 이벤트
    pub end_date: Option<DateTime<Utc>>,

    pub sort_by: Option<SortBy>,

    pub sort_order: Option<SortOrder>,

    #[serde(default = "default_page")]
    #[validate(range(min = 1, message = "page must not be less than 1"))]
    pub page: u64,

    #[serde(default = "default_page_size")]
    #[validate(range(min = 1, max = 100, message = "pageSize must be between 1 and 100"))]
    pub page_size: u64,
}

fn default_page() -> u64 {
    1
}

fn default_page_size() -> u64 {
    10
}

impl Default for GetCleanupEventsQuery {
    fn default() -> Self {
        Self {
            name: None,
            status: None,
            settlement_id: None,
            region_id: None,
            start_date: None,
            end_date: None,
            sort_by: None,
            sort_order: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl GetCleanupEventsQuery {
    /// 건너뛸 문서 수. MongoDB `skip`은 i64이므로 `i64::MAX`에서 멈춥니다.
    pub fn skip(&self) -> u64 {
        self.page
            .saturating_sub(1)
            .saturating_mul(self.page_size)
            .min(i64::MAX as u64)
    }

    /// 쿼리 내용의 SHA-256 해시. 목록 캐시 키에 사용됩니다.
    pub fn fingerprint(&self) -> String {
        let canonical = serde_json::to_string(self).unwrap_or_default();
        format!("{:x}", Sha256::digest(canonical.as_bytes()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::web::Query;

    #[test]
    fn test_defaults_from_empty_query_string() {
        let query = Query::<GetCleanupEventsQuery>::from_query("").unwrap().into_inner();

        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.skip(), 0);
        assert!(query.name.is_none());
        assert!(query.validate().is_ok());
    }

    #[test]
    fn test_parses_filters_and_sorting() {
        let query = Query::<GetCleanupEventsQuery>::from_query(
            "name=river&status=IN_PROGRESS&sortBy=startDate&sortOrder=desc&page=3&pageSize=20&startDate=2025-06-01T00:00:00Z",
        )
        .unwrap()
        .into_inner();

        assert_eq!(query.name.as_deref(), Some("river"));
        assert_eq!(query.status, Some(EventStatus::InProgress));
        assert_eq!(query.sort_by, Some(SortBy::StartDate));
        assert_eq!(query.sort_order, Some(SortOrder::Desc));
        assert_eq!(query.skip(), 40);
        assert!(query.start_date.is_some());
    }

    #[test]
    fn test_skip_is_capped_for_huge_page() {
        let query = Query::<GetCleanupEventsQuery>::from_query("page=18446744073709551615&pageSize=100")
            .unwrap()
            .into_inner();

        assert!(query.validate().is_ok());
        assert_eq!(query.skip(), i64::MAX as u64);
    }

    #[test]
    fn test_page_size_bounds() {
        let query = GetCleanupEventsQuery { page_size: 101, ..Default::default() };
        assert!(query.validate().is_err());

        let query = GetCleanupEventsQuery { page: 0, ..Default::default() };
        assert!(query.validate().is_err());
    }

    #[test]
    fn test_fingerprint_distinguishes_queries() {
        let first = GetCleanupEventsQuery::default();
        let second = GetCleanupEventsQuery { page: 2, ..Default::default() };

        assert_eq!(first.fingerprint(), GetCleanupEventsQuery::default().fingerprint());
        assert_ne!(first.fingerprint(), second.fingerprint());
    }
}
