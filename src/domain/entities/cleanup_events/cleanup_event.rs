//! 클린업 이벤트 엔티티
//!
//! 이벤트 본문은 `cleanup_events`에 저장되고, 위치/날짜/장비/참가자는
//! `event_id`로 연결된 별도 컬렉션에 저장됩니다 ([`super::event_parts`]).

use std::fmt;

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 이벤트 진행 상태
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventStatus {
    Planned,
    InProgress,
    Completed,
    Cancelled,
}

impl EventStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventStatus::Planned => "PLANNED",
            EventStatus::InProgress => "IN_PROGRESS",
            EventStatus::Completed => "COMPLETED",
            EventStatus::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for EventStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanupEvent {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: DateTime,
    pub end_date: DateTime,
    pub status: EventStatus,
    pub image_url: String,
    pub settlement_id: String,
    /// 이벤트를 만든 사용자. 수정 권한의 기준입니다.
    pub organizer_id: String,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl CleanupEvent {
    pub fn is_organized_by(&self, user_id: &str) -> bool {
        self.organizer_id == user_id
    }
}
