//! 이벤트에 딸린 하위 문서들

use mongodb::bson::DateTime;
use serde::{Deserialize, Serialize};

/// 이벤트 위치. 이벤트당 하나 (`event_id` 유니크)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanupEventLocation {
    #[serde(rename = "_id")]
    pub id: String,
    pub event_id: String,
    pub latitude: f64,
    pub longitude: f64,
    pub settlement_id: String,
}

/// 이벤트가 열리는 개별 날짜
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanupEventDate {
    #[serde(rename = "_id")]
    pub id: String,
    pub event_id: String,
    pub date: DateTime,
}

/// 이벤트에 필요한 장비와 수량
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CleanupEquipment {
    #[serde(rename = "_id")]
    pub id: String,
    pub event_id: String,
    pub equipment_id: String,
    pub quantity: u32,
}

/// 이벤트 참가 기록. (`event_id`, `user_id`) 유니크
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TakePart {
    #[serde(rename = "_id")]
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub created_at: DateTime,
}

impl TakePart {
    pub fn new(event_id: &str, user_id: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            user_id: user_id.to_string(),
            created_at: DateTime::now(),
        }
    }
}
