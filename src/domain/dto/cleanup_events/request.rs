//! 클린업 이벤트 생성/수정 요청 DTO
//!
//! 생성과 수정은 같은 본문을 사용합니다. 필드 형식은 `validator`로 검증하고,
//! 날짜 간 관계(시작 ≤ 종료, 개별 날짜 범위)는 서비스에서 409로 검증합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::cleanup_events::EventStatus;
use crate::utils::string_utils::validate_uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCleanupEventRequest {
    #[validate(length(min = 8, max = 100, message = "name must be between 8 and 100 characters"))]
    pub name: String,

    #[validate(length(min = 8, max = 500, message = "description must be between 8 and 500 characters"))]
    pub description: String,

    pub start_date: DateTime<Utc>,

    pub end_date: DateTime<Utc>,

    pub status: EventStatus,

    #[validate(nested)]
    pub dates: Vec<UpsertCleanupEventDateRequest>,

    #[validate(url(message = "imageUrl must be a URL address"))]
    pub image_url: String,

    #[validate(custom(function = "validate_uuid"))]
    pub settlement_id: String,

    #[validate(nested)]
    pub equipments: Vec<UpsertCleanupEquipmentRequest>,

    #[validate(nested)]
    pub location: UpsertCleanupEventLocationRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UpsertCleanupEventDateRequest {
    pub date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpsertCleanupEquipmentRequest {
    #[validate(custom(function = "validate_uuid"))]
    pub equipment_id: String,

    #[validate(range(min = 1, message = "quantity must not be less than 1"))]
    pub quantity: u32,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Validate)]
pub struct UpsertCleanupEventLocationRequest {
    #[validate(range(min = -90.0, max = 90.0, message = "latitude must be between -90 and 90"))]
    pub latitude: f64,

    #[validate(range(min = -180.0, max = 180.0, message = "longitude must be between -180 and 180"))]
    pub longitude: f64,
}

impl UpsertCleanupEventRequest {
    /// 시작일이 종료일보다 늦지 않은지
    pub fn has_ordered_range(&self) -> bool {
        self.start_date <= self.end_date
    }

    /// 모든 개별 날짜가 [startDate, endDate] 안에 있는지
    pub fn dates_within_range(&self) -> bool {
        self.dates
            .iter()
            .all(|entry| entry.date >= self.start_date && entry.date <= self.end_date)
    }
}
