//! 클린업 이벤트 응답 DTO
//!
//! 상세 응답은 Redis에 JSON으로 캐시되므로 `Deserialize`도 구현합니다.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::cleanup_events::{
    CleanupEquipment, CleanupEvent, CleanupEventDate, CleanupEventLocation, EventStatus,
};
use crate::domain::entities::geo::{Region, Settlement};
use crate::domain::entities::users::User;
use crate::utils::time::from_bson;

/// 이벤트 본문
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CleanupEventResponse {
    pub id: String,
    pub name: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: EventStatus,
    pub image_url: String,
    pub settlement_id: String,
    pub organizer_id: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&CleanupEvent> for CleanupEventResponse {
    fn from(event: &CleanupEvent) -> Self {
        Self {
            id: event.id.clone(),
            name: event.name.clone(),
            description: event.description.clone(),
            start_date: from_bson(event.start_date),
            end_date: from_bson(event.end_date),
            status: event.status,
            image_url: event.image_url.clone(),
            settlement_id: event.settlement_id.clone(),
            organizer_id: event.organizer_id.clone(),
            created_at: from_bson(event.created_at),
            updated_at: from_bson(event.updated_at),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeoPointResponse {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// 상세 응답의 정착지 (상위 지역 포함)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventSettlementResponse {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region: Option<GeoPointResponse>,
}

impl EventSettlementResponse {
    pub fn new(settlement: &Settlement, region: Option<&Region>) -> Self {
        Self {
            name: settlement.name.clone(),
            latitude: settlement.latitude,
            longitude: settlement.longitude,
            region: region.map(|region| GeoPointResponse {
                name: region.name.clone(),
                latitude: region.latitude,
                longitude: region.longitude,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct EventLocationResponse {
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&CleanupEventLocation> for EventLocationResponse {
    fn from(location: &CleanupEventLocation) -> Self {
        Self {
            latitude: location.latitude,
            longitude: location.longitude,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EventDateResponse {
    pub id: String,
    pub date: DateTime<Utc>,
}

impl From<&CleanupEventDate> for EventDateResponse {
    fn from(date: &CleanupEventDate) -> Self {
        Self {
            id: date.id.clone(),
            date: from_bson(date.date),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventEquipmentResponse {
    pub id: String,
    pub equipment_id: String,
    pub quantity: u32,
}

impl From<&CleanupEquipment> for EventEquipmentResponse {
    fn from(equipment: &CleanupEquipment) -> Self {
        Self {
            id: equipment.id.clone(),
            equipment_id: equipment.equipment_id.clone(),
            quantity: equipment.quantity,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParticipantResponse {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TakePartResponse {
    pub id: String,
    pub event_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    pub user: Option<ParticipantResponse>,
}

/// `GET /cleanup-event/{id}` 및 수정 결과
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CleanupEventDetailsResponse {
    #[serde(flatten)]
    pub event: CleanupEventResponse,
    pub settlement: Option<EventSettlementResponse>,
    pub location: Option<EventLocationResponse>,
    pub dates: Vec<EventDateResponse>,
    pub equipments: Vec<EventEquipmentResponse>,
    pub take_part: Vec<TakePartResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RegionResponse {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl From<&Region> for RegionResponse {
    fn from(region: &Region) -> Self {
        Self {
            id: region.id.clone(),
            name: region.name.clone(),
            latitude: region.latitude,
            longitude: region.longitude,
        }
    }
}

/// 목록 응답의 정착지
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ListSettlementResponse {
    pub id: String,
    pub name: String,
    pub longitude: f64,
    pub latitude: f64,
    pub region: Option<RegionResponse>,
}

impl ListSettlementResponse {
    pub fn new(settlement: &Settlement, region: Option<&Region>) -> Self {
        Self {
            id: settlement.id.clone(),
            name: settlement.name.clone(),
            longitude: settlement.longitude,
            latitude: settlement.latitude,
            region: region.map(RegionResponse::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrganizerResponse {
    pub id: String,
    pub name: String,
}

impl From<&User> for OrganizerResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CleanupEventListItem {
    pub id: String,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub status: EventStatus,
    pub image_url: String,
    pub settlement: Option<ListSettlementResponse>,
    pub organizer: Option<OrganizerResponse>,
}

/// `GET /cleanup-event` 결과. `total`은 페이지와 무관한 전체 일치 개수입니다.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CleanupEventsPage {
    pub cleanup_events: Vec<CleanupEventListItem>,
    pub total: u64,
}
