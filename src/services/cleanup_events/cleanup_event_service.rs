//! # 클린업 이벤트 서비스
//!
//! ## 쓰기 흐름
//!
//! ```text
//! 날짜 규칙 (409) ─▶ 정착지 조회 (404) ─▶ 역지오코딩 ─▶ locality 비교 (409)
//!        ─▶ 트랜잭션 기록 ─▶ 캐시 무효화
//! ```
//!
//! ## 캐시
//!
//! - 상세: `cleanup-event:{id}` (읽을 때 채우고, 수정/참가 변경 시 삭제)
//! - 목록: `cleanup-events:{sha256(query)}` (이벤트 생성/수정 시 전부 삭제)
//!
//! 캐시 오류는 로그만 남기고 저장소 조회로 대체합니다. 요청을 실패시키지 않습니다.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use mongodb::bson::DateTime;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::caching::Cache;
use crate::config::CacheConfig;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::cleanup_events::{
    CleanupEventDetailsResponse, CleanupEventListItem, CleanupEventResponse, CleanupEventsPage,
    EventDateResponse, EventEquipmentResponse, EventLocationResponse, EventSettlementResponse,
    GetCleanupEventsQuery, ListSettlementResponse, OrganizerResponse, ParticipantResponse,
    TakePartResponse, UpsertCleanupEventRequest,
};
use crate::domain::dto::otp::MessageResponse;
use crate::domain::entities::cleanup_events::{
    CleanupEquipment, CleanupEvent, CleanupEventDate, CleanupEventLocation, TakePart,
};
use crate::domain::entities::geo::Settlement;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::cleanup_events::{
    CleanupEventAggregate, CleanupEventFilter, CleanupEventSort, CleanupEventStore, TakePartStore,
};
use crate::repositories::geo::SettlementStore;
use crate::repositories::users::UserStore;
use crate::services::geocoding::Geocoder;
use crate::utils::time::{from_bson, to_bson};

pub const EVENT_CACHE_PREFIX: &str = "cleanup-event:";
pub const LIST_CACHE_PREFIX: &str = "cleanup-events:";

pub fn event_cache_key(event_id: &str) -> String {
    format!("{}{}", EVENT_CACHE_PREFIX, event_id)
}

pub fn list_cache_key(query: &GetCleanupEventsQuery) -> String {
    format!("{}{}", LIST_CACHE_PREFIX, query.fingerprint())
}

pub struct CleanupEventService {
    events: Arc<dyn CleanupEventStore>,
    take_parts: Arc<dyn TakePartStore>,
    settlements: Arc<dyn SettlementStore>,
    users: Arc<dyn UserStore>,
    geocoder: Arc<dyn Geocoder>,
    cache: Arc<dyn Cache>,
    cache_ttl_seconds: u64,
}

impl CleanupEventService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        events: Arc<dyn CleanupEventStore>,
        take_parts: Arc<dyn TakePartStore>,
        settlements: Arc<dyn SettlementStore>,
        users: Arc<dyn UserStore>,
        geocoder: Arc<dyn Geocoder>,
        cache: Arc<dyn Cache>,
        cache_ttl_seconds: u64,
    ) -> Self {
        Self {
            events,
            take_parts,
            settlements,
            users,
            geocoder,
            cache,
            cache_ttl_seconds,
        }
    }

    /// `CLEANUP_EVENT_CACHE_TTL` 설정으로 생성합니다.
    pub fn with_config(
        events: Arc<dyn CleanupEventStore>,
        take_parts: Arc<dyn TakePartStore>,
        settlements: Arc<dyn SettlementStore>,
        users: Arc<dyn UserStore>,
        geocoder: Arc<dyn Geocoder>,
        cache: Arc<dyn Cache>,
    ) -> Self {
        Self::new(
            events,
            take_parts,
            settlements,
            users,
            geocoder,
            cache,
            CacheConfig::cleanup_event_ttl_seconds(),
        )
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 이벤트를 만들고 생성된 이벤트 본문을 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 날짜 규칙 위반, 좌표가 정착지 밖
    /// * `AppError::NotFound` - 정착지 없음
    /// * `AppError::ExternalServiceError` - 역지오코딩 실패
    pub async fn create_cleanup_event(
        &self,
        data: UpsertCleanupEventRequest,
        user_id: &str,
    ) -> AppResult<CleanupEventResponse> {
        check_dates(&data)?;
        self.ensure_within_settlement(&data).await?;

        let event_id = uuid::Uuid::new_v4().to_string();
        let aggregate = build_aggregate(
            &event_id,
            &data,
            user_id,
            DateTime::now(),
            uuid::Uuid::new_v4().to_string(),
        );

        let event = self.events.create(aggregate).await?;
        log::info!("클린업 이벤트 생성: event_id={}, organizer_id={}", event.id, user_id);

        self.invalidate_lists().await;

        Ok(CleanupEventResponse::from(&event))
    }

    /// 주최자만 수정할 수 있습니다. 수정 후 상세 뷰를 반환합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 이벤트 또는 정착지 없음
    /// * `AppError::AuthorizationError` - 주최자가 아님
    /// * `AppError::ConflictError` - 날짜 규칙 위반, 좌표가 정착지 밖
    pub async fn update_cleanup_event(
        &self,
        data: UpsertCleanupEventRequest,
        event_id: &str,
        user_id: &str,
    ) -> AppResult<CleanupEventDetailsResponse> {
        let existing = self
            .events
            .find_by_id(event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event with ID {} not found.", event_id)))?;

        if !existing.is_organized_by(user_id) {
            log::warn!("이벤트 수정 권한 없음: event_id={}, user_id={}", event_id, user_id);
            return Err(AppError::AuthorizationError(
                "You have no access to change this event.".to_string(),
            ));
        }

        check_dates(&data)?;
        self.ensure_within_settlement(&data).await?;

        let location_id = self
            .events
            .find_location(event_id)
            .await?
            .map(|location| location.id)
            .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

        let aggregate = build_aggregate(event_id, &data, &existing.organizer_id, existing.created_at, location_id);
        self.events.update(aggregate).await?;
        log::info!("클린업 이벤트 수정: event_id={}", event_id);

        self.invalidate_event(event_id).await;
        self.invalidate_lists().await;

        self.get_cleanup_event_by_id(event_id).await
    }

    /// 캐시 우선 상세 조회
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 이벤트 없음
    pub async fn get_cleanup_event_by_id(&self, event_id: &str) -> AppResult<CleanupEventDetailsResponse> {
        let key = event_cache_key(event_id);

        if let Some(details) = self.read_cache::<CleanupEventDetailsResponse>(&key).await {
            return Ok(details);
        }

        let details = self.load_details(event_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Cleanup event with ID {} not found", event_id))
        })?;

        self.write_cache(&key, &details).await;

        Ok(details)
    }

    /// 필터/정렬/페이지 조건으로 목록을 조회합니다. 결과는 쿼리별로 캐시됩니다.
    pub async fn get_cleanup_events(&self, query: &GetCleanupEventsQuery) -> AppResult<CleanupEventsPage> {
        let key = list_cache_key(query);

        if let Some(page) = self.read_cache::<CleanupEventsPage>(&key).await {
            return Ok(page);
        }

        let filter = self.build_filter(query).await?;
        let sort = query.sort_by.map(|by| CleanupEventSort {
            by,
            order: query.sort_order.unwrap_or_default(),
        });

        let events = self
            .events
            .find_page(&filter, sort, query.skip(), query.page_size)
            .await?;
        let total = self.events.count(&filter).await?;

        let page = CleanupEventsPage {
            cleanup_events: self.to_list_items(&events).await?,
            total,
        };

        self.write_cache(&key, &page).await;

        Ok(page)
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 이벤트 없음
    /// * `AppError::ConflictError` - 이미 참가 중
    pub async fn take_part(&self, event_id: &str, user: &AuthenticatedUser) -> AppResult<TakePartResponse> {
        self.ensure_event_exists(event_id).await?;

        let take_part = TakePart::new(event_id, &user.id);
        if !self.take_parts.add(take_part.clone()).await? {
            return Err(AppError::ConflictError("You already take part in this event.".to_string()));
        }
        log::info!("이벤트 참가: event_id={}, user_id={}", event_id, user.id);

        self.invalidate_event(event_id).await;

        Ok(TakePartResponse {
            id: take_part.id,
            event_id: take_part.event_id,
            user_id: take_part.user_id,
            created_at: from_bson(take_part.created_at),
            user: Some(ParticipantResponse { name: user.name.clone() }),
        })
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 이벤트 없음 또는 참가 기록 없음
    pub async fn leave(&self, event_id: &str, user_id: &str) -> AppResult<MessageResponse> {
        self.ensure_event_exists(event_id).await?;

        if !self.take_parts.remove(event_id, user_id).await? {
            return Err(AppError::NotFound("You do not take part in this event.".to_string()));
        }
        log::info!("이벤트 참가 취소: event_id={}, user_id={}", event_id, user_id);

        self.invalidate_event(event_id).await;

        Ok(MessageResponse::new("You left the event"))
    }

    async fn ensure_event_exists(&self, event_id: &str) -> AppResult<CleanupEvent> {
        self.events.find_by_id(event_id).await?.ok_or_else(|| {
            AppError::NotFound(format!("Cleanup event with ID {} not found", event_id))
        })
    }

    /// 좌표의 locality가 선택한 정착지 이름과 같은지 확인합니다.
    async fn ensure_within_settlement(&self, data: &UpsertCleanupEventRequest) -> AppResult<Settlement> {
        let settlement = self
            .settlements
            .find_settlement(&data.settlement_id)
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("Settlement with id {} not found.", data.settlement_id))
            })?;

        let result = self
            .geocoder
            .reverse(data.location.latitude, data.location.longitude)
            .await?;

        match result.locality.as_deref() {
            Some(locality) if settlement.matches_locality(locality) => Ok(settlement),
            locality => {
                log::debug!(
                    "지오펜스 불일치: settlement={}, locality={:?}",
                    settlement.name,
                    locality
                );
                Err(AppError::ConflictError(
                    "The selected point is outside the selected settlement.".to_string(),
                ))
            }
        }
    }

    async fn build_filter(&self, query: &GetCleanupEventsQuery) -> AppResult<CleanupEventFilter> {
        let settlement_ids = match (&query.settlement_id, &query.region_id) {
            (None, None) => None,
            (Some(settlement_id), None) => Some(vec![settlement_id.clone()]),
            (settlement_id, Some(region_id)) => {
                let mut ids = self.settlements.find_settlement_ids_by_region(region_id).await?;
                if let Some(settlement_id) = settlement_id {
                    ids.retain(|id| id == settlement_id);
                }
                Some(ids)
            }
        };

        Ok(CleanupEventFilter {
            name_contains: query.name.clone(),
            status: query.status,
            settlement_ids,
            start_from: query.start_date,
            end_until: query.end_date,
        })
    }

    async fn load_details(&self, event_id: &str) -> AppResult<Option<CleanupEventDetailsResponse>> {
        let Some(event) = self.events.find_by_id(event_id).await? else {
            return Ok(None);
        };

        let settlement = match self.settlements.find_settlement(&event.settlement_id).await? {
            Some(settlement) => {
                let region = self.settlements.find_region(&settlement.region_id).await?;
                Some(EventSettlementResponse::new(&settlement, region.as_ref()))
            }
            None => None,
        };

        let location = self.events.find_location(event_id).await?;
        let dates = self.events.find_dates(event_id).await?;
        let equipments = self.events.find_equipments(event_id).await?;

        let participants = self.take_parts.find_by_event(event_id).await?;
        let participant_ids: Vec<String> = participants.iter().map(|p| p.user_id.clone()).collect();
        let names: HashMap<String, String> = if participant_ids.is_empty() {
            HashMap::new()
        } else {
            self.users
                .find_by_ids(&participant_ids)
                .await?
                .into_iter()
                .map(|user| (user.id, user.name))
                .collect()
        };

        let take_part = participants
            .into_iter()
            .map(|participant| TakePartResponse {
                user: names
                    .get(&participant.user_id)
                    .map(|name| ParticipantResponse { name: name.clone() }),
                id: participant.id,
                event_id: participant.event_id,
                user_id: participant.user_id,
                created_at: from_bson(participant.created_at),
            })
            .collect();

        Ok(Some(CleanupEventDetailsResponse {
            event: CleanupEventResponse::from(&event),
            settlement,
            location: location.as_ref().map(EventLocationResponse::from),
            dates: dates.iter().map(EventDateResponse::from).collect(),
            equipments: equipments.iter().map(EventEquipmentResponse::from).collect(),
            take_part,
        }))
    }

    async fn to_list_items(&self, events: &[CleanupEvent]) -> AppResult<Vec<CleanupEventListItem>> {
        if events.is_empty() {
            return Ok(Vec::new());
        }

        let settlement_ids = unique(events.iter().map(|event| &event.settlement_id));
        let settlements = self.settlements.find_settlements_by_ids(&settlement_ids).await?;

        let region_ids = unique(settlements.iter().map(|settlement| &settlement.region_id));
        let regions: HashMap<String, _> = self
            .settlements
            .find_regions_by_ids(&region_ids)
            .await?
            .into_iter()
            .map(|region| (region.id.clone(), region))
            .collect();

        let settlements: HashMap<&str, ListSettlementResponse> = settlements
            .iter()
            .map(|settlement| {
                (
                    settlement.id.as_str(),
                    ListSettlementResponse::new(settlement, regions.get(&settlement.region_id)),
                )
            })
            .collect();

        let organizer_ids = unique(events.iter().map(|event| &event.organizer_id));
        let organizers: HashMap<String, OrganizerResponse> = self
            .users
            .find_by_ids(&organizer_ids)
            .await?
            .iter()
            .map(|user| (user.id.clone(), OrganizerResponse::from(user)))
            .collect();

        Ok(events
            .iter()
            .map(|event| CleanupEventListItem {
                id: event.id.clone(),
                name: event.name.clone(),
                start_date: from_bson(event.start_date),
                end_date: from_bson(event.end_date),
                status: event.status,
                image_url: event.image_url.clone(),
                settlement: settlements.get(event.settlement_id.as_str()).cloned(),
                organizer: organizers.get(&event.organizer_id).cloned(),
            })
            .collect())
    }

    async fn read_cache<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        match self.cache.get_string(key).await {
            Ok(Some(raw)) => match serde_json::from_str(&raw) {
                Ok(value) => {
                    log::debug!("캐시 적중: {}", key);
                    Some(value)
                }
                Err(e) => {
                    log::warn!("캐시 값 역직렬화 실패 ({}): {}", key, e);
                    None
                }
            },
            Ok(None) => {
                log::debug!("캐시 미스: {}", key);
                None
            }
            Err(e) => {
                log::warn!("캐시 읽기 실패 ({}): {}", key, e);
                None
            }
        }
    }

    async fn write_cache<T: Serialize>(&self, key: &str, value: &T) {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("캐시 값 직렬화 실패 ({}): {}", key, e);
                return;
            }
        };

        if let Err(e) = self.cache.set_string_with_expiry(key, &raw, self.cache_ttl_seconds).await {
            log::warn!("캐시 쓰기 실패 ({}): {}", key, e);
        }
    }

    async fn invalidate_event(&self, event_id: &str) {
        let key = event_cache_key(event_id);
        if let Err(e) = self.cache.del(&key).await {
            log::warn!("캐시 삭제 실패 ({}): {}", key, e);
        }
    }

    async fn invalidate_lists(&self) {
        let pattern = format!("{}*", LIST_CACHE_PREFIX);
        match self.cache.del_pattern(&pattern).await {
            Ok(count) => log::debug!("목록 캐시 {}개 삭제", count),
            Err(e) => log::warn!("목록 캐시 삭제 실패: {}", e),
        }
    }
}

impl Service for CleanupEventService {
    fn name(&self) -> &str {
        "cleanup_event"
    }
}

/// 생성/수정 공통 날짜 규칙
fn check_dates(data: &UpsertCleanupEventRequest) -> AppResult<()> {
    if !data.has_ordered_range() {
        return Err(AppError::ConflictError("Date must be before of the end date.".to_string()));
    }

    if !data.dates_within_range() {
        return Err(AppError::ConflictError(
            "Dates must be in scope startDate and endDate.".to_string(),
        ));
    }

    Ok(())
}

fn build_aggregate(
    event_id: &str,
    data: &UpsertCleanupEventRequest,
    organizer_id: &str,
    created_at: DateTime,
    location_id: String,
) -> CleanupEventAggregate {
    let event = CleanupEvent {
        id: event_id.to_string(),
        name: data.name.clone(),
        description: data.description.clone(),
        start_date: to_bson(&data.start_date),
        end_date: to_bson(&data.end_date),
        status: data.status,
        image_url: data.image_url.clone(),
        settlement_id: data.settlement_id.clone(),
        organizer_id: organizer_id.to_string(),
        created_at,
        updated_at: DateTime::now(),
    };

    let location = CleanupEventLocation {
        id: location_id,
        event_id: event_id.to_string(),
        latitude: data.location.latitude,
        longitude: data.location.longitude,
        settlement_id: data.settlement_id.clone(),
    };

    let dates = data
        .dates
        .iter()
        .map(|entry| CleanupEventDate {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            date: to_bson(&entry.date),
        })
        .collect();

    let equipments = data
        .equipments
        .iter()
        .map(|entry| CleanupEquipment {
            id: uuid::Uuid::new_v4().to_string(),
            event_id: event_id.to_string(),
            equipment_id: entry.equipment_id.clone(),
            quantity: entry.quantity,
        })
        .collect();

    CleanupEventAggregate {
        event,
        location,
        dates,
        equipments,
    }
}

fn unique<'a>(ids: impl Iterator<Item = &'a String>) -> Vec<String> {
    let mut seen = HashSet::new();
    ids.filter(|id| seen.insert(id.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::cleanup_events::EventStatus;
    use crate::domain::entities::users::User;
    use crate::testing::{
        sample_upsert_request, FakeGeocoder, InMemoryCache, InMemoryCleanupEventStore,
        InMemorySettlementStore, InMemoryTakePartStore, InMemoryUserStore, KYIV_ID, LVIV_ID, REGION_ID,
    };

    struct Fixture {
        service: CleanupEventService,
        events: Arc<InMemoryCleanupEventStore>,
        users: Arc<InMemoryUserStore>,
        geocoder: Arc<FakeGeocoder>,
        cache: Arc<InMemoryCache>,
        organizer: User,
    }

    fn fixture() -> Fixture {
        let events = Arc::new(InMemoryCleanupEventStore::default());
        let users = Arc::new(InMemoryUserStore::default());
        let geocoder = Arc::new(FakeGeocoder::with_locality("Київ"));
        let cache = Arc::new(InMemoryCache::default());

        let organizer = User::new("organizer@example.com".to_string(), "hash".to_string());
        users.insert(organizer.clone());

        let service = CleanupEventService::new(
            events.clone(),
            Arc::new(InMemoryTakePartStore::default()),
            Arc::new(InMemorySettlementStore::seeded()),
            users.clone(),
            geocoder.clone(),
            cache.clone(),
            300,
        );

        Fixture { service, events, users, geocoder, cache, organizer }
    }

    fn participant(f: &Fixture, email: &str) -> AuthenticatedUser {
        let user = User::new(email.to_string(), "hash".to_string());
        f.users.insert(user.clone());
        AuthenticatedUser::from(&user)
    }

    #[actix_web::test]
    async fn test_create_stores_aggregate_and_clears_list_cache() {
        let f = fixture();
        f.cache.put("cleanup-events:stale", "{}");

        let event = f
            .service
            .create_cleanup_event(sample_upsert_request(), &f.organizer.id)
            .await
            .unwrap();

        assert_eq!(event.organizer_id, f.organizer.id);
        assert_eq!(event.status, EventStatus::Planned);
        let stored = f.events.aggregate(&event.id).unwrap();
        assert_eq!(stored.dates.len(), 1);
        assert_eq!(stored.equipments[0].quantity, 5);
        assert_eq!(stored.location.settlement_id, KYIV_ID);
        assert!(!f.cache.contains("cleanup-events:stale"));
    }

    #[actix_web::test]
    async fn test_create_outside_settlement_is_rejected() {
        let f = fixture();
        f.geocoder.set_locality(Some("Бровари"));

        let result = f.service.create_cleanup_event(sample_upsert_request(), &f.organizer.id).await;

        assert_eq!(
            result,
            Err(AppError::ConflictError(
                "The selected point is outside the selected settlement.".to_string()
            ))
        );
        assert_eq!(f.events.len(), 0);
    }

    #[actix_web::test]
    async fn test_create_without_locality_is_rejected() {
        let f = fixture();
        f.geocoder.set_locality(None);

        let result = f.service.create_cleanup_event(sample_upsert_request(), &f.organizer.id).await;
        assert!(matches!(result, Err(AppError::ConflictError(_))));
    }

    #[actix_web::test]
    async fn test_create_with_unknown_settlement_is_not_found() {
        let f = fixture();
        let mut request = sample_upsert_request();
        request.settlement_id = "5d1f0a3e-9d7b-4c7e-9a55-000000000000".to_string();

        let result = f.service.create_cleanup_event(request, &f.organizer.id).await;
        assert_eq!(
            result,
            Err(AppError::NotFound(
                "Settlement with id 5d1f0a3e-9d7b-4c7e-9a55-000000000000 not found.".to_string()
            ))
        );
    }

    #[actix_web::test]
    async fn test_date_rules_are_checked_before_geocoding() {
        let f = fixture();
        f.geocoder.fail_next();

        let mut request = sample_upsert_request();
        request.end_date = "2025-05-01T00:00:00Z".parse().unwrap();
        assert_eq!(
            f.service.create_cleanup_event(request, &f.organizer.id).await,
            Err(AppError::ConflictError("Date must be before of the end date.".to_string()))
        );

        let mut request = sample_upsert_request();
        request.dates[0].date = "2025-07-01T00:00:00Z".parse().unwrap();
        assert_eq!(
            f.service.create_cleanup_event(request, &f.organizer.id).await,
            Err(AppError::ConflictError("Dates must be in scope startDate and endDate.".to_string()))
        );
    }

    #[actix_web::test]
    async fn test_geocoder_failure_is_propagated() {
        let f = fixture();
        f.geocoder.fail_next();

        let result = f.service.create_cleanup_event(sample_upsert_request(), &f.organizer.id).await;
        assert!(matches!(result, Err(AppError::ExternalServiceError(_))));
    }

    #[actix_web::test]
    async fn test_get_by_id_builds_details_and_caches_them() {
        let f = fixture();
        let event = f
            .service
            .create_cleanup_event(sample_upsert_request(), &f.organizer.id)
            .await
            .unwrap();

        let details = f.service.get_cleanup_event_by_id(&event.id).await.unwrap();

        assert_eq!(details.event.id, event.id);
        let settlement = details.settlement.clone().unwrap();
        assert_eq!(settlement.name, "Київ");
        assert_eq!(settlement.region.unwrap().name, "Київська область");
        assert_eq!(details.location.unwrap().latitude, 50.45);
        assert!(f.cache.contains(&event_cache_key(&event.id)));

        // 저장소가 실패해도 캐시에서 응답
        f.events.fail_next();
        assert_eq!(f.service.get_cleanup_event_by_id(&event.id).await.unwrap(), details);
    }

    #[actix_web::test]
    async fn test_get_by_id_degrades_when_cache_fails() {
        let f = fixture();
        let event = f
            .service
            .create_cleanup_event(sample_upsert_request(), &f.organizer.id)
            .await
            .unwrap();
        f.cache.fail_all(true);

        let details = f.service.get_cleanup_event_by_id(&event.id).await.unwrap();
        assert_eq!(details.event.name, event.name);
    }

    #[actix_web::test]
    async fn test_get_missing_event_is_not_found() {
        let f = fixture();

        assert_eq!(
            f.service.get_cleanup_event_by_id("missing").await,
            Err(AppError::NotFound("Cleanup event with ID missing not found".to_string()))
        );
    }

    #[actix_web::test]
    async fn test_update_requires_organizer() {
        let f = fixture();
        let event = f
            .service
            .create_cleanup_event(sample_upsert_request(), &f.organizer.id)
            .await
            .unwrap();

        let result = f
            .service
            .update_cleanup_event(sample_upsert_request(), &event.id, "someone-else")
            .await;
        assert_eq!(
            result,
            Err(AppError::AuthorizationError("You have no access to change this event.".to_string()))
        );

        let result = f
            .service
            .update_cleanup_event(sample_upsert_request(), "missing", &f.organizer.id)
            .await;
        assert_eq!(result, Err(AppError::NotFound("Event with ID missing not found.".to_string())));
    }

    #[actix_web::test]
    async fn test_update_replaces_parts_and_refreshes_cache() {
        let f = fixture();
        let event = f
            .service
            .create_cleanup_event(sample_upsert_request(), &f.organizer.id)
            .await
            .unwrap();
        let before = f.service.get_cleanup_event_by_id(&event.id).await.unwrap();
        let location_id = f.events.aggregate(&event.id).unwrap().location.id;

        let mut request = sample_upsert_request();
        request.name = "Renamed riverside cleanup".to_string();
        request.status = EventStatus::InProgress;
        request.equipments.clear();
        request.dates.push(crate::domain::dto::cleanup_events::UpsertCleanupEventDateRequest {
            date: "2025-06-03T08:00:00Z".parse().unwrap(),
        });

        let updated = f
            .service
            .update_cleanup_event(request, &event.id, &f.organizer.id)
            .await
            .unwrap();

        assert_ne!(updated, before);
        assert_eq!(updated.event.name, "Renamed riverside cleanup");
        assert_eq!(updated.event.status, EventStatus::InProgress);
        assert_eq!(updated.event.created_at, before.event.created_at);
        assert_eq!(updated.dates.len(), 2);
        assert!(updated.equipments.is_empty());
        assert_eq!(f.events.aggregate(&event.id).unwrap().location.id, location_id);
    }

    #[actix_web::test]
    async fn test_list_filters_and_resolves_relations() {
        let f = fixture();
        f.service
            .create_cleanup_event(sample_upsert_request(), &f.organizer.id)
            .await
            .unwrap();

        f.geocoder.set_locality(Some("Львів"));
        let mut lviv = sample_upsert_request();
        lviv.name = "Lviv park cleanup".to_string();
        lviv.settlement_id = LVIV_ID.to_string();
        f.service.create_cleanup_event(lviv, &f.organizer.id).await.unwrap();

        let all = f.service.get_cleanup_events(&GetCleanupEventsQuery::default()).await.unwrap();
        assert_eq!(all.total, 2);

        let by_region = GetCleanupEventsQuery {
            region_id: Some(REGION_ID.to_string()),
            ..Default::default()
        };
        let page = f.service.get_cleanup_events(&by_region).await.unwrap();
        assert_eq!(page.total, 1);
        let item = &page.cleanup_events[0];
        assert_eq!(item.settlement.as_ref().unwrap().id, KYIV_ID);
        assert_eq!(item.settlement.as_ref().unwrap().region.as_ref().unwrap().id, REGION_ID);
        assert_eq!(item.organizer.as_ref().unwrap().name, "organizer");

        let conflicting = GetCleanupEventsQuery {
            region_id: Some(REGION_ID.to_string()),
            settlement_id: Some(LVIV_ID.to_string()),
            ..Default::default()
        };
        assert_eq!(f.service.get_cleanup_events(&conflicting).await.unwrap().total, 0);

        let by_name = GetCleanupEventsQuery {
            name: Some("PARK".to_string()),
            ..Default::default()
        };
        assert_eq!(f.service.get_cleanup_events(&by_name).await.unwrap().total, 1);
    }

    #[actix_web::test]
    async fn test_list_is_paginated_sorted_and_cached() {
        let f = fixture();
        for name in ["Cleanup gamma", "Cleanup alpha", "Cleanup beta"] {
            let mut request = sample_upsert_request();
            request.name = name.to_string();
            f.service.create_cleanup_event(request, &f.organizer.id).await.unwrap();
        }

        let query = GetCleanupEventsQuery {
            sort_by: Some(crate::domain::dto::cleanup_events::SortBy::Name),
            page: 1,
            page_size: 2,
            ..Default::default()
        };
        let page = f.service.get_cleanup_events(&query).await.unwrap();

        assert_eq!(page.total, 3);
        let names: Vec<_> = page.cleanup_events.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Cleanup alpha", "Cleanup beta"]);
        assert!(f.cache.contains(&list_cache_key(&query)));

        // 새 이벤트가 생기면 목록 캐시는 비워집니다.
        f.service
            .create_cleanup_event(sample_upsert_request(), &f.organizer.id)
            .await
            .unwrap();
        assert!(!f.cache.contains(&list_cache_key(&query)));
    }

    #[actix_web::test]
    async fn test_take_part_and_leave() {
        let f = fixture();
        let event = f
            .service
            .create_cleanup_event(sample_upsert_request(), &f.organizer.id)
            .await
            .unwrap();
        let volunteer = participant(&f, "volunteer@example.com");
        f.service.get_cleanup_event_by_id(&event.id).await.unwrap();

        let joined = f.service.take_part(&event.id, &volunteer).await.unwrap();
        assert_eq!(joined.user.unwrap().name, "volunteer");
        assert!(!f.cache.contains(&event_cache_key(&event.id)));

        let details = f.service.get_cleanup_event_by_id(&event.id).await.unwrap();
        assert_eq!(details.take_part.len(), 1);
        assert_eq!(details.take_part[0].user.as_ref().unwrap().name, "volunteer");

        assert_eq!(
            f.service.take_part(&event.id, &volunteer).await,
            Err(AppError::ConflictError("You already take part in this event.".to_string()))
        );

        f.service.leave(&event.id, &volunteer.id).await.unwrap();
        assert!(matches!(
            f.service.leave(&event.id, &volunteer.id).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_web::test]
    async fn test_take_part_in_missing_event_is_not_found() {
        let f = fixture();
        let volunteer = participant(&f, "volunteer@example.com");

        assert!(matches!(
            f.service.take_part("missing", &volunteer).await,
            Err(AppError::NotFound(_))
        ));
    }
}
