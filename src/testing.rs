//! 테스트 전용 메모리 구현과 공용 테스트 컨텍스트
//!
//! 각 가짜 구현은 `fail_next()`로 다음 호출 한 번을 실패시킬 수 있습니다.
//! [`context`]는 가짜 구현으로 만든 서비스를 [`ServiceLocator`]에 한 번만 등록하므로
//! 핸들러/미들웨어 테스트는 서로 다른 이메일과 데이터를 사용해야 합니다.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use once_cell::sync::Lazy;

use crate::caching::Cache;
use crate::core::errors::{AppError, AppResult};
use crate::core::registry::ServiceLocator;
use crate::domain::dto::cleanup_events::{
    SortBy, SortOrder, UpsertCleanupEquipmentRequest, UpsertCleanupEventDateRequest,
    UpsertCleanupEventLocationRequest, UpsertCleanupEventRequest,
};
use crate::domain::entities::cleanup_events::{
    CleanupEquipment, CleanupEvent, CleanupEventDate, CleanupEventLocation, EventStatus, TakePart,
};
use crate::domain::entities::geo::{Region, Settlement};
use crate::domain::entities::otp::Otp;
use crate::domain::entities::tokens::{hash_token, BlacklistToken};
use crate::domain::entities::users::User;
use crate::domain::models::geocoding::ReverseGeocodeResult;
use crate::repositories::cleanup_events::{
    CleanupEventAggregate, CleanupEventFilter, CleanupEventSort, CleanupEventStore, TakePartStore,
};
use crate::repositories::geo::SettlementStore;
use crate::repositories::otp::OtpStore;
use crate::repositories::tokens::BlacklistStore;
use crate::repositories::users::UserStore;
use crate::services::auth::{AuthService, TokenService};
use crate::services::cleanup_events::CleanupEventService;
use crate::services::geocoding::Geocoder;
use crate::services::mail::{MailMessage, Mailer};
use crate::services::otp::OtpService;

pub const KYIV_ID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";
pub const LVIV_ID: &str = "1a2b3c4d-5e6f-4a7b-8c9d-0e1f2a3b4c5d";
pub const REGION_ID: &str = "6ba7b810-9dad-41d1-80b4-00c04fd430c8";
pub const LVIV_REGION_ID: &str = "6ba7b811-9dad-41d1-80b4-00c04fd430c8";
pub const TEST_JWT_SECRET: &str = "test-secret";

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// `fail_next()` 이후 첫 호출만 실패시키는 스위치
#[derive(Default)]
struct FailSwitch(AtomicBool);

impl FailSwitch {
    fn arm(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.0.swap(false, Ordering::SeqCst) {
            return Err(AppError::DatabaseError("injected failure".to_string()));
        }
        Ok(())
    }
}

/// 시드된 키이우 정착지를 가리키는 유효한 생성/수정 요청
pub fn sample_upsert_request() -> UpsertCleanupEventRequest {
    UpsertCleanupEventRequest {
        name: "Riverside cleanup".to_string(),
        description: "Collecting plastic along the river bank".to_string(),
        start_date: "2025-06-01T08:00:00Z".parse().unwrap(),
        end_date: "2025-06-03T18:00:00Z".parse().unwrap(),
        status: EventStatus::Planned,
        dates: vec![UpsertCleanupEventDateRequest {
            date: "2025-06-02T08:00:00Z".parse().unwrap(),
        }],
        image_url: "https://example.com/river.png".to_string(),
        settlement_id: KYIV_ID.to_string(),
        equipments: vec![UpsertCleanupEquipmentRequest {
            equipment_id: "7c9e6679-7425-40de-944b-e07fc1f90ae7".to_string(),
            quantity: 5,
        }],
        location: UpsertCleanupEventLocationRequest {
            latitude: 50.45,
            longitude: 30.52,
        },
    }
}

// ---------------------------------------------------------------------------
// users

#[derive(Default)]
pub struct InMemoryUserStore {
    users: Mutex<HashMap<String, User>>,
    failure: FailSwitch,
}

impl InMemoryUserStore {
    pub fn insert(&self, user: User) {
        lock(&self.users).insert(user.id.clone(), user);
    }

    pub fn get_by_email(&self, email: &str) -> Option<User> {
        lock(&self.users).values().find(|user| user.email == email).cloned()
    }

    pub fn fail_next(&self) {
        self.failure.arm();
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.failure.check()?;
        Ok(self.get_by_email(email))
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.failure.check()?;
        Ok(lock(&self.users).get(id).cloned())
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        self.failure.check()?;
        let users = lock(&self.users);
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn create(&self, user: User) -> AppResult<User> {
        self.failure.check()?;
        let mut users = lock(&self.users);
        if users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::ConflictError("Email already exists".to_string()));
        }
        users.insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<bool> {
        self.failure.check()?;
        match lock(&self.users).get_mut(id) {
            Some(user) => {
                user.password_hash = password_hash.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ---------------------------------------------------------------------------
// blacklist

#[derive(Default)]
pub struct InMemoryBlacklistStore {
    entries: Mutex<HashMap<String, BlacklistToken>>,
    failure: FailSwitch,
    write_failure: FailSwitch,
}

impl InMemoryBlacklistStore {
    pub fn contains(&self, token: &str) -> bool {
        lock(&self.entries).contains_key(&hash_token(token))
    }

    pub fn fail_next(&self) {
        self.failure.arm();
    }

    /// 다음 `add_all` 호출만 실패시킵니다. 조회는 그대로 동작합니다.
    pub fn fail_next_write(&self) {
        self.write_failure.arm();
    }
}

#[async_trait]
impl BlacklistStore for InMemoryBlacklistStore {
    async fn is_blacklisted(&self, token: &str) -> AppResult<bool> {
        self.failure.check()?;
        Ok(self.contains(token))
    }

    async fn add_all(&self, new_entries: Vec<BlacklistToken>) -> AppResult<bool> {
        self.failure.check()?;
        self.write_failure.check()?;

        let mut entries = lock(&self.entries);
        let first_is_new = new_entries
            .first()
            .is_none_or(|entry| !entries.contains_key(&entry.token_hash));

        for entry in new_entries {
            entries.entry(entry.token_hash.clone()).or_insert(entry);
        }
        Ok(first_is_new)
    }
}

// ---------------------------------------------------------------------------
// otp

#[derive(Default)]
pub struct InMemoryOtpStore {
    otps: Mutex<HashMap<String, Otp>>,
    failure: FailSwitch,
}

impl InMemoryOtpStore {
    pub fn get(&self, user_id: &str) -> Option<Otp> {
        lock(&self.otps).get(user_id).cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.otps).len()
    }

    pub fn insert(&self, otp: Otp) {
        lock(&self.otps).insert(otp.user_id.clone(), otp);
    }

    pub fn fail_next(&self) {
        self.failure.arm();
    }
}

#[async_trait]
impl OtpStore for InMemoryOtpStore {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Otp>> {
        self.failure.check()?;
        Ok(self.get(user_id))
    }

    async fn replace_for_user(&self, otp: Otp) -> AppResult<()> {
        self.failure.check()?;
        self.insert(otp);
        Ok(())
    }

    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<bool> {
        self.failure.check()?;
        Ok(lock(&self.otps).remove(user_id).is_some())
    }
}

// ---------------------------------------------------------------------------
// settlements

#[derive(Default)]
pub struct InMemorySettlementStore {
    settlements: Vec<Settlement>,
    regions: Vec<Region>,
}

impl InMemorySettlementStore {
    /// 키이우(키이우 지역)와 르비우(르비우 지역)
    pub fn seeded() -> Self {
        Self {
            settlements: vec![
                Settlement {
                    id: KYIV_ID.to_string(),
                    name: "Київ".to_string(),
                    latitude: 50.45,
                    longitude: 30.52,
                    region_id: REGION_ID.to_string(),
                },
                Settlement {
                    id: LVIV_ID.to_string(),
                    name: "Львів".to_string(),
                    latitude: 49.84,
                    longitude: 24.03,
                    region_id: LVIV_REGION_ID.to_string(),
                },
            ],
            regions: vec![
                Region {
                    id: REGION_ID.to_string(),
                    name: "Київська область".to_string(),
                    latitude: 50.05,
                    longitude: 30.77,
                },
                Region {
                    id: LVIV_REGION_ID.to_string(),
                    name: "Львівська область".to_string(),
                    latitude: 49.65,
                    longitude: 24.05,
                },
            ],
        }
    }
}

#[async_trait]
impl SettlementStore for InMemorySettlementStore {
    async fn find_settlement(&self, id: &str) -> AppResult<Option<Settlement>> {
        Ok(self.settlements.iter().find(|s| s.id == id).cloned())
    }

    async fn find_settlements_by_ids(&self, ids: &[String]) -> AppResult<Vec<Settlement>> {
        Ok(self.settlements.iter().filter(|s| ids.contains(&s.id)).cloned().collect())
    }

    async fn find_settlement_ids_by_region(&self, region_id: &str) -> AppResult<Vec<String>> {
        Ok(self
            .settlements
            .iter()
            .filter(|s| s.region_id == region_id)
            .map(|s| s.id.clone())
            .collect())
    }

    async fn find_region(&self, id: &str) -> AppResult<Option<Region>> {
        Ok(self.regions.iter().find(|r| r.id == id).cloned())
    }

    async fn find_regions_by_ids(&self, ids: &[String]) -> AppResult<Vec<Region>> {
        Ok(self.regions.iter().filter(|r| ids.contains(&r.id)).cloned().collect())
    }
}

// ---------------------------------------------------------------------------
// cleanup events

/// 삽입 순서를 유지하는 이벤트 저장소
#[derive(Default)]
pub struct InMemoryCleanupEventStore {
    aggregates: Mutex<Vec<CleanupEventAggregate>>,
    failure: FailSwitch,
}

impl InMemoryCleanupEventStore {
    pub fn aggregate(&self, event_id: &str) -> Option<CleanupEventAggregate> {
        lock(&self.aggregates)
            .iter()
            .find(|aggregate| aggregate.event.id == event_id)
            .cloned()
    }

    pub fn len(&self) -> usize {
        lock(&self.aggregates).len()
    }

    pub fn fail_next(&self) {
        self.failure.arm();
    }
}

#[async_trait]
impl CleanupEventStore for InMemoryCleanupEventStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<CleanupEvent>> {
        self.failure.check()?;
        Ok(self.aggregate(id).map(|aggregate| aggregate.event))
    }

    async fn find_location(&self, event_id: &str) -> AppResult<Option<CleanupEventLocation>> {
        self.failure.check()?;
        Ok(self.aggregate(event_id).map(|aggregate| aggregate.location))
    }

    async fn find_dates(&self, event_id: &str) -> AppResult<Vec<CleanupEventDate>> {
        self.failure.check()?;
        Ok(self.aggregate(event_id).map(|aggregate| aggregate.dates).unwrap_or_default())
    }

    async fn find_equipments(&self, event_id: &str) -> AppResult<Vec<CleanupEquipment>> {
        self.failure.check()?;
        Ok(self
            .aggregate(event_id)
            .map(|aggregate| aggregate.equipments)
            .unwrap_or_default())
    }

    async fn create(&self, aggregate: CleanupEventAggregate) -> AppResult<CleanupEvent> {
        self.failure.check()?;
        let event = aggregate.event.clone();
        lock(&self.aggregates).push(aggregate);
        Ok(event)
    }

    async fn update(&self, aggregate: CleanupEventAggregate) -> AppResult<CleanupEvent> {
        self.failure.check()?;
        let mut aggregates = lock(&self.aggregates);
        let slot = aggregates
            .iter_mut()
            .find(|existing| existing.event.id == aggregate.event.id)
            .ok_or_else(|| AppError::NotFound("event not stored".to_string()))?;

        let event = aggregate.event.clone();
        *slot = aggregate;
        Ok(event)
    }

    async fn find_page(
        &self,
        filter: &CleanupEventFilter,
        sort: Option<CleanupEventSort>,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<CleanupEvent>> {
        self.failure.check()?;
        let mut events: Vec<CleanupEvent> = lock(&self.aggregates)
            .iter()
            .map(|aggregate| aggregate.event.clone())
            .filter(|event| filter.matches(event))
            .collect();

        if let Some(sort) = sort {
            events.sort_by(|a, b| {
                let ordering = match sort.by {
                    SortBy::Name => a.name.cmp(&b.name),
                    SortBy::StartDate => a.start_date.cmp(&b.start_date),
                    SortBy::EndDate => a.end_date.cmp(&b.end_date),
                };
                match sort.order {
                    SortOrder::Asc => ordering,
                    SortOrder::Desc => ordering.reverse(),
                }
            });
        }

        Ok(events
            .into_iter()
            .skip(skip as usize)
            .take(limit as usize)
            .collect())
    }

    async fn count(&self, filter: &CleanupEventFilter) -> AppResult<u64> {
        self.failure.check()?;
        Ok(lock(&self.aggregates)
            .iter()
            .filter(|aggregate| filter.matches(&aggregate.event))
            .count() as u64)
    }
}

#[derive(Default)]
pub struct InMemoryTakePartStore {
    take_parts: Mutex<Vec<TakePart>>,
}

#[async_trait]
impl TakePartStore for InMemoryTakePartStore {
    async fn find_by_event(&self, event_id: &str) -> AppResult<Vec<TakePart>> {
        Ok(lock(&self.take_parts)
            .iter()
            .filter(|take_part| take_part.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn add(&self, take_part: TakePart) -> AppResult<bool> {
        let mut take_parts = lock(&self.take_parts);
        if take_parts
            .iter()
            .any(|existing| existing.event_id == take_part.event_id && existing.user_id == take_part.user_id)
        {
            return Ok(false);
        }
        take_parts.push(take_part);
        Ok(true)
    }

    async fn remove(&self, event_id: &str, user_id: &str) -> AppResult<bool> {
        let mut take_parts = lock(&self.take_parts);
        let before = take_parts.len();
        take_parts.retain(|take_part| !(take_part.event_id == event_id && take_part.user_id == user_id));
        Ok(take_parts.len() < before)
    }
}

// ---------------------------------------------------------------------------
// cache

/// TTL은 무시합니다. `del_pattern`은 끝의 `*` 하나만 지원합니다.
#[derive(Default)]
pub struct InMemoryCache {
    entries: Mutex<HashMap<String, String>>,
    failing: AtomicBool,
}

impl InMemoryCache {
    pub fn put(&self, key: &str, value: &str) {
        lock(&self.entries).insert(key.to_string(), value.to_string());
    }

    pub fn contains(&self, key: &str) -> bool {
        lock(&self.entries).contains_key(key)
    }

    /// 켜 두면 모든 호출이 `RedisError`를 반환합니다.
    pub fn fail_all(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::RedisError("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Cache for InMemoryCache {
    async fn get_string(&self, key: &str) -> AppResult<Option<String>> {
        self.check()?;
        Ok(lock(&self.entries).get(key).cloned())
    }

    async fn set_string_with_expiry(&self, key: &str, value: &str, _seconds: u64) -> AppResult<()> {
        self.check()?;
        self.put(key, value);
        Ok(())
    }

    async fn del(&self, key: &str) -> AppResult<()> {
        self.check()?;
        lock(&self.entries).remove(key);
        Ok(())
    }

    async fn del_pattern(&self, pattern: &str) -> AppResult<usize> {
        self.check()?;
        let prefix = pattern.trim_end_matches('*');
        let mut entries = lock(&self.entries);
        let before = entries.len();
        entries.retain(|key, _| !key.starts_with(prefix));
        Ok(before - entries.len())
    }
}

// ---------------------------------------------------------------------------
// mail / geocoding

#[derive(Default)]
pub struct FakeMailer {
    sent: Mutex<Vec<MailMessage>>,
    failure: FailSwitch,
}

impl FakeMailer {
    pub fn last(&self) -> Option<MailMessage> {
        lock(&self.sent).last().cloned()
    }

    pub fn last_to(&self, recipient: &str) -> Option<MailMessage> {
        lock(&self.sent).iter().rev().find(|message| message.to == recipient).cloned()
    }

    pub fn fail_next(&self) {
        self.failure.arm();
    }
}

#[async_trait]
impl Mailer for FakeMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        if self.failure.check().is_err() {
            return Err(AppError::ExternalServiceError("Failed to send email".to_string()));
        }
        lock(&self.sent).push(message);
        Ok(())
    }
}

pub struct FakeGeocoder {
    locality: Mutex<Option<String>>,
    failure: FailSwitch,
}

impl FakeGeocoder {
    pub fn with_locality(locality: &str) -> Self {
        Self {
            locality: Mutex::new(Some(locality.to_string())),
            failure: FailSwitch::default(),
        }
    }

    pub fn set_locality(&self, locality: Option<&str>) {
        *lock(&self.locality) = locality.map(str::to_string);
    }

    pub fn fail_next(&self) {
        self.failure.arm();
    }
}

#[async_trait]
impl Geocoder for FakeGeocoder {
    async fn reverse(&self, _latitude: f64, _longitude: f64) -> AppResult<ReverseGeocodeResult> {
        if self.failure.check().is_err() {
            return Err(AppError::ExternalServiceError("Error while requesting Nominatim".to_string()));
        }
        Ok(ReverseGeocodeResult {
            locality: lock(&self.locality).clone(),
        })
    }
}

// ---------------------------------------------------------------------------
// 공용 컨텍스트

/// [`ServiceLocator`]에 등록된 서비스들이 공유하는 가짜 구현
pub struct TestContext {
    pub users: Arc<InMemoryUserStore>,
    pub blacklist: Arc<InMemoryBlacklistStore>,
    pub otps: Arc<InMemoryOtpStore>,
    pub events: Arc<InMemoryCleanupEventStore>,
    pub mailer: Arc<FakeMailer>,
    pub tokens: Arc<TokenService>,
}

static CONTEXT: Lazy<TestContext> = Lazy::new(|| {
    let users = Arc::new(InMemoryUserStore::default());
    let blacklist = Arc::new(InMemoryBlacklistStore::default());
    let otps = Arc::new(InMemoryOtpStore::default());
    let events = Arc::new(InMemoryCleanupEventStore::default());
    let mailer = Arc::new(FakeMailer::default());
    let tokens = Arc::new(TokenService::new(TEST_JWT_SECRET.to_string(), 900, 3600));

    let otp_service = Arc::new(OtpService::new(otps.clone(), mailer.clone(), 15, 4));
    let auth_service = Arc::new(AuthService::new(
        users.clone(),
        blacklist.clone(),
        tokens.clone(),
        otp_service.clone(),
        4,
    ));
    let cleanup_event_service = Arc::new(CleanupEventService::new(
        events.clone(),
        Arc::new(InMemoryTakePartStore::default()),
        Arc::new(InMemorySettlementStore::seeded()),
        users.clone(),
        Arc::new(FakeGeocoder::with_locality("Київ")),
        Arc::new(InMemoryCache::default()),
        300,
    ));

    ServiceLocator::set(tokens.clone());
    ServiceLocator::set(otp_service);
    ServiceLocator::set(auth_service);
    ServiceLocator::set(cleanup_event_service);

    TestContext {
        users,
        blacklist,
        otps,
        events,
        mailer,
        tokens,
    }
});

/// 서비스가 등록된 공용 컨텍스트
pub fn context() -> &'static TestContext {
    &CONTEXT
}

impl TestContext {
    /// 새 사용자를 만들고 `Authorization` 헤더 값을 반환합니다.
    pub fn register(&self, email: &str) -> (User, String) {
        let user = User::new(email.to_string(), bcrypt::hash("secret1", 4).unwrap());
        self.users.insert(user.clone());
        let access_token = self.tokens.create_access_token(&user.id).unwrap();
        (user, format!("Bearer {}", access_token))
    }
}
