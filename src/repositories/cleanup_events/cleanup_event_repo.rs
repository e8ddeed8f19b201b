//! # 클린업 이벤트 리포지토리
//!
//! 이벤트 본문(`cleanup_events`)과 하위 문서(`cleanup_event_locations`,
//! `cleanup_event_dates`, `cleanup_equipments`)를 함께 다룹니다.
//!
//! 생성/수정은 하나의 MongoDB 트랜잭션 안에서 모든 컬렉션에 기록하며,
//! 중간에 실패하면 전체를 abort 합니다. 트랜잭션은 레플리카셋 구성이 필요합니다.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures_util::TryStreamExt;
use mongodb::bson::{doc, Document, Regex};
use mongodb::options::IndexOptions;
use mongodb::{ClientSession, Collection, IndexModel};

use crate::core::errors::AppResult;
use crate::core::registry::Repository;
use crate::db::{database_error, Database};
use crate::domain::dto::cleanup_events::{SortBy, SortOrder};
use crate::domain::entities::cleanup_events::{
    CleanupEquipment, CleanupEvent, CleanupEventDate, CleanupEventLocation, EventStatus,
};
use crate::utils::time::to_bson;

/// 이벤트 한 건과 그 하위 문서 전체
///
/// 생성/수정 시 트랜잭션 단위로 기록되는 묶음입니다.
#[derive(Debug, Clone, PartialEq)]
pub struct CleanupEventAggregate {
    pub event: CleanupEvent,
    pub location: CleanupEventLocation,
    pub dates: Vec<CleanupEventDate>,
    pub equipments: Vec<CleanupEquipment>,
}

/// 목록 조회 필터
///
/// `settlement_ids`가 `Some`이면 그 목록 안의 정착지만 일치합니다.
/// 빈 목록은 어떤 이벤트와도 일치하지 않습니다.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CleanupEventFilter {
    pub name_contains: Option<String>,
    pub status: Option<EventStatus>,
    pub settlement_ids: Option<Vec<String>>,
    pub start_from: Option<DateTime<Utc>>,
    pub end_until: Option<DateTime<Utc>>,
}

impl CleanupEventFilter {
    /// 메모리 구현과 테스트에서 쓰는 일치 판정
    pub fn matches(&self, event: &CleanupEvent) -> bool {
        if let Some(name) = &self.name_contains {
            if !event.name.to_lowercase().contains(&name.to_lowercase()) {
                return false;
            }
        }

        if let Some(status) = self.status {
            if event.status != status {
                return false;
            }
        }

        if let Some(ids) = &self.settlement_ids {
            if !ids.contains(&event.settlement_id) {
                return false;
            }
        }

        if let Some(from) = &self.start_from {
            if event.start_date < to_bson(from) {
                return false;
            }
        }

        if let Some(until) = &self.end_until {
            if event.end_date > to_bson(until) {
                return false;
            }
        }

        true
    }

    /// MongoDB 쿼리 문서로 변환합니다.
    pub fn to_document(&self) -> Document {
        let mut filter = Document::new();

        if let Some(name) = &self.name_contains {
            filter.insert(
                "name",
                Regex {
                    pattern: escape_regex(name),
                    options: "i".to_string(),
                },
            );
        }

        if let Some(status) = self.status {
            filter.insert("status", status.as_str());
        }

        if let Some(ids) = &self.settlement_ids {
            filter.insert("settlement_id", doc! { "$in": ids.clone() });
        }

        if let Some(from) = &self.start_from {
            filter.insert("start_date", doc! { "$gte": to_bson(from) });
        }

        if let Some(until) = &self.end_until {
            filter.insert("end_date", doc! { "$lte": to_bson(until) });
        }

        filter
    }
}

/// 정렬 기준. `None`이면 저장 순서를 유지합니다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CleanupEventSort {
    pub by: SortBy,
    pub order: SortOrder,
}

impl CleanupEventSort {
    pub fn to_document(&self) -> Document {
        let mut sort = Document::new();
        sort.insert(self.by.field(), self.order.direction());
        sort
    }
}

fn escape_regex(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if "\\^$.|?*+()[]{}".contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

#[async_trait]
pub trait CleanupEventStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<CleanupEvent>>;

    async fn find_location(&self, event_id: &str) -> AppResult<Option<CleanupEventLocation>>;

    async fn find_dates(&self, event_id: &str) -> AppResult<Vec<CleanupEventDate>>;

    async fn find_equipments(&self, event_id: &str) -> AppResult<Vec<CleanupEquipment>>;

    /// 이벤트와 하위 문서를 한 트랜잭션으로 생성합니다.
    async fn create(&self, aggregate: CleanupEventAggregate) -> AppResult<CleanupEvent>;

    /// 이벤트를 갱신하고, 위치는 upsert, 날짜/장비는 전부 교체합니다. (한 트랜잭션)
    async fn update(&self, aggregate: CleanupEventAggregate) -> AppResult<CleanupEvent>;

    async fn find_page(
        &self,
        filter: &CleanupEventFilter,
        sort: Option<CleanupEventSort>,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<CleanupEvent>>;

    async fn count(&self, filter: &CleanupEventFilter) -> AppResult<u64>;
}

pub struct CleanupEventRepository {
    db: Arc<Database>,
}

impl CleanupEventRepository {
    pub const COLLECTION: &'static str = "cleanup_events";
    pub const LOCATION_COLLECTION: &'static str = "cleanup_event_locations";
    pub const DATE_COLLECTION: &'static str = "cleanup_event_dates";
    pub const EQUIPMENT_COLLECTION: &'static str = "cleanup_equipments";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn events(&self) -> Collection<CleanupEvent> {
        self.db.collection::<CleanupEvent>(Self::COLLECTION)
    }

    fn locations(&self) -> Collection<CleanupEventLocation> {
        self.db.collection::<CleanupEventLocation>(Self::LOCATION_COLLECTION)
    }

    fn dates(&self) -> Collection<CleanupEventDate> {
        self.db.collection::<CleanupEventDate>(Self::DATE_COLLECTION)
    }

    fn equipments(&self) -> Collection<CleanupEquipment> {
        self.db.collection::<CleanupEquipment>(Self::EQUIPMENT_COLLECTION)
    }

    async fn insert_parts(
        &self,
        session: &mut ClientSession,
        aggregate: &CleanupEventAggregate,
    ) -> AppResult<()> {
        if !aggregate.dates.is_empty() {
            self.dates()
                .insert_many(&aggregate.dates)
                .session(&mut *session)
                .await
                .map_err(database_error)?;
        }

        if !aggregate.equipments.is_empty() {
            self.equipments()
                .insert_many(&aggregate.equipments)
                .session(&mut *session)
                .await
                .map_err(database_error)?;
        }

        Ok(())
    }

    async fn write_create(
        &self,
        session: &mut ClientSession,
        aggregate: &CleanupEventAggregate,
    ) -> AppResult<()> {
        self.events()
            .insert_one(&aggregate.event)
            .session(&mut *session)
            .await
            .map_err(database_error)?;

        self.locations()
            .insert_one(&aggregate.location)
            .session(&mut *session)
            .await
            .map_err(database_error)?;

        self.insert_parts(session, aggregate).await
    }

    async fn write_update(
        &self,
        session: &mut ClientSession,
        aggregate: &CleanupEventAggregate,
    ) -> AppResult<()> {
        let event = &aggregate.event;
        let event_id = event.id.as_str();

        self.events()
            .update_one(
                doc! { "_id": event_id },
                doc! { "$set": {
                    "name": event.name.as_str(),
                    "description": event.description.as_str(),
                    "start_date": event.start_date,
                    "end_date": event.end_date,
                    "status": event.status.as_str(),
                    "image_url": event.image_url.as_str(),
                    "settlement_id": event.settlement_id.as_str(),
                    "organizer_id": event.organizer_id.as_str(),
                    "updated_at": event.updated_at,
                } },
            )
            .session(&mut *session)
            .await
            .map_err(database_error)?;

        let location = &aggregate.location;
        self.locations()
            .update_one(
                doc! { "event_id": event_id },
                doc! {
                    "$set": {
                        "latitude": location.latitude,
                        "longitude": location.longitude,
                        "settlement_id": location.settlement_id.as_str(),
                    },
                    "$setOnInsert": { "_id": location.id.as_str() },
                },
            )
            .upsert(true)
            .session(&mut *session)
            .await
            .map_err(database_error)?;

        self.dates()
            .delete_many(doc! { "event_id": event_id })
            .session(&mut *session)
            .await
            .map_err(database_error)?;

        self.equipments()
            .delete_many(doc! { "event_id": event_id })
            .session(&mut *session)
            .await
            .map_err(database_error)?;

        self.insert_parts(session, aggregate).await
    }

    /// 쓰기 결과에 따라 커밋하거나 abort 합니다.
    async fn finish_transaction(session: &mut ClientSession, result: AppResult<()>) -> AppResult<()> {
        match result {
            Ok(()) => session.commit_transaction().await.map_err(database_error),
            Err(error) => {
                if let Err(abort_error) = session.abort_transaction().await {
                    log::error!("트랜잭션 abort 실패: {}", abort_error);
                }
                Err(error)
            }
        }
    }
}

#[async_trait]
impl Repository for CleanupEventRepository {
    fn name(&self) -> &str {
        "cleanup_event"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        let event_indexes = [
            IndexModel::builder()
                .keys(doc! { "settlement_id": 1 })
                .options(IndexOptions::builder().name("settlement_id".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "start_date": 1 })
                .options(IndexOptions::builder().name("start_date".to_string()).build())
                .build(),
            IndexModel::builder()
                .keys(doc! { "end_date": 1 })
                .options(IndexOptions::builder().name("end_date".to_string()).build())
                .build(),
        ];

        self.events()
            .create_indexes(event_indexes)
            .await
            .map_err(database_error)?;

        let location_index = IndexModel::builder()
            .keys(doc! { "event_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("event_id_unique".to_string())
                .build())
            .build();

        self.locations()
            .create_index(location_index)
            .await
            .map_err(database_error)?;

        for collection in [Self::DATE_COLLECTION, Self::EQUIPMENT_COLLECTION] {
            let event_index = IndexModel::builder()
                .keys(doc! { "event_id": 1 })
                .options(IndexOptions::builder().name("event_id".to_string()).build())
                .build();

            self.db
                .collection::<Document>(collection)
                .create_index(event_index)
                .await
                .map_err(database_error)?;
        }

        Ok(())
    }
}

#[async_trait]
impl CleanupEventStore for CleanupEventRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<CleanupEvent>> {
        self.events()
            .find_one(doc! { "_id": id })
            .await
            .map_err(database_error)
    }

    async fn find_location(&self, event_id: &str) -> AppResult<Option<CleanupEventLocation>> {
        self.locations()
            .find_one(doc! { "event_id": event_id })
            .await
            .map_err(database_error)
    }

    async fn find_dates(&self, event_id: &str) -> AppResult<Vec<CleanupEventDate>> {
        self.dates()
            .find(doc! { "event_id": event_id })
            .sort(doc! { "date": 1 })
            .await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)
    }

    async fn find_equipments(&self, event_id: &str) -> AppResult<Vec<CleanupEquipment>> {
        self.equipments()
            .find(doc! { "event_id": event_id })
            .await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)
    }

    async fn create(&self, aggregate: CleanupEventAggregate) -> AppResult<CleanupEvent> {
        let mut session = self.db.start_transaction().await?;
        let result = self.write_create(&mut session, &aggregate).await;
        Self::finish_transaction(&mut session, result).await?;

        log::info!("클린업 이벤트 생성: {}", aggregate.event.id);
        Ok(aggregate.event)
    }

    async fn update(&self, aggregate: CleanupEventAggregate) -> AppResult<CleanupEvent> {
        let mut session = self.db.start_transaction().await?;
        let result = self.write_update(&mut session, &aggregate).await;
        Self::finish_transaction(&mut session, result).await?;

        log::info!("클린업 이벤트 수정: {}", aggregate.event.id);
        Ok(aggregate.event)
    }

    async fn find_page(
        &self,
        filter: &CleanupEventFilter,
        sort: Option<CleanupEventSort>,
        skip: u64,
        limit: u64,
    ) -> AppResult<Vec<CleanupEvent>> {
        let events = self.events();
        let mut find = events
            .find(filter.to_document())
            .skip(skip)
            .limit(limit as i64);

        if let Some(sort) = sort {
            find = find.sort(sort.to_document());
        }

        find.await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)
    }

    async fn count(&self, filter: &CleanupEventFilter) -> AppResult<u64> {
        self.events()
            .count_documents(filter.to_document())
            .await
            .map_err(database_error)
    }
}
