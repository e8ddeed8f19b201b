//! 이벤트 참가 리포지토리 (`take_parts`)

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::core::errors::AppResult;
use crate::core::registry::Repository;
use crate::db::{database_error, is_duplicate_key_error, Database};
use crate::domain::entities::cleanup_events::TakePart;

#[async_trait]
pub trait TakePartStore: Send + Sync {
    async fn find_by_event(&self, event_id: &str) -> AppResult<Vec<TakePart>>;

    /// 새로 참가했으면 `true`, 이미 참가 중이면 `false`
    async fn add(&self, take_part: TakePart) -> AppResult<bool>;

    /// 참가 기록을 지웠으면 `true`
    async fn remove(&self, event_id: &str, user_id: &str) -> AppResult<bool>;
}

pub struct TakePartRepository {
    db: Arc<Database>,
}

impl TakePartRepository {
    pub const COLLECTION: &'static str = "take_parts";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<TakePart> {
        self.db.collection::<TakePart>(Self::COLLECTION)
    }
}

#[async_trait]
impl Repository for TakePartRepository {
    fn name(&self) -> &str {
        "take_part"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        let participant_index = IndexModel::builder()
            .keys(doc! { "event_id": 1, "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("event_user_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_index(participant_index)
            .await
            .map_err(database_error)?;

        Ok(())
    }
}

#[async_trait]
impl TakePartStore for TakePartRepository {
    async fn find_by_event(&self, event_id: &str) -> AppResult<Vec<TakePart>> {
        self.collection()
            .find(doc! { "event_id": event_id })
            .sort(doc! { "created_at": 1 })
            .await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)
    }

    async fn add(&self, take_part: TakePart) -> AppResult<bool> {
        match self.collection().insert_one(&take_part).await {
            Ok(_) => Ok(true),
            Err(e) if is_duplicate_key_error(&e) => Ok(false),
            Err(e) => Err(database_error(e)),
        }
    }

    async fn remove(&self, event_id: &str, user_id: &str) -> AppResult<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "event_id": event_id, "user_id": user_id })
            .await
            .map_err(database_error)?;

        Ok(result.deleted_count > 0)
    }
}
