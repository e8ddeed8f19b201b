//! 정착지/지역 참조 데이터 리포지토리 (읽기 전용)

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::core::errors::AppResult;
use crate::core::registry::Repository;
use crate::db::{database_error, Database};
use crate::domain::entities::geo::{Region, Settlement};

#[async_trait]
pub trait SettlementStore: Send + Sync {
    async fn find_settlement(&self, id: &str) -> AppResult<Option<Settlement>>;

    async fn find_settlements_by_ids(&self, ids: &[String]) -> AppResult<Vec<Settlement>>;

    /// 지역에 속한 정착지 ID 목록
    async fn find_settlement_ids_by_region(&self, region_id: &str) -> AppResult<Vec<String>>;

    async fn find_region(&self, id: &str) -> AppResult<Option<Region>>;

    async fn find_regions_by_ids(&self, ids: &[String]) -> AppResult<Vec<Region>>;
}

pub struct SettlementRepository {
    db: Arc<Database>,
}

impl SettlementRepository {
    pub const COLLECTION: &'static str = "settlements";
    pub const REGION_COLLECTION: &'static str = "regions";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn settlements(&self) -> Collection<Settlement> {
        self.db.collection::<Settlement>(Self::COLLECTION)
    }

    fn regions(&self) -> Collection<Region> {
        self.db.collection::<Region>(Self::REGION_COLLECTION)
    }
}

#[async_trait]
impl Repository for SettlementRepository {
    fn name(&self) -> &str {
        "settlement"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        let region_index = IndexModel::builder()
            .keys(doc! { "region_id": 1 })
            .options(IndexOptions::builder()
                .name("region_id".to_string())
                .build())
            .build();

        self.settlements()
            .create_index(region_index)
            .await
            .map_err(database_error)?;

        Ok(())
    }
}

#[async_trait]
impl SettlementStore for SettlementRepository {
    async fn find_settlement(&self, id: &str) -> AppResult<Option<Settlement>> {
        self.settlements()
            .find_one(doc! { "_id": id })
            .await
            .map_err(database_error)
    }

    async fn find_settlements_by_ids(&self, ids: &[String]) -> AppResult<Vec<Settlement>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.settlements()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)
    }

    async fn find_settlement_ids_by_region(&self, region_id: &str) -> AppResult<Vec<String>> {
        let settlements: Vec<Settlement> = self
            .settlements()
            .find(doc! { "region_id": region_id })
            .await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)?;

        Ok(settlements.into_iter().map(|settlement| settlement.id).collect())
    }

    async fn find_region(&self, id: &str) -> AppResult<Option<Region>> {
        self.regions()
            .find_one(doc! { "_id": id })
            .await
            .map_err(database_error)
    }

    async fn find_regions_by_ids(&self, ids: &[String]) -> AppResult<Vec<Region>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.regions()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)
    }
}
