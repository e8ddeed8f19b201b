//! 폐기 토큰 리포지토리
//!
//! 한 번 기록된 토큰은 삭제하지 않습니다. 조회와 삽입 모두 토큰의
//! SHA-256 해시(`token_hash`)를 키로 사용합니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::core::errors::AppResult;
use crate::core::registry::Repository;
use crate::db::{database_error, duplicate_key_indexes, Database};
use crate::domain::entities::tokens::{hash_token, BlacklistToken};

#[async_trait]
pub trait BlacklistStore: Send + Sync {
    async fn is_blacklisted(&self, token: &str) -> AppResult<bool>;

    /// 여러 토큰을 한 번의 쓰기로 폐기합니다.
    ///
    /// 첫 번째 항목이 이미 폐기된 토큰이면 `false`를 반환합니다. 나머지 항목의
    /// 중복은 무시됩니다.
    async fn add_all(&self, entries: Vec<BlacklistToken>) -> AppResult<bool>;
}

pub struct BlacklistTokenRepository {
    db: Arc<Database>,
}

impl BlacklistTokenRepository {
    pub const COLLECTION: &'static str = "blacklist_tokens";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<BlacklistToken> {
        self.db.collection::<BlacklistToken>(Self::COLLECTION)
    }
}

#[async_trait]
impl Repository for BlacklistTokenRepository {
    fn name(&self) -> &str {
        "blacklist_token"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        let token_index = IndexModel::builder()
            .keys(doc! { "token_hash": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("token_hash_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_index(token_index)
            .await
            .map_err(database_error)?;

        Ok(())
    }
}

#[async_trait]
impl BlacklistStore for BlacklistTokenRepository {
    async fn is_blacklisted(&self, token: &str) -> AppResult<bool> {
        let count = self
            .collection()
            .count_documents(doc! { "token_hash": hash_token(token) })
            .await
            .map_err(database_error)?;

        Ok(count > 0)
    }

    async fn add_all(&self, entries: Vec<BlacklistToken>) -> AppResult<bool> {
        if entries.is_empty() {
            return Ok(true);
        }

        match self.collection().insert_many(&entries).ordered(false).await {
            Ok(_) => Ok(true),
            Err(e) => match duplicate_key_indexes(&e) {
                Some(indexes) => Ok(!indexes.contains(&0)),
                None => Err(database_error(e)),
            },
        }
    }
}
