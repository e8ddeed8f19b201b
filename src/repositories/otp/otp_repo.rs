//! OTP 리포지토리
//!
//! `user_id` 유니크 인덱스로 사용자당 한 건을 유지합니다.

use std::sync::Arc;

use async_trait::async_trait;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::core::errors::AppResult;
use crate::core::registry::Repository;
use crate::db::{database_error, Database};
use crate::domain::entities::otp::Otp;

#[async_trait]
pub trait OtpStore: Send + Sync {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Otp>>;

    /// 사용자의 기존 코드를 새 코드로 교체합니다. 없으면 생성합니다.
    async fn replace_for_user(&self, otp: Otp) -> AppResult<()>;

    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<bool>;
}

pub struct OtpRepository {
    db: Arc<Database>,
}

impl OtpRepository {
    pub const COLLECTION: &'static str = "otps";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<Otp> {
        self.db.collection::<Otp>(Self::COLLECTION)
    }
}

#[async_trait]
impl Repository for OtpRepository {
    fn name(&self) -> &str {
        "otp"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        let user_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("user_id_unique".to_string())
                .build())
            .build();

        self.collection()
            .create_index(user_index)
            .await
            .map_err(database_error)?;

        Ok(())
    }
}

#[async_trait]
impl OtpStore for OtpRepository {
    async fn find_by_user_id(&self, user_id: &str) -> AppResult<Option<Otp>> {
        self.collection()
            .find_one(doc! { "user_id": user_id })
            .await
            .map_err(database_error)
    }

    async fn replace_for_user(&self, otp: Otp) -> AppResult<()> {
        // 단일 upsert로 교체하므로 동시에 재발급해도 문서는 하나만 남습니다.
        self.collection()
            .update_one(
                doc! { "user_id": otp.user_id.as_str() },
                doc! {
                    "$set": {
                        "code_hash": otp.code_hash.as_str(),
                        "created_at": otp.created_at,
                        "updated_at": otp.updated_at,
                    },
                    "$setOnInsert": { "_id": otp.id.as_str() },
                },
            )
            .upsert(true)
            .await
            .map_err(database_error)?;

        Ok(())
    }

    async fn delete_by_user_id(&self, user_id: &str) -> AppResult<bool> {
        let result = self
            .collection()
            .delete_one(doc! { "user_id": user_id })
            .await
            .map_err(database_error)?;

        Ok(result.deleted_count > 0)
    }
}
