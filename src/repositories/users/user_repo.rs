//! # 사용자 리포지토리 구현
//!
//! `users` 컬렉션의 데이터 액세스 계층입니다.
//! 이메일 중복은 유니크 인덱스가 최종적으로 보장하며, 위반 시
//! `ConflictError("Email already exists")`로 변환합니다.

use std::sync::Arc;

use async_trait::async_trait;
use futures_util::TryStreamExt;
use mongodb::{bson::doc, options::IndexOptions, Collection, IndexModel};

use crate::core::errors::{AppError, AppResult};
use crate::core::registry::Repository;
use crate::db::{database_error, is_duplicate_key_error, Database};
use crate::domain::entities::users::User;

/// 사용자 저장소 인터페이스
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>>;

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    /// 목록 응답의 주최자 정보를 한 번에 조회합니다.
    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>>;

    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이메일 유니크 인덱스 위반
    async fn create(&self, user: User) -> AppResult<User>;

    /// 비밀번호 해시를 교체합니다. 사용자가 없으면 `false`.
    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<bool>;
}

/// MongoDB 사용자 리포지토리
///
/// - **컬렉션명**: `users`
/// - **인덱스**: email(unique), created_at(desc)
pub struct UserRepository {
    db: Arc<Database>,
}

impl UserRepository {
    pub const COLLECTION: &'static str = "users";

    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    fn collection(&self) -> Collection<User> {
        self.db.collection::<User>(Self::COLLECTION)
    }

    /// 데이터베이스 인덱스 생성
    ///
    /// 이미 중복 이메일이 있는 컬렉션에서는 유니크 인덱스 생성이 실패합니다.
    pub async fn create_indexes(&self) -> AppResult<()> {
        let email_index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder()
                .unique(true)
                .name("email_unique".to_string())
                .build())
            .build();

        let created_at_index = IndexModel::builder()
            .keys(doc! { "created_at": -1 })
            .options(IndexOptions::builder()
                .name("created_at_desc".to_string())
                .build())
            .build();

        self.collection()
            .create_indexes([email_index, created_at_index])
            .await
            .map_err(database_error)?;

        Ok(())
    }
}

#[async_trait]
impl Repository for UserRepository {
    fn name(&self) -> &str {
        "user"
    }

    fn collection_name(&self) -> &str {
        Self::COLLECTION
    }

    async fn init(&self) -> AppResult<()> {
        self.create_indexes().await
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "email": email })
            .await
            .map_err(database_error)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.collection()
            .find_one(doc! { "_id": id })
            .await
            .map_err(database_error)
    }

    async fn find_by_ids(&self, ids: &[String]) -> AppResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        self.collection()
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await
            .map_err(database_error)?
            .try_collect()
            .await
            .map_err(database_error)
    }

    async fn create(&self, user: User) -> AppResult<User> {
        match self.collection().insert_one(&user).await {
            Ok(_) => Ok(user),
            Err(e) if is_duplicate_key_error(&e) => {
                Err(AppError::ConflictError("Email already exists".to_string()))
            }
            Err(e) => Err(database_error(e)),
        }
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> AppResult<bool> {
        let result = self
            .collection()
            .update_one(
                doc! { "_id": id },
                doc! { "$set": {
                    "password_hash": password_hash,
                    "updated_at": mongodb::bson::DateTime::now(),
                } },
            )
            .await
            .map_err(database_error)?;

        Ok(result.matched_count > 0)
    }
}
