//! # Redis 캐시 클라이언트 구현
//!
//! Redis를 백엔드로 하는 캐시 클라이언트입니다.
//! 값은 호출자가 직렬화한 JSON 문자열로 저장되며, 서비스 계층은 [`Cache`] trait을 통해 사용합니다.
//!
//! ## 연결 관리
//!
//! `ConnectionManager`를 사용하여 단일 멀티플렉스 연결을 공유하고,
//! 연결이 끊기면 자동으로 재연결합니다.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};

use crate::caching::Cache;
use crate::config::RedisConfig;
use crate::core::errors::{AppError, AppResult};

#[derive(Clone)]
pub struct RedisClient {
    manager: ConnectionManager,
}

impl RedisClient {
    /// `RedisConfig::url()`로 연결하고 `PING`으로 서버 가용성을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let client = Client::open(RedisConfig::url())?;
        let mut manager = ConnectionManager::new(client).await?;

        redis::cmd("PING").query_async::<()>(&mut manager).await?;

        log::info!("✅ Redis 연결 성공");

        Ok(Self { manager })
    }

    fn connection(&self) -> ConnectionManager {
        self.manager.clone()
    }

    pub async fn del(&self, key: &str) -> Result<(), redis::RedisError> {
        let mut conn = self.connection();
        conn.del::<_, ()>(key).await
    }

    pub async fn del_multiple(&self, keys: &[String]) -> Result<(), redis::RedisError> {
        if keys.is_empty() {
            return Ok(());
        }
        let mut conn = self.connection();
        conn.del::<_, ()>(keys).await
    }

    pub async fn keys(&self, pattern: &str) -> Result<Vec<String>, redis::RedisError> {
        let mut conn = self.connection();
        conn.keys::<_, Vec<String>>(pattern).await
    }
}

fn redis_error(e: redis::RedisError) -> AppError {
    AppError::RedisError(e.to_string())
}

#[async_trait]
impl Cache for RedisClient {
    async fn get_string(&self, key: &str) -> AppResult<Option<String>> {
        let mut conn = self.connection();
        conn.get::<_, Option<String>>(key).await.map_err(redis_error)
    }

    async fn set_string_with_expiry(&self, key: &str, value: &str, seconds: u64) -> AppResult<()> {
        let mut conn = self.connection();
        conn.set_ex::<_, _, ()>(key, value, seconds)
            .await
            .map_err(redis_error)
    }

    async fn del(&self, key: &str) -> AppResult<()> {
        RedisClient::del(self, key).await.map_err(redis_error)
    }

    async fn del_pattern(&self, pattern: &str) -> AppResult<usize> {
        let keys = self.keys(pattern).await.map_err(redis_error)?;
        let count = keys.len();
        self.del_multiple(&keys).await.map_err(redis_error)?;
        Ok(count)
    }
}
