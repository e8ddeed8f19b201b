//! Database Connection Management Module
//!
//! MongoDB 데이터베이스 연결 관리를 담당하는 모듈입니다.
//!
//! # 환경 변수 설정
//!
//! ```bash
//! # 트랜잭션을 사용하므로 레플리카셋 구성이 필요합니다
//! export MONGODB_URI="mongodb://localhost:27017/?replicaSet=rs0"
//! export DATABASE_NAME="cleanup_platform"
//! ```

use log::info;
use mongodb::{options::ClientOptions, Client, ClientSession};

use crate::config::DatabaseConfig;
use crate::core::errors::{AppError, AppResult};

/// MongoDB 데이터베이스 연결 래퍼
///
/// 리포지토리 계층이 컬렉션과 세션(트랜잭션)에 접근하는 진입점입니다.
#[derive(Clone)]
pub struct Database {
    client: Client,
    database_name: String,
}

impl Database {
    /// 새 MongoDB 데이터베이스 연결을 생성하고 `ping`으로 연결을 확인합니다.
    pub async fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let mongodb_uri = DatabaseConfig::uri();
        let database_name = DatabaseConfig::database_name();

        let mut client_options = ClientOptions::parse(&mongodb_uri).await?;
        client_options.app_name = Some("cleanup_platform".to_string());

        let client = Client::with_options(client_options)?;

        client
            .database(&database_name)
            .run_command(mongodb::bson::doc! { "ping": 1 })
            .await?;

        info!("✅ MongoDB 연결 성공: {}", database_name);

        Ok(Self {
            client,
            database_name,
        })
    }

    /// 실제 MongoDB 작업을 위한 `mongodb::Database` 인스턴스
    pub fn get_database(&self) -> mongodb::Database {
        self.client.database(&self.database_name)
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> mongodb::Collection<T> {
        self.get_database().collection::<T>(name)
    }

    /// 트랜잭션이 시작된 세션을 반환합니다.
    pub async fn start_transaction(&self) -> AppResult<ClientSession> {
        let mut session = self
            .client
            .start_session()
            .await
            .map_err(|e| AppError::DatabaseError(format!("세션 시작 실패: {}", e)))?;

        session
            .start_transaction()
            .await
            .map_err(|e| AppError::DatabaseError(format!("트랜잭션 시작 실패: {}", e)))?;

        Ok(session)
    }
}

pub fn database_error(error: mongodb::error::Error) -> AppError {
    AppError::DatabaseError(error.to_string())
}

/// MongoDB 에러가 유니크 인덱스 위반(E11000)인지 확인합니다.
pub fn is_duplicate_key_error(error: &mongodb::error::Error) -> bool {
    use mongodb::error::{ErrorKind, WriteFailure};

    match error.kind.as_ref() {
        ErrorKind::Write(WriteFailure::WriteError(write_error)) => write_error.code == 11000,
        ErrorKind::Command(command_error) => command_error.code == 11000,
        _ => false,
    }
}

/// `insert_many` 실패가 유니크 인덱스 위반뿐이면 위반한 문서의 인덱스 목록을 반환합니다.
///
/// 다른 종류의 쓰기 오류가 섞여 있으면 `None`입니다.
pub fn duplicate_key_indexes(error: &mongodb::error::Error) -> Option<Vec<usize>> {
    use mongodb::error::ErrorKind;

    let ErrorKind::InsertMany(failure) = error.kind.as_ref() else {
        return None;
    };

    if failure.write_concern_error.is_some() {
        return None;
    }

    let write_errors = failure.write_errors.as_ref()?;
    if write_errors.is_empty() || write_errors.iter().any(|e| e.code != 11000) {
        return None;
    }

    Some(write_errors.iter().map(|e| e.index).collect())
}
