//! 역지오코딩
//!
//! 이벤트 좌표가 선택한 정착지 안에 있는지 확인할 때 사용합니다.

pub mod nominatim_client;

pub use nominatim_client::*;

use async_trait::async_trait;

use crate::core::errors::AppResult;
use crate::domain::models::geocoding::ReverseGeocodeResult;

#[async_trait]
pub trait Geocoder: Send + Sync {
    /// 좌표의 행정 구역 정보를 조회합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - 재시도를 모두 소진한 경우
    async fn reverse(&self, latitude: f64, longitude: f64) -> AppResult<ReverseGeocodeResult>;
}
