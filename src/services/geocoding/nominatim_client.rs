//! Nominatim 역지오코딩 클라이언트
//!
//! 전송 실패와 5xx/429 응답은 선형 백오프로 재시도하고,
//! 그 밖의 4xx는 즉시 실패로 처리합니다.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};

use crate::config::GeocodingConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::domain::models::geocoding::{NominatimResponse, ReverseGeocodeResult};
use crate::services::geocoding::Geocoder;
use crate::utils::retry::{with_linear_retry, RetryPolicy};

/// 한 번의 요청 시도 결과로 발생한 에러
#[derive(Debug, thiserror::Error)]
pub enum NominatimError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected status {0}")]
    Status(StatusCode),
}

impl NominatimError {
    pub fn is_retryable(&self) -> bool {
        match self {
            NominatimError::Transport(_) => true,
            NominatimError::Status(status) => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
        }
    }
}

pub struct NominatimClient {
    http: Client,
    config: GeocodingConfig,
    policy: RetryPolicy,
}

impl NominatimClient {
    pub fn new(config: GeocodingConfig) -> AppResult<Self> {
        let http = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.request_timeout)
            .build()
            .context("HTTP 클라이언트 생성 실패")?;

        let policy = RetryPolicy::new(config.retries, config.retry_delay);

        Ok(Self { http, config, policy })
    }

    /// `format=jsonv2&lat=..&lon=..&accept-language=..` 쿼리 파라미터
    pub fn query_params(&self, latitude: f64, longitude: f64) -> Vec<(&'static str, String)> {
        vec![
            ("format", "jsonv2".to_string()),
            ("lat", latitude.to_string()),
            ("lon", longitude.to_string()),
            ("accept-language", self.config.accept_language.clone()),
        ]
    }

    async fn request_once(&self, latitude: f64, longitude: f64) -> Result<NominatimResponse, NominatimError> {
        let response = self
            .http
            .get(&self.config.url)
            .query(&self.query_params(latitude, longitude))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(NominatimError::Status(status));
        }

        Ok(response.json::<NominatimResponse>().await?)
    }
}

#[async_trait]
impl Geocoder for NominatimClient {
    async fn reverse(&self, latitude: f64, longitude: f64) -> AppResult<ReverseGeocodeResult> {
        let response = with_linear_retry(
            &self.policy,
            NominatimError::is_retryable,
            || self.request_once(latitude, longitude),
        )
        .await
        .map_err(|e| {
            log::error!("Nominatim error: {}", e);
            AppError::ExternalServiceError("Error while requesting Nominatim".to_string())
        })?;

        let result = ReverseGeocodeResult::from(response);
        log::debug!("역지오코딩 ({}, {}) → {:?}", latitude, longitude, result.locality);
        Ok(result)
    }
}
