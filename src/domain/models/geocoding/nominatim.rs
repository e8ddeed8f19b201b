//! Nominatim 역지오코딩 응답 모델
//!
//! 필요한 주소 필드만 역직렬화하고 나머지는 무시합니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NominatimAddress {
    pub city: Option<String>,
    pub town: Option<String>,
    pub village: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NominatimResponse {
    pub address: Option<NominatimAddress>,
}

impl NominatimResponse {
    /// `city → town → village` 순서로 첫 번째 값
    pub fn locality(&self) -> Option<&str> {
        let address = self.address.as_ref()?;
        address
            .city
            .as_deref()
            .or(address.town.as_deref())
            .or(address.village.as_deref())
    }
}

/// 역지오코딩 결과
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReverseGeocodeResult {
    pub locality: Option<String>,
}

impl From<NominatimResponse> for ReverseGeocodeResult {
    fn from(response: NominatimResponse) -> Self {
        Self {
            locality: response.locality().map(str::to_string),
        }
    }
}
