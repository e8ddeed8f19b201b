//! 행정 구역 참조 데이터
//!
//! 정착지(도시/마을)와 상위 지역입니다. 이 서비스는 읽기만 하며,
//! 이벤트 위치의 지오펜스 검증과 상세/목록 응답 구성에 사용됩니다.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settlement {
    #[serde(rename = "_id")]
    pub id: String,
    /// 역지오코딩 결과의 locality와 비교되는 이름
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub region_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Region {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Settlement {
    /// 앞뒤 공백과 대소문자를 무시하고 locality 이름과 일치하는지 확인합니다.
    pub fn matches_locality(&self, locality: &str) -> bool {
        self.name.trim().to_lowercase() == locality.trim().to_lowercase()
    }
}
