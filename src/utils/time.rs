//! 시각 타입 변환
//!
//! 엔티티는 범위 쿼리를 위해 BSON Date로 저장하고, API는 RFC 3339 문자열을 주고받습니다.

use chrono::{DateTime, Utc};
use mongodb::bson;

pub fn to_bson(value: &DateTime<Utc>) -> bson::DateTime {
    bson::DateTime::from_millis(value.timestamp_millis())
}

pub fn from_bson(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(value.timestamp_millis()).unwrap_or_default()
}
