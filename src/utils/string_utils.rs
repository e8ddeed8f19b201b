//! 문자열 처리 유틸리티
//!
//! 입력 DTO의 serde/validator 훅으로 쓰이는 함수들입니다.

use serde::Deserialize;
use validator::ValidationError;

/// 앞뒤 공백을 제거하고, 비어 있으면 `None`으로 바꿉니다.
pub fn clean_optional_string(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// `?name=` 처럼 빈 값으로 전달된 선택 필드를 `None`으로 역직렬화합니다.
///
/// ```rust,ignore
/// #[derive(Deserialize)]
/// struct Query {
///     #[serde(default, deserialize_with = "deserialize_optional_string")]
///     name: Option<String>,
/// }
/// ```
pub fn deserialize_optional_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(clean_optional_string(opt))
}

/// `validator`의 `custom` 검증 함수: UUID 형식 확인
pub fn validate_uuid(value: &str) -> Result<(), ValidationError> {
    uuid::Uuid::parse_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("uuid").with_message("must be a UUID".into()))
}
