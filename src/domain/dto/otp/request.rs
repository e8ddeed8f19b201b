use serde::{Deserialize, Serialize};
use validator::Validate;

/// OTP 확인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CheckOtpRequest {
    #[validate(range(min = 100000, max = 999999, message = "code must be a 6-digit number"))]
    pub code: u32,
}
