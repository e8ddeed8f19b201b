//! 인증 요청 DTO

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// 회원가입 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_sign_up_passwords_match"))]
pub struct SignUpRequest {
    #[validate(email(message = "email must be an email"))]
    pub email: String,

    #[validate(length(min = 6, message = "password must be longer than or equal to 6 characters"))]
    pub password: String,

    pub confirm_password: String,
}

/// 로그인 요청
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignInRequest {
    #[validate(email(message = "email must be an email"))]
    pub email: String,

    #[validate(length(min = 1, message = "password should not be empty"))]
    pub password: String,
}

/// 비밀번호 재설정 요청
///
/// 먼저 `/otp/send`로 받은 코드가 함께 전달되어야 합니다.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_reset_passwords_match"))]
pub struct ResetPasswordRequest {
    #[validate(range(min = 100000, max = 999999, message = "code must be a 6-digit number"))]
    pub code: u32,

    #[validate(length(min = 8, message = "password must be longer than or equal to 8 characters"))]
    pub password: String,

    pub confirm_password: String,
}

fn passwords_match(password: &str, confirm_password: &str) -> Result<(), ValidationError> {
    if password != confirm_password {
        return Err(ValidationError::new("passwords_mismatch")
            .with_message("Passwords do not match".into()));
    }
    Ok(())
}

fn validate_sign_up_passwords_match(req: &SignUpRequest) -> Result<(), ValidationError> {
    passwords_match(&req.password, &req.confirm_password)
}

fn validate_reset_passwords_match(req: &ResetPasswordRequest) -> Result<(), ValidationError> {
    passwords_match(&req.password, &req.confirm_password)
}
