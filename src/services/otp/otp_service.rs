//! # OTP 서비스
//!
//! 6자리 코드를 발급해 메일로 보내고, 사용자가 제출한 코드를 검증합니다.
//!
//! - 사용자당 코드는 하나이며, 재발급하면 이전 코드는 무효가 됩니다.
//! - 코드는 bcrypt 해시로만 저장합니다.
//! - 만료 여부를 해시 비교보다 먼저 확인하므로, 만료된 코드는 맞더라도 거부됩니다.
//! - 검증에 성공하거나 만료가 확인된 코드는 삭제됩니다.

use std::sync::Arc;

use bcrypt::{hash, verify};
use mongodb::bson::DateTime;
use rand::Rng;

use crate::config::OtpConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::otp::{CheckOtpRequest, MessageResponse, OtpCheckResponse};
use crate::domain::entities::otp::Otp;
use crate::domain::models::auth::AuthenticatedUser;
use crate::repositories::otp::OtpStore;
use crate::services::mail::{MailMessage, Mailer};

pub const OTP_MIN: u32 = 100_000;
pub const OTP_MAX: u32 = 999_999;

pub struct OtpService {
    otps: Arc<dyn OtpStore>,
    mailer: Arc<dyn Mailer>,
    expires_in_minutes: i64,
    bcrypt_cost: u32,
}

impl OtpService {
    pub fn new(
        otps: Arc<dyn OtpStore>,
        mailer: Arc<dyn Mailer>,
        expires_in_minutes: i64,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            otps,
            mailer,
            expires_in_minutes,
            bcrypt_cost,
        }
    }

    /// `OTP_EXPIRES_IN_MINUTES`, `OTP_BCRYPT_COST` 설정으로 생성합니다.
    pub fn with_config(otps: Arc<dyn OtpStore>, mailer: Arc<dyn Mailer>) -> Self {
        Self::new(otps, mailer, OtpConfig::expires_in_minutes(), OtpConfig::bcrypt_cost())
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 100000..=999999 범위의 코드
    pub fn generate_code() -> u32 {
        rand::thread_rng().gen_range(OTP_MIN..=OTP_MAX)
    }

    /// 새 코드를 발급해 저장(기존 코드 교체)하고 메일로 보냅니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ExternalServiceError` - 메일 발송 실패
    pub async fn generate_and_send_otp(&self, user: &AuthenticatedUser) -> AppResult<MessageResponse> {
        let code = Self::generate_code();
        let code_hash = hash(code.to_string(), self.bcrypt_cost)
            .context("OTP 해싱 실패")?;

        self.otps.replace_for_user(Otp::new(&user.id, code_hash)).await?;

        self.mailer
            .send(MailMessage {
                to: user.email.clone(),
                subject: "Confirmation Code".to_string(),
                body: format!(
                    "Hello, {}!\n\nYour confirmation code: {}\n\nThe code is valid for {} minutes.",
                    user.email, code, self.expires_in_minutes
                ),
            })
            .await?;

        log::info!("OTP 발급: user_id={}", user.id);
        Ok(MessageResponse::new("Code sent"))
    }

    /// 제출된 코드를 검증하고, 성공하면 저장된 코드를 삭제합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` - 발급된 코드 없음
    /// * `AppError::ConflictError` - 만료되었거나 일치하지 않는 코드
    /// * `AppError::InternalError` - 그 밖의 모든 실패
    pub async fn check_otp(&self, request: &CheckOtpRequest, user_id: &str) -> AppResult<OtpCheckResponse> {
        let result: AppResult<OtpCheckResponse> = async {
            self.validate_code(request, user_id).await?;
            self.otps.delete_by_user_id(user_id).await?;
            Ok(OtpCheckResponse { is_valid: true })
        }
        .await;

        result.map_err(mask_unexpected)
    }

    /// 코드를 삭제하지 않고 검증만 합니다. 만료된 코드는 삭제됩니다.
    ///
    /// 코드로 보호되는 작업이 성공한 뒤 [`OtpService::discard`]로 소모합니다.
    /// 에러는 [`OtpService::check_otp`]와 같습니다.
    pub async fn verify_otp(&self, request: &CheckOtpRequest, user_id: &str) -> AppResult<()> {
        self.validate_code(request, user_id).await.map_err(mask_unexpected)
    }

    /// 사용자의 코드를 삭제합니다.
    pub async fn discard(&self, user_id: &str) -> AppResult<()> {
        self.otps.delete_by_user_id(user_id).await?;
        Ok(())
    }

    async fn validate_code(&self, request: &CheckOtpRequest, user_id: &str) -> AppResult<()> {
        let otp = self
            .otps
            .find_by_user_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Code for this user not found".to_string()))?;

        if otp.is_expired(DateTime::now(), self.expires_in_minutes) {
            self.otps.delete_by_user_id(user_id).await?;
            log::info!("만료된 OTP 제출: user_id={}", user_id);
            return Err(AppError::ConflictError("Code expired".to_string()));
        }

        let is_valid = verify(request.code.to_string(), &otp.code_hash)
            .context("OTP 검증 실패")?;

        if !is_valid {
            return Err(AppError::ConflictError("Invalid code".to_string()));
        }

        Ok(())
    }
}

fn mask_unexpected(error: AppError) -> AppError {
    match error {
        AppError::NotFound(_) | AppError::ConflictError(_) => error,
        other => {
            log::error!("OTP 검증 중 오류: {}", other);
            AppError::InternalError("An unexpected error occurred".to_string())
        }
    }
}

impl Service for OtpService {
    fn name(&self) -> &str {
        "otp"
    }
}
