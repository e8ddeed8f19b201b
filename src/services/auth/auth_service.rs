//! # 인증 서비스 구현
//!
//! 이메일/비밀번호 계정의 가입과 로그인, 리프레시 토큰 교체, 요청 인증을 담당합니다.
//!
//! ## 리프레시 토큰 교체
//!
//! ```text
//! refresh 없음 ─────────────────────────▶ 401 Refresh token is required
//! refresh 서명/만료 검증 실패 ──────────▶ 403 Invalid refresh token
//! refresh 가 폐기 목록에 있음 ──────────▶ 403 Refresh token is revoked
//! refresh 폐기 기록 (유니크 인덱스 경합 패배 시 403 revoked)
//! access 가 같은 사용자 것이면 함께 폐기 (검증 실패는 무시)
//! 새 토큰 쌍 발급
//! ```
//!
//! 한 번 폐기된 토큰은 서명이 유효하더라도 다시 받아들이지 않습니다.

use std::sync::Arc;

use bcrypt::{hash, verify};

use crate::config::PasswordConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::core::registry::{Service, ServiceLocator};
use crate::domain::dto::auth::{ResetPasswordRequest, SignInRequest, SignUpRequest};
use crate::domain::dto::otp::{CheckOtpRequest, MessageResponse};
use crate::domain::entities::tokens::BlacklistToken;
use crate::domain::entities::users::User;
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenPair;
use crate::repositories::tokens::BlacklistStore;
use crate::repositories::users::UserStore;
use crate::services::auth::{TokenError, TokenService};
use crate::services::otp::OtpService;

pub struct AuthService {
    users: Arc<dyn UserStore>,
    blacklist: Arc<dyn BlacklistStore>,
    tokens: Arc<TokenService>,
    otp: Arc<OtpService>,
    bcrypt_cost: u32,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserStore>,
        blacklist: Arc<dyn BlacklistStore>,
        tokens: Arc<TokenService>,
        otp: Arc<OtpService>,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            users,
            blacklist,
            tokens,
            otp,
            bcrypt_cost,
        }
    }

    /// `BCRYPT_COST` 설정으로 생성합니다.
    pub fn with_config(
        users: Arc<dyn UserStore>,
        blacklist: Arc<dyn BlacklistStore>,
        tokens: Arc<TokenService>,
        otp: Arc<OtpService>,
    ) -> Self {
        Self::new(users, blacklist, tokens, otp, PasswordConfig::bcrypt_cost())
    }

    pub fn instance() -> Arc<Self> {
        ServiceLocator::get::<Self>()
    }

    /// 새 계정을 만들고 토큰 쌍을 발급합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::ConflictError` - 이미 가입된 이메일
    pub async fn sign_up(&self, request: SignUpRequest) -> AppResult<TokenPair> {
        if self.users.find_by_email(&request.email).await?.is_some() {
            return Err(AppError::ConflictError("Email already exists".to_string()));
        }

        let start_time = std::time::Instant::now();
        let password_hash = hash(&request.password, self.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;
        log::debug!("Password hashing took: {:?}", start_time.elapsed());

        // 동시 가입은 유니크 인덱스에서 ConflictError로 걸러집니다.
        let user = self.users.create(User::new(request.email, password_hash)).await?;
        log::info!("회원가입: user_id={}", user.id);

        self.tokens.create_token_pair(&user.id)
    }

    /// # Errors
    ///
    /// * `AppError::NotFound` - 가입되지 않은 이메일
    /// * `AppError::ConflictError` - 비밀번호 불일치
    pub async fn sign_in(&self, request: SignInRequest) -> AppResult<TokenPair> {
        let user = self
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        let is_password_valid = verify(&request.password, &user.password_hash)
            .context("비밀번호 검증 실패")?;

        if !is_password_valid {
            log::warn!("로그인 실패 (비밀번호 불일치): user_id={}", user.id);
            return Err(AppError::ConflictError("Invalid data provided".to_string()));
        }

        log::info!("로그인: user_id={}", user.id);
        self.tokens.create_token_pair(&user.id)
    }

    /// 리프레시 토큰을 폐기하고 새 토큰 쌍을 발급합니다.
    ///
    /// `access_token`은 `Authorization` 헤더 값 그대로 받으며 `Bearer ` 접두사는 선택입니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 리프레시 토큰 없음
    /// * `AppError::AuthorizationError` - 검증 실패 또는 이미 폐기된 토큰
    /// * `AppError::InternalError` - 그 밖의 실패
    pub async fn refresh_token(
        &self,
        access_token: Option<&str>,
        refresh_token: Option<&str>,
    ) -> AppResult<TokenPair> {
        let refresh_token = refresh_token
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Refresh token is required".to_string()))?;

        self.rotate(access_token, refresh_token)
            .await
            .map_err(|error| match error {
                AppError::AuthenticationError(_) | AppError::AuthorizationError(_) => error,
                other => {
                    log::error!("토큰 갱신 실패: {}", other);
                    AppError::InternalError("Failed to refresh token".to_string())
                }
            })
    }

    async fn rotate(&self, access_token: Option<&str>, refresh_token: &str) -> AppResult<TokenPair> {
        let user_id = self
            .tokens
            .verify_token(refresh_token)
            .map_err(|_| AppError::AuthorizationError("Invalid refresh token".to_string()))?;

        if self.blacklist.is_blacklisted(refresh_token).await? {
            log::warn!("폐기된 리프레시 토큰 재사용 시도: user_id={}", user_id);
            return Err(revoked());
        }

        // 리프레시 토큰이 항상 첫 항목. 두 토큰은 한 번의 쓰기로 폐기됩니다.
        let mut entries = vec![BlacklistToken::new(refresh_token, &user_id)];

        if let Some(header) = access_token {
            let access_token = TokenService::extract_bearer_token(header);
            if let Ok(access_user_id) = self.tokens.verify_token(access_token) {
                if access_user_id == user_id {
                    entries.push(BlacklistToken::new(access_token, &user_id));
                }
            }
        }

        if !self.blacklist.add_all(entries).await? {
            return Err(revoked());
        }

        log::info!("토큰 갱신: user_id={}", user_id);
        self.tokens.create_token_pair(&user_id)
    }

    /// `Authorization` 헤더로 요청 사용자를 확인합니다. 인증 미들웨어가 사용합니다.
    ///
    /// # Errors
    ///
    /// * `AppError::AuthenticationError` - 헤더 없음, 만료, 폐기, 저장소 오류
    /// * `AppError::ValidationError` - 형식/서명이 잘못된 토큰
    /// * `AppError::NotFound` - 토큰의 사용자가 없음
    pub async fn authenticate(&self, auth_header: Option<&str>) -> AppResult<AuthenticatedUser> {
        let header = auth_header
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| AppError::AuthenticationError("Access token not provided".to_string()))?;

        let token = TokenService::extract_bearer_token(header);

        let user_id = self.tokens.verify_token(token).map_err(|error| match error {
            TokenError::Expired => AppError::AuthenticationError("Access token has expired".to_string()),
            TokenError::Invalid => AppError::ValidationError("Access token is not valid".to_string()),
        })?;

        self.lookup_user(token, &user_id).await.map_err(|error| match error {
            AppError::AuthenticationError(_) | AppError::NotFound(_) => error,
            other => {
                log::error!("인증 중 저장소 오류: {}", other);
                AppError::AuthenticationError("Invalid authentication".to_string())
            }
        })
    }

    async fn lookup_user(&self, token: &str, user_id: &str) -> AppResult<AuthenticatedUser> {
        if self.blacklist.is_blacklisted(token).await? {
            return Err(AppError::AuthenticationError("Access token has been revoked".to_string()));
        }

        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

        Ok(AuthenticatedUser::from(&user))
    }

    /// OTP 코드를 확인한 뒤 비밀번호를 바꿉니다. 코드는 변경이 저장된 뒤에 소모됩니다.
    ///
    /// # Errors
    ///
    /// * `AppError::NotFound` / `AppError::ConflictError` - [`OtpService::check_otp`]와 동일
    pub async fn reset_password(
        &self,
        user: &AuthenticatedUser,
        request: ResetPasswordRequest,
    ) -> AppResult<MessageResponse> {
        self.otp
            .verify_otp(&CheckOtpRequest { code: request.code }, &user.id)
            .await?;

        let password_hash = hash(&request.password, self.bcrypt_cost)
            .context("비밀번호 해싱 실패")?;

        if !self.users.update_password(&user.id, &password_hash).await? {
            return Err(AppError::NotFound("User not found".to_string()));
        }

        if let Err(e) = self.otp.discard(&user.id).await {
            log::error!("비밀번호 재설정 후 OTP 삭제 실패: user_id={}, {}", user.id, e);
        }

        log::info!("비밀번호 재설정: user_id={}", user.id);
        Ok(MessageResponse::new("Password updated"))
    }
}

fn revoked() -> AppError {
    AppError::AuthorizationError("Refresh token is revoked".to_string())
}

impl Service for AuthService {
    fn name(&self) -> &str {
        "auth"
    }
}
