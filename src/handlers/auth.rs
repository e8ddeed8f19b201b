//! Authentication HTTP Handlers
//!
//! 이메일/비밀번호 가입과 로그인, 리프레시 토큰 교체, 비밀번호 재설정 엔드포인트입니다.
//!
//! 액세스 토큰은 본문(`{"accessToken": ...}`)으로, 리프레시 토큰은 `refreshToken`
//! 쿠키(HttpOnly, SameSite=Strict, Path=/, 프로덕션에서 Secure)로 전달합니다.
use actix_web::cookie::{Cookie, SameSite};
use actix_web::http::header::AUTHORIZATION;
use actix_web::{post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::config::CookieConfig;
use crate::core::errors::AppError;
use crate::domain::dto::auth::{AccessTokenResponse, ResetPasswordRequest, SignInRequest, SignUpRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::domain::models::token::TokenPair;
use crate::middlewares::AuthMiddleware;
use crate::services::auth::AuthService;

/// 회원가입
///
/// # Endpoint
/// `POST /auth/sign-up`
#[post("/sign-up")]
pub async fn sign_up(payload: web::Json<SignUpRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = AuthService::instance().sign_up(payload.into_inner()).await?;

    Ok(token_response(tokens))
}

/// 로그인
///
/// # Endpoint
/// `POST /auth/sign-in`
#[post("/sign-in")]
pub async fn sign_in(payload: web::Json<SignInRequest>) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let tokens = AuthService::instance().sign_in(payload.into_inner()).await?;

    Ok(token_response(tokens))
}

/// 리프레시 토큰 교체
///
/// `refreshToken` 쿠키를 폐기하고 새 토큰 쌍을 발급합니다.
/// `Authorization` 헤더의 액세스 토큰이 같은 사용자 것이면 함께 폐기됩니다.
///
/// # Endpoint
/// `POST /auth/refresh-token`
#[post("/refresh-token")]
pub async fn refresh_token(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let access_token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let cookie = req.cookie(CookieConfig::REFRESH_TOKEN_COOKIE);

    let tokens = AuthService::instance()
        .refresh_token(access_token, cookie.as_ref().map(|c| c.value()))
        .await?;

    Ok(token_response(tokens))
}

/// OTP 코드로 비밀번호 재설정
///
/// # Endpoint
/// `POST /auth/reset-password` (인증 필요)
#[post("/reset-password", wrap = "AuthMiddleware::required()")]
pub async fn reset_password(
    user: AuthenticatedUser,
    payload: web::Json<ResetPasswordRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = AuthService::instance()
        .reset_password(&user, payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}

fn token_response(tokens: TokenPair) -> HttpResponse {
    HttpResponse::Ok()
        .cookie(refresh_cookie(tokens.refresh_token))
        .json(AccessTokenResponse {
            access_token: tokens.access_token,
        })
}

fn refresh_cookie(token: String) -> Cookie<'static> {
    Cookie::build(CookieConfig::REFRESH_TOKEN_COOKIE, token)
        .http_only(true)
        .secure(CookieConfig::secure())
        .same_site(SameSite::Strict)
        .path("/")
        .finish()
}
