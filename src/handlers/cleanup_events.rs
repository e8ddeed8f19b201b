//! Cleanup Event HTTP Handlers
//!
//! 조회는 공개, 생성/수정/참가는 인증이 필요합니다 (`wrap = "AuthMiddleware::required()"`).
use actix_web::{delete, get, post, put, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::cleanup_events::{GetCleanupEventsQuery, UpsertCleanupEventRequest};
use crate::domain::models::auth::AuthenticatedUser;
use crate::middlewares::AuthMiddleware;
use crate::services::cleanup_events::CleanupEventService;

/// # Endpoint
/// `POST /cleanup-event/create`
#[post("/create", wrap = "AuthMiddleware::required()")]
pub async fn create_cleanup_event(
    user: AuthenticatedUser,
    payload: web::Json<UpsertCleanupEventRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let event = CleanupEventService::instance()
        .create_cleanup_event(payload.into_inner(), &user.id)
        .await?;

    Ok(HttpResponse::Ok().json(event))
}

/// 주최자만 수정할 수 있습니다.
///
/// # Endpoint
/// `PUT /cleanup-event/{id}`
#[put("/{id}", wrap = "AuthMiddleware::required()")]
pub async fn update_cleanup_event(
    user: AuthenticatedUser,
    path: web::Path<String>,
    payload: web::Json<UpsertCleanupEventRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let details = CleanupEventService::instance()
        .update_cleanup_event(payload.into_inner(), &path, &user.id)
        .await?;

    Ok(HttpResponse::Ok().json(details))
}

/// # Endpoint
/// `GET /cleanup-event?name=&status=&settlementId=&regionId=&startDate=&endDate=&sortBy=&sortOrder=&page=&pageSize=`
#[get("")]
pub async fn get_cleanup_events(query: web::Query<GetCleanupEventsQuery>) -> Result<HttpResponse, AppError> {
    query.validate()?;

    let page = CleanupEventService::instance().get_cleanup_events(&query).await?;

    Ok(HttpResponse::Ok().json(page))
}

/// # Endpoint
/// `GET /cleanup-event/{id}`
#[get("/{id}")]
pub async fn get_cleanup_event(path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let details = CleanupEventService::instance()
        .get_cleanup_event_by_id(&path)
        .await?;

    Ok(HttpResponse::Ok().json(details))
}

/// # Endpoint
/// `POST /cleanup-event/{id}/take-part`
#[post("/{id}/take-part", wrap = "AuthMiddleware::required()")]
pub async fn take_part(user: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let participation = CleanupEventService::instance().take_part(&path, &user).await?;

    Ok(HttpResponse::Created().json(participation))
}

/// # Endpoint
/// `DELETE /cleanup-event/{id}/take-part`
#[delete("/{id}/take-part", wrap = "AuthMiddleware::required()")]
pub async fn leave(user: AuthenticatedUser, path: web::Path<String>) -> Result<HttpResponse, AppError> {
    let response = CleanupEventService::instance().leave(&path, &user.id).await?;

    Ok(HttpResponse::Ok().json(response))
}
