//! OTP HTTP Handlers
//!
//! 두 엔드포인트 모두 `/otp` 스코프의 인증 미들웨어 뒤에 있습니다.
use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::core::errors::AppError;
use crate::domain::dto::otp::CheckOtpRequest;
use crate::domain::models::auth::AuthenticatedUser;
use crate::services::otp::OtpService;

/// 새 코드를 발급해 사용자 이메일로 보냅니다.
///
/// # Endpoint
/// `POST /otp/send`
#[post("/send")]
pub async fn send_otp(user: AuthenticatedUser) -> Result<HttpResponse, AppError> {
    let response = OtpService::instance().generate_and_send_otp(&user).await?;

    Ok(HttpResponse::Created().json(response))
}

/// # Endpoint
/// `POST /otp/check`
#[post("/check")]
pub async fn check_otp(
    user: AuthenticatedUser,
    payload: web::Json<CheckOtpRequest>,
) -> Result<HttpResponse, AppError> {
    payload.validate()?;

    let response = OtpService::instance().check_otp(&payload, &user.id).await?;

    Ok(HttpResponse::Created().json(response))
}

#[cfg(test)]
mod tests {
    use actix_web::{test, App};
    use serde_json::{json, Value};

    use crate::routes::configure_all_routes;
    use crate::testing::context;

    macro_rules! app {
        () => {{
            context();
            test::init_service(App::new().configure(configure_all_routes)).await
        }};
    }

    fn code_sent_to(email: &str) -> u32 {
        let message = context().mailer.last_to(email).expect("no mail sent");
        message
            .body
            .split(|c: char| !c.is_ascii_digit())
            .find(|part| part.len() == 6)
            .and_then(|part| part.parse().ok())
            .expect("no code in mail body")
    }

    #[actix_web::test]
    async fn test_send_requires_authentication() {
        let app = app!();

        let req = test::TestRequest::post().uri("/otp/send").to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status().as_u16(), 401);
    }

    #[actix_web::test]
    async fn test_send_then_check_consumes_code() {
        let app = app!();
        let (user, header) = context().register("handler-otp@example.com");

        let send = test::TestRequest::post()
            .uri("/otp/send")
            .insert_header(("Authorization", header.clone()))
            .to_request();
        let res = test::call_service(&app, send).await;
        assert_eq!(res.status().as_u16(), 201);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["message"], "Code sent");
        assert!(context().otps.get(&user.id).is_some());

        let code = code_sent_to("handler-otp@example.com");
        let wrong = if code == 999_999 { 100_000 } else { code + 1 };

        let check = test::TestRequest::post()
            .uri("/otp/check")
            .insert_header(("Authorization", header.clone()))
            .set_json(json!({ "code": wrong }))
            .to_request();
        let res = test::call_service(&app, check).await;
        assert_eq!(res.status().as_u16(), 409);

        let check = test::TestRequest::post()
            .uri("/otp/check")
            .insert_header(("Authorization", header.clone()))
            .set_json(json!({ "code": code }))
            .to_request();
        let res = test::call_service(&app, check).await;
        assert_eq!(res.status().as_u16(), 201);
        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["isValid"], true);
        assert!(context().otps.get(&user.id).is_none());
    }

    #[actix_web::test]
    async fn test_check_rejects_out_of_range_code() {
        let app = app!();
        let (_, header) = context().register("handler-otp-range@example.com");

        let req = test::TestRequest::post()
            .uri("/otp/check")
            .insert_header(("Authorization", header))
            .set_json(json!({ "code": 12345 }))
            .to_request();
        let res = test::call_service(&app, req).await;

        assert_eq!(res.status().as_u16(), 400);
    }
}
