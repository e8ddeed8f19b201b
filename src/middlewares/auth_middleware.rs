//! 액세스 토큰 인증 미들웨어
//!
//! 보호된 스코프/리소스에 적용하며, 실패 시 표준 에러 본문으로 즉시 응답합니다.
//!
//! | 상황 | 상태 | 메시지 |
//! |------|------|--------|
//! | 헤더 없음 | 401 | Access token not provided |
//! | 만료 | 401 | Access token has expired |
//! | 형식/서명 오류 | 400 | Access token is not valid |
//! | 폐기된 토큰 | 401 | Access token has been revoked |
//! | 사용자 없음 | 404 | User not found |
//! | 저장소 오류 | 401 | Invalid authentication |

use std::future::{ready, Ready};
use std::rc::Rc;

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    Error, Result,
};

use crate::middlewares::auth_inner::AuthMiddlewareService;

/// 인증 필수 미들웨어
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthMiddleware;

impl AuthMiddleware {
    pub fn required() -> Self {
        Self
    }
}

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService {
            service: Rc::new(service),
        }))
    }
}
