//! 일회용 인증 코드 서비스 모듈

pub mod otp_service;

pub use otp_service::*;
