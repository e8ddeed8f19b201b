//! 메일 발송
//!
//! 서비스는 [`Mailer`] trait에만 의존하고, 운영 환경에서는 [`SmtpMailer`]가 주입됩니다.
//! 본문은 평문이며 별도의 템플릿 엔진을 쓰지 않습니다.

pub mod smtp_mailer;

pub use smtp_mailer::*;

use async_trait::async_trait;

use crate::core::errors::AppResult;

/// 평문 메일 한 통
#[derive(Debug, Clone, PartialEq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> AppResult<()>;
}
