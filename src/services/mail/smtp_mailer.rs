//! lettre 기반 SMTP 메일러

use async_trait::async_trait;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};

use crate::config::MailConfig;
use crate::core::errors::{AppError, AppResult, ErrorContext};
use crate::services::mail::{MailMessage, Mailer};

pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    /// 인증 정보가 있으면 STARTTLS 릴레이, 없으면 평문 SMTP(로컬 개발용 메일 캐처 등)로 연결합니다.
    pub fn new(config: &MailConfig) -> AppResult<Self> {
        let from = config
            .from
            .parse::<Mailbox>()
            .context("MAIL_FROM 주소가 올바르지 않습니다")?;

        let transport = match (&config.username, &config.password) {
            (Some(username), Some(password)) => {
                AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
                    .context("SMTP 설정 실패")?
                    .port(config.port)
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .build()
            }
            _ => {
                log::warn!("MAIL_USER/MAIL_PASSWORD 미설정: 암호화되지 않은 SMTP 연결을 사용합니다");
                AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(&config.host)
                    .port(config.port)
                    .build()
            }
        };

        log::info!("📧 SMTP 메일러 구성: {}:{}", config.host, config.port);

        Ok(Self { transport, from })
    }

    fn build_message(&self, message: &MailMessage) -> AppResult<Message> {
        let to = message
            .to
            .parse::<Mailbox>()
            .map_err(|e| AppError::ValidationError(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(header::ContentType::TEXT_PLAIN)
            .body(message.body.clone())
            .context("메일 메시지 생성 실패")
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> AppResult<()> {
        let email = self.build_message(&message)?;

        self.transport
            .send(email)
            .await
            .map_err(|e| AppError::ExternalServiceError(format!("메일 발송 실패: {}", e)))?;

        log::info!("메일 발송 완료: subject={}", message.subject);
        Ok(())
    }
}
