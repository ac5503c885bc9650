//! Outgoing mail: the [`Mailer`] seam and its SMTP implementation.
//!
//! The rest of the crate only sees [`Mailer`]. Production wires
//! [`SmtpMailer`] when `SMTP_HOST` is set and [`UnconfiguredMailer`]
//! otherwise; tests use the recording double in [`testing`].

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::{debug, info};

use crate::config::Config;
use crate::constants::{
    CODE_MAIL_FAILED, CODE_MAIL_NOT_CONFIGURED, ERR_INVALID_MAIL_ADDRESS, ERR_MAIL_BUILD_FAILED,
    ERR_MAIL_NOT_CONFIGURED,
};
use crate::errors::ApiError;
use crate::utils::{mask_email, mask_recipients};

/// File attached to an outgoing email.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailAttachment {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// A plain-text email ready for the transport.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub cc: Vec<String>,
    pub subject: String,
    pub body: String,
    pub attachments: Vec<EmailAttachment>,
}

/// Mail transport contract.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Hand one email to the transport.
    async fn send(&self, email: OutgoingEmail) -> Result<(), ApiError>;
}

/// SMTP transport (STARTTLS relay with username/password credentials).
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        let from_address = if config.mail_from.trim().is_empty() {
            &config.smtp_username
        } else {
            &config.mail_from
        };
        let from = parse_mailbox(from_address)?;

        let mut builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| ApiError::internal(CODE_MAIL_NOT_CONFIGURED, e.to_string()))?
            .port(config.smtp_port);

        if !config.smtp_username.is_empty() {
            builder = builder.credentials(Credentials::new(
                config.smtp_username.clone(),
                config.smtp_password.clone(),
            ));
        }

        info!(
            "SMTP transport configured for {}:{}",
            config.smtp_host, config.smtp_port
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    fn build_message(&self, email: OutgoingEmail) -> Result<Message, ApiError> {
        let mut builder = Message::builder()
            .from(self.from.clone())
            .subject(email.subject);

        for to in &email.to {
            builder = builder.to(parse_mailbox(to)?);
        }
        for cc in &email.cc {
            builder = builder.cc(parse_mailbox(cc)?);
        }

        let text = SinglePart::plain(email.body);
        let built = if email.attachments.is_empty() {
            builder.singlepart(text)
        } else {
            let mut parts = MultiPart::mixed().singlepart(text);
            for attachment in email.attachments {
                let content_type = ContentType::parse(&attachment.content_type)
                    .map_err(|e| ApiError::internal(CODE_MAIL_FAILED, e.to_string()))?;
                parts = parts.singlepart(
                    Attachment::new(attachment.filename).body(attachment.bytes, content_type),
                );
            }
            builder.multipart(parts)
        };

        built.map_err(|e| {
            ApiError::internal(CODE_MAIL_FAILED, format!("{}: {}", ERR_MAIL_BUILD_FAILED, e))
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, email: OutgoingEmail) -> Result<(), ApiError> {
        let recipients = mask_recipients(&email.to);
        let message = self.build_message(email)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| ApiError::internal(CODE_MAIL_FAILED, e.to_string()))?;

        debug!("SMTP accepted message for {:?}", recipients);
        Ok(())
    }
}

/// Stand-in used when no SMTP host is configured; every send fails.
pub struct UnconfiguredMailer;

#[async_trait]
impl Mailer for UnconfiguredMailer {
    async fn send(&self, _email: OutgoingEmail) -> Result<(), ApiError> {
        Err(ApiError::internal(
            CODE_MAIL_NOT_CONFIGURED,
            ERR_MAIL_NOT_CONFIGURED,
        ))
    }
}

fn parse_mailbox(address: &str) -> Result<Mailbox, ApiError> {
    address.trim().parse::<Mailbox>().map_err(|e| {
        ApiError::bad_request(
            CODE_MAIL_FAILED,
            format!("{} '{}': {}", ERR_INVALID_MAIL_ADDRESS, mask_email(address), e),
        )
    })
}
