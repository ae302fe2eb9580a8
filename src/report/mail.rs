//! Email delivery of rendered reports.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, Mailbox, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use thiserror::Error;
use tracing::{info, instrument};

use crate::config::SmtpSettings;

pub const SUBJECT: &str = "Your Sentiment Analysis Results";
pub const ATTACHMENT_NAME: &str = "analysis_results.pdf";

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Email credentials are not set.")]
    NotConfigured,

    #[error("invalid address {0:?}")]
    Address(String),

    #[error("invalid content type: {0}")]
    ContentType(String),

    #[error("could not build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("smtp transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),
}

/// Sends a PDF report to one recipient.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send_report(&self, recipient: &str, pdf: Vec<u8>) -> Result<(), MailError>;
}

/// Plain-text body greeting the recipient by the capitalised local part of their address.
pub fn compose_body(recipient: &str) -> String {
    let local = recipient.split('@').next().unwrap_or(recipient);
    let mut chars = local.chars();
    let name = match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    };
    format!(
        "Hi {name},\n\nThis is your sentiment analysis result. Please find attached the PDF of your sentiment analysis results.\n\nBest,\n\nGarage Team\n"
    )
}

/// Assemble the message: plain body plus the PDF attachment.
pub fn build_message(sender: &str, recipient: &str, pdf: Vec<u8>) -> Result<Message, MailError> {
    let from: Mailbox = sender
        .parse()
        .map_err(|_| MailError::Address(sender.to_string()))?;
    let to: Mailbox = recipient
        .parse()
        .map_err(|_| MailError::Address(recipient.to_string()))?;
    let pdf_type = ContentType::parse("application/pdf")
        .map_err(|e| MailError::ContentType(e.to_string()))?;

    Ok(Message::builder()
        .from(from)
        .to(to)
        .subject(SUBJECT)
        .multipart(
            MultiPart::mixed()
                .singlepart(SinglePart::plain(compose_body(recipient)))
                .singlepart(Attachment::new(ATTACHMENT_NAME.to_string()).body(pdf, pdf_type)),
        )?)
}

/// STARTTLS relay configured from settings.
#[derive(Debug, Clone)]
pub struct SmtpMailer {
    settings: SmtpSettings,
}

impl SmtpMailer {
    pub fn new(settings: SmtpSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    #[instrument(skip(self, pdf), fields(bytes = pdf.len()))]
    async fn send_report(&self, recipient: &str, pdf: Vec<u8>) -> Result<(), MailError> {
        let (Some(username), Some(password), Some(sender)) = (
            self.settings.username.clone(),
            self.settings.password.clone(),
            self.settings.sender().map(str::to_string),
        ) else {
            return Err(MailError::NotConfigured);
        };
        let message = build_message(&sender, recipient, pdf)?;
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&self.settings.host)?
            .port(self.settings.port)
            .credentials(Credentials::new(username, password))
            .build();
        transport.send(message).await?;
        info!(%recipient, "report emailed");
        Ok(())
    }
}
