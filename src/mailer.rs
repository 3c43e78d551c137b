//! Inquiry delivery through a transactional email service.
//!
//! The [`Mailer`] trait is the seam between the inquiry state machine and the
//! network. [`EmailJsMailer`] speaks the EmailJS REST API:
//!
//! ```text
//! POST {endpoint}
//! Content-Type: application/json
//!
//! {"service_id": "...", "template_id": "...", "user_id": "<public key>",
//!  "template_params": {"nombre": "...", ...}}
//! ```
//!
//! A 2xx response means the email was accepted. Anything else is reported as
//! [`MailerError::Rejected`] with the service's response text. There is no
//! retry; the guest resubmits by hand.
//!
//! Server-side calls only work when the EmailJS account allows non-browser
//! applications.

use crate::config::EmailConfig;
use crate::inquiry::InquiryMessage;
use reqwest::header::CONTENT_TYPE;
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum MailerError {
    #[error("email service is not configured: {0} is empty")]
    NotConfigured(&'static str),
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("email service rejected the inquiry ({status}): {body}")]
    Rejected { status: u16, body: String },
}

/// Anything that can deliver an inquiry.
pub trait Mailer {
    fn send(&self, message: &InquiryMessage) -> Result<(), MailerError>;
}

/// Request body of the EmailJS `email/send` call.
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    pub service_id: &'a str,
    pub template_id: &'a str,
    pub user_id: &'a str,
    pub template_params: &'a InquiryMessage,
}

pub struct EmailJsMailer {
    endpoint: String,
    service_id: String,
    template_id: String,
    public_key: String,
    client: reqwest::blocking::Client,
}

impl EmailJsMailer {
    /// Build a mailer from config. Fails if any identifier is blank.
    pub fn from_config(config: &EmailConfig) -> Result<Self, MailerError> {
        if let Some(field) = config.missing_field() {
            return Err(MailerError::NotConfigured(field));
        }
        Ok(Self {
            endpoint: config.endpoint.clone(),
            service_id: config.service_id.clone(),
            template_id: config.template_id.clone(),
            public_key: config.public_key.clone(),
            client: reqwest::blocking::Client::new(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn request<'a>(&'a self, message: &'a InquiryMessage) -> SendRequest<'a> {
        SendRequest {
            service_id: &self.service_id,
            template_id: &self.template_id,
            user_id: &self.public_key,
            template_params: message,
        }
    }
}

impl Mailer for EmailJsMailer {
    fn send(&self, message: &InquiryMessage) -> Result<(), MailerError> {
        let body = serde_json::to_string(&self.request(message))?;
        tracing::debug!(endpoint = %self.endpoint, "posting inquiry");

        let response = self
            .client
            .post(&self.endpoint)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().unwrap_or_else(|err| {
            tracing::debug!(error = %err, "could not read rejection body");
            String::new()
        });
        Err(MailerError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}
