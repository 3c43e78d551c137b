//! Shared test utilities for the rental-site test suite.
//!
//! Provides the fixture content, a ready-to-send inquiry form, and two fake
//! mailers: one that records what it was asked to send and one that always
//! fails.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let mailer = RecordingMailer::default();
//! let mut desk = InquiryDesk::new(filled_form());
//! desk.submit(&mailer).unwrap();
//! assert_eq!(mailer.sent().len(), 1);
//! ```

use std::cell::RefCell;
use std::path::Path;
use tempfile::TempDir;

use crate::config::EmailConfig;
use crate::content::{self, SiteContent};
use crate::inquiry::{InquiryForm, InquiryMessage};
use crate::mailer::{Mailer, MailerError};
use chrono::NaiveDate;

/// `fixtures/content/site.toml`.
pub const SAMPLE_SITE_TOML: &str = include_str!("../fixtures/content/site.toml");

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

pub fn sample_content() -> SiteContent {
    content::parse(SAMPLE_SITE_TOML).unwrap()
}

/// Smallest valid `site.toml`. Ends inside `[hero]`.
pub fn minimal_site_toml() -> String {
    r#"name = "Cabaña"

[hero]
title = "Hola"
image = "https://example.com/hero.jpg"
"#
    .to_string()
}

// =========================================================================
// Inquiry fixtures
// =========================================================================

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

/// A form that passes validation.
pub fn filled_form() -> InquiryForm {
    InquiryForm {
        first_name: "Ana".to_string(),
        last_name: "Silva".to_string(),
        email: "ana@example.com".to_string(),
        phone: "+54 9 280 000 0000".to_string(),
        arrival: Some(date(2025, 1, 5)),
        departure: Some(date(2025, 1, 12)),
    }
}

pub fn configured_email() -> EmailConfig {
    EmailConfig {
        service_id: "service_test".to_string(),
        template_id: "template_test".to_string(),
        public_key: "public_test".to_string(),
        ..EmailConfig::default()
    }
}

// =========================================================================
// Fake mailers
// =========================================================================

/// Accepts everything and remembers it.
#[derive(Default)]
pub struct RecordingMailer {
    sent: RefCell<Vec<InquiryMessage>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<InquiryMessage> {
        self.sent.borrow().clone()
    }
}

impl Mailer for RecordingMailer {
    fn send(&self, message: &InquiryMessage) -> Result<(), MailerError> {
        self.sent.borrow_mut().push(message.clone());
        Ok(())
    }
}

/// Rejects everything the way a misconfigured service would.
pub struct FailingMailer;

impl Mailer for FailingMailer {
    fn send(&self, _message: &InquiryMessage) -> Result<(), MailerError> {
        Err(MailerError::Rejected {
            status: 503,
            body: "Service unavailable".to_string(),
        })
    }
}
