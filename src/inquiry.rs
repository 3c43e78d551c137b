//! Availability inquiry form.
//!
//! ## Lifecycle
//!
//! ```text
//! Editing ──begin (valid)──> Sending ──finish(Ok)──> Sent    (fields cleared)
//!    ^  └──begin (invalid)─┘    │    ──finish(Err)─> Failed  (fields kept)
//!    └───────── any edit ───────┴───────────────────────┘
//! ```
//!
//! [`InquiryDesk::begin`] recomputes every field error from scratch. While the
//! desk is `Sending` a second `begin` is refused, so one click can only ever
//! produce one email.
//!
//! ## Template parameters
//!
//! The email template on the delivery service expects exactly these keys:
//!
//! | Key | Value |
//! |-----|-------|
//! | `nombre` | first name |
//! | `apellido` | last name |
//! | `email` | email |
//! | `telefono` | phone, or `"No especificado"` when blank |
//! | `fecha_llegada` | arrival, `d/m/yyyy` |
//! | `fecha_salida` | departure, `d/m/yyyy` |

use crate::mailer::{Mailer, MailerError};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

/// User-facing copy. The generated page embeds the same strings so the
/// browser and the CLI report identical messages.
pub mod messages {
    pub const FIRST_NAME_REQUIRED: &str = "El nombre es requerido";
    pub const LAST_NAME_REQUIRED: &str = "El apellido es requerido";
    pub const EMAIL_REQUIRED: &str = "El email es requerido";
    pub const EMAIL_INVALID: &str = "Email inválido";
    pub const DATES_REQUIRED: &str = "Ambas fechas son requeridas";
    pub const DATES_REVERSED: &str = "La fecha de salida no puede ser anterior a la de llegada";
    pub const PHONE_PLACEHOLDER: &str = "No especificado";
    pub const CONFIRMATION: &str = "¡Consulta enviada con éxito! Te contactaremos pronto.";
    pub const RETRY_LATER: &str =
        "Hubo un error al enviar la consulta. Por favor, intenta nuevamente.";
}

/// `day/month/year` without zero padding, as the es-AR locale prints dates.
pub const DATE_FORMAT: &str = "%-d/%-m/%Y";

/// Free-text inputs of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    FirstName,
    LastName,
    Email,
    Phone,
}

/// Anything that can carry a validation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    FirstName,
    LastName,
    Email,
    Dates,
}

impl Field {
    pub fn label(self) -> &'static str {
        match self {
            Field::FirstName => "first name",
            Field::LastName => "last name",
            Field::Email => "email",
            Field::Dates => "dates",
        }
    }
}

/// Per-field validation messages. Empty means the form is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<Field, String>);

impl FormErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(f, m)| (*f, m.as_str()))
    }

    fn insert(&mut self, field: Field, message: &str) {
        self.0.insert(field, message.to_string());
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InquiryForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub arrival: Option<NaiveDate>,
    pub departure: Option<NaiveDate>,
}

impl InquiryForm {
    pub fn set(&mut self, field: TextField, value: impl Into<String>) {
        let slot = match field {
            TextField::FirstName => &mut self.first_name,
            TextField::LastName => &mut self.last_name,
            TextField::Email => &mut self.email,
            TextField::Phone => &mut self.phone,
        };
        *slot = value.into();
    }

    pub fn set_arrival(&mut self, date: Option<NaiveDate>) {
        self.arrival = date;
    }

    pub fn set_departure(&mut self, date: Option<NaiveDate>) {
        self.departure = date;
    }

    /// Back to a blank form: every text field empty, both dates absent.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Recompute every validation message.
    pub fn validate(&self) -> FormErrors {
        let mut errors = FormErrors::default();

        if self.first_name.trim().is_empty() {
            errors.insert(Field::FirstName, messages::FIRST_NAME_REQUIRED);
        }
        if self.last_name.trim().is_empty() {
            errors.insert(Field::LastName, messages::LAST_NAME_REQUIRED);
        }

        let email = self.email.trim();
        if email.is_empty() {
            errors.insert(Field::Email, messages::EMAIL_REQUIRED);
        } else if !looks_like_email(email) {
            errors.insert(Field::Email, messages::EMAIL_INVALID);
        }

        match (self.arrival, self.departure) {
            (Some(arrival), Some(departure)) if departure < arrival => {
                errors.insert(Field::Dates, messages::DATES_REVERSED);
            }
            (Some(_), Some(_)) => {}
            _ => errors.insert(Field::Dates, messages::DATES_REQUIRED),
        }

        errors
    }

    /// Package a valid form into template parameters.
    pub fn to_message(&self) -> Result<InquiryMessage, FormErrors> {
        let errors = self.validate();
        let (Some(arrival), Some(departure)) = (self.arrival, self.departure) else {
            return Err(errors);
        };
        if !errors.is_empty() {
            return Err(errors);
        }

        let phone = self.phone.trim();
        Ok(InquiryMessage {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: if phone.is_empty() {
                messages::PHONE_PLACEHOLDER.to_string()
            } else {
                phone.to_string()
            },
            arrival: arrival.format(DATE_FORMAT).to_string(),
            departure: departure.format(DATE_FORMAT).to_string(),
        })
    }
}

/// Unanchored `\S+@\S+\.\S+`: somewhere in the input there is a non-blank
/// run, an `@`, a non-blank run, a dot and one more non-blank character.
pub fn looks_like_email(input: &str) -> bool {
    let chars: Vec<char> = input.chars().collect();
    for (at, &c) in chars.iter().enumerate() {
        if c != '@' || at == 0 || chars[at - 1].is_whitespace() {
            continue;
        }
        let mut j = at + 1;
        while j < chars.len() && !chars[j].is_whitespace() {
            let followed = chars.get(j + 1).is_some_and(|n| !n.is_whitespace());
            if chars[j] == '.' && j > at + 1 && followed {
                return true;
            }
            j += 1;
        }
    }
    false
}

/// The fixed-shape parameter object handed to the email template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InquiryMessage {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "telefono")]
    pub phone: String,
    #[serde(rename = "fecha_llegada")]
    pub arrival: String,
    #[serde(rename = "fecha_salida")]
    pub departure: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Editing,
    Sending,
    Sent,
    Failed,
}

/// What the guest is told after a delivery attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Confirmation,
    RetryLater,
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::Confirmation => messages::CONFIRMATION,
            Notice::RetryLater => messages::RETRY_LATER,
        }
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SubmitError {
    #[error("{} field(s) need attention", .0.len())]
    Invalid(FormErrors),
    #[error("an inquiry is already being sent")]
    InFlight,
    #[error("no inquiry is being sent")]
    NotSending,
}

/// Form state plus the submission state machine around it.
#[derive(Debug, Clone)]
pub struct InquiryDesk {
    form: InquiryForm,
    errors: FormErrors,
    status: Status,
}

impl Default for InquiryDesk {
    fn default() -> Self {
        Self::new(InquiryForm::default())
    }
}

impl InquiryDesk {
    pub fn new(form: InquiryForm) -> Self {
        Self {
            form,
            errors: FormErrors::default(),
            status: Status::Editing,
        }
    }

    pub fn form(&self) -> &InquiryForm {
        &self.form
    }

    /// Editing access. Any edit takes a finished desk back to `Editing`;
    /// edits while sending are not allowed.
    pub fn form_mut(&mut self) -> Option<&mut InquiryForm> {
        match self.status {
            Status::Sending => None,
            _ => {
                self.status = Status::Editing;
                Some(&mut self.form)
            }
        }
    }

    pub fn errors(&self) -> &FormErrors {
        &self.errors
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// The submit button is disabled while a send is in flight.
    pub fn can_submit(&self) -> bool {
        self.status != Status::Sending
    }

    /// Validate and, if the form is clean, enter `Sending`.
    pub fn begin(&mut self) -> Result<InquiryMessage, SubmitError> {
        if self.status == Status::Sending {
            return Err(SubmitError::InFlight);
        }
        match self.form.to_message() {
            Ok(message) => {
                self.errors = FormErrors::default();
                self.status = Status::Sending;
                Ok(message)
            }
            Err(errors) => {
                self.errors = errors.clone();
                self.status = Status::Editing;
                Err(SubmitError::Invalid(errors))
            }
        }
    }

    /// Record the delivery outcome of the send started by [`Self::begin`].
    pub fn finish(&mut self, outcome: Result<(), MailerError>) -> Result<Notice, SubmitError> {
        if self.status != Status::Sending {
            return Err(SubmitError::NotSending);
        }
        match outcome {
            Ok(()) => {
                self.form.clear();
                self.status = Status::Sent;
                tracing::info!("inquiry delivered");
                Ok(Notice::Confirmation)
            }
            Err(err) => {
                self.status = Status::Failed;
                tracing::error!(error = %err, "inquiry delivery failed");
                Ok(Notice::RetryLater)
            }
        }
    }

    /// Validate, hand the message to `mailer`, and record the outcome.
    pub fn submit<M: Mailer + ?Sized>(&mut self, mailer: &M) -> Result<Notice, SubmitError> {
        let message = self.begin()?;
        tracing::debug!(email = %message.email, "sending inquiry");
        let outcome = mailer.send(&message);
        self.finish(outcome)
    }
}
