use crate::core::compose::{
    EmailComposer, APPLICATION_HTML, APPLICATION_TEXT, CONTACT_HTML, CONTACT_TEXT,
};
use crate::domain::model::{ContactSubmission, JobApplication, Mailbox, OutboundEmail};
use crate::domain::ports::{ConfigProvider, MailTransport};
use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{self, present};
use serde::Serialize;
use std::sync::Arc;

pub const DEFAULT_CONTACT_SUBJECT: &str = "New Contact Message";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Contact,
    Careers,
}

impl FormKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FormKind::Contact => "contact",
            FormKind::Careers => "careers",
        }
    }

    /// Generic message returned when the relay could not deliver the email.
    pub fn failure_message(&self) -> &'static str {
        match self {
            FormKind::Contact => "Failed to send your message. Please try again later.",
            FormKind::Careers => "Failed to submit application. Please try again later.",
        }
    }
}

/// A form payload that can be checked and turned into one notification email.
pub trait Submission: Send + Sync {
    fn kind(&self) -> FormKind;
    fn validate(&self, config: &dyn ConfigProvider) -> Result<()>;
    fn compose(&self, composer: &EmailComposer, config: &dyn ConfigProvider) -> Result<OutboundEmail>;
}

fn received_at() -> String {
    chrono::Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

fn text(value: &Option<String>) -> &str {
    present(value).unwrap_or("")
}

#[derive(Serialize)]
struct ContactFields<'a> {
    name: &'a str,
    email: &'a str,
    subject: &'a str,
    message: &'a str,
    received_at: &'a str,
}

impl Submission for ContactSubmission {
    fn kind(&self) -> FormKind {
        FormKind::Contact
    }

    fn validate(&self, _config: &dyn ConfigProvider) -> Result<()> {
        validation::require_fields(&[
            ("name", &self.name),
            ("email", &self.email),
            ("message", &self.message),
        ])
    }

    fn compose(&self, composer: &EmailComposer, config: &dyn ConfigProvider) -> Result<OutboundEmail> {
        let name = text(&self.name);
        let email = text(&self.email);
        let subject = present(&self.subject).unwrap_or(DEFAULT_CONTACT_SUBJECT);

        let body = composer.render(
            CONTACT_TEXT,
            CONTACT_HTML,
            &ContactFields {
                name,
                email,
                subject,
                message: text(&self.message),
                received_at: &received_at(),
            },
        )?;

        Ok(OutboundEmail {
            from: Mailbox::named(name, config.sender_address()),
            to: vec![Mailbox::new(config.inbox_address())],
            reply_to: Some(email.to_string()),
            subject: subject.to_string(),
            text: body.text,
            html: body.html,
            attachments: Vec::new(),
        })
    }
}

#[derive(Serialize)]
struct ApplicationFields<'a> {
    name: &'a str,
    email: &'a str,
    phone: &'a str,
    position: &'a str,
    experience: &'a str,
    cover_letter: &'a str,
    received_at: &'a str,
}

impl Submission for JobApplication {
    fn kind(&self) -> FormKind {
        FormKind::Careers
    }

    fn validate(&self, _config: &dyn ConfigProvider) -> Result<()> {
        let mut missing: Vec<&str> = [
            ("name", &self.name),
            ("email", &self.email),
            ("position", &self.position),
        ]
        .into_iter()
        .filter(|(_, value)| present(value).is_none())
        .map(|(field, _)| field)
        .collect();

        // size is capped by the upload body limit, not here
        if self.resume.as_ref().map_or(true, |r| r.content.is_empty()) {
            missing.push("resume");
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(SiteError::missing(missing))
        }
    }

    fn compose(&self, composer: &EmailComposer, config: &dyn ConfigProvider) -> Result<OutboundEmail> {
        let name = text(&self.name);
        let email = text(&self.email);
        let position = text(&self.position);

        let body = composer.render(
            APPLICATION_TEXT,
            APPLICATION_HTML,
            &ApplicationFields {
                name,
                email,
                phone: text(&self.phone),
                position,
                experience: text(&self.experience),
                cover_letter: text(&self.cover_letter),
                received_at: &received_at(),
            },
        )?;

        Ok(OutboundEmail {
            from: Mailbox::named(name, config.sender_address()),
            to: vec![Mailbox::new(config.inbox_address())],
            reply_to: Some(email.to_string()),
            subject: format!("Job Application: {} - {}", position, name),
            text: body.text,
            html: body.html,
            attachments: self.resume.iter().cloned().collect(),
        })
    }
}

/// Runs one submission through validate, compose and send. Nothing is
/// retried: a relay failure is returned to the caller as is.
pub struct SubmissionEngine {
    transport: Arc<dyn MailTransport>,
    config: Arc<dyn ConfigProvider>,
    composer: EmailComposer,
}

impl SubmissionEngine {
    pub fn new(transport: Arc<dyn MailTransport>, config: Arc<dyn ConfigProvider>) -> Result<Self> {
        Ok(Self {
            transport,
            config,
            composer: EmailComposer::new()?,
        })
    }

    pub fn config(&self) -> &dyn ConfigProvider {
        self.config.as_ref()
    }

    pub async fn submit<S: Submission>(&self, submission: &S) -> Result<()> {
        let kind = submission.kind();

        if let Err(e) = submission.validate(self.config.as_ref()) {
            tracing::debug!("Rejected {} submission: {}", kind.as_str(), e);
            return Err(e);
        }

        let email = submission.compose(&self.composer, self.config.as_ref())?;
        tracing::debug!(
            "Relaying {} email \"{}\" with {} attachment(s)",
            kind.as_str(),
            email.subject,
            email.attachments.len()
        );

        self.transport.send(&email).await?;

        tracing::info!("📨 {} submission delivered", kind.as_str());
        Ok(())
    }
}
