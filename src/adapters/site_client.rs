use crate::config::DEFAULT_MAX_RESUME_BYTES;
use crate::core::submission::FormKind;
use crate::core::toast::{Toast, CONNECTION_FAILURE_MESSAGE};
use crate::domain::model::{ContactSubmission, JobApplication};
use crate::utils::error::Result;
use crate::utils::validation::{self, present};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use std::time::Duration;

const CONTACT_REJECTED_FALLBACK: &str = "Something went wrong. Please try again later.";
const APPLICATION_REJECTED_FALLBACK: &str = "Failed to submit application.";
const APPLICATION_UNREACHABLE: &str = "Something went wrong. Please try again.";

/// A form field that failed the checks run before anything is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    error: Option<String>,
}

/// Submits the site's forms the way the browser pages do: validate locally,
/// post, then turn the answer into a toast.
#[derive(Clone)]
pub struct SiteClient {
    client: Client,
    base_url: String,
}

impl SiteClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// `Err` means the form was never sent.
    pub async fn submit_contact(
        &self,
        form: &ContactSubmission,
    ) -> std::result::Result<Toast, Vec<FieldError>> {
        check_contact(form)?;

        let request = self.client.post(self.url("/api/contact")).json(form);
        Ok(self.deliver(FormKind::Contact, request).await)
    }

    /// `Err` means the form was never sent.
    pub async fn submit_application(
        &self,
        form: &JobApplication,
    ) -> std::result::Result<Toast, Vec<FieldError>> {
        check_application(form)?;

        let request = self
            .client
            .post(self.url("/api/careers"))
            .multipart(application_form(form));
        Ok(self.deliver(FormKind::Careers, request).await)
    }

    async fn deliver(&self, kind: FormKind, request: RequestBuilder) -> Toast {
        let (rejected_fallback, unreachable) = match kind {
            FormKind::Contact => (CONTACT_REJECTED_FALLBACK, CONNECTION_FAILURE_MESSAGE),
            FormKind::Careers => (APPLICATION_REJECTED_FALLBACK, APPLICATION_UNREACHABLE),
        };

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("{} form could not reach the site: {}", kind.as_str(), e);
                return Toast::error(kind, unreachable);
            }
        };

        let status = response.status();
        let body = match response.json::<SubmitResponse>().await {
            Ok(body) => body,
            Err(e) => {
                tracing::warn!("{} form got an unreadable response: {}", kind.as_str(), e);
                return Toast::error(kind, unreachable);
            }
        };

        if status.is_success() {
            Toast::success(kind)
        } else {
            Toast::error(kind, body.error.unwrap_or_else(|| rejected_fallback.to_string()))
        }
    }
}

fn require(errors: &mut Vec<FieldError>, field: &'static str, value: &Option<String>, message: &str) {
    if present(value).is_none() {
        errors.push(FieldError::new(field, message));
    }
}

fn check_email(errors: &mut Vec<FieldError>, value: &Option<String>) {
    match present(value) {
        None => errors.push(FieldError::new("email", "Email is required")),
        Some(email) if !validation::is_valid_email(email) => {
            errors.push(FieldError::new("email", "Invalid email address"))
        }
        Some(_) => {}
    }
}

fn finish(errors: Vec<FieldError>) -> std::result::Result<(), Vec<FieldError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

pub fn check_contact(form: &ContactSubmission) -> std::result::Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    require(&mut errors, "name", &form.name, "Name is required");
    check_email(&mut errors, &form.email);
    require(&mut errors, "subject", &form.subject, "Subject is required");
    require(&mut errors, "message", &form.message, "Message is required");
    finish(errors)
}

pub fn check_application(form: &JobApplication) -> std::result::Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();
    require(&mut errors, "position", &form.position, "Position is required");
    require(&mut errors, "name", &form.name, "Name is required");
    check_email(&mut errors, &form.email);
    require(&mut errors, "phone", &form.phone, "Phone number is required");
    require(&mut errors, "experience", &form.experience, "Experience is required");
    require(&mut errors, "coverLetter", &form.cover_letter, "Cover letter is required");

    match &form.resume {
        Some(resume) if resume.content.is_empty() => {
            errors.push(FieldError::new("resume", "Resume is required"))
        }
        Some(resume) => {
            if let Err(e) =
                validation::validate_file_size("resume", resume.content.len(), DEFAULT_MAX_RESUME_BYTES)
            {
                errors.push(FieldError::new("resume", e.user_friendly_message()));
            }
        }
        None => errors.push(FieldError::new("resume", "Resume is required")),
    }

    finish(errors)
}

fn application_form(form: &JobApplication) -> Form {
    let fields = [
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("position", &form.position),
        ("experience", &form.experience),
        ("coverLetter", &form.cover_letter),
    ];

    let mut multipart = fields.into_iter().fold(Form::new(), |multipart, (name, value)| {
        multipart.text(name, value.clone().unwrap_or_default())
    });

    if let Some(resume) = &form.resume {
        let part = Part::bytes(resume.content.clone()).file_name(resume.filename.clone());
        let part = match resume.content_type.as_deref() {
            Some(mime) => match part.mime_str(mime) {
                Ok(part) => part,
                Err(e) => {
                    tracing::debug!("Ignoring resume content type {}: {}", mime, e);
                    Part::bytes(resume.content.clone()).file_name(resume.filename.clone())
                }
            },
            None => part,
        };
        multipart = multipart.part("resume", part);
    }

    multipart
}
