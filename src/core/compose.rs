//! Renders form submissions into the plain-text and HTML bodies of the
//! notification email.

use crate::utils::error::Result;
use serde::Serialize;
use tera::{Context, Tera};

pub const CONTACT_TEXT: &str = "contact.txt";
pub const CONTACT_HTML: &str = "contact.html";
pub const APPLICATION_TEXT: &str = "application.txt";
pub const APPLICATION_HTML: &str = "application.html";

const CONTACT_TEXT_TEMPLATE: &str = r#"Name: {{ name }}
Email: {{ email }}
Subject: {{ subject }}

Message:
{{ message }}

Received: {{ received_at }}
"#;

const CONTACT_HTML_TEMPLATE: &str = r#"<div style="font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; color: #333; border: 1px solid #e0e0e0; border-radius: 8px;">
  <h2 style="color: #c9a227; border-bottom: 2px solid #c9a227; padding-bottom: 10px;">New Inquiry from Website</h2>
  <div style="margin-top: 20px;">
    <p><strong>Name:</strong> {{ name }}</p>
    <p><strong>Email:</strong> {{ email }}</p>
    <p><strong>Subject:</strong> {{ subject }}</p>
  </div>
  <div style="margin-top: 20px; padding: 15px; background-color: #f9f9f9; border-left: 4px solid #c9a227; font-style: italic;">
    <p><strong>Message:</strong></p>
    <p style="white-space: pre-wrap;">{{ message }}</p>
  </div>
  <div style="margin-top: 30px; font-size: 12px; color: #888; text-align: center;">
    <p>This email was sent from the contact form on SAAR Group website.</p>
    <p>Received {{ received_at }}</p>
  </div>
</div>
"#;

const APPLICATION_TEXT_TEMPLATE: &str = r#"Job Application Details:
Name: {{ name }}
Email: {{ email }}
Phone: {{ phone }}
Position: {{ position }}
Experience: {{ experience }}

Cover Letter:
{{ cover_letter }}

Received: {{ received_at }}
"#;

const APPLICATION_HTML_TEMPLATE: &str = r#"<div style="font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px; color: #333; border: 1px solid #e0e0e0; border-radius: 8px;">
  <h2 style="color: #c9a227; border-bottom: 2px solid #c9a227; padding-bottom: 10px;">New Job Application</h2>
  <div style="margin-top: 20px; background-color: #fcfcfc; padding: 15px; border-radius: 5px;">
    <p><strong>Name:</strong> {{ name }}</p>
    <p><strong>Email:</strong> {{ email }}</p>
    <p><strong>Phone:</strong> {{ phone }}</p>
    <p><strong>Position:</strong> {{ position }}</p>
    <p><strong>Experience:</strong> {{ experience }}</p>
  </div>
  <div style="margin-top: 20px;">
    <p><strong>Cover Letter:</strong></p>
    <p style="white-space: pre-wrap; padding: 15px; background-color: #f9f9f9; border-left: 4px solid #c9a227; font-style: italic;">{{ cover_letter }}</p>
  </div>
  <p style="margin-top: 20px; font-size: 13px; color: #666;">The applicant's resume is attached to this email.</p>
  <div style="margin-top: 30px; font-size: 12px; color: #888; text-align: center;">
    <p>Sent from SAAR Group Careers Portal</p>
    <p>Received {{ received_at }}</p>
  </div>
</div>
"#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedBody {
    pub text: String,
    pub html: String,
}

/// Holds the compiled email templates. Templates whose name ends in `.html`
/// are autoescaped, so submitted values cannot inject markup.
pub struct EmailComposer {
    templates: Tera,
}

impl EmailComposer {
    pub fn new() -> Result<Self> {
        let mut templates = Tera::default();
        templates.add_raw_templates(vec![
            (CONTACT_TEXT, CONTACT_TEXT_TEMPLATE),
            (CONTACT_HTML, CONTACT_HTML_TEMPLATE),
            (APPLICATION_TEXT, APPLICATION_TEXT_TEMPLATE),
            (APPLICATION_HTML, APPLICATION_HTML_TEMPLATE),
        ])?;

        Ok(Self { templates })
    }

    pub fn render<T: Serialize>(&self, text_template: &str, html_template: &str, fields: &T) -> Result<RenderedBody> {
        let context = Context::from_serialize(fields)?;

        Ok(RenderedBody {
            text: self.templates.render(text_template, &context)?,
            html: self.templates.render(html_template, &context)?,
        })
    }
}

impl std::fmt::Debug for EmailComposer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EmailComposer").finish_non_exhaustive()
    }
}
