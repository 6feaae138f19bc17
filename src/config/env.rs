use crate::config::{MailConfig, DEFAULT_MAX_RESUME_BYTES, DEFAULT_TIMEOUT_SECONDS};
use crate::utils::error::{Result, SiteError};
use std::env;

fn required(name: &str) -> Result<String> {
    env::var(name).map_err(|_| SiteError::MissingConfigError {
        field: name.to_string(),
    })
}

fn parsed<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| SiteError::InvalidConfigValueError {
                field: name.to_string(),
                value: raw.clone(),
                reason: "Not a valid number".to_string(),
            }),
        Err(_) => Ok(default),
    }
}

impl MailConfig {
    /// Reads `MAIL_RELAY_URL`, `MAIL_RELAY_API_KEY`, `MAIL_SENDER`, and the
    /// optional `MAIL_INBOX`, `MAIL_TIMEOUT_SECONDS`, `MAX_RESUME_BYTES`.
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            relay_url: required("MAIL_RELAY_URL")?,
            api_key: required("MAIL_RELAY_API_KEY")?,
            sender: required("MAIL_SENDER")?,
            inbox: env::var("MAIL_INBOX").ok().filter(|v| !v.trim().is_empty()),
            timeout_seconds: parsed("MAIL_TIMEOUT_SECONDS", DEFAULT_TIMEOUT_SECONDS)?,
            max_resume_bytes: parsed("MAX_RESUME_BYTES", DEFAULT_MAX_RESUME_BYTES)?,
        })
    }
}
