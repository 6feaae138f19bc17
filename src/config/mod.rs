#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::ServerConfig;

use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MAX_RESUME_BYTES: usize = 5 * 1024 * 1024;
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 15;

/// Everything the form handlers need to reach the mail relay.
#[derive(Clone, Serialize, Deserialize)]
pub struct MailConfig {
    pub relay_url: String,
    pub api_key: String,
    pub sender: String,
    /// Defaults to `sender` when unset.
    #[serde(default)]
    pub inbox: Option<String>,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
    #[serde(default = "default_max_resume_bytes")]
    pub max_resume_bytes: usize,
}

fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

fn default_max_resume_bytes() -> usize {
    DEFAULT_MAX_RESUME_BYTES
}

impl MailConfig {
    pub fn new(relay_url: impl Into<String>, api_key: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            relay_url: relay_url.into(),
            api_key: api_key.into(),
            sender: sender.into(),
            inbox: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            max_resume_bytes: DEFAULT_MAX_RESUME_BYTES,
        }
    }

    pub fn with_inbox(mut self, inbox: impl Into<String>) -> Self {
        self.inbox = Some(inbox.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl std::fmt::Debug for MailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MailConfig")
            .field("relay_url", &self.relay_url)
            .field("api_key", &"***")
            .field("sender", &self.sender)
            .field("inbox", &self.inbox)
            .field("timeout_seconds", &self.timeout_seconds)
            .field("max_resume_bytes", &self.max_resume_bytes)
            .finish()
    }
}

impl ConfigProvider for MailConfig {
    fn relay_url(&self) -> &str {
        &self.relay_url
    }

    fn api_key(&self) -> &str {
        &self.api_key
    }

    fn sender_address(&self) -> &str {
        &self.sender
    }

    fn inbox_address(&self) -> &str {
        self.inbox.as_deref().unwrap_or(&self.sender)
    }

    fn max_resume_bytes(&self) -> usize {
        self.max_resume_bytes
    }
}

impl Validate for MailConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_url("mail.relay_url", &self.relay_url)?;
        validation::validate_non_empty_string("mail.api_key", &self.api_key)?;
        validation::validate_mailbox("mail.sender", &self.sender)?;
        if let Some(inbox) = &self.inbox {
            validation::validate_mailbox("mail.inbox", inbox)?;
        }
        validation::validate_range("mail.timeout_seconds", self.timeout_seconds, 1, 120)?;
        validation::validate_range("mail.max_resume_bytes", self.max_resume_bytes, 1, 25 * 1024 * 1024)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inbox_defaults_to_sender() {
        let config = MailConfig::new("https://relay.test", "key", "forms@saargroup.com");
        assert_eq!(config.inbox_address(), "forms@saargroup.com");

        let config = config.with_inbox("info@saargroup.com");
        assert_eq!(config.inbox_address(), "info@saargroup.com");
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = MailConfig::new("https://relay.test", "re_secret", "forms@saargroup.com");
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("re_secret"));
    }

    #[test]
    fn test_validate_mail_config() {
        let config = MailConfig::new("https://relay.test", "key", "forms@saargroup.com");
        assert!(config.validate().is_ok());

        let bad_url = MailConfig::new("relay.test", "key", "forms@saargroup.com");
        assert!(bad_url.validate().is_err());

        let blank_key = MailConfig::new("https://relay.test", "  ", "forms@saargroup.com");
        assert!(blank_key.validate().is_err());

        let bad_sender = MailConfig::new("https://relay.test", "key", "forms");
        assert!(bad_sender.validate().is_err());
    }
}
