use thiserror::Error;

#[derive(Error, Debug)]
pub enum SiteError {
    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<String> },

    #[error("Validation error on {field}: {message}")]
    ValidationError { field: String, message: String },

    #[error("Invalid request body: {message}")]
    InvalidPayload { message: String },

    #[error("Mail relay request failed: {0}")]
    RelayError(#[from] reqwest::Error),

    #[error("Mail relay rejected message with status {status}: {body}")]
    RelayRejected { status: u16, body: String },

    #[error("Template error: {0}")]
    TemplateError(#[from] tera::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration value: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl SiteError {
    pub fn missing<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SiteError::MissingFields {
            fields: fields.into_iter().map(Into::into).collect(),
        }
    }

    pub fn invalid(field: &str, message: impl Into<String>) -> Self {
        SiteError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Errors caused by what the submitter sent, as opposed to the relay or
    /// the server's own setup.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            SiteError::MissingFields { .. }
                | SiteError::ValidationError { .. }
                | SiteError::InvalidPayload { .. }
        )
    }

    /// Message safe to show to the person who filled in the form.
    pub fn user_friendly_message(&self) -> String {
        match self {
            SiteError::MissingFields { .. } => "Missing required fields".to_string(),
            SiteError::ValidationError { message, .. } => message.clone(),
            SiteError::InvalidPayload { .. } => "Invalid request body".to_string(),
            _ => "Something went wrong. Please try again later.".to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SiteError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors_are_classified() {
        assert!(SiteError::missing(["name"]).is_client_error());
        assert!(SiteError::invalid("email", "Invalid email address").is_client_error());
        assert!(!SiteError::RelayRejected {
            status: 502,
            body: "upstream".to_string()
        }
        .is_client_error());
    }

    #[test]
    fn test_user_friendly_message_hides_transport_details() {
        let err = SiteError::RelayRejected {
            status: 401,
            body: "bad api key re_123".to_string(),
        };
        assert!(!err.user_friendly_message().contains("re_123"));
        assert_eq!(
            SiteError::missing(["name", "email"]).user_friendly_message(),
            "Missing required fields"
        );
    }

    #[test]
    fn test_missing_fields_display_lists_fields() {
        let err = SiteError::missing(["name", "message"]);
        assert_eq!(err.to_string(), "Missing required fields: name, message");
    }
}
