use crate::config::MailConfig;
use crate::domain::model::{Attachment, OutboundEmail};
use crate::domain::ports::{ConfigProvider, MailTransport};
use crate::utils::error::{Result, SiteError};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::Client;
use serde::Serialize;

const MAX_ERROR_BODY: usize = 512;

/// Delivers email through a transactional mail relay's HTTP API
/// (`POST {relay_url}/emails` with a bearer key).
#[derive(Clone)]
pub struct HttpMailRelay {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: String,
    to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    attachments: Vec<RelayAttachment<'a>>,
}

#[derive(Serialize)]
struct RelayAttachment<'a> {
    filename: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_type: Option<&'a str>,
}

impl<'a> From<&'a Attachment> for RelayAttachment<'a> {
    fn from(attachment: &'a Attachment) -> Self {
        Self {
            filename: &attachment.filename,
            content: STANDARD.encode(&attachment.content),
            content_type: attachment.content_type.as_deref(),
        }
    }
}

impl<'a> From<&'a OutboundEmail> for RelayMessage<'a> {
    fn from(email: &'a OutboundEmail) -> Self {
        Self {
            from: email.from.to_string(),
            to: email.to.iter().map(ToString::to_string).collect(),
            reply_to: email.reply_to.as_deref(),
            subject: &email.subject,
            text: &email.text,
            html: &email.html,
            attachments: email.attachments.iter().map(RelayAttachment::from).collect(),
        }
    }
}

impl HttpMailRelay {
    pub fn new(config: &MailConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            client,
            endpoint: format!("{}/emails", config.relay_url().trim_end_matches('/')),
            api_key: config.api_key().to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl MailTransport for HttpMailRelay {
    async fn send(&self, email: &OutboundEmail) -> Result<()> {
        tracing::debug!("Posting email to relay: {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&RelayMessage::from(email))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Relay response status: {}", status);

        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let mut cut = MAX_ERROR_BODY;
                while !body.is_char_boundary(cut) {
                    cut -= 1;
                }
                body.truncate(cut);
            }
            return Err(SiteError::RelayRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::Mailbox;
    use httpmock::prelude::*;

    fn email() -> OutboundEmail {
        OutboundEmail {
            from: Mailbox::named("Jane Doe", "forms@saargroup.com"),
            to: vec![Mailbox::new("info@saargroup.com")],
            reply_to: Some("jane@example.com".to_string()),
            subject: "Villa HVAC".to_string(),
            text: "Name: Jane Doe".to_string(),
            html: "<p>Jane Doe</p>".to_string(),
            attachments: vec![],
        }
    }

    fn relay_for(server: &MockServer) -> HttpMailRelay {
        let config = MailConfig::new(server.url("/"), "re_test", "forms@saargroup.com");
        HttpMailRelay::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let config = MailConfig::new("https://relay.test/v1/", "k", "forms@saargroup.com");
        let relay = HttpMailRelay::new(&config).unwrap();
        assert_eq!(relay.endpoint(), "https://relay.test/v1/emails");
    }

    #[tokio::test]
    async fn test_send_posts_message_with_bearer_key() {
        let server = MockServer::start();
        let relay_mock = server.mock(|when, then| {
            when.method(POST)
                .path("/emails")
                .header("authorization", "Bearer re_test")
                .json_body_partial(
                    r#"{
                        "from": "\"Jane Doe\" <forms@saargroup.com>",
                        "to": ["info@saargroup.com"],
                        "reply_to": "jane@example.com",
                        "subject": "Villa HVAC"
                    }"#,
                );
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"id": "msg_1"}));
        });

        relay_for(&server).send(&email()).await.unwrap();

        relay_mock.assert();
    }

    #[tokio::test]
    async fn test_attachments_are_base64_encoded() {
        let server = MockServer::start();
        let relay_mock = server.mock(|when, then| {
            when.method(POST).path("/emails").json_body_partial(
                r#"{
                    "attachments": [
                        {"filename": "cv.pdf", "content": "JVBERi0xLjQ=", "content_type": "application/pdf"}
                    ]
                }"#,
            );
            then.status(202);
        });

        let mut message = email();
        message.attachments.push(Attachment {
            filename: "cv.pdf".to_string(),
            content_type: Some("application/pdf".to_string()),
            content: b"%PDF-1.4".to_vec(),
        });

        relay_for(&server).send(&message).await.unwrap();

        relay_mock.assert();
    }

    #[tokio::test]
    async fn test_non_success_status_is_rejection() {
        let server = MockServer::start();
        let relay_mock = server.mock(|when, then| {
            when.method(POST).path("/emails");
            then.status(422).body("invalid from address");
        });

        let err = relay_for(&server).send(&email()).await.unwrap_err();

        relay_mock.assert();
        match err {
            SiteError::RelayRejected { status, body } => {
                assert_eq!(status, 422);
                assert_eq!(body, "invalid from address");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreachable_relay_is_transport_error() {
        let config = MailConfig::new("http://127.0.0.1:9", "re_test", "forms@saargroup.com");
        let relay = HttpMailRelay::new(&config).unwrap();

        let err = relay.send(&email()).await.unwrap_err();
        assert!(matches!(err, SiteError::RelayError(_)));
    }
}
