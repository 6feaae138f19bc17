use crate::domain::model::OutboundEmail;
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn relay_url(&self) -> &str;
    fn api_key(&self) -> &str;
    /// Mailbox every form email is sent from.
    fn sender_address(&self) -> &str;
    /// Mailbox that receives form submissions.
    fn inbox_address(&self) -> &str;
    fn max_resume_bytes(&self) -> usize;
}

#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<()>;
}
