use async_trait::async_trait;

/// An outgoing email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Mail delivery port.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: MailMessage) -> Result<(), MailError>;
}

#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Delivery failed: {0}")]
    Delivery(String),
}
