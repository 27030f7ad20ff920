use async_trait::async_trait;

use yatube_core::ports::{MailError, MailMessage, Mailer};

/// Writes outgoing mail to the log instead of delivering it.
#[derive(Debug, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::info!(
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "Outgoing mail"
        );
        Ok(())
    }
}
