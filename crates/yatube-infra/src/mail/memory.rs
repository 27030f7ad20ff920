use async_trait::async_trait;
use tokio::sync::Mutex;

use yatube_core::ports::{MailError, MailMessage, Mailer};

/// Keeps every sent message in memory.
#[derive(Debug, Default)]
pub struct InMemoryMailer {
    outbox: Mutex<Vec<MailMessage>>,
}

impl InMemoryMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far, oldest first.
    pub async fn sent(&self) -> Vec<MailMessage> {
        self.outbox.lock().await.clone()
    }
}

#[async_trait]
impl Mailer for InMemoryMailer {
    async fn send(&self, message: MailMessage) -> Result<(), MailError> {
        tracing::debug!(to = %message.to, "Queueing mail in memory outbox");
        self.outbox.lock().await.push(message);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_messages_in_order() {
        let mailer = InMemoryMailer::new();
        for to in ["a@example.com", "b@example.com"] {
            mailer
                .send(MailMessage {
                    to: to.to_string(),
                    subject: "subject".to_string(),
                    body: "body".to_string(),
                })
                .await
                .unwrap();
        }

        let sent = mailer.sent().await;
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0].to, "a@example.com");
    }
}
