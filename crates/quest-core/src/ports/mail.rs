//! Outbound mail port.

use async_trait::async_trait;

/// Delivery seam for account mail. Only verification mail exists today.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send an email-verification token to a new account.
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), MailError>;
}

/// Mail delivery errors.
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    #[error("Mail delivery failed: {0}")]
    Delivery(String),
}
