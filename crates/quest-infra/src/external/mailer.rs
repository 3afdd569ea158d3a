//! Mail delivery.
//!
//! No SMTP integration exists yet; the log mailer records that a
//! verification token was issued so local flows stay testable.
//! TODO: wire a real transport once the mail provider account lands.

use async_trait::async_trait;

use quest_core::ports::{MailError, Mailer};

use crate::mask_email;

/// Mailer that writes to the log instead of sending.
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send_verification(&self, email: &str, token: &str) -> Result<(), MailError> {
        tracing::info!(
            recipient = %mask_email(email),
            "Verification mail queued (log transport)"
        );
        tracing::debug!(verify_token = %token, "Verification token issued");
        Ok(())
    }
}
