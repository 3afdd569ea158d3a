//! # Quest Infrastructure
//!
//! Concrete implementations of the ports defined in `quest-core`: SeaORM
//! repositories (with in-memory fallbacks), JWT/Argon2 auth services, the
//! outbound HTTP clients for the grader, sandbox and voice providers, and
//! rate limiting.

pub mod auth;
pub mod database;
pub mod external;
pub mod rate_limit;

pub use auth::{Argon2PasswordService, JwtTokenService};
pub use database::{DatabaseConfig, DatabaseConnections};
pub use rate_limit::{InMemoryRateLimiter, RateLimitConfig};

/// Mask an email address for log fields to keep PII out of logs.
pub(crate) fn mask_email(email: &str) -> String {
    match email.find('@') {
        Some(at_pos) => {
            let (local, domain) = email.split_at(at_pos);
            if local.len() > 1 {
                format!("{}***{}", &local[..1], domain)
            } else {
                format!("***{domain}")
            }
        }
        None => "***".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::mask_email;

    #[test]
    fn masks_local_part() {
        assert_eq!(mask_email("alice@example.com"), "a***@example.com");
        assert_eq!(mask_email("a@example.com"), "***@example.com");
        assert_eq!(mask_email("not-an-email"), "***");
    }
}
