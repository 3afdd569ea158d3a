//! Outbound HTTP clients for third-party providers. Every call is a single
//! attempt with a client-side timeout; there is no retry or backoff.

mod grader;
mod mailer;
mod sandbox;
mod voice;

pub use grader::{CannedGrader, GraderConfig, HttpInterviewGrader};
pub use mailer::LogMailer;
pub use sandbox::{DisabledCodeRunner, HttpCodeRunner, SandboxConfig};
pub use voice::{DisabledVoiceGateway, HttpVoiceGateway, VoiceConfig};

use std::time::Duration;

/// Timeout applied to every provider call.
pub(crate) const PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

pub(crate) fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(PROVIDER_TIMEOUT)
        .build()
        .unwrap_or_default()
}

/// Join a configured base URL with a path without doubling slashes.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
