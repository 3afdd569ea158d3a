//! Voice-interview provider port.

use async_trait::async_trait;

/// A live voice call created by the provider.
#[derive(Debug, Clone)]
pub struct CallHandle {
    pub call_id: String,
    pub status: String,
}

/// Transcript of a finished (or in-progress) call.
#[derive(Debug, Clone)]
pub struct Transcription {
    pub call_id: String,
    pub transcript: String,
}

/// Seam to the voice-call provider used for spoken practice interviews.
#[async_trait]
pub trait VoiceGateway: Send + Sync {
    /// Start a voice interview for a role/type/level.
    async fn start_call(
        &self,
        role: &str,
        interview_type: &str,
        level: &str,
    ) -> Result<CallHandle, VoiceError>;

    /// End a running call.
    async fn end_call(&self, call_id: &str) -> Result<(), VoiceError>;

    /// Fetch the transcript of a call.
    async fn transcription(&self, call_id: &str) -> Result<Transcription, VoiceError>;
}

/// Voice provider errors.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    #[error("Voice provider is not configured")]
    NotConfigured,

    #[error("Voice provider request failed: {0}")]
    Request(String),

    #[error("Call not found: {0}")]
    CallNotFound(String),
}
