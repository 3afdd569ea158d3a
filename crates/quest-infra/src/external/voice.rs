//! Voice-interview provider client (Vapi-style call API).

use async_trait::async_trait;
use serde::Deserialize;

use quest_core::ports::{CallHandle, Transcription, VoiceError, VoiceGateway};

use super::{http_client, join_url};

/// Voice provider configuration.
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    pub api_url: String,
    pub api_key: String,
    pub assistant_id: String,
}

impl VoiceConfig {
    /// Read provider settings from the environment. Both the API key and the
    /// assistant id are required.
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("VOICE_API_KEY").ok()?;
        let assistant_id = std::env::var("VOICE_ASSISTANT_ID").ok()?;
        Some(Self {
            api_url: std::env::var("VOICE_API_URL")
                .unwrap_or_else(|_| "https://api.vapi.ai".to_string()),
            api_key,
            assistant_id,
        })
    }
}

/// HTTP client for the voice-call provider.
pub struct HttpVoiceGateway {
    http: reqwest::Client,
    config: VoiceConfig,
}

#[derive(Debug, Deserialize)]
struct CallCreated {
    id: String,
    #[serde(default)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CallDetails {
    id: String,
    #[serde(default)]
    transcript: Option<String>,
    #[serde(default)]
    artifact: Option<CallArtifact>,
}

#[derive(Debug, Deserialize)]
struct CallArtifact {
    #[serde(default)]
    transcript: Option<String>,
}

impl HttpVoiceGateway {
    pub fn new(config: VoiceConfig) -> Self {
        Self {
            http: http_client(),
            config,
        }
    }
}

#[async_trait]
impl VoiceGateway for HttpVoiceGateway {
    async fn start_call(
        &self,
        role: &str,
        interview_type: &str,
        level: &str,
    ) -> Result<CallHandle, VoiceError> {
        let body = serde_json::json!({
            "assistantId": self.config.assistant_id,
            "assistantOverrides": {
                "variableValues": {
                    "role": role,
                    "type": interview_type,
                    "level": level,
                }
            }
        });

        let response = self
            .http
            .post(join_url(&self.config.api_url, "/call"))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| VoiceError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoiceError::Request(format!(
                "voice provider returned status {status}"
            )));
        }

        let created: CallCreated = response
            .json()
            .await
            .map_err(|e| VoiceError::Request(e.to_string()))?;

        Ok(CallHandle {
            call_id: created.id,
            status: created.status.unwrap_or_else(|| "queued".to_string()),
        })
    }

    async fn end_call(&self, call_id: &str) -> Result<(), VoiceError> {
        let response = self
            .http
            .delete(join_url(&self.config.api_url, &format!("/call/{call_id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| VoiceError::Request(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(VoiceError::CallNotFound(call_id.to_string()));
        }
        if !status.is_success() {
            return Err(VoiceError::Request(format!(
                "voice provider returned status {status}"
            )));
        }
        Ok(())
    }

    async fn transcription(&self, call_id: &str) -> Result<Transcription, VoiceError> {
        let response = self
            .http
            .get(join_url(&self.config.api_url, &format!("/call/{call_id}")))
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .map_err(|e| VoiceError::Request(e.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(VoiceError::CallNotFound(call_id.to_string()));
        }
        if !status.is_success() {
            return Err(VoiceError::Request(format!(
                "voice provider returned status {status}"
            )));
        }

        let details: CallDetails = response
            .json()
            .await
            .map_err(|e| VoiceError::Request(e.to_string()))?;

        let transcript = details
            .transcript
            .or(details.artifact.and_then(|a| a.transcript))
            .unwrap_or_default();

        Ok(Transcription {
            call_id: details.id,
            transcript,
        })
    }
}

/// Stand-in used when the voice provider is not configured; every call fails
/// with `NotConfigured`, which the API maps to 502.
pub struct DisabledVoiceGateway;

#[async_trait]
impl VoiceGateway for DisabledVoiceGateway {
    async fn start_call(
        &self,
        _role: &str,
        _interview_type: &str,
        _level: &str,
    ) -> Result<CallHandle, VoiceError> {
        Err(VoiceError::NotConfigured)
    }

    async fn end_call(&self, _call_id: &str) -> Result<(), VoiceError> {
        Err(VoiceError::NotConfigured)
    }

    async fn transcription(&self, _call_id: &str) -> Result<Transcription, VoiceError> {
        Err(VoiceError::NotConfigured)
    }
}
