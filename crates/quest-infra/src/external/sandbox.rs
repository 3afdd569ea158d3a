//! Remote code-execution client for the playground.
//!
//! Speaks the Piston execute API: one POST per run, languages resolved by
//! the provider ("version": "*").

use async_trait::async_trait;
use serde::Deserialize;

use quest_core::ports::{CodeRunner, ExecutionError, ExecutionOutcome, ExecutionRequest};

use super::{http_client, join_url};

/// Sandbox provider configuration.
#[derive(Debug, Clone)]
pub struct SandboxConfig {
    pub api_url: String,
}

impl SandboxConfig {
    /// Read provider settings from the environment, e.g.
    /// `SANDBOX_API_URL=https://emkc.org/api/v2/piston`.
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_url: std::env::var("SANDBOX_API_URL").ok()?,
        })
    }
}

/// Piston-style execution client.
pub struct HttpCodeRunner {
    http: reqwest::Client,
    config: SandboxConfig,
}

#[derive(Debug, Deserialize)]
struct PistonResponse {
    run: PistonPhase,
    #[serde(default)]
    compile: Option<PistonPhase>,
}

#[derive(Debug, Default, Deserialize)]
struct PistonPhase {
    #[serde(default)]
    stdout: String,
    #[serde(default)]
    stderr: String,
    #[serde(default)]
    code: Option<i32>,
}

impl HttpCodeRunner {
    pub fn new(config: SandboxConfig) -> Self {
        Self {
            http: http_client(),
            config,
        }
    }
}

#[async_trait]
impl CodeRunner for HttpCodeRunner {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionOutcome, ExecutionError> {
        let body = serde_json::json!({
            "language": request.language,
            "version": "*",
            "files": [{"content": request.code}],
            "stdin": request.stdin.unwrap_or_default(),
        });

        let response = self
            .http
            .post(join_url(&self.config.api_url, "/execute"))
            .json(&body)
            .send()
            .await
            .map_err(|e| ExecutionError::Request(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let detail = response.text().await.unwrap_or_default();
            // The provider reports unknown languages as a 400 mentioning the
            // runtime.
            if detail.contains("runtime") {
                return Err(ExecutionError::UnsupportedLanguage(request.language));
            }
            return Err(ExecutionError::Request(format!(
                "sandbox returned status {status}: {detail}"
            )));
        }
        if !status.is_success() {
            return Err(ExecutionError::Request(format!(
                "sandbox returned status {status}"
            )));
        }

        let payload: PistonResponse = response
            .json()
            .await
            .map_err(|e| ExecutionError::Request(e.to_string()))?;

        // Surface compile diagnostics ahead of runtime output.
        let mut stderr = String::new();
        if let Some(compile) = payload.compile {
            stderr.push_str(&compile.stderr);
        }
        stderr.push_str(&payload.run.stderr);

        Ok(ExecutionOutcome {
            stdout: payload.run.stdout,
            stderr,
            exit_code: payload.run.code,
        })
    }
}

/// Stand-in used when `SANDBOX_API_URL` is not set; every run fails with
/// `NotConfigured`, which the API maps to 502.
pub struct DisabledCodeRunner;

#[async_trait]
impl CodeRunner for DisabledCodeRunner {
    async fn execute(
        &self,
        _request: ExecutionRequest,
    ) -> Result<ExecutionOutcome, ExecutionError> {
        Err(ExecutionError::NotConfigured)
    }
}
