//! Remote code-execution port.

use async_trait::async_trait;

/// A playground snippet to run.
#[derive(Debug, Clone)]
pub struct ExecutionRequest {
    pub language: String,
    pub code: String,
    pub stdin: Option<String>,
}

/// Captured output of a sandbox run.
#[derive(Debug, Clone)]
pub struct ExecutionOutcome {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
}

/// Seam to the remote execution sandbox. One attempt per call, no retries.
#[async_trait]
pub trait CodeRunner: Send + Sync {
    async fn execute(&self, request: ExecutionRequest) -> Result<ExecutionOutcome, ExecutionError>;
}

/// Sandbox provider errors.
#[derive(Debug, thiserror::Error)]
pub enum ExecutionError {
    #[error("Execution provider is not configured")]
    NotConfigured,

    #[error("Execution request failed: {0}")]
    Request(String),

    #[error("Unsupported language: {0}")]
    UnsupportedLanguage(String),
}
