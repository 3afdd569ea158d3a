//! Application configuration loaded from environment variables.

use std::env;

use quest_infra::database::DatabaseConfig;
use quest_infra::external::{GraderConfig, SandboxConfig, VoiceConfig};

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub grader: Option<GraderConfig>,
    pub sandbox: Option<SandboxConfig>,
    pub voice: Option<VoiceConfig>,
}

impl AppConfig {
    /// Load configuration from environment variables. Every provider is
    /// optional; missing settings select the in-memory or disabled fallback.
    pub fn from_env() -> Self {
        let database = env::var("DATABASE_URL").ok().map(|url| DatabaseConfig {
            url,
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(100),
            min_connections: env::var("DB_MIN_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(10),
        });

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            database,
            grader: GraderConfig::from_env(),
            sandbox: SandboxConfig::from_env(),
            voice: VoiceConfig::from_env(),
        }
    }
}
