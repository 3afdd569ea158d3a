//! # SkillQuest API Server
//!
//! The main entry point for the Actix-web HTTP server.

use std::sync::Arc;

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod state;

use config::AppConfig;
use quest_core::ports::{
    CodeRunner, InterviewGrader, Mailer, PasswordService, RateLimiter, TokenService, VoiceGateway,
};
use quest_infra::auth::{Argon2PasswordService, JwtTokenService};
use quest_infra::external::{
    CannedGrader, DisabledCodeRunner, DisabledVoiceGateway, HttpCodeRunner, HttpInterviewGrader,
    HttpVoiceGateway, LogMailer,
};
use quest_infra::rate_limit::InMemoryRateLimiter;
use state::AppState;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting SkillQuest API server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(config.database.as_ref()).await;

    let token_service: Arc<dyn TokenService> = Arc::new(JwtTokenService::from_env());
    let password_service: Arc<dyn PasswordService> = Arc::new(Argon2PasswordService::new());
    let mailer: Arc<dyn Mailer> = Arc::new(LogMailer);
    let limiter: Arc<dyn RateLimiter> = Arc::new(InMemoryRateLimiter::from_env());

    let grader: Arc<dyn InterviewGrader> = match config.grader.clone() {
        Some(grader_config) => Arc::new(HttpInterviewGrader::new(grader_config)),
        None => Arc::new(CannedGrader::new()),
    };

    let code_runner: Arc<dyn CodeRunner> = match config.sandbox.clone() {
        Some(sandbox_config) => Arc::new(HttpCodeRunner::new(sandbox_config)),
        None => {
            tracing::warn!("SANDBOX_API_URL not set - playground execution disabled");
            Arc::new(DisabledCodeRunner)
        }
    };

    let voice_gateway: Arc<dyn VoiceGateway> = match config.voice.clone() {
        Some(voice_config) => Arc::new(HttpVoiceGateway::new(voice_config)),
        None => {
            tracing::warn!("VOICE_API_KEY not set - voice interviews disabled");
            Arc::new(DisabledVoiceGateway)
        }
    };

    HttpServer::new(move || {
        let limiter = limiter.clone();
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .app_data(web::Data::new(token_service.clone()))
            .app_data(web::Data::new(password_service.clone()))
            .app_data(web::Data::new(mailer.clone()))
            .app_data(web::Data::new(grader.clone()))
            .app_data(web::Data::new(code_runner.clone()))
            .app_data(web::Data::new(voice_gateway.clone()))
            .configure(|cfg| handlers::configure_routes(cfg, limiter))
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}

fn init_tracing() {
    use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,api_server=debug,quest_infra=debug"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}
