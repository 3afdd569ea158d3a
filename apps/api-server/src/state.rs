//! Application state - shared across all handlers.

use std::sync::Arc;

use quest_core::ports::{InterviewRepository, PostRepository, UserRepository};
use quest_infra::database::{
    DatabaseConfig, DatabaseConnections, InMemoryInterviewRepository, InMemoryPostRepository,
    InMemoryUserRepository, PostgresInterviewRepository, PostgresPostRepository,
    PostgresUserRepository,
};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub interviews: Arc<dyn InterviewRepository>,
    pub db: Option<Arc<DatabaseConnections>>,
}

impl AppState {
    /// Build the application state with appropriate implementations.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        let state = match db_config {
            Some(config) => match DatabaseConnections::init(config).await {
                Ok(connections) => {
                    let conn = Arc::new(connections);
                    Self {
                        users: Arc::new(PostgresUserRepository::new(conn.main.clone())),
                        posts: Arc::new(PostgresPostRepository::new(conn.main.clone())),
                        interviews: Arc::new(PostgresInterviewRepository::new(conn.main.clone())),
                        db: Some(conn),
                    }
                }
                Err(e) => {
                    tracing::error!(
                        "Failed to connect to database: {}. Using in-memory fallback.",
                        e
                    );
                    Self::in_memory()
                }
            },
            None => {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::in_memory()
            }
        };

        tracing::info!("Application state initialized");
        state
    }

    /// In-memory repositories; also the backing store for the test suite.
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            posts: Arc::new(InMemoryPostRepository::new()),
            interviews: Arc::new(InMemoryInterviewRepository::new()),
            db: None,
        }
    }
}
