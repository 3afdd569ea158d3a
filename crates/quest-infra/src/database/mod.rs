//! Database connection management and repositories.

mod connections;
mod postgres_base;

pub mod entity;
pub mod memory;
pub mod postgres_repo;

pub use connections::{DatabaseConfig, DatabaseConnections};
pub use memory::{InMemoryInterviewRepository, InMemoryPostRepository, InMemoryUserRepository};
pub use postgres_repo::{
    PostgresInterviewRepository, PostgresPostRepository, PostgresUserRepository,
};

#[cfg(test)]
mod tests;
