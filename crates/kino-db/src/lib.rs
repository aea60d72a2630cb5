//! Postgres persistence for the video catalog.
//!
//! Implements the `kino-core` collaborator contracts on top of sqlx: the
//! [`PgVideoRepository`] for the aggregate itself and one existence gateway
//! per foreign aggregate table. Row mapping is split out into [`row`] so it
//! stays unit-testable without a database.

pub mod existence;
pub mod row;
pub mod video_repository;

use kino_core::AppError;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

pub use existence::{PgCastMemberGateway, PgCategoryGateway, PgGenreGateway};
pub use video_repository::PgVideoRepository;

pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");

/// Connect to Postgres and run pending migrations.
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, AppError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| AppError::Database(format!("Failed to connect: {}", e)))?;

    MIGRATOR
        .run(&pool)
        .await
        .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))?;

    tracing::info!(max_connections, "Database pool ready");
    Ok(pool)
}
