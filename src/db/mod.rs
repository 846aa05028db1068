//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Tables owned by this service. Every statement is idempotent.
const SCHEMA: &[&str] = &[
    r#"CREATE TABLE IF NOT EXISTS users (
           user_id       UUID PRIMARY KEY,
           username      TEXT NOT NULL UNIQUE,
           password_hash TEXT NOT NULL,
           created_at    TIMESTAMPTZ NOT NULL DEFAULT NOW()
       )"#,
    r#"CREATE TABLE IF NOT EXISTS books (
           book_id        UUID PRIMARY KEY,
           title          TEXT NOT NULL,
           author         TEXT NOT NULL,
           description    TEXT,
           published_year INTEGER,
           created_at     TIMESTAMPTZ NOT NULL,
           updated_at     TIMESTAMPTZ NOT NULL
       )"#,
    // Insertion sequence for stable listing order
    r#"ALTER TABLE books ADD COLUMN IF NOT EXISTS seq BIGSERIAL"#,
    r#"CREATE INDEX IF NOT EXISTS books_seq_idx ON books (seq)"#,
];

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    pub async fn connect(database_url: &str) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(20)
            .acquire_timeout(Duration::from_secs(5))
            .connect(database_url)
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    /// Create the users and books tables if they do not exist yet.
    pub async fn migrate(&self) -> Result<(), sqlx::Error> {
        for statement in SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        tracing::info!("Database schema ready");
        Ok(())
    }
}
