//! Bookshelf HTTP service
//!
//! ```text
//! ┌──────────┐    ┌──────────────┐    ┌──────────────┐    ┌──────────┐
//! │  Client  │───▶│ jwt_auth     │───▶│ book handler │───▶│BookStore │
//! │ (Bearer) │    │ middleware   │    │              │    │          │
//! └──────────┘    └──────┬───────┘    └──────────────┘    └──────────┘
//!                        │ resolve(token)
//!                 ┌──────▼───────┐    ┌──────────┐
//!                 │UserAuthService───▶│UserStore │
//!                 └──────────────┘    └──────────┘
//! ```
//!
//! Usage: `bookshelf [--env dev] [--port 8000]`

use std::sync::Arc;

use anyhow::{Context, Result};

use bookshelf::config::AppConfig;
use bookshelf::db::Database;
use bookshelf::gateway::{run_server, state::AppState};
use bookshelf::store::{
    BookStore, InMemoryBookStore, InMemoryUserStore, PgBookStore, PgUserStore, UserStore,
};
use bookshelf::user_auth::UserAuthService;

fn get_env() -> String {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if (args[i] == "--env" || args[i] == "-e") && i + 1 < args.len() {
            return args[i + 1].clone();
        }
    }
    "dev".to_string()
}

/// Get port override from command line (--port argument)
fn get_port_override() -> Option<u16> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == "--port" && i + 1 < args.len() {
            return args[i + 1].parse().ok();
        }
    }
    None
}

/// Wire stores and the auth service according to `storage`.
async fn build_state(config: &AppConfig) -> Result<AppState> {
    let users: Arc<dyn UserStore>;
    let books: Arc<dyn BookStore>;
    let mut db = None;

    match config.storage.postgres_url {
        Some(ref url) => {
            let database = Database::connect(url)
                .await
                .context("Failed to connect to PostgreSQL")?;
            database.migrate().await.context("Failed to create schema")?;
            let database = Arc::new(database);
            users = Arc::new(PgUserStore::new(database.pool().clone()));
            books = Arc::new(PgBookStore::new(database.pool().clone()));
            db = Some(database);
        }
        None => {
            tracing::warn!("No postgres_url configured, using in-memory stores");
            users = Arc::new(InMemoryUserStore::new());
            books = Arc::new(InMemoryBookStore::new());
        }
    }

    let user_auth = UserAuthService::new(users, &config.auth)
        .context("Failed to build auth service")?;

    let state = AppState::new(Arc::new(user_auth), books);
    Ok(match db {
        Some(db) => state.with_database(db),
        None => state,
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let env = get_env();
    let mut config = AppConfig::load(&env)?;
    if let Some(port) = get_port_override() {
        config.gateway.port = port;
    }

    let _log_guard = bookshelf::logging::init_logging(&config);
    tracing::info!(
        "Starting Bookshelf {} in {} mode (token ttl {} min)",
        bookshelf::version(),
        env,
        config.auth.token_ttl_minutes
    );

    let state = build_state(&config).await?;
    run_server(&config.gateway, Arc::new(state)).await
}
