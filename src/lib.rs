//! Bookshelf - authenticated book catalogue service
//!
//! # Modules
//!
//! - [`user_auth`] - Password hashing, bearer tokens, signup/login and the route guard
//! - [`books`] - Book records and CRUD handlers
//! - [`store`] - `UserStore` / `BookStore` traits with in-memory and PostgreSQL backends
//! - [`gateway`] - Axum router, response envelope, ingress validation, OpenAPI
//! - [`db`] - PostgreSQL pool and schema
//! - [`config`] - YAML configuration
//! - [`logging`] - tracing subscriber setup

pub mod books;
pub mod config;
pub mod db;
pub mod gateway;
pub mod logging;
pub mod store;
pub mod user_auth;

pub use config::AppConfig;
pub use gateway::{build_router, run_server, state::AppState};
pub use user_auth::UserAuthService;

/// Crate version plus the git commit it was built from.
pub fn version() -> String {
    format!("{}+{}", env!("CARGO_PKG_VERSION"), env!("BOOKSHELF_GIT_HASH"))
}
