//! Storage collaborators
//!
//! The auth gate and the book handlers only see the [`UserStore`] and
//! [`BookStore`] traits. Two backends implement them:
//!
//! - [`memory`]: `DashMap` based, used for development and tests
//! - [`postgres`]: `sqlx` on a shared [`crate::db::Database`] pool

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::books::models::{Book, BookCreate, BookUpdate};
use crate::user_auth::models::User;

pub use memory::{InMemoryBookStore, InMemoryUserStore};
pub use postgres::{PgBookStore, PgUserStore};

#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique key (username) is already taken
    #[error("duplicate key: {0}")]
    Duplicate(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Credential store: users keyed by unique, case-sensitive username.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Insert a new user. Must fail with [`StoreError::Duplicate`] when the
    /// username already exists, atomically with respect to concurrent inserts.
    async fn create(&self, user: User) -> Result<User, StoreError>;
}

/// Book records keyed by opaque id.
#[async_trait]
pub trait BookStore: Send + Sync {
    async fn create(&self, data: BookCreate) -> Result<Book, StoreError>;

    /// Books in creation order
    async fn list(&self, skip: u32, limit: u32) -> Result<Vec<Book>, StoreError>;

    async fn get(&self, id: Uuid) -> Result<Option<Book>, StoreError>;

    /// `None` when no book has this id
    async fn update(&self, id: Uuid, data: BookUpdate) -> Result<Option<Book>, StoreError>;

    /// `false` when no book has this id
    async fn delete(&self, id: Uuid) -> Result<bool, StoreError>;
}
