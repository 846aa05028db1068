use std::sync::Arc;

use super::handlers::health::HealthCache;
use crate::db::Database;
use crate::store::BookStore;
use crate::user_auth::UserAuthService;

/// Gateway shared state
#[derive(Clone)]
pub struct AppState {
    /// Signup / login / token resolution
    pub user_auth: Arc<UserAuthService>,
    /// Book records
    pub books: Arc<dyn BookStore>,
    /// PostgreSQL pool, when the service runs on Postgres (health checks)
    pub pg_db: Option<Arc<Database>>,
    /// Last database ping result
    pub health: Arc<HealthCache>,
}

impl AppState {
    pub fn new(user_auth: Arc<UserAuthService>, books: Arc<dyn BookStore>) -> Self {
        Self {
            user_auth,
            books,
            pg_db: None,
            health: Arc::new(HealthCache::default()),
        }
    }

    pub fn with_database(mut self, db: Arc<Database>) -> Self {
        self.pg_db = Some(db);
        self
    }
}
