//! Auth gate
//!
//! - `password`: argon2id hash / verify
//! - `token`: HS256 bearer token issuer and verifier
//! - `service`: signup, login and current-user resolution
//! - `middleware`: axum guard for protected routes
//! - `handlers`: `/signup` and `/login`

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod service;
pub mod token;

pub use error::AuthError;
pub use middleware::jwt_auth_middleware;
pub use models::{AuthenticatedUser, Claims, LoginResponse, User, UserView};
pub use password::PasswordHashing;
pub use service::UserAuthService;
pub use token::{IssuedToken, TokenError, TokenIssuer, TokenVerifier};
