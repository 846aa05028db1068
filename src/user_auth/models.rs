//! User, token and request/response types for the auth gate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Stored credential. Never serialized directly: see [`UserView`].
#[derive(Debug, Clone)]
pub struct User {
    pub user_id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: String) -> Self {
        Self {
            user_id: Uuid::new_v4(),
            username: username.into(),
            password_hash,
            created_at: Utc::now(),
        }
    }

    pub fn view(&self) -> UserView {
        UserView {
            id: self.user_id,
            username: self.username.clone(),
        }
    }
}

/// Public representation of a user (no password hash)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserView {
    pub id: Uuid,
    #[schema(example = "alice")]
    pub username: String,
}

/// JWT Claims structure
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // Subject (username)
    pub exp: usize,  // Expiration time (as UTC timestamp)
    pub iat: usize,  // Issued at
}

/// Identity resolved from a valid bearer token, scoped to one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

impl From<&User> for AuthenticatedUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            username: user.username.clone(),
        }
    }
}

fn no_whitespace(value: &str) -> Result<(), validator::ValidationError> {
    if value.chars().any(char::is_whitespace) {
        return Err(validator::ValidationError::new("whitespace"));
    }
    Ok(())
}

/// User signup request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 64), custom(function = "no_whitespace"))]
    #[schema(example = "alice")]
    pub username: String,
    #[validate(length(min = 1, max = 128))]
    #[schema(example = "pw123")]
    pub password: String,
}

/// OAuth2 password-flow login form (`application/x-www-form-urlencoded`)
#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// OAuth2 token response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    #[schema(example = "bearer")]
    pub token_type: String,
    pub user_id: Uuid,
}

impl LoginResponse {
    pub fn bearer(access_token: String, user_id: Uuid) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            user_id,
        }
    }
}
