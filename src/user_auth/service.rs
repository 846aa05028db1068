use std::sync::{Arc, OnceLock};

use super::error::AuthError;
use super::models::{AuthenticatedUser, LoginResponse, User, UserView};
use super::password::PasswordHashing;
use super::token::{TokenError, TokenIssuer, TokenVerifier};
use crate::config::AuthConfig;
use crate::store::UserStore;

/// Signup, login and bearer-token resolution over a [`UserStore`].
pub struct UserAuthService {
    users: Arc<dyn UserStore>,
    hasher: PasswordHashing,
    issuer: TokenIssuer,
    verifier: TokenVerifier,
    /// Verified against when the username is unknown, so both login
    /// failure paths pay for one argon2 run.
    dummy_hash: OnceLock<String>,
}

impl UserAuthService {
    pub fn new(users: Arc<dyn UserStore>, config: &AuthConfig) -> Result<Self, AuthError> {
        Ok(Self {
            users,
            hasher: PasswordHashing::new(&config.password_hash)?,
            issuer: TokenIssuer::new(config),
            verifier: TokenVerifier::new(config),
            dummy_hash: OnceLock::new(),
        })
    }

    /// Register a new user
    pub async fn signup(&self, username: &str, password: &str) -> Result<UserView, AuthError> {
        // Cheap pre-check; the store still enforces uniqueness on insert
        if self.users.get_by_username(username).await?.is_some() {
            return Err(AuthError::Conflict(username.to_string()));
        }

        let password_hash = self.hasher.hash_blocking(password.to_string()).await?;
        let user = self.users.create(User::new(username, password_hash)).await?;

        tracing::info!(user_id = %user.user_id, username = %user.username, "User registered");
        Ok(user.view())
    }

    /// Verify credentials and issue a bearer token
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse, AuthError> {
        let user = self.users.get_by_username(username).await?;

        let Some(user) = user else {
            let dummy = self.dummy_hash().await?;
            self.hasher
                .verify_blocking(password.to_string(), dummy)
                .await;
            return Err(AuthError::Unauthorized(format!(
                "unknown username: {}",
                username
            )));
        };

        let valid = self
            .hasher
            .verify_blocking(password.to_string(), user.password_hash.clone())
            .await;
        if !valid {
            return Err(AuthError::Unauthorized(format!(
                "wrong password for: {}",
                username
            )));
        }

        let issued = self
            .issuer
            .issue(&user.username)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(
            user_id = %user.user_id,
            expires_at = %issued.expires_at,
            "Token issued"
        );
        Ok(LoginResponse::bearer(issued.token, user.user_id))
    }

    /// Resolve a bearer token to the user it was issued for.
    ///
    /// Fails with `Unauthorized` for a bad signature, a malformed or expired
    /// token, and for a subject that no longer exists in the store.
    pub async fn resolve(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.verifier.verify(token).map_err(|e| match e {
            TokenError::Expired => AuthError::Unauthorized("token expired".to_string()),
            other => AuthError::Unauthorized(other.to_string()),
        })?;

        let user = self
            .users
            .get_by_username(&claims.sub)
            .await?
            .ok_or_else(|| {
                AuthError::Unauthorized(format!("token subject not found: {}", claims.sub))
            })?;

        Ok(AuthenticatedUser::from(&user))
    }

    async fn dummy_hash(&self) -> Result<String, AuthError> {
        if let Some(hash) = self.dummy_hash.get() {
            return Ok(hash.clone());
        }
        let hash = self
            .hasher
            .hash_blocking("dummy-password-for-timing".to_string())
            .await?;
        Ok(self.dummy_hash.get_or_init(|| hash).clone())
    }
}
