//! Argon2id password hashing.

use argon2::{
    Algorithm, Argon2, Params, Version,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

use super::error::AuthError;
use crate::config::PasswordHashConfig;

/// Salted, deliberately slow one-way hashing of plaintext passwords.
///
/// Output is a PHC string (`$argon2id$v=19$m=...`) carrying its own salt and
/// cost parameters, so a hash stays verifiable after the configured cost
/// changes.
#[derive(Clone)]
pub struct PasswordHashing {
    argon2: Argon2<'static>,
}

impl PasswordHashing {
    pub fn new(config: &PasswordHashConfig) -> Result<Self, AuthError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| AuthError::Internal(format!("Invalid argon2 params: {}", e)))?;
        Ok(Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        })
    }

    /// Hash with a fresh random salt.
    pub fn hash(&self, plaintext: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        self.argon2
            .hash_password(plaintext.as_bytes(), &salt)
            .map(|h| h.to_string())
            .map_err(|e| AuthError::Internal(format!("Hashing failed: {}", e)))
    }

    /// `false` for a wrong password and for a malformed hash string.
    pub fn verify(&self, plaintext: &str, phc_hash: &str) -> bool {
        let Ok(parsed_hash) = PasswordHash::new(phc_hash) else {
            tracing::warn!("Stored password hash is not a valid PHC string");
            return false;
        };
        self.argon2
            .verify_password(plaintext.as_bytes(), &parsed_hash)
            .is_ok()
    }

    /// [`Self::hash`] on the blocking pool.
    pub async fn hash_blocking(&self, plaintext: String) -> Result<String, AuthError> {
        let hasher = self.clone();
        tokio::task::spawn_blocking(move || hasher.hash(&plaintext))
            .await
            .map_err(|e| AuthError::Internal(format!("Hashing task failed: {}", e)))?
    }

    /// [`Self::verify`] on the blocking pool.
    pub async fn verify_blocking(&self, plaintext: String, phc_hash: String) -> bool {
        let hasher = self.clone();
        match tokio::task::spawn_blocking(move || hasher.verify(&plaintext, &phc_hash)).await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::error!("Password verification task failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
pub(crate) fn fast_config() -> PasswordHashConfig {
    PasswordHashConfig {
        memory_kib: 1024,
        iterations: 1,
        parallelism: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHashing {
        PasswordHashing::new(&fast_config()).unwrap()
    }

    #[test]
    fn test_hash_then_verify() {
        let h = hasher();
        let hash = h.hash("pw123").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert!(h.verify("pw123", &hash));
        assert!(!h.verify("pw124", &hash));
    }

    #[test]
    fn test_salt_differs_per_call() {
        let h = hasher();
        let a = h.hash("same").unwrap();
        let b = h.hash("same").unwrap();
        assert_ne!(a, b);
        assert!(h.verify("same", &a));
        assert!(h.verify("same", &b));
    }

    #[test]
    fn test_malformed_hash_is_false() {
        let h = hasher();
        assert!(!h.verify("pw", ""));
        assert!(!h.verify("pw", "not-a-phc-string"));
        assert!(!h.verify("pw", "$argon2id$v=19$m=1024,t=1,p=1$bad"));
    }

    #[test]
    fn test_verify_with_different_params() {
        // hash produced under other cost params still verifies
        let strong = PasswordHashing::new(&PasswordHashConfig {
            memory_kib: 2048,
            iterations: 2,
            parallelism: 1,
        })
        .unwrap();
        let hash = strong.hash("pw").unwrap();
        assert!(hasher().verify("pw", &hash));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let cfg = PasswordHashConfig {
            memory_kib: 1,
            iterations: 0,
            parallelism: 0,
        };
        assert!(PasswordHashing::new(&cfg).is_err());
    }

    #[tokio::test]
    async fn test_blocking_wrappers() {
        let h = hasher();
        let hash = h.hash_blocking("pw".into()).await.unwrap();
        assert!(h.verify_blocking("pw".into(), hash.clone()).await);
        assert!(!h.verify_blocking("nope".into(), hash).await);
    }
}
