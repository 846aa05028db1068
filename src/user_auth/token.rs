//! HS256 bearer tokens
//!
//! [`TokenIssuer`] and [`TokenVerifier`] are built from the same
//! [`AuthConfig`]; neither keeps any state beyond the key material, so a token
//! is valid exactly when its signature checks out and `exp` has not passed.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{
    Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode, errors::ErrorKind,
};
use thiserror::Error;

use super::models::Claims;
use crate::config::AuthConfig;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("invalid token: {0}")]
    Invalid(String),
    #[error("failed to sign token: {0}")]
    Signing(String),
}

/// A freshly signed token and the instant it stops being accepted.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Clone)]
pub struct TokenIssuer {
    key: EncodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            ttl: config.token_ttl(),
        }
    }

    pub fn issue(&self, subject: &str) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue as if the current time were `issued_at`.
    pub fn issue_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| TokenError::Signing("expiry out of range".to_string()))?;

        let claims = Claims {
            sub: subject.to_string(),
            exp: expires_at.timestamp().max(0) as usize,
            iat: issued_at.timestamp().max(0) as usize,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.key)
            .map_err(|e| TokenError::Signing(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }
}

#[derive(Clone)]
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);
        Self {
            key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Check signature, algorithm and expiry; return the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(secret: &str) -> AuthConfig {
        AuthConfig::new(secret)
    }

    #[test]
    fn test_issue_and_verify() {
        let cfg = config("secret-a");
        let issued = TokenIssuer::new(&cfg).issue("alice").unwrap();
        let claims = TokenVerifier::new(&cfg).verify(&issued.token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.exp as i64, issued.expires_at.timestamp());
        assert_eq!(claims.exp - claims.iat, 30 * 60);
    }

    #[test]
    fn test_expired_token_rejected() {
        let cfg = config("secret-a");
        let issued = TokenIssuer::new(&cfg)
            .issue_at("alice", Utc::now() - Duration::hours(2))
            .unwrap();
        let err = TokenVerifier::new(&cfg).verify(&issued.token).unwrap_err();
        assert!(matches!(err, TokenError::Expired));
    }

    #[test]
    fn test_valid_until_expiry() {
        let cfg = config("secret-a");
        // expires ~1 minute from now
        let issued = TokenIssuer::new(&cfg)
            .issue_at("alice", Utc::now() - Duration::minutes(29))
            .unwrap();
        assert!(TokenVerifier::new(&cfg).verify(&issued.token).is_ok());
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let issued = TokenIssuer::new(&config("secret-a")).issue("alice").unwrap();
        let err = TokenVerifier::new(&config("secret-b"))
            .verify(&issued.token)
            .unwrap_err();
        assert!(matches!(err, TokenError::Invalid(_)));
    }

    #[test]
    fn test_malformed_token_rejected() {
        let verifier = TokenVerifier::new(&config("secret-a"));
        assert!(matches!(
            verifier.verify("not.a.jwt"),
            Err(TokenError::Invalid(_))
        ));
        assert!(matches!(verifier.verify(""), Err(TokenError::Invalid(_))));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let cfg = config("secret-a");
        let issued = TokenIssuer::new(&cfg).issue("alice").unwrap();
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let forged = TokenIssuer::new(&config("other")).issue("mallory").unwrap();
        let forged_parts: Vec<&str> = forged.token.split('.').collect();
        parts[1] = forged_parts[1];
        let tampered = parts.join(".");
        assert!(TokenVerifier::new(&cfg).verify(&tampered).is_err());
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let cfg = config("secret-a");
        let claims = Claims {
            sub: "alice".into(),
            exp: (Utc::now() + Duration::minutes(5)).timestamp() as usize,
            iat: Utc::now().timestamp() as usize,
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(b"secret-a"),
        )
        .unwrap();
        assert!(TokenVerifier::new(&cfg).verify(&token).is_err());
    }
}
