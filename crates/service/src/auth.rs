//! Static login gate in front of the record store.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use serde::Serialize;
use tracing::{info, warn};

use configs::AuthConfig;

use crate::errors::ServiceError;

/// Successful login.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct AuthSession {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

/// Checks one configured username/password pair; the password is kept only
/// as an argon2 hash.
#[derive(Clone)]
pub struct LoginGate {
    username: String,
    password_hash: String,
}

impl std::fmt::Debug for LoginGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginGate").field("username", &self.username).finish_non_exhaustive()
    }
}

impl LoginGate {
    /// Hash `password` for `username`.
    pub fn new(username: impl Into<String>, password: &str) -> Result<Self, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| ServiceError::Validation(format!("cannot hash password: {}", e)))?
            .to_string();
        Ok(Self { username: username.into(), password_hash })
    }

    /// Use an existing argon2 PHC hash string.
    pub fn with_hash(username: impl Into<String>, password_hash: impl Into<String>) -> Result<Self, ServiceError> {
        let password_hash = password_hash.into();
        PasswordHash::new(&password_hash)
            .map_err(|e| ServiceError::Validation(format!("invalid password hash: {}", e)))?;
        Ok(Self { username: username.into(), password_hash })
    }

    /// A configured hash wins over a plain-text password.
    pub fn from_config(cfg: &AuthConfig) -> Result<Self, ServiceError> {
        match (cfg.password_hash.as_deref(), cfg.password.as_deref()) {
            (Some(hash), _) if !hash.trim().is_empty() => Self::with_hash(cfg.username.clone(), hash.trim()),
            (_, Some(password)) if !password.is_empty() => Self::new(cfg.username.clone(), password),
            _ => Err(ServiceError::Validation("no password configured".into())),
        }
    }

    pub fn username(&self) -> &str { &self.username }

    pub fn login(&self, username: &str, password: &str) -> Result<AuthSession, ServiceError> {
        let parsed = PasswordHash::new(&self.password_hash)
            .map_err(|e| ServiceError::Validation(format!("invalid password hash: {}", e)))?;
        let password_ok = Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok();
        if username != self.username || !password_ok {
            warn!(%username, event = "login_failed", "invalid credentials");
            return Err(ServiceError::Unauthorized);
        }
        info!(%username, event = "login", "user logged in");
        Ok(AuthSession { username: username.to_string(), logged_in_at: Utc::now() })
    }
}
