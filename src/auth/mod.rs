//! Authentication gate: registration, credential checks and access tokens.
//!
//! Failures visible to clients are deliberately coarse: an unknown username
//! and a wrong password both yield `InvalidCredentials`, and every token
//! problem yields `Unauthorized`.

pub mod password;
pub mod token;

pub use password::{hash_password, verify_password};
pub use token::{Claims, IssuedToken, TokenSigner};

use thiserror::Error;

use crate::storage::models::User;
use crate::storage::{Database, DatabaseError};

/// Name of the cookie carrying the access token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username already registered")]
    Conflict,
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Token expiry out of range")]
    ExpiryOutOfRange,
    #[error("Password hashing failed: {0}")]
    Hashing(String),
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("{0}")]
    InvalidInput(String),
    #[error("Token signing failed: {0}")]
    Token(jsonwebtoken::errors::Error),
    #[error("Not authenticated")]
    Unauthorized,
}

/// Register a new user with the default role
pub fn register(db: &Database, username: &str, password: &str) -> Result<User, AuthError> {
    if username.trim().is_empty() {
        return Err(AuthError::InvalidInput("username is required".to_string()));
    }
    if password.is_empty() {
        return Err(AuthError::InvalidInput("password is required".to_string()));
    }

    let user = User::new(username, hash_password(password)?);
    db.insert_user(&user).map_err(|e| match e {
        DatabaseError::Conflict(_) => AuthError::Conflict,
        other => AuthError::Database(other),
    })?;

    tracing::info!(username = %user.username, "Registered user");
    Ok(user)
}

/// Check a username/password pair
pub fn authenticate(db: &Database, username: &str, password: &str) -> Result<User, AuthError> {
    match db.get_user(username)? {
        Some(user) if verify_password(password, &user.password_hash) => Ok(user),
        Some(_) => Err(AuthError::InvalidCredentials),
        None => {
            password::verify_dummy(password);
            Err(AuthError::InvalidCredentials)
        }
    }
}

/// Resolve the user behind an access token.
///
/// Absent, malformed, expired or orphaned tokens all yield `Unauthorized`.
pub fn current_user(
    db: &Database,
    signer: &TokenSigner,
    token: Option<&str>,
) -> Result<User, AuthError> {
    let token = token
        .filter(|t| !t.is_empty())
        .ok_or(AuthError::Unauthorized)?;
    let claims = signer.verify(token)?;

    db.get_user(&claims.sub)?.ok_or_else(|| {
        tracing::debug!(sub = %claims.sub, "Token subject does not exist");
        AuthError::Unauthorized
    })
}
