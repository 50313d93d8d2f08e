mod admin;
mod auth;
mod builder;

pub use admin::{health, root};
pub use auth::{auth_status, login, logout, me, register};
pub use builder::{generate_script, list_programs};

use crate::api::response::ApiError;
use crate::auth::AuthError;

/// Map an AuthError to an ApiError
pub(crate) fn auth_error(e: AuthError) -> ApiError {
    match e {
        AuthError::Conflict => ApiError::conflict(e.to_string()),
        AuthError::InvalidCredentials | AuthError::Unauthorized => {
            ApiError::unauthorized(e.to_string())
        }
        AuthError::InvalidInput(msg) => ApiError::bad_request(msg),
        AuthError::Database(_)
        | AuthError::ExpiryOutOfRange
        | AuthError::Hashing(_)
        | AuthError::Token(_) => {
            tracing::error!(error = %e, "Authentication backend failure");
            ApiError::internal("Internal server error")
        }
    }
}

/// Run CPU-heavy work (password hashing) off the async runtime
async fn blocking<F, T>(f: F) -> Result<T, ApiError>
where
    F: FnOnce() -> T + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await.map_err(|e| {
        tracing::error!(error = %e, "Blocking task panicked");
        ApiError::internal("Internal server error")
    })
}
