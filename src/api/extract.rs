//! Cookie-based authentication extractor and cookie builders.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use std::sync::Arc;

use crate::auth::{self, ACCESS_TOKEN_COOKIE};
use crate::storage::models::User;
use crate::AppState;

use super::handlers::auth_error;
use super::response::ApiError;

/// The user behind the request's `access_token` cookie.
///
/// Rejects with 401 for any token problem; use `Option<CurrentUser>` where
/// anonymous access is allowed.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let token = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value());

        auth::current_user(&state.db, &state.signer, token)
            .map(CurrentUser)
            .map_err(auth_error)
    }
}

/// Cookie carrying a freshly issued access token
pub fn access_token_cookie(token: String, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, token))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::seconds(max_age_seconds))
        .path("/")
        .build()
}

/// Cookie that makes the browser drop the access token
pub fn removal_cookie() -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN_COOKIE, ""))
        .http_only(true)
        .secure(true)
        .same_site(SameSite::None)
        .max_age(time::Duration::ZERO)
        .expires(time::OffsetDateTime::UNIX_EPOCH)
        .path("/")
        .build()
}
