use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AuthError;

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Expiration, seconds since the Unix epoch
    pub exp: i64,
    /// Username the token was issued for
    pub sub: String,
}

/// A freshly signed access token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub expires_at: DateTime<Utc>,
    pub token: String,
}

/// Issues and verifies HMAC-signed, time-limited access tokens.
///
/// Tokens are stateless: nothing is stored server-side, so a token stays
/// valid until `exp` even after the client discards it.
pub struct TokenSigner {
    algorithm: Algorithm,
    decoding: DecodingKey,
    encoding: EncodingKey,
    ttl: Duration,
}

impl TokenSigner {
    pub fn new(secret: &[u8], algorithm: Algorithm, ttl: Duration) -> Self {
        Self {
            algorithm,
            decoding: DecodingKey::from_secret(secret),
            encoding: EncodingKey::from_secret(secret),
            ttl,
        }
    }

    /// Lifetime of issued tokens
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for `username` expiring one TTL from now
    pub fn issue(&self, username: &str) -> Result<IssuedToken, AuthError> {
        self.issue_at(username, Utc::now())
    }

    /// Issue a token as if it had been created at `issued_at`
    pub fn issue_at(
        &self,
        username: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<IssuedToken, AuthError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or(AuthError::ExpiryOutOfRange)?;
        self.sign(username, expires_at)
    }

    fn sign(&self, username: &str, expires_at: DateTime<Utc>) -> Result<IssuedToken, AuthError> {
        let claims = Claims {
            exp: expires_at.timestamp(),
            sub: username.to_string(),
        };

        let token = encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(AuthError::Token)?;

        Ok(IssuedToken { expires_at, token })
    }

    /// Verify signature and expiration, returning the claims.
    ///
    /// Every failure collapses to `Unauthorized`.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Rejected access token");
            AuthError::Unauthorized
        })?;

        if data.claims.sub.trim().is_empty() {
            return Err(AuthError::Unauthorized);
        }

        Ok(data.claims)
    }
}
