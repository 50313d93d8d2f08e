use std::fmt;
use std::str::FromStr;

use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Longest accepted token lifetime: one year
pub const MAX_TOKEN_TTL_MINUTES: i64 = 60 * 24 * 365;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub auth: AuthConfig,
    pub catalog: CatalogConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Origins allowed to make credentialed cross-site requests
    pub allowed_origins: Vec<String>,
    pub bind_address: String,
    pub data_dir: String,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// JSON manifest the catalog is seeded from at startup
    pub manifest_path: String,
    /// Directory holding `install.sh.j2`; the built-in template is used when unset
    pub template_dir: Option<String>,
}

#[derive(Clone)]
pub struct AuthConfig {
    pub algorithm: Algorithm,
    pub secret_key: String,
    pub token_ttl_minutes: i64,
}

// Keeps the signing secret out of logs
impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("algorithm", &self.algorithm)
            .field("secret_key", &"<redacted>")
            .field("token_ttl_minutes", &self.token_ttl_minutes)
            .finish()
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["http://localhost:3000".to_string()],
            bind_address: "0.0.0.0:8000".to_string(),
            data_dir: "./data".to_string(),
        }
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            manifest_path: "./programs.json".to_string(),
            template_dir: None,
        }
    }
}

impl AuthConfig {
    /// Token lifetime, clamped to the range `validate` accepts
    pub fn token_ttl(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.token_ttl_minutes.clamp(1, MAX_TOKEN_TTL_MINUTES))
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let server_defaults = ServerConfig::default();
        let catalog_defaults = CatalogConfig::default();

        let bind_address =
            std::env::var("BIND_ADDRESS").unwrap_or(server_defaults.bind_address);
        let data_dir = std::env::var("DATA_DIR").unwrap_or(server_defaults.data_dir);

        let allowed_origins: Vec<String> = std::env::var("ALLOWED_ORIGINS")
            .map(|o| {
                o.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(server_defaults.allowed_origins);

        let manifest_path =
            std::env::var("MANIFEST_PATH").unwrap_or(catalog_defaults.manifest_path);
        let template_dir = std::env::var("TEMPLATE_DIR")
            .ok()
            .filter(|s| !s.trim().is_empty());

        let secret_key = std::env::var("SECRET_KEY").map_err(|_| ConfigError::Missing("SECRET_KEY"))?;

        let algorithm = match std::env::var("HASH_ALGORITHM") {
            Ok(raw) => parse_algorithm(&raw)?,
            Err(_) => Algorithm::HS256,
        };

        let token_ttl_minutes = match std::env::var("ACCESS_TOKEN_EXPIRE_MINUTES") {
            Ok(raw) => raw.trim().parse().map_err(|_| {
                ConfigError::ValidationError(format!(
                    "ACCESS_TOKEN_EXPIRE_MINUTES must be an integer, got '{raw}'"
                ))
            })?,
            Err(_) => 30,
        };

        let config = Config {
            auth: AuthConfig {
                algorithm,
                secret_key,
                token_ttl_minutes,
            },
            catalog: CatalogConfig {
                manifest_path,
                template_dir,
            },
            server: ServerConfig {
                allowed_origins,
                bind_address,
                data_dir,
            },
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.secret_key.is_empty() {
            return Err(ConfigError::ValidationError(
                "SECRET_KEY cannot be empty".to_string(),
            ));
        }
        if self.auth.token_ttl_minutes <= 0 {
            return Err(ConfigError::ValidationError(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be greater than 0".to_string(),
            ));
        }
        if self.auth.token_ttl_minutes > MAX_TOKEN_TTL_MINUTES {
            return Err(ConfigError::ValidationError(format!(
                "ACCESS_TOKEN_EXPIRE_MINUTES must be at most {MAX_TOKEN_TTL_MINUTES} (one year)"
            )));
        }
        if self.server.allowed_origins.iter().any(|o| o == "*") {
            return Err(ConfigError::ValidationError(
                "ALLOWED_ORIGINS cannot contain '*' because cookies are sent with credentials"
                    .to_string(),
            ));
        }
        if self.auth.secret_key.len() < 32 {
            tracing::warn!("SECRET_KEY is shorter than 32 bytes. Use a longer random secret.");
        }
        Ok(())
    }
}

/// Only HMAC algorithms are accepted: tokens are signed with a shared secret.
fn parse_algorithm(raw: &str) -> Result<Algorithm, ConfigError> {
    let algorithm = Algorithm::from_str(raw.trim().to_uppercase().as_str()).map_err(|_| {
        ConfigError::ValidationError(format!("Unknown HASH_ALGORITHM '{raw}'"))
    })?;

    match algorithm {
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => Ok(algorithm),
        other => Err(ConfigError::ValidationError(format!(
            "HASH_ALGORITHM must be an HMAC algorithm, got {other:?}"
        ))),
    }
}
