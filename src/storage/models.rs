use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to newly registered users
pub const DEFAULT_ROLE: &str = "user";

/// An installable program in the catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Opaque identifier (UUID v4)
    pub id: String,
    /// OS name -> install command, matched literally against the requested OS
    pub install_command: BTreeMap<String, String>,
    /// Unique program name
    pub name: String,
}

impl Program {
    pub fn new(name: impl Into<String>, install_command: BTreeMap<String, String>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            install_command,
            name: name.into(),
        }
    }

    /// The install command for `os`, if one exists and is not the empty string.
    pub fn command_for(&self, os: &str) -> Option<&str> {
        self.install_command
            .get(os)
            .map(String::as_str)
            .filter(|cmd| !cmd.is_empty())
    }
}

/// A registered user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub created_at: DateTime<Utc>,
    /// Opaque identifier (UUID v4)
    pub id: String,
    /// Argon2 PHC string, never the plaintext
    pub password_hash: String,
    pub role: String,
    pub username: String,
}

impl User {
    pub fn new(username: impl Into<String>, password_hash: String) -> Self {
        Self {
            created_at: Utc::now(),
            id: uuid::Uuid::new_v4().to_string(),
            password_hash,
            role: DEFAULT_ROLE.to_string(),
            username: username.into(),
        }
    }
}
