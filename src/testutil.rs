//! Shared test helpers available to all `#[cfg(test)]` modules in the crate.

use std::collections::BTreeMap;
use std::sync::Arc;

use jsonwebtoken::Algorithm;
use tempfile::TempDir;

use crate::config::{AuthConfig, CatalogConfig, Config, ServerConfig};
use crate::script::ScriptRenderer;
use crate::storage::models::Program;
use crate::storage::Database;
use crate::AppState;

/// Open a fresh database in a temporary directory.
///
/// Returns both the `Database` and the `TempDir` guard; the caller must
/// keep the `TempDir` alive for the duration of the test.
pub fn setup_db() -> (Database, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let db = Database::open(temp_dir.path()).unwrap();
    (db, temp_dir)
}

/// A minimal `Config` suitable for unit tests.
pub fn test_config() -> Config {
    Config {
        auth: AuthConfig {
            algorithm: Algorithm::HS256,
            secret_key: "test-secret-key-that-is-long-enough!".to_string(),
            token_ttl_minutes: 30,
        },
        catalog: CatalogConfig::default(),
        server: ServerConfig::default(),
    }
}

/// Build a full `Arc<AppState>` around the given config and database,
/// using the built-in install template.
pub fn test_state(config: Config, db: Database) -> Arc<AppState> {
    let renderer = ScriptRenderer::builtin().unwrap();
    Arc::new(AppState::new(config, db, renderer))
}

/// Create a `Program` with the given `(os, command)` pairs.
pub fn make_program(name: &str, commands: &[(&str, &str)]) -> Program {
    let install_command: BTreeMap<String, String> = commands
        .iter()
        .map(|(os, cmd)| (os.to_string(), cmd.to_string()))
        .collect();
    Program::new(name, install_command)
}
