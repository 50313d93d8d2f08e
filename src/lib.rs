//! dotconfig - Backend for a shell install script builder
//!
//! Users pick programs from a catalog and a target operating system and get
//! back a generated install script. This crate provides:
//! - A program catalog seeded from a static JSON manifest
//! - Per-OS command resolution and minijinja template rendering
//! - Registration and login with Argon2 password hashes
//! - Stateless JWT access tokens carried in an HTTP-only cookie
//! - redb embedded database (ACID, crash-safe)
//! - REST API

pub mod api;
pub mod auth;
pub mod catalog;
pub mod config;
pub mod script;
pub mod storage;
#[cfg(test)]
pub mod testutil;

use auth::TokenSigner;
use config::Config;
use script::ScriptRenderer;
use storage::Database;

/// Shared application state
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub renderer: ScriptRenderer,
    pub signer: TokenSigner,
}

impl AppState {
    /// Wire up state from configuration and an opened database
    pub fn new(config: Config, db: Database, renderer: ScriptRenderer) -> Self {
        let signer = TokenSigner::new(
            config.auth.secret_key.as_bytes(),
            config.auth.algorithm,
            config.auth.token_ttl(),
        );
        Self {
            config,
            db,
            renderer,
            signer,
        }
    }
}
