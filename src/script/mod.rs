//! Install script generation: catalog lookup, per-OS command resolution
//! and template rendering. Scripts are returned as text and never run.

mod generator;
mod template;

pub use generator::{generate, resolve_install_map, GeneratedScript};
pub use template::{ScriptRenderer, INSTALL_TEMPLATE};

use thiserror::Error;

use crate::catalog::CatalogError;

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}
