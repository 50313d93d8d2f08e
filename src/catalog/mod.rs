//! Program catalog: seeding from the static manifest and name lookups.

mod manifest;

pub use manifest::{load_manifest, parse_manifest, ManifestEntry};

use thiserror::Error;

use crate::storage::models::Program;
use crate::storage::{Database, DatabaseError};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
    #[error("Invalid manifest entry: {0}")]
    InvalidEntry(String),
    #[error("Invalid manifest: {0}")]
    Manifest(#[from] serde_json::Error),
    #[error("Failed to read manifest {path}: {source}")]
    ManifestRead {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of a seed run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedStats {
    pub inserted: usize,
    pub skipped: usize,
}

/// Insert every manifest entry whose name is not already in the catalog.
/// Additive only: existing programs keep their stored commands.
pub fn seed(db: &Database, manifest: &[ManifestEntry]) -> Result<SeedStats, CatalogError> {
    let programs: Vec<Program> = manifest
        .iter()
        .map(|entry| Program::new(entry.name.clone(), entry.install_command.clone()))
        .collect();

    let inserted = db.insert_programs_if_absent(&programs)?;
    let stats = SeedStats {
        inserted,
        skipped: programs.len() - inserted,
    };

    tracing::info!(
        inserted = stats.inserted,
        skipped = stats.skipped,
        "Seeded program catalog"
    );
    Ok(stats)
}

/// All programs matching `names`; unknown names are silently omitted.
pub fn lookup_many<S: AsRef<str>>(db: &Database, names: &[S]) -> Result<Vec<Program>, CatalogError> {
    Ok(db.get_programs_by_names(names)?)
}

/// Every program name in the catalog, sorted.
pub fn list_names(db: &Database) -> Result<Vec<String>, CatalogError> {
    Ok(db.list_program_names()?)
}
