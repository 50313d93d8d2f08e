use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::CatalogError;

/// One entry of the static program manifest
#[derive(Debug, Clone, Deserialize)]
pub struct ManifestEntry {
    pub install_command: BTreeMap<String, String>,
    pub name: String,
}

/// Read a JSON manifest: an array of `{ "name": ..., "install_command": { os: cmd } }`.
pub fn load_manifest<P: AsRef<Path>>(path: P) -> Result<Vec<ManifestEntry>, CatalogError> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::ManifestRead {
        path: path.display().to_string(),
        source,
    })?;
    parse_manifest(&raw)
}

/// Parse manifest JSON, rejecting entries with a blank name.
pub fn parse_manifest(raw: &str) -> Result<Vec<ManifestEntry>, CatalogError> {
    let entries: Vec<ManifestEntry> = serde_json::from_str(raw)?;

    if let Some(pos) = entries.iter().position(|e| e.name.trim().is_empty()) {
        return Err(CatalogError::InvalidEntry(format!(
            "entry {pos} has an empty name"
        )));
    }

    Ok(entries)
}
