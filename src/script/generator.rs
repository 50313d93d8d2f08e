use std::collections::BTreeMap;

use crate::catalog;
use crate::storage::models::Program;
use crate::storage::Database;

use super::template::ScriptRenderer;
use super::ScriptError;

/// A rendered install script plus the selection it was built from
#[derive(Debug, Clone)]
pub struct GeneratedScript {
    /// Programs that made it into the script, sorted
    pub programs: Vec<String>,
    pub script: String,
    /// Selected names left out: unknown to the catalog or without a
    /// command for the requested OS
    pub skipped: Vec<String>,
}

/// Map each program to its single install command for `os`.
///
/// Programs with no command for `os`, or an empty one, are dropped.
pub fn resolve_install_map(programs: &[Program], os: &str) -> BTreeMap<String, Vec<String>> {
    programs
        .iter()
        .filter_map(|program| {
            program
                .command_for(os)
                .map(|cmd| (program.name.clone(), vec![cmd.to_string()]))
        })
        .collect()
}

/// Build an install script for `selected` on `os`.
///
/// Unknown names and programs unsupported on `os` are silently left out
/// of the script; they are reported in [`GeneratedScript::skipped`].
pub fn generate(
    db: &Database,
    renderer: &ScriptRenderer,
    selected: &[String],
    os: &str,
) -> Result<GeneratedScript, ScriptError> {
    let programs = catalog::lookup_many(db, selected)?;
    let installs = resolve_install_map(&programs, os);
    let resolved: Vec<String> = installs.keys().cloned().collect();

    let mut skipped: Vec<String> = selected
        .iter()
        .filter(|name| !installs.contains_key(name.as_str()))
        .cloned()
        .collect();
    skipped.sort_unstable();
    skipped.dedup();

    if !skipped.is_empty() {
        tracing::debug!(os = %os, skipped = ?skipped, "Programs left out of install script");
    }

    let script = renderer.render(&resolved, &installs, os)?;

    Ok(GeneratedScript {
        programs: resolved,
        script,
        skipped,
    })
}
