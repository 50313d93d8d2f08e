use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::Program;
use super::tables::*;

impl Database {
    // ========================================================================
    // Program catalog operations
    // ========================================================================

    /// Insert every program whose name is not yet present, in one write
    /// transaction. Existing rows are never touched. Returns how many rows
    /// were inserted.
    pub fn insert_programs_if_absent(&self, programs: &[Program]) -> Result<usize, DatabaseError> {
        let write_txn = self.begin_write()?;
        let mut inserted = 0;
        {
            let mut table = write_txn.open_table(PROGRAMS)?;
            for program in programs {
                debug_assert!(!program.name.is_empty(), "program name must not be empty");

                if table.get(program.name.as_str())?.is_some() {
                    continue;
                }
                let data = rmp_serde::to_vec_named(program)?;
                table.insert(program.name.as_str(), data.as_slice())?;
                inserted += 1;
            }
        }
        write_txn.commit()?;
        Ok(inserted)
    }

    /// Get a program by name
    #[cfg(test)]
    pub fn get_program(&self, name: &str) -> Result<Option<Program>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PROGRAMS)?;

        match table.get(name)? {
            Some(data) => {
                let program: Program = rmp_serde::from_slice(data.value())?;
                Ok(Some(program))
            }
            None => Ok(None),
        }
    }

    /// Get all programs whose name is in `names`. Unknown names are skipped.
    /// Results are ordered by name; duplicates in `names` are collapsed.
    pub fn get_programs_by_names<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<Vec<Program>, DatabaseError> {
        let mut wanted: Vec<&str> = names.iter().map(AsRef::as_ref).collect();
        wanted.sort_unstable();
        wanted.dedup();

        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PROGRAMS)?;

        let mut programs = Vec::with_capacity(wanted.len());
        for name in wanted {
            if let Some(data) = table.get(name)? {
                let program: Program = rmp_serde::from_slice(data.value())?;
                programs.push(program);
            }
        }

        Ok(programs)
    }

    /// List all program names in key order
    pub fn list_program_names(&self) -> Result<Vec<String>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(PROGRAMS)?;

        let mut names = Vec::new();
        for result in table.iter()? {
            let (key, _) = result?;
            names.push(key.value().to_string());
        }

        Ok(names)
    }
}
