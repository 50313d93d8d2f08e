use redb::ReadableTable;

use super::db::{Database, DatabaseError};
use super::models::User;
use super::tables::*;

impl Database {
    // ========================================================================
    // User operations
    // ========================================================================

    /// Store a new user. Fails with `Conflict` if the username is taken.
    pub fn insert_user(&self, user: &User) -> Result<(), DatabaseError> {
        debug_assert!(!user.username.is_empty(), "username must not be empty");
        debug_assert!(
            !user.password_hash.is_empty(),
            "password hash must not be empty"
        );

        let write_txn = self.begin_write()?;
        {
            let mut table = write_txn.open_table(USERS)?;
            if table.get(user.username.as_str())?.is_some() {
                return Err(DatabaseError::Conflict(format!(
                    "User '{}'",
                    user.username
                )));
            }
            let data = rmp_serde::to_vec_named(user)?;
            table.insert(user.username.as_str(), data.as_slice())?;
        }
        write_txn.commit()?;
        Ok(())
    }

    /// Get a user by username
    pub fn get_user(&self, username: &str) -> Result<Option<User>, DatabaseError> {
        let read_txn = self.begin_read()?;
        let table = read_txn.open_table(USERS)?;

        match table.get(username)? {
            Some(data) => {
                let user: User = rmp_serde::from_slice(data.value())?;
                Ok(Some(user))
            }
            None => Ok(None),
        }
    }
}
