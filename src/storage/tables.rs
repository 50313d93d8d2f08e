use redb::TableDefinition;

/// Program catalog: name -> Program (msgpack)
pub const PROGRAMS: TableDefinition<&str, &[u8]> = TableDefinition::new("programs");

/// Credential store: username -> User (msgpack)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");
