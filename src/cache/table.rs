//! SQL table cache backend, SQLite or PostgreSQL.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::OptionalExtension;
use tracing::{debug, warn};

use super::{hash_key, Cache, CacheEntry, CacheError};

enum Connection {
    Sqlite(Mutex<rusqlite::Connection>),
    Postgres(Mutex<postgres::Client>),
}

/// Stores `(key CHAR(40), value)` rows in a configurable table.
///
/// The connection can be owned (opened from a path or connection string) or
/// adopted from the embedding application. Table creation is driver-specific
/// DDL, run once when `create_table` is set.
pub struct TableCache {
    conn: Connection,
    table: String,
    loaded: Mutex<HashMap<String, CacheEntry>>,
}

impl TableCache {
    /// Open (or create) a SQLite database file and use `table` in it.
    pub fn sqlite(
        path: impl AsRef<Path>,
        table: &str,
        create_table: bool,
    ) -> Result<Self, CacheError> {
        let path = path.as_ref();
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                return Err(CacheError::MissingDirectory(dir.to_path_buf()));
            }
        }
        let conn = rusqlite::Connection::open(path)?;
        Self::with_sqlite_connection(conn, table, create_table)
    }

    /// Reuse a SQLite connection owned by the embedding application.
    pub fn with_sqlite_connection(
        conn: rusqlite::Connection,
        table: &str,
        create_table: bool,
    ) -> Result<Self, CacheError> {
        let table = validate_table_name(table)?;
        if create_table {
            conn.execute_batch(&format!(
                "CREATE TABLE IF NOT EXISTS \"{table}\" (\
                 \"key\" CHAR(40) NOT NULL PRIMARY KEY, \
                 \"value\" BLOB NOT NULL)"
            ))?;
        }
        Ok(Self {
            conn: Connection::Sqlite(Mutex::new(conn)),
            table,
            loaded: Mutex::new(HashMap::new()),
        })
    }

    /// Connect to PostgreSQL and use `table` there.
    pub fn postgres(
        connection: &str,
        table: &str,
        create_table: bool,
    ) -> Result<Self, CacheError> {
        let client = postgres::Client::connect(connection, postgres::NoTls)?;
        Self::with_postgres_client(client, table, create_table)
    }

    /// Reuse a PostgreSQL client owned by the embedding application.
    pub fn with_postgres_client(
        mut client: postgres::Client,
        table: &str,
        create_table: bool,
    ) -> Result<Self, CacheError> {
        let table = validate_table_name(table)?;
        if create_table {
            client.batch_execute(&format!(
                "CREATE TABLE IF NOT EXISTS \"{table}\" (\
                 \"key\" CHAR(40) NOT NULL PRIMARY KEY, \
                 \"value\" BYTEA NOT NULL)"
            ))?;
        }
        Ok(Self {
            conn: Connection::Postgres(Mutex::new(client)),
            table,
            loaded: Mutex::new(HashMap::new()),
        })
    }

    fn read_row(&self, hashed: &str) -> Result<Option<Vec<u8>>, CacheError> {
        match &self.conn {
            Connection::Sqlite(conn) => {
                let conn = conn.lock().unwrap();
                let value = conn
                    .query_row(
                        &format!("SELECT \"value\" FROM \"{}\" WHERE \"key\" = ?1", self.table),
                        rusqlite::params![hashed],
                        |row| row.get::<_, Vec<u8>>(0),
                    )
                    .optional()?;
                Ok(value)
            }
            Connection::Postgres(client) => {
                let mut client = client.lock().unwrap();
                let row = client.query_opt(
                    &format!("SELECT \"value\" FROM \"{}\" WHERE \"key\" = $1", self.table),
                    &[&hashed],
                )?;
                Ok(row.map(|row| row.get(0)))
            }
        }
    }

    fn write_row(&self, hashed: &str, value: &[u8]) -> Result<(), CacheError> {
        match &self.conn {
            Connection::Sqlite(conn) => {
                let conn = conn.lock().unwrap();
                conn.execute(
                    &format!(
                        "INSERT INTO \"{0}\" (\"key\", \"value\") VALUES (?1, ?2) \
                         ON CONFLICT(\"key\") DO UPDATE SET \"value\" = excluded.\"value\"",
                        self.table
                    ),
                    rusqlite::params![hashed, value],
                )?;
            }
            Connection::Postgres(client) => {
                let mut client = client.lock().unwrap();
                client.execute(
                    &format!(
                        "INSERT INTO \"{0}\" (\"key\", \"value\") VALUES ($1, $2) \
                         ON CONFLICT (\"key\") DO UPDATE SET \"value\" = EXCLUDED.\"value\"",
                        self.table
                    ),
                    &[&hashed, &value],
                )?;
            }
        }
        Ok(())
    }

    fn delete_row(&self, hashed: &str) -> Result<u64, CacheError> {
        match &self.conn {
            Connection::Sqlite(conn) => {
                let conn = conn.lock().unwrap();
                let affected = conn.execute(
                    &format!("DELETE FROM \"{}\" WHERE \"key\" = ?1", self.table),
                    rusqlite::params![hashed],
                )?;
                Ok(affected as u64)
            }
            Connection::Postgres(client) => {
                let mut client = client.lock().unwrap();
                let affected = client.execute(
                    &format!("DELETE FROM \"{}\" WHERE \"key\" = $1", self.table),
                    &[&hashed],
                )?;
                Ok(affected)
            }
        }
    }

    fn delete_all(&self) -> Result<(), CacheError> {
        match &self.conn {
            Connection::Sqlite(conn) => {
                let conn = conn.lock().unwrap();
                conn.execute(&format!("DELETE FROM \"{}\"", self.table), [])?;
            }
            Connection::Postgres(client) => {
                let mut client = client.lock().unwrap();
                client.execute(&format!("DELETE FROM \"{}\"", self.table), &[])?;
            }
        }
        Ok(())
    }
}

impl Cache for TableCache {
    fn set(&self, key: &str, value: &CacheEntry) -> bool {
        if self.get(key).as_ref() == Some(value) {
            return true;
        }

        let serialized = match serde_json::to_vec(value) {
            Ok(bytes) => bytes,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cache entry");
                return false;
            }
        };

        let hashed = hash_key(key);
        match self.write_row(&hashed, &serialized) {
            Ok(()) => {
                self.loaded.lock().unwrap().insert(hashed, value.clone());
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to write cache row");
                false
            }
        }
    }

    fn get(&self, key: &str) -> Option<CacheEntry> {
        let hashed = hash_key(key);

        if let Some(entry) = self.loaded.lock().unwrap().get(&hashed) {
            return Some(entry.clone());
        }

        let raw = match self.read_row(&hashed) {
            Ok(raw) => raw?,
            Err(e) => {
                warn!(error = %e, "Failed to read cache row");
                return None;
            }
        };

        let entry: CacheEntry = match serde_json::from_slice(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cache row");
                return None;
            }
        };

        self.loaded
            .lock()
            .unwrap()
            .insert(hashed, entry.clone());
        Some(entry)
    }

    fn delete(&self, key: &str) -> bool {
        let hashed = hash_key(key);
        self.loaded.lock().unwrap().remove(&hashed);

        match self.delete_row(&hashed) {
            Ok(_) => true,
            Err(e) => {
                warn!(error = %e, "Failed to delete cache row");
                false
            }
        }
    }

    fn flush(&self) -> bool {
        self.loaded.lock().unwrap().clear();
        debug!(table = %self.table, "Flushing table cache");

        match self.delete_all() {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Failed to flush cache table");
                false
            }
        }
    }
}

/// Table names are interpolated into SQL, so restrict them to identifier
/// characters up front.
fn validate_table_name(table: &str) -> Result<String, CacheError> {
    if table.is_empty()
        || !table
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
    {
        return Err(CacheError::InvalidTableName(table.to_string()));
    }
    Ok(table.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn entry(marker: &str) -> CacheEntry {
        CacheEntry {
            headers: vec![format!("ETag: \"{marker}\"")],
            body: json!({"status": "success", "marker": marker}),
        }
    }

    fn memory_cache() -> TableCache {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        TableCache::with_sqlite_connection(conn, "ems_cache", true).unwrap()
    }

    #[test]
    fn set_then_get_round_trips() {
        let cache = memory_cache();
        assert!(cache.set("key", &entry("v1")));
        assert_eq!(cache.get("key"), Some(entry("v1")));
    }

    #[test]
    fn overwrite_is_visible_immediately() {
        let cache = memory_cache();
        cache.set("key", &entry("v1"));
        cache.set("key", &entry("v2"));
        assert_eq!(cache.get("key"), Some(entry("v2")));
    }

    #[test]
    fn delete_then_get_is_absent() {
        let cache = memory_cache();
        cache.set("key", &entry("v1"));
        assert!(cache.delete("key"));
        assert_eq!(cache.get("key"), None);
    }

    #[test]
    fn flush_empties_all_keys() {
        let cache = memory_cache();
        cache.set("a", &entry("v1"));
        cache.set("b", &entry("v2"));
        assert!(cache.flush());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn persists_in_database_file() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("cache.sqlite");

        {
            let cache = TableCache::sqlite(&db_path, "ems_cache", true).unwrap();
            cache.set("key", &entry("v1"));
        }
        let cache = TableCache::sqlite(&db_path, "ems_cache", false).unwrap();
        assert_eq!(cache.get("key"), Some(entry("v1")));
    }

    #[test]
    fn missing_parent_directory_is_fatal() {
        let result = TableCache::sqlite("/definitely/not/here/cache.sqlite", "ems_cache", true);
        assert!(matches!(result, Err(CacheError::MissingDirectory(_))));
    }

    #[test]
    fn hostile_table_name_is_rejected() {
        let conn = rusqlite::Connection::open_in_memory().unwrap();
        let result = TableCache::with_sqlite_connection(conn, "x\"; DROP TABLE y; --", true);
        assert!(matches!(result, Err(CacheError::InvalidTableName(_))));
    }
}
