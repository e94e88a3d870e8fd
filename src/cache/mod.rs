//! Response cache keyed by canonical request URL.
//!
//! Backends share one contract: keys are SHA-1-hashed before storage,
//! writes are skipped when the stored value is unchanged, and reads are
//! memoized per process. Transient storage failures surface as `false` /
//! `None`; only setup problems are fatal.

mod file;
mod null;
mod table;

pub use file::FileCache;
pub use null::NullCache;
pub use table::TableCache;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sha1::{Digest, Sha1};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache directory does not exist: {0}")]
    MissingDirectory(PathBuf),

    #[error("invalid cache table name: {0}")]
    InvalidTableName(String),

    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("postgres error: {0}")]
    Postgres(#[from] postgres::Error),
}

/// One cached response: raw header lines plus the decoded body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub headers: Vec<String>,
    pub body: Value,
}

impl CacheEntry {
    /// Extract the ETag value from the stored header lines, if any.
    pub fn etag(&self) -> Option<String> {
        self.headers.iter().find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.trim()
                .eq_ignore_ascii_case("etag")
                .then(|| value.trim().to_string())
        })
    }
}

/// Key/value store for cached responses.
///
/// All operations take `&self`; backends use interior mutability for the
/// read memo and their connections. Concurrent writers race with
/// last-writer-wins semantics, no locking is provided.
pub trait Cache: Send {
    /// Store an entry. Returns `false` only on a storage failure; an
    /// unchanged value is reported as a successful no-op.
    fn set(&self, key: &str, value: &CacheEntry) -> bool;

    /// Fetch an entry, or `None` when absent or unreadable.
    fn get(&self, key: &str) -> Option<CacheEntry>;

    /// Remove an entry.
    fn delete(&self, key: &str) -> bool;

    /// Remove every entry.
    fn flush(&self) -> bool;
}

/// Hex SHA-1 digest used as the storage key.
pub(crate) fn hash_key(key: &str) -> String {
    hex::encode(Sha1::digest(key.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hash_key_is_hex_sha1() {
        // sha1("") is well known
        assert_eq!(hash_key(""), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(hash_key("a").len(), 40);
    }

    #[test]
    fn etag_lookup_is_case_insensitive() {
        let entry = CacheEntry {
            headers: vec![
                "Content-Type: application/json".to_string(),
                "ETAG: \"abc123\"".to_string(),
            ],
            body: json!({}),
        };
        assert_eq!(entry.etag(), Some("\"abc123\"".to_string()));
    }

    #[test]
    fn etag_absent_when_no_header_matches() {
        let entry = CacheEntry {
            headers: vec!["Content-Type: application/json".to_string()],
            body: json!({}),
        };
        assert_eq!(entry.etag(), None);
    }
}
