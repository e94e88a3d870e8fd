//! File-per-key cache backend.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::{debug, warn};

use super::{hash_key, Cache, CacheEntry, CacheError};

const FILE_EXTENSION: &str = "bin";

/// Stores one JSON-serialized entry per key as `<hex-sha1>.bin` under a
/// directory. The directory must exist and be writable.
pub struct FileCache {
    dir: PathBuf,
    loaded: Mutex<HashMap<String, CacheEntry>>,
}

impl FileCache {
    pub fn new(dir: impl AsRef<Path>) -> Result<Self, CacheError> {
        let dir = dir.as_ref().to_path_buf();
        if !dir.is_dir() {
            return Err(CacheError::MissingDirectory(dir));
        }
        Ok(Self {
            dir,
            loaded: Mutex::new(HashMap::new()),
        })
    }

    fn entry_path(&self, hashed: &str) -> PathBuf {
        self.dir.join(format!("{hashed}.{FILE_EXTENSION}"))
    }
}

impl Cache for FileCache {
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
        match fs::write(self.entry_path(&hashed), serialized) {
            Ok(()) => {
                self.loaded.lock().unwrap().insert(hashed, value.clone());
                true
            }
            Err(e) => {
                warn!(error = %e, "Failed to write cache file");
                false
            }
        }
    }

    fn get(&self, key: &str) -> Option<CacheEntry> {
        let hashed = hash_key(key);

        if let Some(entry) = self.loaded.lock().unwrap().get(&hashed) {
            return Some(entry.clone());
        }

        let contents = fs::read(self.entry_path(&hashed)).ok()?;
        let entry: CacheEntry = match serde_json::from_slice(&contents) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cache file");
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

        let path = self.entry_path(&hashed);
        if path.is_file() {
            if let Err(e) = fs::remove_file(&path) {
                warn!(error = %e, "Failed to delete cache file");
            }
            return true;
        }
        false
    }

    fn flush(&self) -> bool {
        self.loaded.lock().unwrap().clear();
        debug!(dir = %self.dir.display(), "Flushing file cache");
        remove_files_under(&self.dir)
    }
}

/// Recursively delete regular files under `path`, skipping dot files and
/// leaving the directory tree in place.
fn remove_files_under(path: &Path) -> bool {
    let entries = match fs::read_dir(path) {
        Ok(entries) => entries,
        Err(_) => return false,
    };

    for entry in entries.flatten() {
        let name = entry.file_name();
        if name.to_string_lossy().starts_with('.') {
            continue;
        }
        let entry_path = entry.path();
        if entry_path.is_dir() {
            remove_files_under(&entry_path);
        } else if let Err(e) = fs::remove_file(&entry_path) {
            warn!(error = %e, "Failed to remove cache file during flush");
        }
    }
    true
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

    #[test]
    fn missing_directory_is_fatal() {
        let result = FileCache::new("/definitely/not/a/real/dir");
        assert!(matches!(result, Err(CacheError::MissingDirectory(_))));
    }

    #[test]
    fn set_then_get_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path()).unwrap();

        assert!(cache.set("https://example.tld/api/lists", &entry("v1")));
        assert_eq!(cache.get("https://example.tld/api/lists"), Some(entry("v1")));
    }

    #[test]
    fn get_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        {
            let cache = FileCache::new(temp_dir.path()).unwrap();
            cache.set("key", &entry("v1"));
        }
        let cache = FileCache::new(temp_dir.path()).unwrap();
        assert_eq!(cache.get("key"), Some(entry("v1")));
    }

    #[test]
    fn overwrite_is_visible_immediately() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path()).unwrap();

        cache.set("key", &entry("v1"));
        cache.set("key", &entry("v2"));
        assert_eq!(cache.get("key"), Some(entry("v2")));
    }

    #[test]
    fn delete_removes_entry() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path()).unwrap();

        cache.set("key", &entry("v1"));
        assert!(cache.delete("key"));
        assert_eq!(cache.get("key"), None);
        assert!(!cache.delete("key"));
    }

    #[test]
    fn flush_empties_all_keys() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path()).unwrap();

        cache.set("a", &entry("v1"));
        cache.set("b", &entry("v2"));
        assert!(cache.flush());
        assert_eq!(cache.get("a"), None);
        assert_eq!(cache.get("b"), None);
    }

    #[test]
    fn files_are_named_by_digest() {
        let temp_dir = TempDir::new().unwrap();
        let cache = FileCache::new(temp_dir.path()).unwrap();

        cache.set("key", &entry("v1"));
        let expected = temp_dir.path().join(format!("{}.bin", hash_key("key")));
        assert!(expected.is_file());
    }
}
