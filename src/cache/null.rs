//! No-op cache backend.

use super::{Cache, CacheEntry};

/// Accepts every write and remembers nothing. Used when caching is
/// disabled so the pipeline can treat "no cache" and "cache" uniformly.
pub struct NullCache;

impl Cache for NullCache {
    fn set(&self, _key: &str, _value: &CacheEntry) -> bool {
        true
    }

    fn get(&self, _key: &str) -> Option<CacheEntry> {
        None
    }

    fn delete(&self, _key: &str) -> bool {
        true
    }

    fn flush(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remembers_nothing() {
        let cache = NullCache;
        let entry = CacheEntry {
            headers: vec![],
            body: json!({}),
        };

        assert!(cache.set("key", &entry));
        assert_eq!(cache.get("key"), None);
        assert!(cache.delete("key"));
        assert!(cache.flush());
    }
}
