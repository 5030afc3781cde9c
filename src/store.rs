use parking_lot::RwLock;
use std::collections::HashMap;

/// Thread-safe key/value store seeded from the configuration defaults.
///
/// Remote values are merged in under a single write lock, so a reader
/// never observes a partially merged map. Keys are never removed once
/// set; the store only grows.
pub struct ValueStore {
    values: RwLock<HashMap<String, String>>,
}

impl ValueStore {
    /// Creates a store seeded with a copy of `defaults`.
    pub fn new(defaults: &HashMap<String, String>) -> Self {
        Self {
            values: RwLock::new(defaults.clone()),
        }
    }

    /// Returns the current value for `key`, if any. Pure read.
    pub fn get(&self, key: &str) -> Option<String> {
        self.values.read().get(key).cloned()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.read().contains_key(key)
    }

    /// Merges `remote` into the store. Remote wins per key; keys absent
    /// from `remote` keep their current value; unknown keys are inserted.
    pub fn merge(&self, remote: HashMap<String, String>) {
        if remote.is_empty() {
            return;
        }

        let mut values = self.values.write();
        for (key, value) in remote {
            values.insert(key, value);
        }
    }

    /// Returns a copy of the current key/value map.
    pub fn snapshot(&self) -> HashMap<String, String> {
        self.values.read().clone()
    }

    pub fn keys(&self) -> Vec<String> {
        self.values.read().keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.values.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> HashMap<String, String> {
        let mut map = HashMap::new();
        map.insert("buttonColor".to_string(), "blue".to_string());
        map.insert("title".to_string(), "hello".to_string());
        map
    }

    #[test]
    fn test_seeded_from_defaults() {
        let store = ValueStore::new(&defaults());

        assert_eq!(store.get("buttonColor"), Some("blue".to_string()));
        assert_eq!(store.get("title"), Some("hello".to_string()));
        assert_eq!(store.get("missing"), None);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_merge_remote_wins_per_key() {
        let store = ValueStore::new(&defaults());

        let mut remote = HashMap::new();
        remote.insert("buttonColor".to_string(), "red".to_string());
        store.merge(remote);

        assert_eq!(store.get("buttonColor"), Some("red".to_string()));
        // Key absent from the response keeps its default.
        assert_eq!(store.get("title"), Some("hello".to_string()));
    }

    #[test]
    fn test_merge_inserts_unknown_keys() {
        let store = ValueStore::new(&defaults());

        let mut remote = HashMap::new();
        remote.insert("newKey".to_string(), "value".to_string());
        store.merge(remote);

        assert_eq!(store.get("newKey"), Some("value".to_string()));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_merge_empty_is_noop() {
        let store = ValueStore::new(&defaults());
        let before = store.snapshot();

        store.merge(HashMap::new());

        assert_eq!(store.snapshot(), before);
    }

    #[test]
    fn test_store_never_shrinks() {
        let store = ValueStore::new(&defaults());

        let mut remote = HashMap::new();
        remote.insert("buttonColor".to_string(), "red".to_string());
        store.merge(remote);
        store.merge(HashMap::new());

        assert_eq!(store.len(), 2);
        assert!(store.contains("buttonColor"));
        assert!(store.contains("title"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let store = ValueStore::new(&defaults());
        let snapshot = store.snapshot();

        let mut remote = HashMap::new();
        remote.insert("buttonColor".to_string(), "red".to_string());
        store.merge(remote);

        assert_eq!(snapshot.get("buttonColor"), Some(&"blue".to_string()));
    }
}
