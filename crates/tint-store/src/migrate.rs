//! Loading the collection, including the one-time upgrade from the
//! single-system legacy key.
//!
//! Loads are passive: a corrupt or unrecognised payload is logged and the
//! store starts empty instead of failing. Only backend I/O errors reach
//! the caller.

use serde::Deserialize;
use tint_tokens::TokenSystem;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::systems::{STORE_VERSION, SystemsCollection, SystemsStore};

/// What the pre-collection app stored under the legacy key.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegacyPayload {
    pub tokens: TokenSystem,
    #[serde(default)]
    pub preset_id: Option<String>,
    #[serde(default)]
    pub saved_at: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// A current-format collection was read.
    Existing,
    /// The legacy payload was wrapped into a new collection.
    Migrated,
    /// Nothing usable was stored.
    Empty,
}

impl SystemsStore {
    /// Replaces the in-memory collection with whatever `backend` holds.
    ///
    /// When only the legacy key exists its payload becomes the single,
    /// current system; the new collection is written before the legacy
    /// key is removed, so an interrupted migration is simply redone.
    pub fn load_from<B: KeyValueStore>(&mut self, backend: &mut B) -> Result<LoadOutcome> {
        if let Some(raw) = backend.get(&self.config.storage_key)? {
            return Ok(match parse_collection(&raw) {
                Some(collection) => {
                    debug!(systems = collection.systems.len(), "loaded systems collection");
                    self.collection = collection;
                    LoadOutcome::Existing
                }
                None => {
                    self.collection = SystemsCollection::default();
                    LoadOutcome::Empty
                }
            });
        }

        self.collection = SystemsCollection::default();
        let Some(raw) = backend.get(&self.config.legacy_key)? else {
            return Ok(LoadOutcome::Empty);
        };
        let legacy = match serde_json::from_str::<LegacyPayload>(&raw) {
            Ok(legacy) => legacy,
            Err(e) => {
                warn!(error = %e, key = %self.config.legacy_key, "legacy payload is unreadable; leaving it in place");
                return Ok(LoadOutcome::Empty);
            }
        };

        let name = legacy.tokens.name.clone();
        let id = self.insert(name, legacy.tokens);
        self.save(backend)?;
        backend.remove(&self.config.legacy_key)?;
        info!(
            %id,
            preset = legacy.preset_id.as_deref().unwrap_or("none"),
            saved_at = legacy.saved_at.as_deref().unwrap_or("unknown"),
            "migrated legacy system"
        );
        Ok(LoadOutcome::Migrated)
    }
}

fn parse_collection(raw: &str) -> Option<SystemsCollection> {
    let mut collection: SystemsCollection = match serde_json::from_str(raw) {
        Ok(c) => c,
        Err(e) => {
            warn!(error = %e, "systems collection is unreadable; starting empty");
            return None;
        }
    };
    if collection.version != STORE_VERSION {
        warn!(version = collection.version, "unknown systems collection version; starting empty");
        return None;
    }
    if let Some(id) = &collection.current_system_id {
        if !collection.systems.contains_key(id) {
            debug!(%id, "current system is missing; clearing");
            collection.current_system_id = None;
        }
    }
    Some(collection)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use tint_tokens::{default_tokens, preset};

    use super::*;
    use crate::config::{LEGACY_KEY, STORAGE_KEY, StoreConfig};
    use crate::kv::MemoryStore;

    fn legacy_backend() -> MemoryStore {
        let mut backend = MemoryStore::new();
        let payload = json!({
            "tokens": preset("editorial").unwrap().tokens,
            "presetId": "editorial",
            "savedAt": "2024-03-01T12:00:00.000Z",
        });
        backend.set(LEGACY_KEY, &payload.to_string()).unwrap();
        backend
    }

    #[test]
    fn empty_backend_loads_empty() {
        let mut backend = MemoryStore::new();
        let mut store = SystemsStore::new(StoreConfig::default());
        assert_eq!(store.load_from(&mut backend).unwrap(), LoadOutcome::Empty);
        assert!(store.is_empty());
        assert_eq!(backend.writes(), 0);
    }

    #[test]
    fn legacy_payload_is_migrated_once() {
        let mut backend = legacy_backend();
        let mut store = SystemsStore::new(StoreConfig::default());
        assert_eq!(store.load_from(&mut backend).unwrap(), LoadOutcome::Migrated);

        assert_eq!(store.len(), 1);
        let current = store.current().unwrap();
        assert_eq!(current.tokens, preset("editorial").unwrap().tokens);
        assert_eq!(current.name, "Editorial");
        assert!(!backend.contains(LEGACY_KEY));
        assert!(backend.contains(STORAGE_KEY));

        let mut again = SystemsStore::new(StoreConfig::default());
        assert_eq!(again.load_from(&mut backend).unwrap(), LoadOutcome::Existing);
        assert_eq!(again.collection(), store.collection());
    }

    #[test]
    fn corrupt_legacy_payload_is_kept() {
        let mut backend = MemoryStore::new();
        backend.set(LEGACY_KEY, "{\"tokens\": 42}").unwrap();
        let mut store = SystemsStore::new(StoreConfig::default());
        assert_eq!(store.load_from(&mut backend).unwrap(), LoadOutcome::Empty);
        assert!(backend.contains(LEGACY_KEY));
        assert!(!backend.contains(STORAGE_KEY));
    }

    #[test]
    fn existing_collection_wins_over_legacy() {
        let mut backend = legacy_backend();
        let mut first = SystemsStore::new(StoreConfig::default());
        first.save_as_new(default_tokens(), Some("kept")).unwrap();
        first.save(&mut backend).unwrap();

        let mut store = SystemsStore::new(StoreConfig::default());
        assert_eq!(store.load_from(&mut backend).unwrap(), LoadOutcome::Existing);
        assert_eq!(store.current().unwrap().name, "kept");
        assert!(backend.contains(LEGACY_KEY));
    }

    #[test]
    fn corrupt_collection_starts_empty() {
        for raw in ["{", "{\"version\": 2, \"currentSystemId\": null, \"systems\": {}}"] {
            let mut backend = MemoryStore::new();
            backend.set(STORAGE_KEY, raw).unwrap();
            let mut store = SystemsStore::new(StoreConfig::default());
            assert_eq!(store.load_from(&mut backend).unwrap(), LoadOutcome::Empty, "{raw}");
            assert!(store.is_empty());
        }
    }

    #[test]
    fn dangling_current_id_is_cleared() {
        let raw = json!({ "version": 1, "currentSystemId": "sys-gone", "systems": {} });
        let mut backend = MemoryStore::new();
        backend.set(STORAGE_KEY, &raw.to_string()).unwrap();
        let store = SystemsStore::load(&mut backend, StoreConfig::default()).unwrap();
        assert_eq!(store.current_id(), None);
    }
}
