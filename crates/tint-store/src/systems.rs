//! The saved-systems collection.
//!
//! Every mutation lands in memory immediately. Writing the collection out
//! is the caller's job, normally through [`crate::PersistedSystems`],
//! which debounces bursts of edits into one write.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tint_tokens::TokenSystem;
use tracing::{debug, info};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::id::IdGenerator;
use crate::kv::KeyValueStore;

/// The only collection layout this crate reads or writes.
pub const STORE_VERSION: u32 = 1;

/// Source of `createdAt` / `updatedAt` stamps.
pub type Clock = Box<dyn Fn() -> DateTime<Utc> + Send + Sync>;

// ---------------------------------------------------------------------------
// Persisted shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedSystem {
    pub id: String,
    pub name: String,
    pub tokens: TokenSystem,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemsCollection {
    pub version: u32,
    pub current_system_id: Option<String>,
    pub systems: BTreeMap<String, SavedSystem>,
}

impl Default for SystemsCollection {
    fn default() -> Self {
        Self {
            version: STORE_VERSION,
            current_system_id: None,
            systems: BTreeMap::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// SystemsStore
// ---------------------------------------------------------------------------

pub struct SystemsStore {
    pub(crate) config: StoreConfig,
    pub(crate) collection: SystemsCollection,
    ids: IdGenerator,
    clock: Clock,
}

impl fmt::Debug for SystemsStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SystemsStore")
            .field("config", &self.config)
            .field("collection", &self.collection)
            .finish_non_exhaustive()
    }
}

impl SystemsStore {
    /// An empty store. Nothing is read until [`Self::load_from`].
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            collection: SystemsCollection::default(),
            ids: IdGenerator::from_time(),
            clock: Box::new(Utc::now),
        }
    }

    /// Reads (or migrates) the collection held by `backend`.
    pub fn load<B: KeyValueStore>(backend: &mut B, config: StoreConfig) -> Result<Self> {
        let mut store = Self::new(config);
        store.load_from(backend)?;
        Ok(store)
    }

    #[must_use]
    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    #[must_use]
    pub fn with_ids(mut self, ids: IdGenerator) -> Self {
        self.ids = ids;
        self
    }

    #[must_use]
    pub const fn config(&self) -> &StoreConfig {
        &self.config
    }

    #[must_use]
    pub const fn collection(&self) -> &SystemsCollection {
        &self.collection
    }

    /// Writes the whole collection under the storage key.
    pub fn save<B: KeyValueStore>(&self, backend: &mut B) -> Result<()> {
        let raw = serde_json::to_string(&self.collection)?;
        backend.set(&self.config.storage_key, &raw)?;
        debug!(systems = self.len(), "saved systems collection");
        Ok(())
    }

    // ─── Queries ────────────────────────────────────────────────

    #[must_use]
    pub fn len(&self) -> usize {
        self.collection.systems.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.collection.systems.is_empty()
    }

    /// Most recently updated first.
    #[must_use]
    pub fn list(&self) -> Vec<&SavedSystem> {
        let mut all: Vec<&SavedSystem> = self.collection.systems.values().collect();
        all.sort_by(|a, b| b.updated_at.cmp(&a.updated_at).then_with(|| a.id.cmp(&b.id)));
        all
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&SavedSystem> {
        self.collection.systems.get(id)
    }

    #[must_use]
    pub fn current_id(&self) -> Option<&str> {
        self.collection.current_system_id.as_deref()
    }

    #[must_use]
    pub fn current(&self) -> Option<&SavedSystem> {
        self.current_id().and_then(|id| self.get(id))
    }

    // ─── Mutations ──────────────────────────────────────────────

    /// Saves `tokens` as a new current system. `name` defaults to the
    /// token system's own name.
    pub fn save_as_new(&mut self, tokens: TokenSystem, name: Option<&str>) -> Result<&SavedSystem> {
        self.ensure_capacity()?;
        let name = pick_name(name, &tokens);
        let id = self.insert(name, tokens);
        info!(%id, "saved new system");
        self.saved(&id)
    }

    /// Overwrites the current system's tokens. Returns `false` when there
    /// is no current system.
    pub fn update_current(&mut self, tokens: TokenSystem) -> bool {
        let now = self.now();
        let Some(saved) = self
            .collection
            .current_system_id
            .as_ref()
            .and_then(|id| self.collection.systems.get_mut(id))
        else {
            return false;
        };
        saved.tokens = tokens;
        saved.updated_at = now;
        true
    }

    /// Makes `id` current and hands back its tokens for the editor to load.
    pub fn switch_to(&mut self, id: &str) -> Option<&TokenSystem> {
        let saved = self.collection.systems.get(id)?;
        self.collection.current_system_id = Some(id.to_string());
        Some(&saved.tokens)
    }

    pub fn rename(&mut self, id: &str, name: &str) -> Result<()> {
        let now = self.now();
        let saved = self
            .collection
            .systems
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        saved.name = name.trim().to_string();
        saved.updated_at = now;
        Ok(())
    }

    /// Removes a system. Deleting the current one promotes the most
    /// recently updated survivor, or leaves no current system.
    pub fn delete_system(&mut self, id: &str) -> Result<SavedSystem> {
        let removed = self
            .collection
            .systems
            .remove(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if self.current_id() == Some(id) {
            let next = self.list().first().map(|s| s.id.clone());
            debug!(deleted = id, next = ?next, "current system deleted");
            self.collection.current_system_id = next;
        }
        Ok(removed)
    }

    /// Copies a system as `"<name> (Copy)"` and makes the copy current.
    pub fn duplicate(&mut self, id: &str) -> Result<&SavedSystem> {
        let source = self
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        let (name, tokens) = (format!("{} (Copy)", source.name), source.tokens.clone());
        self.ensure_capacity()?;
        let id = self.insert(name, tokens);
        self.saved(&id)
    }

    /// The full saved record as pretty JSON, ids and timestamps included.
    #[must_use]
    pub fn export_system(&self, id: &str) -> Option<String> {
        let saved = self.get(id)?;
        serde_json::to_string_pretty(saved).ok()
    }

    /// Imports an exported record as a brand-new current system.
    ///
    /// Only `tokens` is required. The incoming id and timestamps are
    /// ignored so an import never collides with what is already stored.
    pub fn import_system(&mut self, json: &str) -> Result<&SavedSystem> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| StoreError::InvalidFormat(format!("not valid JSON: {e}")))?;
        let Some(raw_tokens) = value.get("tokens").filter(|t| t.is_object()) else {
            return Err(StoreError::InvalidFormat(
                "expected an object with a \"tokens\" field".to_string(),
            ));
        };
        let tokens = TokenSystem::deserialize(raw_tokens)
            .map_err(|e| StoreError::InvalidFormat(format!("tokens: {e}")))?;
        self.ensure_capacity()?;

        let name = pick_name(value.get("name").and_then(Value::as_str), &tokens);
        let id = self.insert(name, tokens);
        info!(%id, "imported system");
        self.saved(&id)
    }

    // ─── Internals ──────────────────────────────────────────────

    fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn ensure_capacity(&self) -> Result<()> {
        let max = self.config.max_systems;
        if self.len() >= max {
            return Err(StoreError::Capacity { max });
        }
        Ok(())
    }

    /// Inserts a fresh record and makes it current. No capacity check.
    pub(crate) fn insert(&mut self, name: String, tokens: TokenSystem) -> String {
        let now = self.now();
        let mut id = self.ids.next_id(now);
        while self.collection.systems.contains_key(&id) {
            id = self.ids.next_id(now);
        }
        self.collection.systems.insert(
            id.clone(),
            SavedSystem {
                id: id.clone(),
                name,
                tokens,
                created_at: now,
                updated_at: now,
            },
        );
        self.collection.current_system_id = Some(id.clone());
        id
    }

    fn saved(&self, id: &str) -> Result<&SavedSystem> {
        self.get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }
}

fn pick_name(name: Option<&str>, tokens: &TokenSystem) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .unwrap_or(&tokens.name)
        .to_string()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, Ordering};

    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use tint_tokens::{default_tokens, preset};

    use super::*;

    /// A store whose clock advances one second per reading.
    fn store_with(max_systems: usize) -> SystemsStore {
        let tick = Arc::new(AtomicI64::new(1_700_000_000));
        let config = StoreConfig {
            max_systems,
            ..StoreConfig::default()
        };
        SystemsStore::new(config)
            .with_ids(IdGenerator::new(3))
            .with_clock(move || {
                let secs = tick.fetch_add(1, Ordering::SeqCst);
                Utc.timestamp_opt(secs, 0).unwrap()
            })
    }

    fn store() -> SystemsStore {
        store_with(20)
    }

    // ── save_as_new ──

    #[test]
    fn save_as_new_becomes_current() {
        let mut s = store();
        let id = s.save_as_new(default_tokens(), Some("Mine")).unwrap().id.clone();
        assert_eq!(s.current_id(), Some(id.as_str()));
        let saved = s.current().unwrap();
        assert_eq!(saved.name, "Mine");
        assert_eq!(saved.created_at, saved.updated_at);
        assert!(id.starts_with("sys-"));
    }

    #[test]
    fn name_defaults_to_token_name() {
        let mut s = store();
        let saved = s.save_as_new(default_tokens(), Some("   ")).unwrap();
        assert_eq!(saved.name, default_tokens().name);
    }

    #[test]
    fn capacity_leaves_collection_unchanged() {
        let mut s = store_with(2);
        s.save_as_new(default_tokens(), None).unwrap();
        s.save_as_new(default_tokens(), None).unwrap();
        let before = s.collection().clone();
        let err = s.save_as_new(default_tokens(), None).unwrap_err();
        assert!(matches!(err, StoreError::Capacity { max: 2 }));
        assert!(err.to_string().contains("at most 2"));
        assert_eq!(s.collection(), &before);
    }

    // ── update / switch / rename ──

    #[test]
    fn update_current_without_current_is_noop() {
        let mut s = store();
        assert!(!s.update_current(default_tokens()));
        assert!(s.is_empty());
    }

    #[test]
    fn update_current_bumps_updated_at() {
        let mut s = store();
        s.save_as_new(default_tokens(), None).unwrap();
        let mut tokens = default_tokens();
        tokens.name = "Edited".into();
        assert!(s.update_current(tokens));
        let saved = s.current().unwrap();
        assert_eq!(saved.tokens.name, "Edited");
        assert!(saved.updated_at > saved.created_at);
    }

    #[test]
    fn switch_to_unknown_returns_none() {
        let mut s = store();
        let id = s.save_as_new(default_tokens(), None).unwrap().id.clone();
        assert!(s.switch_to("sys-nope").is_none());
        assert_eq!(s.current_id(), Some(id.as_str()));
    }

    #[test]
    fn switch_to_returns_tokens() {
        let mut s = store();
        let ocean = preset("ocean").unwrap().tokens;
        let first = s.save_as_new(ocean.clone(), None).unwrap().id.clone();
        s.save_as_new(default_tokens(), None).unwrap();
        assert_eq!(s.switch_to(&first), Some(&ocean));
        assert_eq!(s.current_id(), Some(first.as_str()));
    }

    #[test]
    fn rename_unknown_is_not_found() {
        let mut s = store();
        assert!(matches!(s.rename("x", "y"), Err(StoreError::NotFound(_))));
    }

    #[test]
    fn rename_trims_and_touches() {
        let mut s = store();
        let id = s.save_as_new(default_tokens(), None).unwrap().id.clone();
        s.rename(&id, "  Brand v2 ").unwrap();
        let saved = s.get(&id).unwrap();
        assert_eq!(saved.name, "Brand v2");
        assert!(saved.updated_at > saved.created_at);
    }

    // ── delete ──

    #[test]
    fn deleting_current_promotes_the_other() {
        let mut s = store();
        let a = s.save_as_new(default_tokens(), Some("a")).unwrap().id.clone();
        let b = s.save_as_new(default_tokens(), Some("b")).unwrap().id.clone();
        s.delete_system(&b).unwrap();
        assert_eq!(s.current_id(), Some(a.as_str()));
        s.delete_system(&a).unwrap();
        assert_eq!(s.current_id(), None);
        assert!(s.is_empty());
    }

    #[test]
    fn deleting_current_picks_most_recently_updated() {
        let mut s = store();
        let a = s.save_as_new(default_tokens(), Some("a")).unwrap().id.clone();
        let b = s.save_as_new(default_tokens(), Some("b")).unwrap().id.clone();
        let c = s.save_as_new(default_tokens(), Some("c")).unwrap().id.clone();
        s.rename(&a, "a, touched").unwrap();
        s.delete_system(&c).unwrap();
        assert_eq!(s.current_id(), Some(a.as_str()));
        assert!(s.get(&b).is_some());
    }

    #[test]
    fn deleting_other_keeps_current() {
        let mut s = store();
        let a = s.save_as_new(default_tokens(), Some("a")).unwrap().id.clone();
        let b = s.save_as_new(default_tokens(), Some("b")).unwrap().id.clone();
        s.delete_system(&a).unwrap();
        assert_eq!(s.current_id(), Some(b.as_str()));
        assert!(matches!(s.delete_system(&a), Err(StoreError::NotFound(_))));
    }

    // ── duplicate / list ──

    #[test]
    fn duplicate_copies_and_selects() {
        let mut s = store();
        let a = s.save_as_new(default_tokens(), Some("Brand")).unwrap().id.clone();
        let copy = s.duplicate(&a).unwrap();
        assert_eq!(copy.name, "Brand (Copy)");
        assert_ne!(copy.id, a);
        let copy_id = copy.id.clone();
        assert_eq!(s.current_id(), Some(copy_id.as_str()));
        assert_eq!(s.get(&copy_id).unwrap().tokens, s.get(&a).unwrap().tokens);
    }

    #[test]
    fn duplicate_respects_capacity() {
        let mut s = store_with(1);
        let a = s.save_as_new(default_tokens(), None).unwrap().id.clone();
        assert!(matches!(s.duplicate(&a), Err(StoreError::Capacity { .. })));
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn list_is_most_recent_first() {
        let mut s = store();
        let a = s.save_as_new(default_tokens(), Some("a")).unwrap().id.clone();
        s.save_as_new(default_tokens(), Some("b")).unwrap();
        s.rename(&a, "a2").unwrap();
        let names: Vec<&str> = s.list().iter().map(|x| x.name.as_str()).collect();
        assert_eq!(names, ["a2", "b"]);
    }

    // ── import / export ──

    #[test]
    fn export_unknown_is_none() {
        assert_eq!(store().export_system("sys-none"), None);
    }

    #[test]
    fn export_uses_camel_case() {
        let mut s = store();
        let id = s.save_as_new(default_tokens(), None).unwrap().id.clone();
        let json = s.export_system(&id).unwrap();
        assert!(json.contains("\"createdAt\""));
        assert!(json.contains("\"updatedAt\""));
        assert!(json.contains("\"mutedForeground\""));
    }

    #[test]
    fn import_assigns_new_identity() {
        let mut s = store();
        let id = s.save_as_new(default_tokens(), Some("Original")).unwrap().id.clone();
        let json = s.export_system(&id).unwrap();
        let original = s.get(&id).unwrap().clone();

        let imported = s.import_system(&json).unwrap().clone();
        assert_ne!(imported.id, original.id);
        assert_eq!(imported.name, original.name);
        assert_eq!(imported.tokens, original.tokens);
        assert!(imported.created_at > original.created_at);
        assert_eq!(s.current_id(), Some(imported.id.as_str()));
        assert_eq!(s.len(), 2);
    }

    #[test]
    fn import_rejects_missing_tokens() {
        let mut s = store();
        for bad in ["{}", "{\"tokens\": 3}", "[1, 2]", "not json", "{\"tokens\": {}}"] {
            let err = s.import_system(bad).unwrap_err();
            assert!(matches!(err, StoreError::InvalidFormat(_)), "{bad}: {err}");
            assert!(err.to_string().starts_with("invalid format"));
        }
        assert!(s.is_empty());
        assert_eq!(s.current_id(), None);
    }

    #[test]
    fn import_respects_capacity() {
        let mut s = store_with(1);
        let id = s.save_as_new(default_tokens(), None).unwrap().id.clone();
        let json = s.export_system(&id).unwrap();
        assert!(matches!(s.import_system(&json), Err(StoreError::Capacity { .. })));
    }

    #[test]
    fn import_accepts_bare_token_payload() {
        let mut s = store();
        let json = serde_json::json!({ "tokens": default_tokens() }).to_string();
        let saved = s.import_system(&json).unwrap();
        assert_eq!(saved.name, default_tokens().name);
    }
}
