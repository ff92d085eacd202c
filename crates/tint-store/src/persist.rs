//! Debounced write-back of the systems collection.
//!
//! Edits apply to memory right away; [`PersistedSystems::tick`] writes the
//! collection once no further edit has arrived for the debounce delay.
//! Time is passed in explicitly so the caller owns the event loop.

use std::time::{Duration, Instant};

use tracing::debug;

use crate::config::StoreConfig;
use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::systems::SystemsStore;

// ---------------------------------------------------------------------------
// Debouncer
// ---------------------------------------------------------------------------

/// A trailing-edge timer: every `touch` pushes the deadline back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Debouncer {
    #[must_use]
    pub const fn new(delay: Duration) -> Self {
        Self {
            delay,
            deadline: None,
        }
    }

    pub fn touch(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    #[must_use]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    #[must_use]
    pub fn ready(&self, now: Instant) -> bool {
        self.deadline.is_some_and(|d| now >= d)
    }

    pub const fn cancel(&mut self) {
        self.deadline = None;
    }
}

// ---------------------------------------------------------------------------
// PersistedSystems
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct PersistedSystems<B> {
    store: SystemsStore,
    backend: B,
    debounce: Debouncer,
}

impl<B: KeyValueStore> PersistedSystems<B> {
    /// Loads (and if needed migrates) the collection from `backend`.
    pub fn open(mut backend: B, config: StoreConfig) -> Result<Self> {
        let store = SystemsStore::load(&mut backend, config)?;
        Ok(Self::with_store(store, backend))
    }

    #[must_use]
    pub fn with_store(store: SystemsStore, backend: B) -> Self {
        let debounce = Debouncer::new(store.config().debounce);
        Self {
            store,
            backend,
            debounce,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &SystemsStore {
        &self.store
    }

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs a mutation and (re)arms the pending write.
    pub fn edit<R>(&mut self, now: Instant, f: impl FnOnce(&mut SystemsStore) -> R) -> R {
        let out = f(&mut self.store);
        self.debounce.touch(now);
        out
    }

    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.debounce.is_pending()
    }

    /// Writes if the debounce window has passed. Returns whether it wrote.
    /// A failed write stays pending.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if !self.debounce.ready(now) {
            return Ok(false);
        }
        self.store.save(&mut self.backend)?;
        self.debounce.cancel();
        debug!("debounced save");
        Ok(true)
    }

    /// Writes now, whether or not anything is pending.
    pub fn flush(&mut self) -> Result<()> {
        self.store.save(&mut self.backend)?;
        self.debounce.cancel();
        Ok(())
    }

    pub fn into_parts(self) -> (SystemsStore, B) {
        (self.store, self.backend)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
