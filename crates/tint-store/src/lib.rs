//! tint-store: where token systems live between sessions.
//!
//! # Architecture
//!
//! ```text
//! TokenEditor ──tokens──▶ SystemsStore ──serde_json──▶ KeyValueStore
//!                             ▲   (collection v1)       ├─ MemoryStore
//!                             │                         └─ FileStore
//!              PersistedSystems (Debouncer, trailing edge)
//!
//! TokenSystem ──▶ share::encode ──▶ ?t=<lz-string>  ──▶ share::decode
//! ```
//!
//! - [`systems`]: the saved-systems collection and its CRUD contract.
//! - [`migrate`]: loading, including the legacy single-system upgrade.
//! - [`persist`]: debounced write-back.
//! - [`share`]: compressed, URL-safe share links.

pub mod config;
pub mod error;
pub mod id;
pub mod kv;
pub mod migrate;
pub mod persist;
pub mod share;
pub mod systems;

pub use config::{ShareConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use id::IdGenerator;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use migrate::{LegacyPayload, LoadOutcome};
pub use persist::{Debouncer, PersistedSystems};
pub use share::SharePayload;
pub use systems::{Clock, STORE_VERSION, SavedSystem, SystemsCollection, SystemsStore};
