use std::time::Duration;

/// Key the saved-systems collection lives under.
pub const STORAGE_KEY: &str = "tint-systems";

/// Key of the pre-collection single-system payload.
pub const LEGACY_KEY: &str = "tint-tokens";

pub const MAX_SYSTEMS: usize = 20;

pub const SAVE_DEBOUNCE: Duration = Duration::from_millis(500);

/// Longest encoded share parameter still considered safe in a URL.
pub const MAX_SHARE_LENGTH: usize = 2000;

pub const SHARE_PARAM: &str = "t";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub storage_key: String,
    pub legacy_key: String,
    pub max_systems: usize,
    /// Trailing-edge delay before a burst of edits is written out.
    pub debounce: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            storage_key: STORAGE_KEY.to_string(),
            legacy_key: LEGACY_KEY.to_string(),
            max_systems: MAX_SYSTEMS,
            debounce: SAVE_DEBOUNCE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareConfig {
    pub max_length: usize,
    pub param: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            max_length: MAX_SHARE_LENGTH,
            param: SHARE_PARAM.to_string(),
        }
    }
}
