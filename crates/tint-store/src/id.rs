//! Saved-system identifiers: `sys-<millis base36>-<8 hex>`.
//!
//! The timestamp part keeps ids roughly sortable. The random part only has
//! to separate systems saved in the same millisecond, so a tiny xorshift
//! generator is plenty.

use std::time::{SystemTime, UNIX_EPOCH};

use chrono::{DateTime, Utc};

// ---------------------------------------------------------------------------
// Xorshift32
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    fn new(seed: u32) -> Self {
        Self { state: seed.max(1) }
    }

    const fn next(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }
}

// ---------------------------------------------------------------------------
// IdGenerator
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct IdGenerator {
    rng: Xorshift32,
}

impl IdGenerator {
    /// Deterministic sequence for a given seed. Zero is treated as one.
    #[must_use]
    pub fn new(seed: u32) -> Self {
        Self {
            rng: Xorshift32::new(seed),
        }
    }

    /// Seeded from the wall clock's sub-second nanos, mixed with the low
    /// 32 bits of the seconds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_time() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(1, |d| d.subsec_nanos() ^ (d.as_secs() as u32));
        Self::new(nanos)
    }

    pub fn next_id(&mut self, now: DateTime<Utc>) -> String {
        let millis = u64::try_from(now.timestamp_millis()).unwrap_or(0);
        format!("sys-{}-{:08x}", base36(millis), self.rng.next())
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::from_time()
    }
}

fn base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    out.into_iter().map(char::from).collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
