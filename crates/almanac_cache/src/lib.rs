//! TTL-bounded cache for computed event feeds.
//!
//! Keyed by (year, observer coordinates). Entries expire after a fixed
//! time-to-live and expired entries answer as misses. The size ceiling
//! is advisory: crossing it triggers a sweep of expired entries, but a
//! live entry is never evicted to make room.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use log::debug;

use almanac_core::Event;

/// Default entry lifetime.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// Default advisory entry ceiling.
pub const DEFAULT_MAX_ENTRIES: usize = 5;

/// Cache key: one calendar year at one observer location.
///
/// Coordinates are keyed by bit pattern, so two requests hit the same
/// entry only when their coordinates are bitwise identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    year: i32,
    lat_bits: u64,
    lon_bits: u64,
}

impl CacheKey {
    pub fn new(year: i32, latitude: f64, longitude: f64) -> Self {
        Self {
            year,
            lat_bits: latitude.to_bits(),
            lon_bits: longitude.to_bits(),
        }
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    events: Vec<Event>,
    cached_at: Instant,
}

/// In-memory event cache with per-entry TTL.
#[derive(Debug)]
pub struct ResultCache {
    ttl: Duration,
    max_entries: usize,
    entries: HashMap<CacheKey, CacheEntry>,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_ENTRIES)
    }
}

impl ResultCache {
    pub fn new(ttl: Duration, max_entries: usize) -> Self {
        Self {
            ttl,
            max_entries,
            entries: HashMap::new(),
        }
    }

    /// Look up a key. Expired entries answer as a miss.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<Event>> {
        self.get_at(key, Instant::now())
    }

    fn get_at(&self, key: &CacheKey, now: Instant) -> Option<Vec<Event>> {
        let entry = self.entries.get(key)?;
        if now.duration_since(entry.cached_at) >= self.ttl {
            debug!("cache entry for year {} expired", key.year);
            return None;
        }
        Some(entry.events.clone())
    }

    /// Store events for a key, sweeping expired entries when the
    /// advisory ceiling is exceeded.
    pub fn put(&mut self, key: CacheKey, events: Vec<Event>) {
        self.put_at(key, events, Instant::now());
    }

    fn put_at(&mut self, key: CacheKey, events: Vec<Event>, now: Instant) {
        self.entries.insert(key, CacheEntry { events, cached_at: now });
        if self.entries.len() > self.max_entries {
            let ttl = self.ttl;
            let before = self.entries.len();
            self.entries
                .retain(|_, entry| now.duration_since(entry.cached_at) < ttl);
            debug!("cache sweep removed {} expired entries", before - self.entries.len());
        }
    }

    /// Drop one entry regardless of its age.
    pub fn invalidate(&mut self, key: &CacheKey) {
        self.entries.remove(key);
    }

    /// Number of stored entries, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
