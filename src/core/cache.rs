//! Unified caching system for both in-memory LRU cache and persistent file storage
//!
//! This module provides a two-tier caching system:
//! - L1 Cache: In-memory LRU cache for fast access
//! - L2 Cache: Optional JSON files on disk, shared between restarts
//!
//! Every entry carries the cache's time-to-live, counted from when the value
//! was first written. Disk entries age by file modification time and keep
//! that age when promoted into memory, so a stale snapshot is never served
//! from either tier.

use lru::LruCache;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    hash::Hash,
    io::{Read, Write},
    num::NonZeroUsize,
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
    time::{Duration, Instant, SystemTime},
};

use crate::{LeagueId, Season, Week};

/// League snapshots and box scores are refreshed hourly.
pub const DATA_TTL: Duration = Duration::from_secs(60 * 60);

/// Team logos rarely change.
pub const LOGO_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Try to read a file into a String
pub fn try_read_to_string(path: &Path) -> Option<String> {
    let mut f = fs::File::open(path).ok()?;
    let mut s = String::new();

    f.read_to_string(&mut s).ok()?;

    Some(s)
}

/// Write a string to file
pub fn write_string(path: &Path, contents: &str) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut f = fs::File::create(path)?;
    f.write_all(contents.as_bytes())
}

/// Generic cache key that can be used for both memory and disk caching
pub trait CacheKey: Hash + Eq + Clone + Send + Sync {
    /// Generate a string representation for file system storage
    fn to_file_key(&self) -> String;

    /// Generate the file path for this cache entry under `dir`
    fn to_file_path(&self, dir: &Path) -> PathBuf {
        dir.join(format!("{}.json", self.to_file_key()))
    }
}

/// Cache key for a league snapshot (settings, teams, status)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LeagueCacheKey {
    pub league_id: LeagueId,
    pub season: Season,
}

impl CacheKey for LeagueCacheKey {
    fn to_file_key(&self) -> String {
        format!(
            "league_l{}_s{}",
            self.league_id.as_u32(),
            self.season.as_u16()
        )
    }
}

/// Cache key for one week of box scores
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoxScoresCacheKey {
    pub league_id: LeagueId,
    pub season: Season,
    pub week: Week,
}

impl CacheKey for BoxScoresCacheKey {
    fn to_file_key(&self) -> String {
        format!(
            "box_scores_l{}_s{}_w{}",
            self.league_id.as_u32(),
            self.season.as_u16(),
            self.week.as_u16()
        )
    }
}

/// Cache key for a fetched team logo
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogoCacheKey {
    pub url: String,
}

impl CacheKey for LogoCacheKey {
    fn to_file_key(&self) -> String {
        let safe: String = self
            .url
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
            .collect();
        format!("logo_{}", safe)
    }
}

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

impl<V> Entry<V> {
    fn is_fresh(&self) -> bool {
        Instant::now() < self.expires_at
    }
}

/// Unified cache that combines LRU memory cache with file system persistence
pub struct UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    memory_cache: Mutex<LruCache<K, Entry<V>>>,
    memory_capacity: usize,
    ttl: Duration,
    disk_dir: Option<PathBuf>,
}

impl<K, V> UnifiedCache<K, V>
where
    K: CacheKey,
    V: Clone + Serialize + for<'de> Deserialize<'de>,
{
    /// Create a memory-only cache with specified capacity and time-to-live
    pub fn new(memory_capacity: usize, ttl: Duration) -> Self {
        let capacity = NonZeroUsize::new(memory_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            memory_cache: Mutex::new(LruCache::new(capacity)),
            memory_capacity: capacity.get(),
            ttl,
            disk_dir: None,
        }
    }

    /// Also persist entries as JSON files under `dir`
    pub fn with_disk(mut self, dir: impl Into<PathBuf>) -> Self {
        self.disk_dir = Some(dir.into());
        self
    }

    fn memory(&self) -> MutexGuard<'_, LruCache<K, Entry<V>>> {
        self.memory_cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Get an item from cache (checks memory first, then disk)
    pub fn get(&self, key: &K) -> Option<V> {
        {
            let mut memory = self.memory();
            match memory.get(key) {
                Some(entry) if entry.is_fresh() => {
                    return Some(entry.value.clone());
                }
                Some(_) => {
                    memory.pop(key);
                }
                None => {}
            }
        }

        // Fall back to disk cache; the entry only lives out the file's remaining TTL
        let (value, age) = self.get_from_disk(key)?;
        self.memory().put(
            key.clone(),
            Entry {
                value: value.clone(),
                expires_at: Instant::now() + self.ttl.saturating_sub(age),
            },
        );
        Some(value)
    }

    /// Put an item into cache (stores in memory and, when enabled, on disk)
    pub fn put(&self, key: K, value: V) {
        if let Err(e) = self.put_to_disk(&key, &value) {
            tracing::debug!(error = %e, key = %key.to_file_key(), "disk cache write failed");
        }

        self.memory().put(
            key,
            Entry {
                value,
                expires_at: Instant::now() + self.ttl,
            },
        );
    }

    /// Get item from disk cache only, with its age, ignoring files older than the TTL
    fn get_from_disk(&self, key: &K) -> Option<(V, Duration)> {
        let path = key.to_file_path(self.disk_dir.as_deref()?);
        let modified = fs::metadata(&path).and_then(|m| m.modified()).ok()?;
        let age = SystemTime::now().duration_since(modified).unwrap_or_default();
        if age >= self.ttl {
            return None;
        }
        let content = try_read_to_string(&path)?;
        let value = serde_json::from_str(&content).ok()?;
        Some((value, age))
    }

    /// Put item to disk cache only
    fn put_to_disk(&self, key: &K, value: &V) -> std::io::Result<()> {
        let Some(dir) = self.disk_dir.as_deref() else {
            return Ok(());
        };
        let content = serde_json::to_string(value)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        write_string(&key.to_file_path(dir), &content)
    }

    /// Drop one entry from both tiers
    pub fn invalidate(&self, key: &K) -> std::io::Result<()> {
        self.memory().pop(key);
        if let Some(dir) = self.disk_dir.as_deref() {
            let path = key.to_file_path(dir);
            if path.exists() {
                fs::remove_file(path)?;
            }
        }
        Ok(())
    }

    /// Clear memory cache only (keeps disk cache)
    pub fn clear_memory(&self) {
        self.memory().clear();
    }

    /// Get memory cache statistics as `(entries, capacity)`
    pub fn memory_stats(&self) -> (usize, usize) {
        (self.memory().len(), self.memory_capacity)
    }
}
