//! Memoizing wrapper around any scope expander
//!
//! Expansion is a pure function of the role map and the input scopes, so
//! results can be cached under a key derived from both. The key hashes the
//! role-map version, which means a cache never serves results computed
//! against different role contents.

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::{Duration, Instant};
use blake3::Hasher;
use tracing::debug;

use crate::error::{ExpansionError, Result};
use crate::expander::ScopeExpander;
use crate::roles::RoleMap;
use crate::scope::ScopeSet;

/// Cache configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CacheConfig {
    /// Maximum number of entries in the cache
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Time-to-live for cached expansions, in seconds
    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,
}

fn default_capacity() -> usize {
    10_000
}

fn default_ttl_secs() -> u64 {
    60
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            ttl_secs: default_ttl_secs(),
        }
    }
}

impl CacheConfig {
    /// Time-to-live as a duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            return Err(ExpansionError::InvalidConfig(
                "cache capacity must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

/// Cache key type (BLAKE3 hash)
type CacheKey = [u8; 32];

/// Cached expansion with its insertion time
#[derive(Clone)]
struct CachedEntry {
    scopes: ScopeSet,
    cached_at: Instant,
}

impl CachedEntry {
    fn new(scopes: ScopeSet) -> Self {
        Self {
            scopes,
            cached_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

/// Scope expander with a TTL cache in front
///
/// Only successful expansions are cached. An `ExpansionDepthExceeded`
/// failure is recomputed (and fails again) on every call.
///
/// # Example
///
/// ```rust
/// use cretoai_scopes::cache::{CacheConfig, CachedExpander};
/// use cretoai_scopes::expander::{ScopeExpander, TruncatingExpander};
/// use cretoai_scopes::roles::RoleMap;
/// use cretoai_scopes::scope::scope_set;
///
/// let roles = RoleMap::from_pairs([("role1", vec!["r1a"])]).unwrap();
/// let cached = CachedExpander::new(TruncatingExpander::new(roles), CacheConfig::default()).unwrap();
///
/// let input = scope_set(["assume:role1"]);
/// let first = cached.expand(&input).unwrap();
/// let second = cached.expand(&input).unwrap();
///
/// assert_eq!(first, second);
/// assert_eq!(cached.stats().hits, 1);
/// ```
pub struct CachedExpander<E> {
    /// Wrapped expander
    inner: E,

    /// Cached expansions (thread-safe)
    entries: Arc<DashMap<CacheKey, CachedEntry>>,

    /// Cache configuration
    config: CacheConfig,

    /// Cache statistics
    stats: Arc<DashMap<String, usize>>,
}

impl<E: ScopeExpander> CachedExpander<E> {
    /// Wrap an expander with a cache
    pub fn new(inner: E, config: CacheConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            inner,
            entries: Arc::new(DashMap::new()),
            config,
            stats: Arc::new(DashMap::new()),
        })
    }

    /// Clear every cached entry and reset statistics
    pub fn clear(&self) {
        self.entries.clear();
        self.stats.clear();
    }

    /// Remove expired entries
    pub fn cleanup_expired(&self) {
        let ttl = self.config.ttl();
        self.entries.retain(|_, entry| !entry.is_expired(ttl));
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.get_stat("hits"),
            misses: self.get_stat("misses"),
            expirations: self.get_stat("expirations"),
            entries: self.entries.len(),
            max_entries: self.config.capacity,
        }
    }

    fn lookup(&self, key: &CacheKey) -> Option<ScopeSet> {
        if let Some(entry) = self.entries.get(key) {
            if entry.is_expired(self.config.ttl()) {
                drop(entry);
                self.entries.remove(key);
                self.increment_stat("expirations");
                return None;
            }

            self.increment_stat("hits");
            return Some(entry.scopes.clone());
        }

        self.increment_stat("misses");
        None
    }

    fn store(&self, key: CacheKey, scopes: ScopeSet) {
        if self.entries.len() >= self.config.capacity {
            self.evict();
        }

        self.entries.insert(key, CachedEntry::new(scopes));
    }

    /// Drop expired entries, then the oldest tenth if still at capacity
    fn evict(&self) {
        self.cleanup_expired();

        if self.entries.len() < self.config.capacity {
            return;
        }

        let mut by_age: Vec<(CacheKey, Instant)> = self
            .entries
            .iter()
            .map(|entry| (*entry.key(), entry.value().cached_at))
            .collect();
        by_age.sort_by_key(|(_, cached_at)| *cached_at);

        let to_remove = (self.config.capacity / 10).max(1);
        for (key, _) in by_age.into_iter().take(to_remove) {
            self.entries.remove(&key);
        }

        debug!("Evicted {} cached expansions", to_remove);
    }

    /// Key over the role-map version and the sorted input scopes
    fn compute_key(roles: &RoleMap, scopes: &ScopeSet) -> CacheKey {
        let mut hasher = Hasher::new();

        hasher.update(roles.version().as_bytes());

        // ScopeSet iterates in sorted order
        hasher.update(&(scopes.len() as u64).to_le_bytes());
        for scope in scopes {
            hasher.update(&(scope.len() as u64).to_le_bytes());
            hasher.update(scope.as_bytes());
        }

        *hasher.finalize().as_bytes()
    }

    fn increment_stat(&self, key: &str) {
        self.stats
            .entry(key.to_string())
            .and_modify(|count| *count += 1)
            .or_insert(1);
    }

    fn get_stat(&self, key: &str) -> usize {
        self.stats.get(key).map(|v| *v).unwrap_or(0)
    }
}

impl<E: ScopeExpander> ScopeExpander for CachedExpander<E> {
    fn expand(&self, scopes: &ScopeSet) -> Result<ScopeSet> {
        let key = Self::compute_key(self.inner.roles(), scopes);

        if let Some(cached) = self.lookup(&key) {
            return Ok(cached);
        }

        let expanded = self.inner.expand(scopes)?;
        self.store(key, expanded.clone());

        Ok(expanded)
    }

    fn roles(&self) -> &RoleMap {
        self.inner.roles()
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub expirations: usize,
    pub entries: usize,
    pub max_entries: usize,
}

impl CacheStats {
    /// Calculate cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}
