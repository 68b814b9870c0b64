//! In-memory TTL cache for lookup results.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use tokio::time::Instant;

use super::types::Member;

/// Cache of normalized members keyed by jurisdiction code.
pub type MemberCache = TtlCache<String, Arc<[Member]>>;

#[derive(Debug)]
struct Entry<V> {
    value: V,
    /// `None` when the TTL reaches past what `Instant` can represent
    expires_at: Option<Instant>,
}

/// Key/value cache whose entries expire after a per-entry TTL.
///
/// Expiry is checked on read; expired entries stay in the map until the
/// next `set` for the same key replaces them.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, Entry<V>>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Return the value for `key` if it was set and has not expired.
    ///
    /// A poisoned lock reads as a miss.
    pub fn get(&self, key: &K) -> Option<V> {
        let Ok(entries) = self.entries.read() else {
            return None;
        };

        entries
            .get(key)
            .filter(|entry| entry.expires_at.is_none_or(|at| Instant::now() < at))
            .map(|entry| entry.value.clone())
    }

    /// Store `value` under `key`, replacing any previous entry.
    pub fn set(&self, key: K, value: V, ttl: Duration) {
        let Ok(mut entries) = self.entries.write() else {
            tracing::warn!("cache lock poisoned, dropping write");
            return;
        };

        entries.insert(
            key,
            Entry {
                value,
                expires_at: Instant::now().checked_add(ttl),
            },
        );
    }
}

impl<K, V> Default for TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
