//! Per-collection record cache.
//!
//! Maps a collection key (its canonical URL, see [`cache_key`]) to the
//! records merged so far. Readers get an `Arc` snapshot taken under a short
//! read lock; writers are serialized by the write lock. Within one entry no
//! two records share an id.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::Result;
use crate::rest::pagination::PAGINATION_PARAMS;
use crate::types::Resource;
use crate::utils::parse_absolute_url;

/// Canonical cache key for a collection URL: pagination parameters and any
/// fragment removed, so every page of a collection shares one key.
///
/// # Errors
///
/// Returns `UpError::InvalidUrl` if `url` is not an absolute HTTP URL.
pub fn cache_key(url: &str) -> Result<String> {
    let mut parsed = parse_absolute_url(url)?;
    parsed.set_fragment(None);
    let kept: Vec<(String, String)> = parsed
        .query_pairs()
        .filter(|(k, _)| !PAGINATION_PARAMS.contains(&k.as_ref()))
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    if kept.is_empty() {
        parsed.set_query(None);
    } else {
        parsed.query_pairs_mut().clear().extend_pairs(kept);
    }
    Ok(parsed.into())
}

/// Cache of merged records, one entry per collection.
#[derive(Debug)]
pub struct CollectionCache<R> {
    entries: RwLock<HashMap<String, Arc<Vec<R>>>>,
}

impl<R> Default for CollectionCache<R> {
    fn default() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<R: Resource> CollectionCache<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached records for `key`, if any. Never touches the network.
    pub fn get_cached(&self, key: &str) -> Option<Arc<Vec<R>>> {
        self.read().get(key).cloned()
    }

    /// Replace the entry for `key`. Later duplicates of an id are dropped.
    pub fn put_full(&self, key: &str, records: Vec<R>) -> Arc<Vec<R>> {
        let mut seen = HashSet::with_capacity(records.len());
        let deduped: Vec<R> = records
            .into_iter()
            .filter(|r| seen.insert(r.id().to_string()))
            .collect();
        let entry = Arc::new(deduped);
        self.write().insert(key.to_string(), Arc::clone(&entry));
        entry
    }

    /// Append the records of `records` whose id is not yet cached under
    /// `key`, keeping arrival order. Returns the number of records added and
    /// the merged entry. Merging the same page twice adds nothing.
    pub fn merge_append(&self, key: &str, records: Vec<R>) -> (usize, Arc<Vec<R>>) {
        let mut entries = self.write();
        let current = entries.get(key).cloned().unwrap_or_default();

        let mut seen: HashSet<String> = current.iter().map(|r| r.id().to_string()).collect();
        let fresh: Vec<R> = records
            .into_iter()
            .filter(|r| seen.insert(r.id().to_string()))
            .collect();
        let added = fresh.len();

        if added == 0 && entries.contains_key(key) {
            return (0, current);
        }

        let mut merged = Vec::with_capacity(current.len() + added);
        merged.extend(current.iter().cloned());
        merged.extend(fresh);
        let merged = Arc::new(merged);
        entries.insert(key.to_string(), Arc::clone(&merged));
        (added, merged)
    }

    /// Drop the entry for `key`.
    pub fn invalidate(&self, key: &str) -> bool {
        self.write().remove(key).is_some()
    }

    pub fn clear(&self) {
        self.write().clear();
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // Entries are whole `Arc`s, so a poisoned map is still consistent.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<Vec<R>>>> {
        self.entries.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<Vec<R>>>> {
        self.entries.write().unwrap_or_else(|e| e.into_inner())
    }
}
