//! First-page / next-page loading of one kind of collection.
//!
//! # Flow
//!
//! ```text
//!   load_first(key) ──cached & fresh──> Loaded { origin: Cache }
//!        │
//!        └─> Loading ──fetch_page──> put_full ──> Ready { next } | Exhausted
//!
//!   load_next(key, cursor) ──no cursor / in flight──> Loaded { origin: Skipped }
//!        │
//!        └─> LoadingNextPage ──fetch_page──> merge_append ──> Ready | Exhausted
//! ```
//!
//! A failed attempt keeps the cached records and the last good cursor, so
//! the caller can retry with either call.
//!
//! State transitions, cache writes and event sends for a key all happen
//! while holding the slot lock, so [`CollectionLoader::snapshot`] never sees
//! new records next to a stale loading state. The lock is never held across
//! an `.await`.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, CollectionCache};
use crate::config::FreshnessPolicy;
use crate::credentials::{usable_token, CredentialProvider};
use crate::error::{Result, UpError};
use crate::events::{CollectionState, FetchEvent, FetchEventKind};
use crate::rest::pagination::PageRequest;
use crate::rest::UpHttpClient;
use crate::types::Resource;

/// Where the records of a [`Loaded`] came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOrigin {
    /// A page was fetched and merged.
    Network,
    /// Served from the cache without a request.
    Cache,
    /// Nothing to do (no cursor, or a request already in flight).
    Skipped,
}

/// Result of a load: all records merged so far plus the cursor of the next
/// page.
#[derive(Debug, Clone)]
pub struct Loaded<R> {
    pub records: Arc<Vec<R>>,
    pub next: Option<String>,
    pub origin: LoadOrigin,
}

impl<R> Loaded<R> {
    /// True when the last page has been merged. A skipped load reports what
    /// is known so far and is never exhausted.
    pub fn is_exhausted(&self) -> bool {
        self.origin != LoadOrigin::Skipped && self.next.is_none()
    }
}

#[derive(Debug, Default)]
struct Slot {
    state: CollectionState,
    /// Cursor returned by the last successful page; outlives failed attempts.
    next: Option<String>,
    fetched_at: Option<Instant>,
}

/// Loads pages of `R` collections into a shared cache.
pub struct CollectionLoader<R> {
    http: UpHttpClient,
    credentials: Arc<dyn CredentialProvider>,
    events: broadcast::Sender<FetchEvent>,
    page_size: u32,
    freshness: FreshnessPolicy,
    cache: CollectionCache<R>,
    slots: Mutex<HashMap<String, Slot>>,
}

impl<R: Resource> CollectionLoader<R> {
    pub fn new(
        http: UpHttpClient,
        credentials: Arc<dyn CredentialProvider>,
        events: broadcast::Sender<FetchEvent>,
        page_size: u32,
        freshness: FreshnessPolicy,
    ) -> Self {
        Self {
            http,
            credentials,
            events,
            page_size,
            freshness,
            cache: CollectionCache::new(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Load the first page of the collection at `base`, or serve it from the
    /// cache when fresh and `force` is false.
    pub async fn load_first(&self, base: &str, force: bool) -> Result<Loaded<R>> {
        let key = cache_key(base)?;

        let token = {
            let mut slots = self.slots();
            let slot = slots.entry(key.clone()).or_default();

            if slot.state.is_loading() {
                debug!(key = %key, "load already in flight");
                return Ok(self.current(&key, slot, LoadOrigin::Skipped));
            }

            let Some(token) = self.token() else {
                return Err(self.fail(&key, slot, UpError::MissingCredential));
            };

            if !force {
                if let (Some(records), Some(at)) = (self.cache.get_cached(&key), slot.fetched_at) {
                    if self.freshness.is_fresh(at.elapsed()) {
                        debug!(key = %key, records = records.len(), "serving cached collection");
                        slot.state = settled_state(slot.next.as_deref());
                        self.emit(&key, FetchEventKind::ServedFromCache { total: records.len() });
                        return Ok(Loaded {
                            records,
                            next: slot.next.clone(),
                            origin: LoadOrigin::Cache,
                        });
                    }
                }
            }

            slot.state = CollectionState::Loading;
            self.emit(&key, FetchEventKind::LoadingStarted { next_page: false });
            token
        };

        let request = PageRequest::first(base, self.page_size);
        let fetched = self.http.fetch_page::<R>(&request, &token).await;

        let mut slots = self.slots();
        let slot = slots.entry(key.clone()).or_default();
        match fetched {
            Ok(page) => {
                let (data, next) = page.into_parts();
                let records = self.cache.put_full(&key, data);
                slot.fetched_at = Some(Instant::now());
                slot.next = next.clone();
                slot.state = settled_state(next.as_deref());
                info!(
                    collection = R::COLLECTION,
                    key = %key,
                    records = records.len(),
                    has_next = next.is_some(),
                    "loaded first page"
                );
                self.emit(
                    &key,
                    FetchEventKind::PageReceived {
                        added: records.len(),
                        total: records.len(),
                        next: next.clone(),
                    },
                );
                Ok(Loaded {
                    records,
                    next,
                    origin: LoadOrigin::Network,
                })
            }
            Err(e) => Err(self.fail(&key, slot, e)),
        }
    }

    /// Fetch the page at `cursor` and merge it into the collection at
    /// `base`. A missing cursor or a request already in flight for the
    /// collection leaves everything unchanged.
    pub async fn load_next(&self, base: &str, cursor: Option<&str>) -> Result<Loaded<R>> {
        let key = cache_key(base)?;

        let Some(cursor) = cursor else {
            let mut slots = self.slots();
            let slot = slots.entry(key.clone()).or_default();
            return Ok(self.current(&key, slot, LoadOrigin::Skipped));
        };

        let request = PageRequest::cursor(cursor);
        let token = {
            let mut slots = self.slots();
            let slot = slots.entry(key.clone()).or_default();

            if slot.state.is_loading() {
                debug!(key = %key, "page already in flight, skipping");
                return Ok(self.current(&key, slot, LoadOrigin::Skipped));
            }
            if let Err(e) = request.url() {
                return Err(self.fail(&key, slot, e));
            }
            let Some(token) = self.token() else {
                return Err(self.fail(&key, slot, UpError::MissingCredential));
            };

            slot.state = CollectionState::LoadingNextPage {
                cursor: cursor.to_string(),
            };
            self.emit(&key, FetchEventKind::LoadingStarted { next_page: true });
            token
        };

        let fetched = self.http.fetch_page::<R>(&request, &token).await;

        let mut slots = self.slots();
        let slot = slots.entry(key.clone()).or_default();
        match fetched {
            Ok(page) => {
                let (data, next) = page.into_parts();
                let (added, records) = self.cache.merge_append(&key, data);
                slot.next = next.clone();
                slot.state = settled_state(next.as_deref());
                info!(
                    collection = R::COLLECTION,
                    key = %key,
                    added,
                    records = records.len(),
                    has_next = next.is_some(),
                    "merged next page"
                );
                self.emit(
                    &key,
                    FetchEventKind::PageReceived {
                        added,
                        total: records.len(),
                        next: next.clone(),
                    },
                );
                Ok(Loaded {
                    records,
                    next,
                    origin: LoadOrigin::Network,
                })
            }
            Err(e) => Err(self.fail(&key, slot, e)),
        }
    }

    /// Load the first page, then every following page in turn.
    pub async fn load_all(&self, base: &str, force: bool) -> Result<Loaded<R>> {
        let mut loaded = self.load_first(base, force).await?;
        let mut fetched_any = loaded.origin == LoadOrigin::Network;
        while let Some(next) = loaded.next.clone() {
            loaded = self.load_next(base, Some(&next)).await?;
            if loaded.origin == LoadOrigin::Skipped {
                break;
            }
            fetched_any = true;
        }
        if fetched_any {
            loaded.origin = LoadOrigin::Network;
        }
        Ok(loaded)
    }

    /// Records and state of the collection at `base`, read together.
    pub fn snapshot(&self, base: &str) -> Result<(Option<Arc<Vec<R>>>, CollectionState)> {
        let key = cache_key(base)?;
        let slots = self.slots();
        let state = slots.get(&key).map(|s| s.state.clone()).unwrap_or_default();
        Ok((self.cache.get_cached(&key), state))
    }

    pub fn state(&self, base: &str) -> Result<CollectionState> {
        self.snapshot(base).map(|(_, state)| state)
    }

    /// Cached records of the collection at `base`. Read-only.
    pub fn cached(&self, base: &str) -> Result<Option<Arc<Vec<R>>>> {
        let key = cache_key(base)?;
        Ok(self.cache.get_cached(&key))
    }

    /// Forget the collection at `base`; the next `load_first` refetches.
    pub fn invalidate(&self, base: &str) -> Result<()> {
        let key = cache_key(base)?;
        let mut slots = self.slots();
        if slots.get(&key).is_some_and(|s| s.state.is_loading()) {
            // Keep the in-flight guard; only the cached data goes.
            if let Some(slot) = slots.get_mut(&key) {
                slot.fetched_at = None;
                slot.next = None;
            }
        } else {
            slots.remove(&key);
        }
        self.cache.invalidate(&key);
        Ok(())
    }

    /// Forget every collection that is not mid-load.
    pub fn clear(&self) {
        let mut slots = self.slots();
        slots.retain(|_, slot| slot.state.is_loading());
        for slot in slots.values_mut() {
            slot.fetched_at = None;
            slot.next = None;
        }
        self.cache.clear();
    }

    fn token(&self) -> Option<String> {
        usable_token(self.credentials.as_ref())
    }

    fn current(&self, key: &str, slot: &Slot, origin: LoadOrigin) -> Loaded<R> {
        Loaded {
            records: self.cache.get_cached(key).unwrap_or_default(),
            next: slot.next.clone(),
            origin,
        }
    }

    fn fail(&self, key: &str, slot: &mut Slot, err: UpError) -> UpError {
        let kind = err.kind();
        warn!(collection = R::COLLECTION, key = %key, error = %err, "load failed");
        slot.state = CollectionState::Failed(kind);
        self.emit(key, FetchEventKind::Failed(kind));
        err
    }

    fn emit(&self, key: &str, kind: FetchEventKind) {
        // No subscribers is fine.
        let _ = self.events.send(FetchEvent {
            key: key.to_string(),
            kind,
        });
    }

    fn slots(&self) -> MutexGuard<'_, HashMap<String, Slot>> {
        self.slots.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn settled_state(next: Option<&str>) -> CollectionState {
    match next {
        Some(next) => CollectionState::Ready {
            next: next.to_string(),
        },
        None => CollectionState::Exhausted,
    }
}
