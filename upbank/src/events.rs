use tokio::sync::broadcast;

use crate::error::ErrorKind;

/// Load state of one collection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CollectionState {
    /// Nothing requested yet (or invalidated).
    #[default]
    Idle,
    /// First page in flight.
    Loading,
    /// A page has been merged; `next` is the cursor of the following page.
    Ready { next: String },
    /// The page at `cursor` is in flight.
    LoadingNextPage { cursor: String },
    /// The last page has been merged.
    Exhausted,
    /// The last attempt failed.
    Failed(ErrorKind),
}

impl CollectionState {
    pub fn is_loading(&self) -> bool {
        matches!(
            self,
            CollectionState::Loading | CollectionState::LoadingNextPage { .. }
        )
    }

    /// Cursor a caller would pass to `load_next` from this state.
    pub fn next_cursor(&self) -> Option<&str> {
        match self {
            CollectionState::Ready { next } => Some(next),
            CollectionState::LoadingNextPage { cursor } => Some(cursor),
            _ => None,
        }
    }
}

/// A state transition of one collection, keyed by its cache key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchEvent {
    pub key: String,
    pub kind: FetchEventKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEventKind {
    /// A request was issued; `next_page` is false for a first page.
    LoadingStarted { next_page: bool },
    /// A first-page load was answered from the cache.
    ServedFromCache { total: usize },
    /// A page was merged into the cache.
    PageReceived {
        added: usize,
        total: usize,
        next: Option<String>,
    },
    /// The attempt failed; cached records are unchanged.
    Failed(ErrorKind),
}

/// Typed subscription to fetch events.
pub struct EventSubscription {
    rx: broadcast::Receiver<FetchEvent>,
}

impl EventSubscription {
    pub fn new(rx: broadcast::Receiver<FetchEvent>) -> Self {
        Self { rx }
    }

    /// Receive the next event. Returns `None` once the client is dropped.
    pub async fn next(&mut self) -> Option<FetchEvent> {
        loop {
            match self.rx.recv().await {
                Ok(event) => return Some(event),
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!("fetch event subscription lagged by {n} events");
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-queued event, without waiting.
    pub fn try_next(&mut self) -> Option<FetchEvent> {
        loop {
            match self.rx.try_recv() {
                Ok(event) => return Some(event),
                Err(broadcast::error::TryRecvError::Lagged(n)) => {
                    tracing::warn!("fetch event subscription lagged by {n} events");
                    continue;
                }
                Err(_) => return None,
            }
        }
    }
}
