use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// A record type served by a paginated collection.
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Collection name used in logs and decode errors.
    const COLLECTION: &'static str;

    /// Stable identifier; equality and deduplication key.
    fn id(&self) -> &str;
}

/// One page of a collection: `{ "data": [...], "links": { "prev", "next" } }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    #[serde(default)]
    pub links: PageLinks,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLinks {
    pub prev: Option<String>,
    /// Exact URL of the following page; `None` once the collection is exhausted.
    pub next: Option<String>,
}

impl<T> Page<T> {
    pub fn next(&self) -> Option<&str> {
        self.links.next.as_deref()
    }

    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.data, self.links.next)
    }
}
