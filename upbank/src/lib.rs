pub mod cache;
pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod events;
pub mod loader;
pub mod rest;
pub mod types;
pub mod utils;

// ---- Top-level re-exports for ergonomic usage ----

// Client + config
pub use client::{Collection, PageSummary, UpClient};
pub use config::{FreshnessPolicy, UpConfig};
pub use error::{ErrorKind, Result, UpError};

// Credentials
pub use credentials::{CredentialProvider, EnvToken, StaticToken};

// Loading + cache
pub use cache::{cache_key, CollectionCache};
pub use loader::{CollectionLoader, LoadOrigin, Loaded};

// Events
pub use events::{CollectionState, EventSubscription, FetchEvent, FetchEventKind};

// REST transport + pagination
pub use rest::pagination::PageRequest;
pub use rest::{RawResponse, UpHttpClient};

// Records
pub use types::{
    Account, AccountAttributes, Balance, Page, PageLinks, Resource, Transaction,
    TransactionStatus,
};
