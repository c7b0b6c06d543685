use std::time::Duration;

/// Production API root.
pub const DEFAULT_API_BASE_URL: &str = "https://api.up.com.au/api/v1";

/// Records requested per accounts page.
pub const ACCOUNTS_PAGE_SIZE: u32 = 10;

/// Records requested per transactions page.
pub const TRANSACTIONS_PAGE_SIZE: u32 = 40;

/// Per-request timeout applied by the transport.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Cached collections younger than this are served without a refetch.
pub const DEFAULT_TTL: Duration = Duration::from_secs(3600);

/// When a cached first page may be served instead of refetching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreshnessPolicy {
    /// Every `load_first` goes to the network.
    AlwaysRefetch,
    /// Cached data younger than the duration is fresh.
    Ttl(Duration),
}

impl FreshnessPolicy {
    pub fn is_fresh(&self, age: Duration) -> bool {
        match self {
            FreshnessPolicy::AlwaysRefetch => false,
            FreshnessPolicy::Ttl(ttl) => age < *ttl,
        }
    }
}

impl Default for FreshnessPolicy {
    fn default() -> Self {
        FreshnessPolicy::Ttl(DEFAULT_TTL)
    }
}

/// Configuration for the Up client.
#[derive(Debug, Clone)]
pub struct UpConfig {
    /// API root, e.g. `https://api.up.com.au/api/v1`.
    pub api_base_url: String,
    /// Page size for the accounts collection.
    pub accounts_page_size: u32,
    /// Page size for transaction collections.
    pub transactions_page_size: u32,
    pub request_timeout: Duration,
    pub freshness: FreshnessPolicy,
    /// Buffer size of the fetch event channel.
    pub event_capacity: usize,
}

impl Default for UpConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            accounts_page_size: ACCOUNTS_PAGE_SIZE,
            transactions_page_size: TRANSACTIONS_PAGE_SIZE,
            request_timeout: REQUEST_TIMEOUT,
            freshness: FreshnessPolicy::default(),
            event_capacity: 256,
        }
    }
}

impl UpConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_freshness(mut self, freshness: FreshnessPolicy) -> Self {
        self.freshness = freshness;
        self
    }

    pub fn with_page_sizes(mut self, accounts: u32, transactions: u32) -> Self {
        self.accounts_page_size = accounts;
        self.transactions_page_size = transactions;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// URL of the accounts collection, without pagination parameters.
    pub fn accounts_url(&self) -> String {
        format!("{}/accounts", self.api_base_url.trim_end_matches('/'))
    }
}
