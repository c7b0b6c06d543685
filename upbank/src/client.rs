use std::sync::Arc;

use tokio::sync::broadcast;

use crate::config::UpConfig;
use crate::credentials::CredentialProvider;
use crate::error::Result;
use crate::events::{CollectionState, EventSubscription, FetchEvent};
use crate::loader::{CollectionLoader, LoadOrigin, Loaded};
use crate::rest::UpHttpClient;
use crate::types::*;

/// Main Up client: loads accounts and their transactions page by page,
/// caching what it has fetched.
///
/// Every state change is published as a [`FetchEvent`]; see
/// [`UpClient::subscribe`].
pub struct UpClient {
    config: UpConfig,
    events: broadcast::Sender<FetchEvent>,
    accounts: CollectionLoader<Account>,
    transactions: CollectionLoader<Transaction>,
}

impl UpClient {
    /// Create a client. No request is made until a `load_*` call.
    pub fn new<C>(config: UpConfig, credentials: C) -> Result<Self>
    where
        C: CredentialProvider + 'static,
    {
        Self::with_credentials(config, Arc::new(credentials))
    }

    pub fn with_credentials(
        config: UpConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self> {
        let http = UpHttpClient::new(config.request_timeout)?;
        let (events, _) = broadcast::channel(config.event_capacity.max(1));

        let accounts = CollectionLoader::new(
            http.clone(),
            Arc::clone(&credentials),
            events.clone(),
            config.accounts_page_size,
            config.freshness,
        );
        let transactions = CollectionLoader::new(
            http,
            credentials,
            events.clone(),
            config.transactions_page_size,
            config.freshness,
        );

        Ok(Self {
            config,
            events,
            accounts,
            transactions,
        })
    }

    pub fn config(&self) -> &UpConfig {
        &self.config
    }

    /// Raw receiver of fetch events.
    pub fn subscribe(&self) -> broadcast::Receiver<FetchEvent> {
        self.events.subscribe()
    }

    pub fn subscribe_events(&self) -> EventSubscription {
        EventSubscription::new(self.events.subscribe())
    }

    // --- Accounts ---

    /// URL of the accounts collection; also its cache key.
    pub fn accounts_url(&self) -> String {
        self.config.accounts_url()
    }

    /// First page of accounts, from the cache when fresh.
    pub async fn load_accounts(&self) -> Result<Loaded<Account>> {
        self.accounts.load_first(&self.accounts_url(), false).await
    }

    /// First page of accounts, always from the network. Replaces the cached
    /// list.
    pub async fn reload_accounts(&self) -> Result<Loaded<Account>> {
        self.accounts.load_first(&self.accounts_url(), true).await
    }

    /// Merge the accounts page at `cursor`.
    pub async fn load_next_accounts(&self, cursor: Option<&str>) -> Result<Loaded<Account>> {
        self.accounts.load_next(&self.accounts_url(), cursor).await
    }

    /// Every page of accounts.
    pub async fn load_all_accounts(&self) -> Result<Loaded<Account>> {
        self.accounts.load_all(&self.accounts_url(), false).await
    }

    pub fn cached_accounts(&self) -> Option<Arc<Vec<Account>>> {
        self.accounts.cached(&self.accounts_url()).ok().flatten()
    }

    pub fn accounts_state(&self) -> CollectionState {
        self.accounts
            .state(&self.accounts_url())
            .unwrap_or_default()
    }

    /// Find a cached account by ID.
    pub fn find_account(&self, account_id: &str) -> Option<Account> {
        self.cached_accounts()?
            .iter()
            .find(|a| a.id == account_id)
            .cloned()
    }

    // --- Transactions ---

    /// First page of `account`'s transactions, from the cache when fresh.
    pub async fn load_transactions_for(&self, account: &Account) -> Result<Loaded<Transaction>> {
        self.transactions
            .load_first(&account.transactions_url, false)
            .await
    }

    /// First page of `account`'s transactions, always from the network.
    pub async fn reload_transactions_for(
        &self,
        account: &Account,
    ) -> Result<Loaded<Transaction>> {
        self.transactions
            .load_first(&account.transactions_url, true)
            .await
    }

    /// Merge the transactions page at `cursor` into `account`'s collection.
    pub async fn load_next_transactions(
        &self,
        account: &Account,
        cursor: Option<&str>,
    ) -> Result<Loaded<Transaction>> {
        self.transactions
            .load_next(&account.transactions_url, cursor)
            .await
    }

    /// Every page of `account`'s transactions.
    pub async fn load_all_transactions(&self, account: &Account) -> Result<Loaded<Transaction>> {
        self.transactions
            .load_all(&account.transactions_url, false)
            .await
    }

    /// Cached transactions of `account`. Read-only view for exporters.
    pub fn cached_transactions(&self, account: &Account) -> Option<Arc<Vec<Transaction>>> {
        self.transactions
            .cached(&account.transactions_url)
            .ok()
            .flatten()
    }

    pub fn transactions_state(&self, account: &Account) -> CollectionState {
        self.transactions
            .state(&account.transactions_url)
            .unwrap_or_default()
    }

    /// Records and state of `account`'s transactions, read together.
    pub fn transactions_snapshot(
        &self,
        account: &Account,
    ) -> Result<(Option<Arc<Vec<Transaction>>>, CollectionState)> {
        self.transactions.snapshot(&account.transactions_url)
    }

    // --- Generic ---

    /// Merge the page at `cursor` into `collection`.
    pub async fn load_next_page(
        &self,
        collection: &Collection<'_>,
        cursor: Option<&str>,
    ) -> Result<PageSummary> {
        match collection {
            Collection::Accounts => self
                .load_next_accounts(cursor)
                .await
                .map(PageSummary::from),
            Collection::Transactions(account) => self
                .load_next_transactions(account, cursor)
                .await
                .map(PageSummary::from),
        }
    }

    /// Drop every cached collection.
    pub fn invalidate_all(&self) {
        self.accounts.clear();
        self.transactions.clear();
    }

    pub fn invalidate_transactions(&self, account: &Account) -> Result<()> {
        self.transactions.invalidate(&account.transactions_url)
    }
}

/// A collection addressed by [`UpClient::load_next_page`].
#[derive(Debug, Clone, Copy)]
pub enum Collection<'a> {
    Accounts,
    Transactions(&'a Account),
}

/// Summary of a page load: merged record count and next cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSummary {
    pub total: usize,
    pub next: Option<String>,
    pub origin: LoadOrigin,
}

impl<R> From<Loaded<R>> for PageSummary {
    fn from(loaded: Loaded<R>) -> Self {
        Self {
            total: loaded.records.len(),
            next: loaded.next,
            origin: loaded.origin,
        }
    }
}
