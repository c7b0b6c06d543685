//! End-to-end tests for `UpClient` against a local mock of the Up API.
//!
//! Each test mounts the pages it needs on a `wiremock::MockServer`, with
//! `.expect(n)` pinning how many requests the client is allowed to make.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde_json::{json, Value};
use upbank::{
    CollectionState, CredentialProvider, ErrorKind, FetchEventKind, FreshnessPolicy, LoadOrigin,
    StaticToken, UpClient, UpConfig, UpError,
};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "up:yeah:test-token";

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

fn config(server: &MockServer) -> UpConfig {
    UpConfig::default().with_base_url(format!("{}/api/v1", server.uri()))
}

fn client(server: &MockServer) -> UpClient {
    UpClient::new(config(server), StaticToken::new(TOKEN)).unwrap()
}

fn account(server: &MockServer, id: &str, name: &str) -> Value {
    json!({
        "type": "accounts",
        "id": id,
        "attributes": {
            "displayName": name,
            "accountType": "TRANSACTIONAL",
            "ownershipType": "INDIVIDUAL",
            "balance": { "currencyCode": "AUD", "value": "100.00", "valueInBaseUnits": 10000 },
            "createdAt": "2023-01-15T10:30:00+10:00"
        },
        "relationships": {
            "transactions": {
                "links": {
                    "related": format!("{}/api/v1/accounts/{id}/transactions", server.uri())
                }
            }
        },
        "links": { "self": format!("{}/api/v1/accounts/{id}", server.uri()) }
    })
}

fn transaction(id: &str) -> Value {
    json!({
        "type": "transactions",
        "id": id,
        "attributes": {
            "status": "SETTLED",
            "rawText": null,
            "description": format!("Merchant {id}"),
            "message": null,
            "isCategorizable": true,
            "holdInfo": null,
            "roundUp": null,
            "cashback": null,
            "amount": { "currencyCode": "AUD", "value": "-5.00", "valueInBaseUnits": -500 },
            "foreignAmount": null,
            "cardPurchaseMethod": null,
            "settledAt": "2024-03-02T09:00:00+11:00",
            "createdAt": "2024-03-01T09:00:00+11:00"
        }
    })
}

fn page(data: Vec<Value>, next: Option<String>) -> Value {
    json!({ "data": data, "links": { "prev": null, "next": next } })
}

fn ids<R: upbank::Resource>(records: &[R]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

/// Token that can be revoked and restored mid-test.
#[derive(Debug, Clone, Default)]
struct SwitchableToken(Arc<AtomicBool>);

impl SwitchableToken {
    fn set(&self, on: bool) {
        self.0.store(on, Ordering::SeqCst);
    }
}

impl CredentialProvider for SwitchableToken {
    fn token(&self) -> Option<String> {
        self.0.load(Ordering::SeqCst).then(|| TOKEN.to_string())
    }
}

async fn first_accounts(client: &UpClient) -> upbank::Account {
    client.load_accounts().await.unwrap().records[0].clone()
}

// ---------------------------------------------------------------------------
// Accounts
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_accounts_first_then_next_page() {
    let server = MockServer::start().await;
    let cursor = format!("{}/api/v1/accounts?after=X", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[size]", "10"))
        .and(header("authorization", format!("Bearer {TOKEN}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![account(&server, "a1", "💰 Spending"), account(&server, "a2", "Bills")],
            Some(cursor.clone()),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("after", "X"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![account(&server, "a3", "🏠 Home")], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);

    let first = client.load_accounts().await.unwrap();
    assert_eq!(first.origin, LoadOrigin::Network);
    assert_eq!(ids(&first.records), vec!["a1", "a2"]);
    assert_eq!(first.next.as_deref(), Some(cursor.as_str()));
    assert_eq!(
        client.accounts_state(),
        CollectionState::Ready {
            next: cursor.clone()
        }
    );
    assert_eq!(first.records[0].emoji.as_deref(), Some("💰"));
    assert_eq!(first.records[0].modified_display_name, " Spending");

    let second = client.load_next_accounts(first.next.as_deref()).await.unwrap();
    assert_eq!(ids(&second.records), vec!["a1", "a2", "a3"]);
    assert!(second.is_exhausted());
    assert_eq!(client.accounts_state(), CollectionState::Exhausted);
    assert_eq!(client.cached_accounts().unwrap().len(), 3);
}

#[tokio::test]
async fn test_load_next_without_cursor_is_noop() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], None)))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let loaded = client.load_next_accounts(None).await.unwrap();
    assert_eq!(loaded.origin, LoadOrigin::Skipped);
    assert!(loaded.records.is_empty());
    assert_eq!(client.accounts_state(), CollectionState::Idle);
}

// ---------------------------------------------------------------------------
// Credentials + errors
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_missing_credential_never_hits_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], None)))
        .expect(0)
        .mount(&server)
        .await;

    for creds in [StaticToken::none(), StaticToken::new(""), StaticToken::new("  ")] {
        let client = UpClient::new(config(&server), creds).unwrap();
        let err = client.load_accounts().await.unwrap_err();
        assert!(matches!(err, UpError::MissingCredential), "{err:?}");
        assert_eq!(
            client.accounts_state(),
            CollectionState::Failed(ErrorKind::MissingCredential)
        );
    }
}

#[tokio::test]
async fn test_unauthorized_is_distinguishable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "errors": [{
                "status": "401",
                "title": "Not Authorized",
                "detail": "The request was not authenticated because no valid credential was found."
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let mut events = client.subscribe_events();

    let err = client.load_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Unauthorized);
    assert!(err.is_unauthorized());
    assert!(err.user_message().contains("401"));
    assert!(!err.to_string().contains(TOKEN));
    assert!(!format!("{err:?}").contains(TOKEN));

    assert_eq!(
        events.try_next().map(|e| e.kind),
        Some(FetchEventKind::LoadingStarted { next_page: false })
    );
    assert_eq!(
        events.try_next().map(|e| e.kind),
        Some(FetchEventKind::Failed(ErrorKind::Unauthorized))
    );
    assert!(client.cached_accounts().is_none());
}

#[tokio::test]
async fn test_server_error_is_generic_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let err = client(&server).load_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Http(503));
    assert_eq!(
        err.user_message(),
        "The server returned an error with status code 503."
    );
}

#[tokio::test]
async fn test_timeout_is_not_a_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![], None))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let config = config(&server).with_timeout(Duration::from_millis(200));
    let client = UpClient::new(config, StaticToken::new(TOKEN)).unwrap();
    let err = client.load_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Timeout);
}

#[tokio::test]
async fn test_connection_refused() {
    // Nothing listens on the discard port.
    let config = UpConfig::default().with_base_url("http://127.0.0.1:9/api/v1");
    let client = UpClient::new(config, StaticToken::new(TOKEN)).unwrap();
    let err = client.load_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Connection);
}

#[tokio::test]
async fn test_malformed_cursor_fails_before_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![], None)))
        .expect(0)
        .mount(&server)
        .await;

    let client = client(&server);
    let err = client
        .load_next_accounts(Some("not a url"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidUrl);
    assert_eq!(
        client.accounts_state(),
        CollectionState::Failed(ErrorKind::InvalidUrl)
    );
}

#[tokio::test]
async fn test_account_without_transactions_link_is_decode_error() {
    let server = MockServer::start().await;
    let mut broken = account(&server, "a1", "Spending");
    broken["relationships"]["transactions"] = json!({ "data": [] });
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![broken], None)))
        .mount(&server)
        .await;

    let err = client(&server).load_accounts().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
    match err {
        UpError::Decode { context, cause } => {
            assert_eq!(context, "accounts page");
            assert!(cause.contains("links.related"), "{cause}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_overlapping_transaction_pages_merge_without_duplicates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![account(&server, "a1", "Spending")],
            None,
        )))
        .mount(&server)
        .await;

    let tx_path = "/api/v1/accounts/a1/transactions";
    let cursor = format!("{}{tx_path}?page[after]=t2", server.uri());
    Mock::given(method("GET"))
        .and(path(tx_path))
        .and(query_param("page[after]", "t2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![transaction("t2"), transaction("t3")],
            None,
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(tx_path))
        .and(query_param("page[size]", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![transaction("t1"), transaction("t2")],
            Some(cursor.clone()),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let account = first_accounts(&client).await;

    let first = client.load_transactions_for(&account).await.unwrap();
    assert_eq!(ids(&first.records), vec!["t1", "t2"]);

    let mut events = client.subscribe_events();
    let merged = client
        .load_next_transactions(&account, first.next.as_deref())
        .await
        .unwrap();
    assert_eq!(ids(&merged.records), vec!["t1", "t2", "t3"]);
    assert_eq!(
        ids(&client.cached_transactions(&account).unwrap()),
        vec!["t1", "t2", "t3"]
    );

    assert_eq!(
        events.try_next().map(|e| e.kind),
        Some(FetchEventKind::LoadingStarted { next_page: true })
    );
    assert_eq!(
        events.try_next().map(|e| e.kind),
        Some(FetchEventKind::PageReceived {
            added: 1,
            total: 3,
            next: None
        })
    );
}

#[tokio::test]
async fn test_load_all_transactions_walks_every_page() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![account(&server, "a1", "Spending")],
            None,
        )))
        .mount(&server)
        .await;

    let tx_path = "/api/v1/accounts/a1/transactions";
    let p2 = format!("{}{tx_path}?page[after]=p2", server.uri());
    let p3 = format!("{}{tx_path}?page[after]=p3", server.uri());
    Mock::given(method("GET"))
        .and(path(tx_path))
        .and(query_param("page[after]", "p3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![transaction("t5")], None)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(tx_path))
        .and(query_param("page[after]", "p2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![transaction("t3"), transaction("t4")],
            Some(p3),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(tx_path))
        .and(query_param("page[size]", "40"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![transaction("t1"), transaction("t2")],
            Some(p2),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let account = first_accounts(&client).await;
    let all = client.load_all_transactions(&account).await.unwrap();
    assert_eq!(ids(&all.records), vec!["t1", "t2", "t3", "t4", "t5"]);
    assert!(all.is_exhausted());
    assert_eq!(client.transactions_state(&account), CollectionState::Exhausted);
}

#[tokio::test]
async fn test_concurrent_next_page_is_deduplicated() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[size]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![account(&server, "a1", "Spending")],
            Some(format!("{}/api/v1/accounts?page[after]=a1", server.uri())),
        )))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[after]", "a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![account(&server, "a2", "Bills")], None))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    let first = client.load_accounts().await.unwrap();
    let cursor = first.next.clone();

    let (a, b) = tokio::join!(client.load_next_accounts(cursor.as_deref()), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(client.accounts_state().is_loading());
        client.load_next_accounts(cursor.as_deref()).await
    });

    let a = a.unwrap();
    let b = b.unwrap();
    assert_eq!(a.origin, LoadOrigin::Network);
    assert_eq!(b.origin, LoadOrigin::Skipped);
    assert_eq!(b.records.len(), 1);
    assert_eq!(b.next, cursor);
    assert!(!b.is_exhausted());
    assert_eq!(ids(&a.records), vec!["a1", "a2"]);
}

// ---------------------------------------------------------------------------
// Retry + in-flight guard
// ---------------------------------------------------------------------------

#[tokio::test]
async fn test_failed_next_page_can_be_retried() {
    let server = MockServer::start().await;
    let cursor = format!("{}/api/v1/accounts?page[after]=a1", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[size]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![account(&server, "a1", "Spending")],
            Some(cursor.clone()),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[after]", "a1"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[after]", "a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![account(&server, "a2", "Bills")], None)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.load_accounts().await.unwrap();

    let err = client.load_next_accounts(Some(&cursor)).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Http(500));
    assert_eq!(
        client.accounts_state(),
        CollectionState::Failed(ErrorKind::Http(500))
    );
    assert_eq!(ids(&client.cached_accounts().unwrap()), vec!["a1"]);

    // Cache is still fresh: records and cursor come back without a request.
    let again = client.load_accounts().await.unwrap();
    assert_eq!(again.origin, LoadOrigin::Cache);
    assert_eq!(again.next.as_deref(), Some(cursor.as_str()));
    assert!(!again.is_exhausted());
    assert_eq!(
        client.accounts_state(),
        CollectionState::Ready {
            next: cursor.clone()
        }
    );

    let retried = client
        .load_next_accounts(again.next.as_deref())
        .await
        .unwrap();
    assert_eq!(retried.origin, LoadOrigin::Network);
    assert_eq!(ids(&retried.records), vec!["a1", "a2"]);
    assert!(retried.is_exhausted());
    assert_eq!(client.accounts_state(), CollectionState::Exhausted);
}

#[tokio::test]
async fn test_missing_credential_keeps_in_flight_guard() {
    let server = MockServer::start().await;
    let cursor = format!("{}/api/v1/accounts?page[after]=a1", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[size]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![account(&server, "a1", "Spending")],
            Some(cursor.clone()),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[after]", "a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(vec![account(&server, "a2", "Bills")], None))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token = SwitchableToken::default();
    token.set(true);
    let client = UpClient::new(config(&server), token.clone()).unwrap();
    client.load_accounts().await.unwrap();

    let (a, b) = tokio::join!(client.load_next_accounts(Some(&cursor)), async {
        tokio::time::sleep(Duration::from_millis(50)).await;

        token.set(false);
        let reload = client.reload_accounts().await.unwrap();
        assert_eq!(reload.origin, LoadOrigin::Skipped);
        assert_eq!(reload.next.as_deref(), Some(cursor.as_str()));
        assert_eq!(
            client.accounts_state(),
            CollectionState::LoadingNextPage {
                cursor: cursor.clone()
            }
        );

        token.set(true);
        client.load_next_accounts(Some(&cursor)).await
    });

    assert_eq!(a.unwrap().origin, LoadOrigin::Network);
    assert_eq!(b.unwrap().origin, LoadOrigin::Skipped);
    assert_eq!(client.accounts_state(), CollectionState::Exhausted);
    assert_eq!(ids(&client.cached_accounts().unwrap()), vec!["a1", "a2"]);
}

#[tokio::test]
async fn test_load_first_during_in_flight_reload_is_skipped() {
    let server = MockServer::start().await;
    let cursor = format!("{}/api/v1/accounts?page[after]=a2", server.uri());

    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[size]", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![account(&server, "a1", "Spending")],
            Some(cursor.clone()),
        )))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .and(query_param("page[size]", "10"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(page(
                    vec![account(&server, "a1", "Spending"), account(&server, "a2", "Bills")],
                    Some(cursor.clone()),
                ))
                .set_delay(Duration::from_millis(300)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client(&server);
    client.load_accounts().await.unwrap();

    let (reloaded, skipped) = tokio::join!(client.reload_accounts(), async {
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(client.accounts_state(), CollectionState::Loading);
        client.load_accounts().await
    });

    let skipped = skipped.unwrap();
    assert_eq!(skipped.origin, LoadOrigin::Skipped);
    assert_eq!(ids(&skipped.records), vec!["a1"]);
    assert_eq!(skipped.next.as_deref(), Some(cursor.as_str()));
    assert!(!skipped.is_exhausted());

    let reloaded = reloaded.unwrap();
    assert_eq!(reloaded.origin, LoadOrigin::Network);
    assert_eq!(ids(&reloaded.records), vec!["a1", "a2"]);
    assert_eq!(
        client.accounts_state(),
        CollectionState::Ready { next: cursor }
    );
}

// ---------------------------------------------------------------------------
// Freshness
// ---------------------------------------------------------------------------

async fn mount_single_account_page(server: &MockServer, expected_calls: u64) {
    Mock::given(method("GET"))
        .and(path("/api/v1/accounts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(
            vec![account(server, "a1", "Spending")],
            None,
        )))
        .expect(expected_calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_always_refetch_policy_hits_network_twice() {
    let server = MockServer::start().await;
    mount_single_account_page(&server, 2).await;

    let config = config(&server).with_freshness(FreshnessPolicy::AlwaysRefetch);
    let client = UpClient::new(config, StaticToken::new(TOKEN)).unwrap();

    assert_eq!(client.load_accounts().await.unwrap().origin, LoadOrigin::Network);
    assert_eq!(client.load_accounts().await.unwrap().origin, LoadOrigin::Network);
}

#[tokio::test]
async fn test_ttl_policy_serves_second_load_from_cache() {
    let server = MockServer::start().await;
    mount_single_account_page(&server, 1).await;

    let config = config(&server).with_freshness(FreshnessPolicy::Ttl(Duration::from_secs(3600)));
    let client = UpClient::new(config, StaticToken::new(TOKEN)).unwrap();
    let mut events = client.subscribe_events();

    let first = client.load_accounts().await.unwrap();
    let second = client.load_accounts().await.unwrap();
    assert_eq!(first.origin, LoadOrigin::Network);
    assert_eq!(second.origin, LoadOrigin::Cache);
    assert_eq!(ids(&second.records), vec!["a1"]);

    let kinds: Vec<FetchEventKind> = std::iter::from_fn(|| events.try_next())
        .map(|e| e.kind)
        .collect();
    assert_eq!(
        kinds,
        vec![
            FetchEventKind::LoadingStarted { next_page: false },
            FetchEventKind::PageReceived {
                added: 1,
                total: 1,
                next: None
            },
            FetchEventKind::ServedFromCache { total: 1 },
        ]
    );
}

#[tokio::test]
async fn test_reload_and_invalidate_bypass_cache() {
    let server = MockServer::start().await;
    mount_single_account_page(&server, 3).await;

    let client = client(&server);
    client.load_accounts().await.unwrap();
    assert_eq!(client.reload_accounts().await.unwrap().origin, LoadOrigin::Network);

    client.invalidate_all();
    assert!(client.cached_accounts().is_none());
    assert_eq!(client.accounts_state(), CollectionState::Idle);
    assert_eq!(client.load_accounts().await.unwrap().origin, LoadOrigin::Network);
}
