//! Integration tests for multi-cluster key derivation
//!
//! **Coverage:**
//! - First derivation exchanges once, later ones hit the context cache
//! - Rejected tokens (401/403) and unexpected statuses leave the cache empty
//! - Expired entries trigger a new exchange
//! - Cache disabled and single-cluster modes never touch the network
//!
//! **Infrastructure:**
//! - WireMock HTTP server standing in for the token exchange endpoint
//! - `ClavisContext` with real moka cache and reqwest client

use std::time::Duration;

use clavis_core::BaseKey;
use clavis_domain::{BearerToken, CacheSettings, ClavisError, ListOptions, ResourceKind};
use clavis_infra::ClavisContext;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const EXCHANGE_PATH: &str = "/api/v1/token/exchange";

fn cluster_settings(server: &MockServer) -> CacheSettings {
    CacheSettings::with_cluster_context(format!("{}{EXCHANGE_PATH}", server.uri()))
}

fn web_pods() -> ListOptions {
    ListOptions::default().with_label_selector("app=web")
}

async fn derive(context: &ClavisContext, token: &str) -> Result<String, ClavisError> {
    context
        .derive_key(ResourceKind::Pod, "default", token, web_pods())
        .await
        .map(|key| key.expect("caching is enabled"))
}

async fn mount_context(server: &MockServer, token: &str, context_id: &str, calls: u64) {
    Mock::given(method("GET"))
        .and(path(EXCHANGE_PATH))
        .and(header("authorization", format!("Bearer {token}").as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(context_id))
        .expect(calls)
        .mount(server)
        .await;
}

#[tokio::test]
async fn exchanges_once_then_hits_cache() {
    let server = MockServer::start().await;
    mount_context(&server, "abc", "ctx-42", 1).await;

    let context = ClavisContext::initialize(cluster_settings(&server)).unwrap();

    let first = derive(&context, "abc").await.unwrap();
    let second = derive(&context, "abc").await.unwrap();

    assert_eq!(first, second);
    assert_eq!(context.metrics().snapshot().exchanges, 1);
    assert_eq!(context.metrics().snapshot().cache_hits, 1);

    server.verify().await;
}

#[tokio::test]
async fn digest_depends_on_context_not_token() {
    let server = MockServer::start().await;
    mount_context(&server, "abc", "ctx-42", 1).await;
    mount_context(&server, "other-token", "ctx-42", 1).await;
    mount_context(&server, "third-token", "ctx-7", 1).await;

    let context = ClavisContext::initialize(cluster_settings(&server)).unwrap();

    let abc = derive(&context, "abc").await.unwrap();
    let same_cluster = derive(&context, "other-token").await.unwrap();
    let other_cluster = derive(&context, "third-token").await.unwrap();

    assert_eq!(abc, same_cluster);
    assert_ne!(abc, other_cluster);

    let base = BaseKey::new(ResourceKind::Pod, "default", web_pods()).digest().unwrap();
    assert_ne!(abc, base);
}

#[tokio::test]
async fn forbidden_fails_and_leaves_cache_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EXCHANGE_PATH))
        .respond_with(ResponseTemplate::new(403))
        .expect(2)
        .mount(&server)
        .await;

    let context = ClavisContext::initialize(cluster_settings(&server)).unwrap();

    let err = derive(&context, "abc").await.unwrap_err();
    assert_eq!(err, ClavisError::Unauthorized("could not exchange token: 403 Forbidden".into()));

    context.cache().run_pending_tasks();
    assert_eq!(context.cache().entry_count(), 0);

    // Nothing was cached, so the next attempt goes upstream again.
    assert!(derive(&context, "abc").await.is_err());
    assert_eq!(context.metrics().snapshot().unauthorized, 2);
}

#[tokio::test]
async fn unauthorized_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let context = ClavisContext::initialize(cluster_settings(&server)).unwrap();

    let err = derive(&context, "abc").await.unwrap_err();
    assert!(matches!(err, ClavisError::Unauthorized(_)));
}

#[tokio::test]
async fn server_error_is_bad_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let context = ClavisContext::initialize(cluster_settings(&server)).unwrap();

    let err = derive(&context, "abc").await.unwrap_err();
    assert_eq!(err, ClavisError::BadRequest("500 Internal Server Error".into()));
    assert_eq!(context.metrics().snapshot().bad_requests, 1);
}

#[tokio::test]
async fn expired_context_is_exchanged_again() {
    let server = MockServer::start().await;
    mount_context(&server, "abc", "ctx-42", 2).await;

    let settings = CacheSettings { cache_ttl_seconds: 1, ..cluster_settings(&server) };
    let context = ClavisContext::initialize(settings).unwrap();

    let first = derive(&context, "abc").await.unwrap();
    tokio::time::sleep(Duration::from_millis(1100)).await;
    let second = derive(&context, "abc").await.unwrap();

    assert_eq!(first, second);
    server.verify().await;
}

#[tokio::test]
async fn single_cluster_mode_never_exchanges() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let context = ClavisContext::initialize(CacheSettings {
        token_exchange_endpoint: Some(format!("{}{EXCHANGE_PATH}", server.uri())),
        ..CacheSettings::default()
    })
    .unwrap();

    let key = derive(&context, "abc").await.unwrap();
    let base = BaseKey::new(ResourceKind::Pod, "default", web_pods()).digest().unwrap();

    assert_eq!(key, base);
    server.verify().await;
}

#[tokio::test]
async fn disabled_cache_derives_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("GET")).respond_with(ResponseTemplate::new(200)).expect(0).mount(&server).await;

    let settings = CacheSettings { cache_enabled: false, ..cluster_settings(&server) };
    let context = ClavisContext::initialize(settings).unwrap();

    let key = context
        .derive_key(ResourceKind::Pod, "default", BearerToken::from("abc"), web_pods())
        .await
        .unwrap();

    assert_eq!(key, None);
    server.verify().await;
}

#[tokio::test]
async fn unreachable_endpoint_is_network_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let context = ClavisContext::initialize(CacheSettings::with_cluster_context(format!(
        "http://{addr}{EXCHANGE_PATH}"
    )))
    .unwrap();

    let err = derive(&context, "abc").await.unwrap_err();
    assert!(matches!(err, ClavisError::Network(_)));
}
