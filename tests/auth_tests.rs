use async_trait::async_trait;
use httpmock::prelude::*;
use serde_json::json;
use serial_test::serial;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tigerbay::client::USER_AGENT;
use tigerbay::{
    Client, ClientCredentials, Config, ConstantCredentials, CredentialsError, CredentialsProvider,
    EnvCredentials, Error,
};

const TOKEN_PATH: &str = "/security/users/authenticate";

fn constant() -> ConstantCredentials {
    ConstantCredentials::new(ClientCredentials::new("website", "Secret"))
}

/// Counts how often credentials are requested
struct CountingCredentials {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl CredentialsProvider for CountingCredentials {
    async fn credentials(&self) -> Result<ClientCredentials, CredentialsError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ClientCredentials::new("website", "Secret"))
    }
}

struct RejectingCredentials;

#[async_trait]
impl CredentialsProvider for RejectingCredentials {
    async fn credentials(&self) -> Result<ClientCredentials, CredentialsError> {
        Err(CredentialsError::Other("vault sealed".to_string()))
    }
}

#[tokio::test]
async fn test_token_request_shape() {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .header("content-type", "application/x-www-form-urlencoded")
                .header("user-agent", USER_AGENT)
                .form_urlencoded_tuple("client_id", "website")
                .form_urlencoded_tuple("client_secret", "Secret")
                .form_urlencoded_tuple("grant_type", "client_credentials");
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 3600, "token_type": "Bearer"}));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), constant())).unwrap();
    assert_eq!(client.access_token().await.unwrap(), "abc");
    token_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_token_reused_within_validity_window() {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 3600, "token_type": "Bearer"}));
        })
        .await;
    let resource_mock = server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/sales/reservations/42")
                .header("authorization", "Bearer abc");
            then.status(200)
                .json_body(json!({"Id": 42, "CurrencyCode": "GBP"}));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), constant())).unwrap();
    for _ in 0..5 {
        let reservation = client.reservations().find(42).await.unwrap();
        assert_eq!(reservation.id, 42);
    }

    token_mock.assert_hits_async(1).await;
    resource_mock.assert_hits_async(5).await;
}

#[tokio::test]
async fn test_token_refreshed_after_expiry() {
    let server = MockServer::start_async().await;
    let first_token = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "first", "expires_in": 1, "token_type": "Bearer"}));
        })
        .await;
    let with_first = server
        .mock_async(|when, then| {
            when.method(GET).path("/setup/marketingSources").header("authorization", "Bearer first");
            then.status(200).json_body(json!([]));
        })
        .await;
    let with_second = server
        .mock_async(|when, then| {
            when.method(GET).path("/setup/marketingSources").header("authorization", "Bearer second");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), constant())).unwrap();
    client.setup().marketing_sources().await.unwrap();
    first_token.assert_hits_async(1).await;

    tokio::time::sleep(Duration::from_millis(1100)).await;
    first_token.delete_async().await;
    let second_token = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "second", "expires_in": 3600, "token_type": "Bearer"}));
        })
        .await;

    client.setup().marketing_sources().await.unwrap();
    client.setup().marketing_sources().await.unwrap();

    second_token.assert_hits_async(1).await;
    with_first.assert_hits_async(1).await;
    with_second.assert_hits_async(2).await;
}

#[tokio::test]
async fn test_credentials_failure_short_circuits() {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 3600}));
        })
        .await;
    let resource_mock = server
        .mock_async(|when, then| {
            when.path("/sales/reservations/42");
            then.status(200).json_body(json!({"Id": 42, "CurrencyCode": "GBP"}));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), RejectingCredentials)).unwrap();
    let err = client.reservations().find(42).await.unwrap_err();

    assert!(matches!(err, Error::Credentials(CredentialsError::Other(ref m)) if m == "vault sealed"));
    token_mock.assert_hits_async(0).await;
    resource_mock.assert_hits_async(0).await;
}

#[tokio::test]
#[serial]
async fn test_missing_env_credentials_short_circuit() {
    std::env::remove_var("TBTEST_CLIENT_ID");
    std::env::remove_var("TBTEST_CLIENT_SECRET");

    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 3600}));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), EnvCredentials::new("TBTEST"))).unwrap();
    let err = client.access_token().await.unwrap_err();

    assert_eq!(
        err.to_string(),
        "credentials unavailable: Client ID not set in TBTEST_CLIENT_ID"
    );
    token_mock.assert_hits_async(0).await;
}

#[tokio::test]
#[serial]
async fn test_env_credentials_used_for_token_exchange() {
    std::env::set_var("TBENV_CLIENT_ID", "foo");
    std::env::set_var("TBENV_CLIENT_SECRET", "bar");

    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path(TOKEN_PATH)
                .form_urlencoded_tuple("client_id", "foo")
                .form_urlencoded_tuple("client_secret", "bar");
            then.status(200)
                .json_body(json!({"access_token": "from-env", "expires_in": 3600}));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), EnvCredentials::new("TBENV"))).unwrap();
    assert_eq!(client.access_token().await.unwrap(), "from-env");
    token_mock.assert_hits_async(1).await;

    std::env::remove_var("TBENV_CLIENT_ID");
    std::env::remove_var("TBENV_CLIENT_SECRET");
}

#[tokio::test]
async fn test_auth_failure_sends_nothing_and_recovers() {
    let server = MockServer::start_async().await;
    let mut rejecting = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(401).body("invalid_client");
        })
        .await;
    let resource_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/sales/agents").header("authorization", "Bearer abc");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), constant())).unwrap();
    let err = client.agents().list().await.unwrap_err();

    match err {
        Error::Auth { status, ref message } => {
            assert_eq!(status, Some(401));
            assert!(message.contains("invalid_client"));
        }
        other => panic!("expected Error::Auth, got {:?}", other),
    }
    resource_mock.assert_hits_async(0).await;

    rejecting.delete_async().await;
    rejecting = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 3600}));
        })
        .await;

    client.agents().list().await.unwrap();
    rejecting.assert_hits_async(1).await;
    resource_mock.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_malformed_token_response_is_auth_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200).json_body(json!({"token": "abc"}));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), constant())).unwrap();
    let err = client.access_token().await.unwrap_err();
    assert!(matches!(err, Error::Auth { status: Some(200), .. }));
}

#[tokio::test]
async fn test_out_of_range_token_lifetime_is_auth_failure() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 1_000_000_000_000_000i64}));
        })
        .await;
    let resource_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/sales/agents");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), constant())).unwrap();
    let err = client.agents().list().await.unwrap_err();

    match err {
        Error::Auth { status, ref message } => {
            assert_eq!(status, Some(200));
            assert!(message.contains("invalid expires_in"));
        }
        other => panic!("expected Error::Auth, got {:?}", other),
    }
    resource_mock.assert_hits_async(0).await;
}

#[tokio::test]
async fn test_failed_refresh_never_reuses_expired_token() {
    let server = MockServer::start_async().await;
    let mut token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "stale", "expires_in": 1}));
        })
        .await;
    let with_stale = server
        .mock_async(|when, then| {
            when.method(GET).path("/sales/agents").header("authorization", "Bearer stale");
            then.status(200).json_body(json!([]));
        })
        .await;

    let client = Client::new(Config::new(server.base_url(), constant())).unwrap();
    client.agents().list().await.unwrap();
    with_stale.assert_hits_async(1).await;

    tokio::time::sleep(Duration::from_millis(1100)).await;
    token_mock.delete_async().await;
    token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(401).body("invalid_client");
        })
        .await;

    for _ in 0..2 {
        let err = client.agents().list().await.unwrap_err();
        assert!(matches!(err, Error::Auth { status: Some(401), .. }));
    }

    token_mock.assert_hits_async(2).await;
    with_stale.assert_hits_async(1).await;
}

#[tokio::test]
async fn test_separate_auth_url() {
    let auth_server = MockServer::start_async().await;
    let api_server = MockServer::start_async().await;

    let token_mock = auth_server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 3600}));
        })
        .await;
    let status_mock = api_server
        .mock_async(|when, then| {
            when.method(GET)
                .path("/nimble/toursearch/cache/status")
                .header("authorization", "Bearer abc");
            then.status(200)
                .json_body(json!({"ItemCount": 120, "AverageAgeSeconds": 42.5}));
        })
        .await;

    let config = Config::new(format!("{}/nimble", api_server.base_url()), constant())
        .with_auth_url(auth_server.base_url());
    let client = Client::new(config).unwrap();

    let stats = client.cache().status().await.unwrap();
    assert_eq!(stats.item_count, 120);
    token_mock.assert_hits_async(1).await;
    status_mock.assert_hits_async(1).await;
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_share_one_token_exchange() {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .delay(Duration::from_millis(200))
                .json_body(json!({"access_token": "abc", "expires_in": 3600}));
        })
        .await;
    let resource_mock = server
        .mock_async(|when, then| {
            when.method(GET).path("/sales/agents/3").header("authorization", "Bearer abc");
            then.status(200).json_body(json!({"Id": 3, "Name": "Ramblers"}));
        })
        .await;

    let calls = Arc::new(AtomicUsize::new(0));
    let provider = CountingCredentials { calls: calls.clone() };
    let client = Client::new(Config::new(server.base_url(), provider)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            tokio::spawn(async move { client.agents().find(3).await })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap().name, "Ramblers");
    }

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    token_mock.assert_hits_async(1).await;
    resource_mock.assert_hits_async(8).await;
}

#[tokio::test]
async fn test_separate_clients_do_not_share_tokens() {
    let server = MockServer::start_async().await;
    let token_mock = server
        .mock_async(|when, then| {
            when.method(POST).path(TOKEN_PATH);
            then.status(200)
                .json_body(json!({"access_token": "abc", "expires_in": 3600}));
        })
        .await;

    let first = Client::new(Config::new(server.base_url(), constant())).unwrap();
    let second = Client::new(Config::new(server.base_url(), constant())).unwrap();
    first.access_token().await.unwrap();
    second.access_token().await.unwrap();
    first.clone().access_token().await.unwrap();

    token_mock.assert_hits_async(2).await;
}
