//! Authentication handshake and session lifecycle tests

use repository_client::{Error, Repository};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

#[tokio::test]
async fn connect_sends_credentials_and_stores_the_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Tokens"))
        .and(body_json(json!({
            "userName": "admin",
            "password": "secret",
            "tenant": "tenant1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repo = common::client(&mock_server);
    assert_eq!(repo.token(), None);

    repo.connect(Some("tenant1"), "admin", "secret").await.unwrap();
    assert_eq!(repo.token().as_deref(), Some("abc"));
}

#[tokio::test]
async fn connect_without_tenant_omits_the_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Tokens"))
        .and(body_json(json!({
            "userName": "admin",
            "password": "secret",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repo = common::client(&mock_server);
    repo.connect(None, "admin", "secret").await.unwrap();
}

#[tokio::test]
async fn connect_by_api_token_uses_the_alternate_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Tokens"))
        .and(body_json(json!({
            "apiToken": "api-12345",
            "tenant": "tenant1",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "xyz"})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repo = common::client(&mock_server);
    repo.connect_by_api_token(Some("tenant1"), "api-12345")
        .await
        .unwrap();
    assert_eq!(repo.token().as_deref(), Some("xyz"));
}

#[tokio::test]
async fn connect_failure_leaves_the_session_unauthenticated() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Tokens"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(common::fault("AuthFailure", "bad credentials")),
        )
        .mount(&mock_server)
        .await;

    let repo = common::client(&mock_server);
    let err = repo.connect(None, "admin", "wrong").await.unwrap_err();

    assert_eq!(err.status(), Some(401));
    assert_eq!(err.to_string(), "bad credentials");
    assert_eq!(repo.token(), None);
}

#[tokio::test]
async fn calls_after_connect_carry_the_token_header() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Objects/widget/1"))
        .and(header("X-Auth-Token", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repo = common::client(&mock_server);
    repo.connect(None, "admin", "secret").await.unwrap();
    repo.objects().get("widget", 1).await.unwrap();
}

#[tokio::test]
async fn the_handshake_itself_is_anonymous() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .mount(&mock_server)
        .await;

    let repo = common::client(&mock_server);
    // A leftover token from an earlier session must not leak into the
    // new handshake.
    repo.set_token("stale");
    repo.connect(None, "admin", "secret").await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("X-Auth-Token"));
}

#[tokio::test]
async fn disconnect_invalidates_remotely_and_forgets_locally() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/Tokens/test-token"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let repo = common::connected(&mock_server);
    repo.disconnect().await.unwrap();

    assert_eq!(repo.token(), None);

    // Second disconnect is a no-op: no further DELETE (expect(1) above).
    repo.disconnect().await.unwrap();
}

#[tokio::test]
async fn disconnect_clears_the_token_even_when_the_server_fails() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/Tokens/test-token"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(common::fault("Internal", "token store unavailable")),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let repo = common::connected(&mock_server);
    let err = repo.disconnect().await.unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert_eq!(repo.token(), None);
    repo.disconnect().await.unwrap();
}

#[tokio::test]
async fn calls_after_disconnect_are_anonymous() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/Tokens/test-token"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/Objects/widget/1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&mock_server)
        .await;

    let repo = common::connected(&mock_server);
    repo.disconnect().await.unwrap();
    repo.objects().get("widget", 1).await.unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let get = requests
        .iter()
        .find(|r| r.url.path() == "/Objects/widget/1")
        .unwrap();
    assert!(!get.headers.contains_key("X-Auth-Token"));
}

#[tokio::test]
async fn raw_token_exchange_does_not_touch_the_session() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"token": "abc"})))
        .mount(&mock_server)
        .await;

    let repo: Repository = common::client(&mock_server);
    let token = repo.tokens().connect(None, "admin", "secret").await.unwrap();

    assert_eq!(token, "abc");
    // The low-level resource hands the token back without storing it.
    assert_eq!(repo.token(), None);
}

#[tokio::test]
async fn token_exchange_with_unexpected_body_is_an_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/Tokens"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"nope": true})))
        .mount(&mock_server)
        .await;

    let repo = common::client(&mock_server);
    let err = repo.connect(None, "admin", "secret").await.unwrap_err();
    assert!(matches!(err, Error::Serialization(_)));
}
