//! Integration tests for the authenticated request gateway

mod common;

use common::{RecordingNavigator, admin_client, init_test_tracing, signed_in_storage};
use herald_core::{KeyValueStore, MemoryStore, TOKEN_EXPIRATION_KEY, TOKEN_KEY};
use herald_http::{GatewayError, RequestOptions};
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Method, StatusCode};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_attaches_persisted_token() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/raids"))
        .and(header("authorization", "Bearer abc.def.ghi"))
        .and(header("content-type", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = signed_in_storage("abc.def.ghi");
    let client = admin_client(&mock_server.uri(), &storage, &RecordingNavigator::default());

    let response = client
        .gateway()
        .request("/raids", RequestOptions::get())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reads_token_at_call_time() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/links"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let storage = MemoryStore::new();
    let client = admin_client(&mock_server.uri(), &storage, &RecordingNavigator::default());

    client
        .gateway()
        .request("/links", RequestOptions::get())
        .await
        .unwrap();

    // Another tab logs in between the two calls
    storage.set(TOKEN_KEY, "fresh.token.value").unwrap();
    client
        .gateway()
        .request("/links", RequestOptions::get())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].headers.get("authorization").is_none());
    assert_eq!(
        requests[1].headers.get("authorization").unwrap(),
        "Bearer fresh.token.value"
    );
}

#[tokio::test]
async fn test_caller_headers_and_body_are_forwarded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/arts/a1"))
        .and(header("content-type", "application/merge-patch+json"))
        .and(header("authorization", "Bearer t.o.k"))
        .and(body_json(json!({ "approved": true })))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = signed_in_storage("t.o.k");
    let client = admin_client(&mock_server.uri(), &storage, &RecordingNavigator::default());

    let options = RequestOptions::put()
        .header(CONTENT_TYPE, HeaderValue::from_static("application/merge-patch+json"))
        .json(&json!({ "approved": true }))
        .unwrap();
    let response = client.gateway().request("/arts/a1", options).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_unauthorized_erases_credential_and_hard_redirects() {
    init_test_tracing();
    let mock_server = MockServer::start().await;

    Mock::given(path("/raids/r1"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&mock_server)
        .await;

    for verb in [Method::GET, Method::POST, Method::PUT, Method::DELETE] {
        let storage = signed_in_storage("revoked.token.value");
        let navigator = RecordingNavigator::default();
        let client = admin_client(&mock_server.uri(), &storage, &navigator);

        let response = client
            .gateway()
            .request("/raids/r1", RequestOptions::new(verb.clone()))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{verb}");
        assert_eq!(response.text().await.unwrap(), "Unauthorized");
        assert_eq!(storage.get(TOKEN_KEY), None, "{verb}");
        assert_eq!(storage.get(TOKEN_EXPIRATION_KEY), None, "{verb}");
        assert_eq!(*navigator.hard_redirects.borrow(), vec!["/".to_string()]);
        assert!(navigator.replaced.borrow().is_empty());
    }
}

#[tokio::test]
async fn test_unauthorized_without_credential_still_redirects() {
    let mock_server = MockServer::start().await;

    Mock::given(path("/links"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let storage = MemoryStore::new();
    let navigator = RecordingNavigator::default();
    let client = admin_client(&mock_server.uri(), &storage, &navigator);

    client
        .gateway()
        .request("/links", RequestOptions::get())
        .await
        .unwrap();

    assert!(storage.is_empty());
    assert_eq!(navigator.hard_redirects.borrow().len(), 1);
}

#[tokio::test]
async fn test_other_errors_are_returned_untouched() {
    let mock_server = MockServer::start().await;

    for status in [403u16, 404, 500] {
        Mock::given(path(format!("/status/{status}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&mock_server)
            .await;
    }

    let storage = signed_in_storage("still.valid.token");
    let navigator = RecordingNavigator::default();
    let client = admin_client(&mock_server.uri(), &storage, &navigator);

    for status in [403u16, 404, 500] {
        let response = client
            .gateway()
            .request(&format!("/status/{status}"), RequestOptions::get())
            .await
            .unwrap();
        assert_eq!(response.status().as_u16(), status);
    }

    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("still.valid.token"));
    assert!(navigator.hard_redirects.borrow().is_empty());
}

#[tokio::test]
async fn test_transport_failure_propagates() {
    init_test_tracing();
    // Nothing listens on the discard port
    let storage = signed_in_storage("a.b.c");
    let navigator = RecordingNavigator::default();
    let client = admin_client("http://127.0.0.1:9", &storage, &navigator);

    let result = client.gateway().request("/raids", RequestOptions::get()).await;

    assert!(matches!(result, Err(GatewayError::Transport(_))));
    assert_eq!(storage.get(TOKEN_KEY).as_deref(), Some("a.b.c"));
    assert!(navigator.hard_redirects.borrow().is_empty());
}

#[tokio::test]
async fn test_trailing_slash_in_base_url_is_trimmed() {
    let mock_server = MockServer::start().await;

    Mock::given(path("/raids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let storage = MemoryStore::new();
    let client = admin_client(
        &format!("{}/", mock_server.uri()),
        &storage,
        &RecordingNavigator::default(),
    );
    assert_eq!(client.gateway().base_url(), mock_server.uri());

    client
        .gateway()
        .request("/raids", RequestOptions::get())
        .await
        .unwrap();
}
