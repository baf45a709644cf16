//! Integration tests for the Clinio client: header injection, status
//! policies, and connectivity probing against a mock API.

use clinio_core::{
    ClientConfig, ClientEvent, CredentialStore, FixedLocation, MemoryCredentialStore, MemorySink,
    Navigator,
};
use clinio_sdk::{ClinioClient, DEFAULT_ERROR_MESSAGE};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

struct Harness {
    client: ClinioClient,
    store: Arc<MemoryCredentialStore>,
    navigator: Arc<FixedLocation>,
    events: Arc<MemorySink>,
}

fn harness(base_url: &str, hostname: &str, page: &str) -> Harness {
    let config = ClientConfig::default().with_redirect_delay(Duration::from_millis(10));
    let store = Arc::new(MemoryCredentialStore::new());
    let navigator = Arc::new(FixedLocation::new(hostname, page));
    let events = Arc::new(MemorySink::new());

    let client = ClinioClient::builder()
        .config(config)
        .base_url(base_url)
        .credential_store(store.clone())
        .navigator(navigator.clone())
        .event_sink(events.clone())
        .build()
        .expect("client should build");

    Harness {
        client,
        store,
        navigator,
        events,
    }
}

#[tokio::test]
async fn sends_auth_and_tenant_headers() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/dashboard");
    h.store.set_token("tok123");

    Mock::given(method("GET"))
        .and(path("/v1/patients/"))
        .and(header("Authorization", "Token tok123"))
        .and(header("X-Tenant-Subdomain", "northside"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&server)
        .await;

    let result: Value = h.client.get("/v1/patients/").await.unwrap();
    assert_eq!(result, json!({"items": []}));
}

#[tokio::test]
async fn omits_headers_without_token_or_tenant() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "localhost", "/");

    Mock::given(method("GET"))
        .and(path("/v1/services/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let _: Value = h.client.get("/v1/services/").await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key("Authorization"));
    assert!(!requests[0].headers.contains_key("X-Tenant-Subdomain"));
}

#[tokio::test]
async fn tenant_change_after_construction_is_honored() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "localhost", "/");

    // A single-page navigation moves the session onto a tenant host.
    h.navigator.navigate("http://lakeview.localhost/agenda");

    Mock::given(method("GET"))
        .and(path("/v1/agenda/"))
        .and(header("X-Tenant-Subdomain", "lakeview"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let _: Value = h.client.get("/v1/agenda/").await.unwrap();
}

#[tokio::test]
async fn unauthorized_clears_credentials_and_redirects_to_login() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/dashboard");
    h.store.set_token("stale");
    h.store.set_user_data(r#"{"id":1}"#);

    Mock::given(method("GET"))
        .and(path("/v1/me/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid token"})))
        .mount(&server)
        .await;

    let err = h.client.get::<Value>("/v1/me/").await.unwrap_err();

    assert_eq!(err.status_code(), Some(401));
    assert!(h.store.token().is_none());
    assert!(h.store.user_data().is_none());
    assert_eq!(h.navigator.visited(), vec!["/login".to_string()]);
    assert_eq!(
        h.events.events(),
        vec![ClientEvent::SessionExpired {
            redirect_to: Some("/login".to_string())
        }]
    );
    // Tenant context survives.
    assert_eq!(h.navigator.hostname(), "northside.localhost");
}

#[tokio::test]
async fn unauthorized_on_login_page_does_not_navigate() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/login");
    h.store.set_token("stale");

    Mock::given(method("GET"))
        .and(path("/v1/me/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid token"})))
        .mount(&server)
        .await;

    let _ = h.client.get::<Value>("/v1/me/").await.unwrap_err();

    assert!(h.store.token().is_none());
    assert!(h.navigator.visited().is_empty());
    assert_eq!(
        h.events.events(),
        vec![ClientEvent::SessionExpired { redirect_to: None }]
    );
}

#[tokio::test]
async fn dead_tenant_publishes_event_and_leaves_after_delay() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/dashboard");

    Mock::given(method("GET"))
        .and(path("/v1/patients/"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(json!({"error": "Tenant 'northside' not found"})),
        )
        .mount(&server)
        .await;

    let err = h.client.get::<Value>("/v1/patients/").await.unwrap_err();
    assert_eq!(err.status_code(), Some(404));

    assert_eq!(
        h.events.events(),
        vec![ClientEvent::TenantNotFound {
            tenant_id: "northside".to_string(),
            display_name: "Clinic Northside".to_string(),
            redirect_to: "http://localhost:5173".to_string(),
        }]
    );
    // The redirect runs after the configured grace period.
    assert!(h.navigator.visited().is_empty());
    tokio::time::sleep(Duration::from_millis(100)).await;
    assert_eq!(h.navigator.visited(), vec!["http://localhost:5173".to_string()]);
}

#[tokio::test]
async fn ordinary_not_found_stays_with_the_caller() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/dashboard");

    Mock::given(method("GET"))
        .and(path("/v1/patients/99/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"error": "No such patient"})))
        .mount(&server)
        .await;

    let err = h.client.get::<Value>("/v1/patients/99/").await.unwrap_err();

    assert_eq!(err.status_code(), Some(404));
    assert!(h.events.events().is_empty());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(h.navigator.visited().is_empty());
}

#[tokio::test]
async fn forbidden_publishes_event_without_navigation() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/settings");

    Mock::given(method("DELETE"))
        .and(path("/v1/users/3/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"error": "Not allowed"})))
        .mount(&server)
        .await;

    let err = h.client.delete("/v1/users/3/").await.unwrap_err();

    assert_eq!(err.status_code(), Some(403));
    assert_eq!(h.events.events(), vec![ClientEvent::ActionForbidden]);
    assert!(h.navigator.visited().is_empty());
}

#[tokio::test]
async fn server_fault_publishes_event_and_propagates() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "localhost", "/");

    Mock::given(method("POST"))
        .and(path("/v1/appointments/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "boom"})))
        .mount(&server)
        .await;

    let err = h
        .client
        .post::<Value, _>("/v1/appointments/", &json!({"patient": 1}))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), Some(500));
    assert_eq!(h.events.events(), vec![ClientEvent::ServerFault]);
}

#[tokio::test]
async fn unclassified_status_has_no_policy() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "localhost", "/");
    h.store.set_token("tok");

    Mock::given(method("GET"))
        .and(path("/v1/teapot/"))
        .respond_with(ResponseTemplate::new(418).set_body_json(json!({"error": "short and stout"})))
        .mount(&server)
        .await;

    let err = h.client.get::<Value>("/v1/teapot/").await.unwrap_err();

    assert_eq!(err.status_code(), Some(418));
    assert!(h.events.events().is_empty());
    assert!(h.navigator.visited().is_empty());
    assert_eq!(h.store.token().as_deref(), Some("tok"));
}

#[tokio::test]
async fn check_connection_reports_tenant_and_version() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "localhost", "/");

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"tenant": "public", "version": "1.4.2"})),
        )
        .mount(&server)
        .await;

    let status = h.client.check_connection().await;

    assert!(status.connected);
    assert_eq!(status.tenant.as_deref(), Some("public"));
    assert_eq!(status.version.as_deref(), Some("1.4.2"));
    assert!(status.error.is_none());
}

#[tokio::test]
async fn check_connection_wraps_api_failures() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "localhost", "/");

    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "database down"})))
        .mount(&server)
        .await;

    let status = h.client.check_connection().await;

    assert!(!status.connected);
    let envelope = status.error.expect("failure should carry an envelope");
    assert_eq!(envelope.message, "database down");
    assert_eq!(envelope.status, Some(500));
}

#[tokio::test]
async fn check_connection_survives_unreachable_host() {
    // Nothing listens here; the probe must fail fast and still return.
    let h = harness("http://127.0.0.1:9", "localhost", "/");

    let status = h.client.check_connection().await;

    assert!(!status.connected);
    let envelope = status.error.expect("failure should carry an envelope");
    assert!(!envelope.message.is_empty());
    assert_ne!(envelope.message, DEFAULT_ERROR_MESSAGE);
}

#[tokio::test]
async fn login_persists_token_and_user() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/login");

    Mock::given(method("POST"))
        .and(path("/v1/auth/login/"))
        .and(body_json(json!({"email": "ana@clinio.app", "password": "s3cret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "message": "Login successful",
            "user": {"id": 7, "email": "ana@clinio.app"},
            "token": "tok-abc"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = h.client.login("ana@clinio.app", "s3cret").await.unwrap();

    assert_eq!(response.token, "tok-abc");
    assert_eq!(h.store.token().as_deref(), Some("tok-abc"));
    let user_data = h.store.user_data().expect("user record should be stored");
    assert!(user_data.contains("\"id\":7"));
}

#[tokio::test]
async fn failed_login_stores_nothing() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/login");

    Mock::given(method("POST"))
        .and(path("/v1/auth/login/"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error": "Bad credentials"})))
        .mount(&server)
        .await;

    let err = h.client.login("ana@clinio.app", "wrong").await.unwrap_err();

    assert_eq!(err.status_code(), Some(400));
    assert!(h.store.token().is_none());
}

#[tokio::test]
async fn logout_clears_credentials_even_when_server_fails() {
    let server = MockServer::start().await;
    let h = harness(&server.uri(), "northside.localhost", "/dashboard");
    h.store.set_token("tok");
    h.store.set_user_data(r#"{"id":1}"#);

    Mock::given(method("POST"))
        .and(path("/v1/auth/logout/"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
        .mount(&server)
        .await;

    h.client.logout().await;

    assert!(h.store.token().is_none());
    assert!(h.store.user_data().is_none());
}
