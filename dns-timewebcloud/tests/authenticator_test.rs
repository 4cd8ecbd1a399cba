//! Timeweb Cloud DNS-01 authenticator tests
//!
//! 运行方式:
//! ```bash
//! cargo test -p dns-timewebcloud --test authenticator_test
//! ```

mod common;

use common::{
    authenticator, mount_account_status, mount_active_account, mount_fake_dns, request_count,
    unique_token,
};
use dns_timewebcloud::{ChallengeKey, Dns01Authenticator, PluginError, TimewebAuthenticator};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const DOMAIN: &str = "example.org";
const VALIDATION_NAME: &str = "_acme-challenge.example.org.";

// ============ perform ============

#[tokio::test]
async fn test_perform_then_cleanup_scenario() {
    let server = MockServer::start().await;
    mount_active_account(&server).await;

    Mock::given(method("POST"))
        .and(path("/api/v1/domains/example.org/dns-records"))
        .and(body_json(json!({
            "subdomain": "_acme-challenge",
            "type": "TXT",
            "value": "abc123"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "dns_record": {"id": 42, "type": "TXT"}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/domains/example.org/dns-records/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut auth = authenticator(&server);
    auth.perform(DOMAIN, VALIDATION_NAME, "abc123").await.unwrap();

    assert_eq!(auth.pending_records(DOMAIN, VALIDATION_NAME), Some(&[42][..]));
    assert_eq!(auth.pending_cleanup().len(), 1);
    assert!(
        auth.pending_cleanup()
            .contains_key(&ChallengeKey::new(VALIDATION_NAME, DOMAIN))
    );

    auth.cleanup(DOMAIN, VALIDATION_NAME, "abc123").await.unwrap();
    assert!(auth.pending_cleanup().is_empty());
}

#[tokio::test]
async fn test_perform_twice_tracks_both_records() {
    let server = MockServer::start().await;
    mount_active_account(&server).await;
    let dns = mount_fake_dns(&server).await;

    let mut auth = authenticator(&server);
    auth.perform(DOMAIN, VALIDATION_NAME, &unique_token())
        .await
        .unwrap();
    auth.perform(DOMAIN, VALIDATION_NAME, &unique_token())
        .await
        .unwrap();

    assert_eq!(auth.pending_records(DOMAIN, VALIDATION_NAME).unwrap().len(), 2);
    assert_eq!(dns.record_count(), 2);

    auth.cleanup(DOMAIN, VALIDATION_NAME, "").await.unwrap();
    assert_eq!(dns.record_count(), 0);
    assert!(auth.pending_cleanup().is_empty());
}

#[tokio::test]
async fn test_perform_keeps_challenges_apart() {
    let server = MockServer::start().await;
    mount_active_account(&server).await;
    let dns = mount_fake_dns(&server).await;

    let mut auth = authenticator(&server);
    auth.perform("example.org", "_acme-challenge.example.org.", "a")
        .await
        .unwrap();
    auth.perform("example.org", "_acme-challenge.www.example.org.", "b")
        .await
        .unwrap();
    assert_eq!(auth.pending_cleanup().len(), 2);

    auth.cleanup("example.org", "_acme-challenge.www.example.org.", "b")
        .await
        .unwrap();
    assert_eq!(dns.record_count(), 1);
    assert!(
        auth.pending_records("example.org", "_acme-challenge.example.org.")
            .is_some()
    );
}

#[tokio::test]
async fn test_perform_missing_status_stops_before_create() {
    let server = MockServer::start().await;
    mount_account_status(&server, json!({"response_id": "f0a3"})).await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let mut auth = authenticator(&server);
    let err = auth
        .perform(DOMAIN, VALIDATION_NAME, "abc123")
        .await
        .unwrap_err();

    assert!(err.is_response_shape());
    assert!(matches!(
        err,
        PluginError::MissingField { ref field, .. } if field == "status"
    ));
    assert!(auth.pending_cleanup().is_empty());
}

#[tokio::test]
async fn test_perform_blocked_account() {
    let server = MockServer::start().await;
    mount_account_status(&server, json!({"status": {"is_blocked": true}})).await;

    let mut auth = authenticator(&server);
    let err = auth
        .perform(DOMAIN, VALIDATION_NAME, "abc123")
        .await
        .unwrap_err();

    assert!(matches!(err, PluginError::AccountBlocked { .. }));
    assert_eq!(request_count(&server, "POST").await, 0);
    assert!(auth.pending_cleanup().is_empty());
}

#[tokio::test]
async fn test_perform_token_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/v1/account/status"))
        .respond_with(ResponseTemplate::new(403).set_body_string("forbidden"))
        .expect(1)
        .mount(&server)
        .await;

    let mut auth = authenticator(&server);
    let err = auth
        .perform(DOMAIN, VALIDATION_NAME, "abc123")
        .await
        .unwrap_err();
    assert!(matches!(err, PluginError::HttpStatus { status: 403, .. }));
}

#[tokio::test]
async fn test_perform_create_failure_leaves_map_unchanged() {
    let server = MockServer::start().await;
    mount_active_account(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/domains/example.org/dns-records"))
        .respond_with(ResponseTemplate::new(500).set_body_string("internal error"))
        .expect(1)
        .mount(&server)
        .await;

    let mut auth = authenticator(&server);
    let err = auth
        .perform(DOMAIN, VALIDATION_NAME, "abc123")
        .await
        .unwrap_err();

    assert!(matches!(err, PluginError::HttpStatus { status: 500, .. }));
    assert!(auth.pending_records(DOMAIN, VALIDATION_NAME).is_none());
}

#[tokio::test]
async fn test_perform_without_credentials() {
    let mut auth = TimewebAuthenticator::new();
    let err = auth
        .perform(DOMAIN, VALIDATION_NAME, "abc123")
        .await
        .unwrap_err();
    assert!(matches!(err, PluginError::Configuration { .. }));
}

// ============ cleanup ============

#[tokio::test]
async fn test_cleanup_unknown_challenge_sends_nothing() {
    let server = MockServer::start().await;
    let mut auth = authenticator(&server);

    auth.cleanup(DOMAIN, VALIDATION_NAME, "abc123").await.unwrap();

    let received = server.received_requests().await.unwrap_or_default();
    assert!(received.is_empty(), "unexpected requests: {received:?}");
}

#[tokio::test]
async fn test_cleanup_twice_is_noop_the_second_time() {
    let server = MockServer::start().await;
    mount_active_account(&server).await;
    let dns = mount_fake_dns(&server).await;

    let mut auth = authenticator(&server);
    auth.perform(DOMAIN, VALIDATION_NAME, "abc123").await.unwrap();

    auth.cleanup(DOMAIN, VALIDATION_NAME, "abc123").await.unwrap();
    assert_eq!(dns.record_count(), 0);
    assert_eq!(request_count(&server, "DELETE").await, 1);

    auth.cleanup(DOMAIN, VALIDATION_NAME, "abc123").await.unwrap();
    assert_eq!(request_count(&server, "DELETE").await, 1);
}

#[tokio::test]
async fn test_cleanup_record_already_gone() {
    let server = MockServer::start().await;
    mount_active_account(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/domains/example.org/dns-records"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "dns_record": {"id": 5}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/domains/example.org/dns-records/5"))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let mut auth = authenticator(&server);
    auth.perform(DOMAIN, VALIDATION_NAME, "abc123").await.unwrap();
    auth.cleanup(DOMAIN, VALIDATION_NAME, "abc123").await.unwrap();

    assert!(auth.pending_cleanup().is_empty());
}

#[tokio::test]
async fn test_cleanup_failure_keeps_undeleted_records() {
    let server = MockServer::start().await;
    mount_active_account(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/v1/domains/example.org/dns-records"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "dns_record": {"id": 1}
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/v1/domains/example.org/dns-records"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "dns_record": {"id": 2}
        })))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/domains/example.org/dns-records/1"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/v1/domains/example.org/dns-records/2"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut auth = authenticator(&server);
    auth.perform(DOMAIN, VALIDATION_NAME, "first").await.unwrap();
    auth.perform(DOMAIN, VALIDATION_NAME, "second").await.unwrap();
    assert_eq!(auth.pending_records(DOMAIN, VALIDATION_NAME), Some(&[1, 2][..]));

    let err = auth
        .cleanup(DOMAIN, VALIDATION_NAME, "")
        .await
        .unwrap_err();
    assert!(matches!(err, PluginError::HttpStatus { status: 502, .. }));
    assert_eq!(auth.pending_records(DOMAIN, VALIDATION_NAME), Some(&[1][..]));
}
