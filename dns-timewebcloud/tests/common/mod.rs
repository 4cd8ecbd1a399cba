//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use dns_timewebcloud::{TimewebAuthenticator, TimewebClient};
use serde_json::{Value, json};
use wiremock::matchers::{header, method, path, path_regex};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const API_KEY: &str = "test-api-key";
pub const BEARER: &str = "Bearer test-api-key";

/// 生成唯一的验证值
pub fn unique_token() -> String {
    format!("acme-{}", uuid::Uuid::new_v4().simple())
}

/// Client pointed at the mock server.
pub fn client(server: &MockServer) -> TimewebClient {
    TimewebClient::with_base_url(API_KEY, server.uri()).expect("client should build")
}

/// Authenticator whose credentials point at the mock server.
pub fn authenticator(server: &MockServer) -> TimewebAuthenticator {
    let credentials: HashMap<String, String> = [
        ("api_key".to_string(), API_KEY.to_string()),
        ("api_url".to_string(), server.uri()),
    ]
    .into();

    let mut authenticator = TimewebAuthenticator::new();
    authenticator
        .setup_credentials(&credentials)
        .expect("credentials should load");
    authenticator
}

/// Mount `GET /api/v1/account/status` answering with `body`.
pub async fn mount_account_status(server: &MockServer, body: Value) {
    Mock::given(method("GET"))
        .and(path("/api/v1/account/status"))
        .and(header("authorization", BEARER))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub async fn mount_active_account(server: &MockServer) {
    mount_account_status(
        server,
        json!({
            "status": {
                "is_blocked": false,
                "is_permanent_blocked": false,
                "is_send_bill_letters": true,
                "last_password_changed_at": "2024-01-01T00:00:00.000Z"
            }
        }),
    )
    .await;
}

/// Number of requests the server received with the given method.
pub async fn request_count(server: &MockServer, http_method: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r| r.method.as_str() == http_method)
        .count()
}

// ============ Stateful fake provider ============

/// In-memory record store behind the fake DNS endpoints.
#[derive(Default)]
pub struct FakeDns {
    records: Mutex<HashMap<u64, Value>>,
    next_id: AtomicU64,
}

impl FakeDns {
    pub fn record_count(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn contains(&self, id: u64) -> bool {
        self.records.lock().unwrap().contains_key(&id)
    }

    pub fn record(&self, id: u64) -> Option<Value> {
        self.records.lock().unwrap().get(&id).cloned()
    }
}

struct CreateRecord(Arc<FakeDns>);

impl Respond for CreateRecord {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = serde_json::from_slice(&request.body).unwrap_or(Value::Null);
        let id = self.0.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.0.records.lock().unwrap().insert(id, body.clone());

        ResponseTemplate::new(201).set_body_json(json!({
            "dns_record": {
                "id": id,
                "type": body["type"],
                "data": {
                    "subdomain": body["subdomain"],
                    "value": body["value"]
                }
            },
            "response_id": uuid::Uuid::new_v4().to_string()
        }))
    }
}

struct DeleteRecord(Arc<FakeDns>);

impl Respond for DeleteRecord {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let id = request
            .url
            .path()
            .rsplit('/')
            .next()
            .and_then(|s| s.parse::<u64>().ok());

        match id.and_then(|id| self.0.records.lock().unwrap().remove(&id)) {
            Some(_) => ResponseTemplate::new(204),
            None => ResponseTemplate::new(404).set_body_json(json!({
                "status_code": 404,
                "error_code": "not_found",
                "message": "DNS record not found"
            })),
        }
    }
}

/// Mount create/delete endpoints backed by a shared [`FakeDns`] store.
pub async fn mount_fake_dns(server: &MockServer) -> Arc<FakeDns> {
    let state = Arc::new(FakeDns::default());

    Mock::given(method("POST"))
        .and(path_regex(r"^/api/v1/domains/[^/]+/dns-records$"))
        .and(header("authorization", BEARER))
        .and(header("content-type", "application/json"))
        .respond_with(CreateRecord(state.clone()))
        .mount(server)
        .await;

    Mock::given(method("DELETE"))
        .and(path_regex(r"^/api/v1/domains/[^/]+/dns-records/\d+$"))
        .and(header("authorization", BEARER))
        .respond_with(DeleteRecord(state.clone()))
        .mount(server)
        .await;

    state
}
