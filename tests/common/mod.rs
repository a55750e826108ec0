#![allow(dead_code)]

use jsonwebtoken::{encode, EncodingKey, Header};
use member_portal_client::mocks::{ManualClock, MockTransport, RecordingNotifier};
use member_portal_client::storage::MemoryStore;
use member_portal_client::{ClientConfig, PortalClient};
use serde_json::{json, Value};
use std::sync::Arc;

pub const BASE_URL: &str = "https://portal.test";

pub struct TestPortal {
    pub portal: PortalClient,
    pub transport: MockTransport,
    pub store: Arc<MemoryStore>,
    pub notifier: Arc<RecordingNotifier>,
    pub clock: Arc<ManualClock>,
}

pub fn token_for(claims: Value) -> String {
    encode(&Header::default(), &claims, &EncodingKey::from_secret(b"portal-test-secret")).unwrap()
}

pub fn test_config() -> ClientConfig {
    ClientConfig {
        base_url: BASE_URL.to_string(),
        ..ClientConfig::default()
    }
}

pub fn test_portal() -> TestPortal {
    test_portal_with(test_config())
}

pub fn test_portal_with(config: ClientConfig) -> TestPortal {
    let store = Arc::new(MemoryStore::new());
    let transport = MockTransport::new();
    let notifier = Arc::new(RecordingNotifier::new());
    let clock = Arc::new(ManualClock::new(1_700_000_000_000));

    let portal = PortalClient::with_parts(
        &config,
        store.clone(),
        Arc::new(transport.clone()),
        notifier.clone(),
        clock.clone(),
    );

    TestPortal {
        portal,
        transport,
        store,
        notifier,
        clock,
    }
}

pub fn member_page(names: &[(&str, &str, &str)]) -> Value {
    let docs: Vec<Value> = names
        .iter()
        .map(|(id, city, chapter)| json!({"_id": id, "name": id, "city": city, "chapter_name": chapter}))
        .collect();
    let total = docs.len();
    json!({"success": true, "message": "Members fetched", "data": {"docs": docs, "totalDocs": total}})
}
