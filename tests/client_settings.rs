//! Outgoing settings applied by a live client

use esquery_rs::config::{ServerSettings, Settings};
use esquery_rs::{Connection, EngineClient, QueryIntent, Search};
use serde_json::json;
use std::sync::Arc;
use tokio_test::assert_ok;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> Settings {
    let addr = server.address();
    let mut settings = Settings {
        server: ServerSettings {
            host: addr.ip().to_string(),
            port: addr.port(),
            ..Default::default()
        },
        ..Default::default()
    };
    settings.search.default_index = "orders".to_string();
    settings
}

#[tokio::test]
async fn extra_headers_reach_the_engine() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/orders/_search"))
        .and(header("x-opaque-id", "nightly-report"))
        .and(header("authorization", "ApiKey c2VjcmV0"))
        .and(header(
            "user-agent",
            format!("esquery-rs/{}", esquery_rs::VERSION).as_str(),
        ))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "took": 1,
            "hits": { "total": { "value": 0, "relation": "eq" }, "hits": [] }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings
        .outgoing
        .extra_headers
        .insert("X-Opaque-Id".to_string(), "nightly-report".to_string());
    settings
        .outgoing
        .extra_headers
        .insert("Authorization".to_string(), "ApiKey c2VjcmV0".to_string());

    let client: EngineClient = assert_ok!(Connection::open_with_settings(&settings));
    let search = Search::new(Arc::new(client), &settings.search);
    let result = assert_ok!(search.execute(&QueryIntent::match_all()).await);

    assert_eq!(result.total_hits, 0);
}

#[tokio::test]
async fn relaxed_tls_setting_still_talks_plain_http() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/scratch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "acknowledged": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut settings = settings_for(&server);
    settings.outgoing.verify_ssl = false;
    settings.outgoing.request_timeout = 2.5;

    let client = assert_ok!(Connection::open_with_settings(&settings));
    assert!(assert_ok!(client.delete_index("scratch").await));
}
