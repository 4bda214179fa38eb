//! Provider verifier tests against a stubbed provider.

use pact_contract::{Contract, Mismatch, PactBuilder, ProviderVerifier};
use rust_common::{HttpConfig, build_http_client};
use serde_json::json;
use wiremock::matchers::{body_json, body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn contract() -> Contract {
    let mut pact = PactBuilder::new("Consumer", "Provider");
    pact.add(
        PactBuilder::upon_receiving("A valid GET request for Date Validation")
            .given("There is data")
            .with_request("GET", "/api/provider")
            .with_query("validDateTime", "04/05/2018")
            .will_respond_with(200)
            .with_header("Content-Type", "application/json; charset=utf-8")
            .with_json_body(json!({"test": "NO", "validDateTime": "05-04-2018 00:00:00"}))
            .build(),
    );
    pact.build()
}

async fn mount_state_endpoint(server: &MockServer, status: u16) {
    Mock::given(method("POST"))
        .and(path("/provider-states"))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

#[tokio::test]
async fn verifies_matching_provider() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/provider-states"))
        .and(body_partial_json(json!({
            "state": "There is data",
            "action": "setup",
            "consumer": "Consumer",
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/provider-states"))
        .and(body_partial_json(json!({"state": "There is data", "action": "teardown"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/provider"))
        .and(query_param("validDateTime", "04/05/2018"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"test":"NO","validDateTime":"05-04-2018 00:00:00"}"#,
            "application/json; charset=utf-8",
        ))
        .mount(&server)
        .await;

    let verifier = ProviderVerifier::new("Provider", &server.uri())
        .unwrap()
        .with_state_change_url(&format!("{}/provider-states", server.uri()))
        .unwrap();

    let result = verifier.verify(&contract()).await.unwrap();
    assert!(result.success, "{}", result.summary());
    assert_eq!(result.interactions.len(), 1);
    assert_eq!(result.consumer, "Consumer");
    server.verify().await;
}

#[tokio::test]
async fn reports_status_and_body_mismatches() {
    let server = MockServer::start().await;
    mount_state_endpoint(&server, 200).await;
    Mock::given(method("GET"))
        .and(path("/api/provider"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let verifier = ProviderVerifier::new("Provider", &server.uri())
        .unwrap()
        .with_state_change_url(&format!("{}/provider-states", server.uri()))
        .unwrap();

    let result = verifier.verify(&contract()).await.unwrap();
    assert!(!result.success);
    let mismatches = &result.interactions[0].mismatches;
    assert!(mismatches.contains(&Mismatch::Status { expected: 200, actual: 404 }));
    assert!(mismatches.iter().any(|m| matches!(m, Mismatch::Header { .. })));
    assert!(mismatches.iter().any(|m| matches!(m, Mismatch::Body { actual: None, .. })));
}

#[tokio::test]
async fn failed_state_setup_skips_the_request() {
    let server = MockServer::start().await;
    mount_state_endpoint(&server, 500).await;
    Mock::given(method("GET"))
        .and(path("/api/provider"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let verifier = ProviderVerifier::new("Provider", &server.uri())
        .unwrap()
        .with_state_change_url(&format!("{}/provider-states", server.uri()))
        .unwrap();

    let result = verifier.verify(&contract()).await.unwrap();
    assert!(!result.success);
    let mismatches = &result.interactions[0].mismatches;
    assert!(matches!(
        &mismatches[0],
        Mismatch::StateChange { phase, status: 500, .. } if phase == "setup"
    ));
    server.verify().await;
}

#[tokio::test]
async fn unreachable_provider_is_a_transport_mismatch() {
    let verifier = ProviderVerifier::new("Provider", "http://127.0.0.1:1").unwrap();
    let result = verifier.verify(&contract()).await.unwrap();
    assert!(!result.success);
    assert!(matches!(
        result.interactions[0].mismatches[0],
        Mismatch::Transport { .. }
    ));
}

#[tokio::test]
async fn replays_state_params_headers_and_body_through_supplied_client() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/provider-states"))
        .and(header("user-agent", "contract-ci"))
        .and(body_partial_json(json!({
            "state": "There is data",
            "params": {"validDateTime": "04/05/2018"},
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/provider"))
        .and(header("x-request-source", "consumer"))
        .and(body_json(json!({"validDateTime": "04/05/2018"})))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let mut params = serde_json::Map::new();
    params.insert("validDateTime".to_string(), json!("04/05/2018"));
    let mut pact = PactBuilder::new("Consumer", "Provider");
    pact.add(
        PactBuilder::upon_receiving("A POST with a JSON body")
            .given_with_params("There is data", params)
            .with_request("post", "/api/provider")
            .with_request_header("X-Request-Source", "consumer")
            .with_request_body(json!({"validDateTime": "04/05/2018"}))
            .will_respond_with(204)
            .build(),
    );

    let client =
        build_http_client(&HttpConfig::for_verifier().with_user_agent("contract-ci")).unwrap();
    let verifier = ProviderVerifier::new("Provider", &server.uri())
        .unwrap()
        .with_state_change_url(&format!("{}/provider-states", server.uri()))
        .unwrap()
        .with_client(client);

    let result = verifier.verify(&pact.build()).await.unwrap();
    assert!(result.success, "{}", result.summary());
    server.verify().await;
}
