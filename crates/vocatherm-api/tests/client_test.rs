#![allow(clippy::unwrap_used)]
// Integration tests for `DomoticzClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vocatherm_api::{BasicCredentials, DomoticzClient, Error};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, DomoticzClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DomoticzClient::with_client(reqwest::Client::new(), base_url, None);
    (server, client)
}

fn ok_envelope(result: serde_json::Value) -> serde_json::Value {
    json!({ "status": "OK", "title": "Devices", "result": result })
}

// ── Listing tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_list_light_switches() {
    let (server, client) = setup().await;

    let envelope = ok_envelope(json!([
        { "idx": "114", "Name": "SVT - Thermostat Control" },
        { "idx": "115", "Name": "SVT - Thermostat Pause" },
        { "idx": "116", "Name": "SVT - Thermostat Mode" }
    ]));

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("type", "command"))
        .and(query_param("param", "getlightswitches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let switches = client.list_light_switches().await.unwrap();

    assert_eq!(switches.len(), 3);
    assert_eq!(switches[0].idx.0, 114);
    assert_eq!(switches[2].name.as_deref(), Some("SVT - Thermostat Mode"));
}

#[tokio::test]
async fn test_device_status_first_entry() {
    let (server, client) = setup().await;

    let envelope = ok_envelope(json!([
        { "idx": "116", "Name": "SVT - Thermostat Mode", "Level": 20 }
    ]));

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("type", "devices"))
        .and(query_param("rid", "116"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let status = client.device_status(116.into()).await.unwrap();
    assert_eq!(status.level, Some(20));
}

#[tokio::test]
async fn test_device_status_empty_result() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
        .mount(&server)
        .await;

    let result = client.device_status(9.into()).await;
    assert!(matches!(result, Err(Error::EmptyResult)));
}

// ── Envelope error tests ────────────────────────────────────────────

#[tokio::test]
async fn test_status_not_ok_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "ERR", "title": "Devices" })),
        )
        .mount(&server)
        .await;

    let result = client.list_hardware().await;
    assert!(
        matches!(result, Err(Error::Api { .. })),
        "expected Api error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_http_500_is_api_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let result = client.list_light_switches().await;
    assert!(
        matches!(result, Err(Error::Api { .. })),
        "expected Api error, got: {result:?}"
    );
}

// ── Command encoding tests ──────────────────────────────────────────

#[tokio::test]
async fn test_set_level_encodes_space_in_switchcmd() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("param", "switchlight"))
        .and(query_param("idx", "116"))
        .and(query_param("switchcmd", "Set Level"))
        .and(query_param("level", "20"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "OK", "title": "SwitchLight" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.set_level(116.into(), 20).await.unwrap();

    // The literal query must carry `%20`, not `+`.
    let requests = server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap();
    assert!(
        query.contains("switchcmd=Set%20Level"),
        "unexpected query encoding: {query}"
    );
}

#[tokio::test]
async fn test_set_setpoint() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("param", "setsetpoint"))
        .and(query_param("idx", "118"))
        .and(query_param("setpoint", "20.5"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "status": "OK", "title": "SetSetpoint" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    client.set_setpoint(118.into(), 20.5).await.unwrap();
}

// ── Auth tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_basic_auth_header_when_configured() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let creds = BasicCredentials {
        username: "eric".into(),
        password: "secret".to_string().into(),
    };
    let client = DomoticzClient::with_client(reqwest::Client::new(), base_url, Some(creds));

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" })))
        .expect(1)
        .mount(&server)
        .await;

    client.list_hardware().await.unwrap();
}

#[tokio::test]
async fn test_no_auth_header_for_empty_username() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let creds = BasicCredentials {
        username: String::new(),
        password: "unused".to_string().into(),
    };
    let client = DomoticzClient::with_client(reqwest::Client::new(), base_url, Some(creds));

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" })))
        .expect(1)
        .mount(&server)
        .await;

    client.list_hardware().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}
