#![allow(clippy::unwrap_used)]
// Integration tests for the `Thermostat` facade against a mocked
// Domoticz server.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vocatherm_api::DomoticzClient;
use vocatherm_core::{InitStatus, Mode, Thermostat};

// ── Helpers ─────────────────────────────────────────────────────────

fn ok_envelope(result: serde_json::Value) -> serde_json::Value {
    json!({ "status": "OK", "title": "Devices", "result": result })
}

/// Mount the three discovery endpoints with a fully provisioned SVT
/// installation: control=114, pause=115, mode=116, setpoints=117/118,
/// probes=111/112, switch=113.
async fn mount_discovery(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("param", "getlightswitches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            { "idx": "114", "Name": "SVT - Thermostat Control" },
            { "idx": "115", "Name": "SVT - Thermostat Pause" },
            { "idx": "116", "Name": "SVT - Thermostat Mode" },
            { "idx": "80", "Name": "Kitchen Light" }
        ]))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("filter", "utility"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            { "idx": "118", "Name": "SVT - Setpoint Economy", "SetPoint": "17.0" },
            { "idx": "117", "Name": "SVT - Setpoint Normal", "SetPoint": "21.0" }
        ]))))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("type", "hardware"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            { "Name": "SVT", "Mode1": "111", "Mode2": "112", "Mode3": "113" }
        ]))))
        .mount(server)
        .await;
}

/// Mount a device-status read for one reference.
async fn mount_status(server: &MockServer, rid: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("type", "devices"))
        .and(query_param("rid", rid))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([body]))))
        .mount(server)
        .await;
}

async fn facade(server: &MockServer) -> Thermostat {
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = DomoticzClient::with_client(reqwest::Client::new(), base_url, None);
    Thermostat::discover(client).await
}

/// Queries received so far that were mutations (switchlight/setsetpoint).
async fn command_queries(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter_map(|r| r.url.query().map(String::from))
        .filter(|q| q.contains("param=switchlight") || q.contains("param=setsetpoint"))
        .collect()
}

// ── Discovery ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_discovery_resolves_all_references() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    let thermostat = facade(&server).await;
    assert_eq!(thermostat.init_status(), InitStatus::Full);
}

#[tokio::test]
async fn test_discovery_http_500_leaves_everything_unresolved() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&server)
        .await;

    let mut thermostat = facade(&server).await;
    assert_eq!(thermostat.init_status(), InitStatus::Failed);

    // Reads against unresolved references are no-ops, not crashes --
    // and they must not hit the network.
    let before = server.received_requests().await.unwrap().len();
    assert_eq!(thermostat.mode().await, None);
    assert_eq!(thermostat.indoor_temp().await, None);
    let after = server.received_requests().await.unwrap().len();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_missing_setpoints_is_partial() {
    // Same installation, except the utility listing knows nothing
    // about the SVT setpoints.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("param", "getlightswitches"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            { "idx": "114", "Name": "SVT - Thermostat Control" },
            { "idx": "115", "Name": "SVT - Thermostat Pause" },
            { "idx": "116", "Name": "SVT - Thermostat Mode" }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("filter", "utility"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("type", "hardware"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_envelope(json!([
            { "Name": "SVT", "Mode1": "111", "Mode2": "112", "Mode3": "113" }
        ]))))
        .mount(&server)
        .await;

    let thermostat = facade(&server).await;
    match thermostat.init_status() {
        InitStatus::Partial(missing) => assert_eq!(missing.len(), 2),
        other => panic!("expected Partial, got {other:?}"),
    }
}

// ── Reads ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_mode_read_maps_level_through_table() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;
    mount_status(&server, "116", json!({ "idx": "116", "Level": 20 })).await;

    let mut thermostat = facade(&server).await;
    assert_eq!(thermostat.mode().await, Some(Mode::Night));
    assert_eq!(thermostat.shadow().mode, Some(Mode::Night));
}

#[tokio::test]
async fn test_pause_read_maps_status_string() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;
    mount_status(&server, "115", json!({ "idx": "115", "Status": "On" })).await;

    let mut thermostat = facade(&server).await;
    assert_eq!(thermostat.pause().await, Some(true));
}

#[tokio::test]
async fn test_temp_read_missing_field_is_absent() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;
    mount_status(&server, "111", json!({ "idx": "111", "Status": "21.5 C" })).await;

    let mut thermostat = facade(&server).await;
    assert_eq!(thermostat.indoor_temp().await, None);
}

// ── Writes ──────────────────────────────────────────────────────────

#[tokio::test]
async fn test_invalid_mode_name_performs_zero_remote_calls() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    let mut thermostat = facade(&server).await;
    thermostat.set_mode("tiède").await;

    assert!(command_queries(&server).await.is_empty());
}

#[tokio::test]
async fn test_setpoint_write_issues_one_call() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("param", "setsetpoint"))
        .and(query_param("idx", "117"))
        .and(query_param("setpoint", "20.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut thermostat = facade(&server).await;
    thermostat.set_setpoint_normal(20.5).await;
    assert_eq!(thermostat.shadow().setpoint_normal, Some(20.5));
}

#[tokio::test]
async fn test_failed_write_does_not_update_shadow() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("param", "switchlight"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ERR" })))
        .mount(&server)
        .await;

    let mut thermostat = facade(&server).await;
    thermostat.set_mode(Mode::Night).await;
    assert_eq!(thermostat.shadow().mode, None);
}

#[tokio::test]
async fn test_pause_write_issues_one_switch_command() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("param", "switchlight"))
        .and(query_param("idx", "115"))
        .and(query_param("switchcmd", "On"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" })))
        .expect(1)
        .mount(&server)
        .await;

    let mut thermostat = facade(&server).await;
    thermostat.set_pause(true).await;

    assert_eq!(command_queries(&server).await.len(), 1);
    assert_eq!(thermostat.shadow().pause, Some(true));
}

#[tokio::test]
async fn test_invalid_pause_value_performs_zero_remote_calls() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;

    let mut thermostat = facade(&server).await;
    thermostat.set_pause("peut-être").await;

    assert!(command_queries(&server).await.is_empty());
    assert_eq!(thermostat.shadow().pause, None);
}

#[tokio::test]
async fn test_mode_write_accepts_code_and_label() {
    let server = MockServer::start().await;
    mount_discovery(&server).await;
    Mock::given(method("GET"))
        .and(path("/json.htm"))
        .and(query_param("param", "switchlight"))
        .and(query_param("idx", "116"))
        .and(query_param("switchcmd", "Set Level"))
        .and(query_param("level", "20"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "OK" })))
        .expect(2)
        .mount(&server)
        .await;

    let mut thermostat = facade(&server).await;
    thermostat.set_mode(20u8).await;
    thermostat.set_mode("nuit").await;
    assert_eq!(thermostat.shadow().mode, Some(Mode::Night));
}
