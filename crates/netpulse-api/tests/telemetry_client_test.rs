#![allow(clippy::unwrap_used)]
// Integration tests for `TelemetryClient` using wiremock.

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use netpulse_api::types::{BandwidthPush, HostQuery};
use netpulse_api::{Error, TelemetryClient, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, TelemetryClient) {
    let server = MockServer::start().await;
    let key: secrecy::SecretString = "anon-key".to_string().into();
    let client =
        TelemetryClient::new(&server.uri(), &key, &TransportConfig::default()).unwrap();
    (server, client)
}

// ── Read path ───────────────────────────────────────────────────────

#[tokio::test]
async fn test_fetch_bandwidth() {
    let (server, client) = setup().await;

    let envelope = json!({
        "success": true,
        "data": [{
            "id": "b1",
            "timestamp": "2026-02-03T10:30:00Z",
            "upstream_gbps": 7.5,
            "downstream_gbps": 9.1,
            "wifi_gbps": 5.8,
            "upstream_percent": 75.0,
            "source": "scanner"
        }],
        "count": 1,
        "lastUpdate": "2026-02-03T10:30:00Z"
    });

    Mock::given(method("GET"))
        .and(path("/bandwidth"))
        .and(query_param("limit", "6"))
        .and(header("apikey", "anon-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let env = client.fetch_bandwidth(Some(6)).await.unwrap();

    assert!(env.success);
    assert_eq!(env.data.len(), 1);
    assert!((env.data[0].upstream_gbps - 7.5).abs() < f64::EPSILON);
    assert_eq!(env.data[0].source.as_deref(), Some("scanner"));
}

#[tokio::test]
async fn test_fetch_gaming_devices_with_summary() {
    let (server, client) = setup().await;

    let envelope = json!({
        "success": true,
        "data": {
            "timestamp": "2026-02-03T10:30:00Z",
            "devices": [
                { "name": "Nintendo-Switch-01", "ping": 12.0, "packetLoss": 0.1, "status": "optimal", "ip": "192.168.1.50" },
                { "name": "PlayStation-5-01", "ping": 11.0, "packetLoss": 0.2, "status": "optimal", "ip": "192.168.1.60" }
            ],
            "total_gaming_devices": 2
        },
        "summary": { "total": 2, "nintendo": 1, "playstation": 1, "optimalCount": 2 },
        "lastUpdate": "2026-02-03T10:30:00Z"
    });

    Mock::given(method("GET"))
        .and(path("/gaming-devices"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let env = client.fetch_gaming_devices().await.unwrap();

    assert_eq!(env.data.devices.len(), 2);
    let summary = env.summary.unwrap();
    assert_eq!(summary.nintendo, 1);
    assert_eq!(summary.optimal_count, 2);
}

#[tokio::test]
async fn test_fetch_hosts_with_filters() {
    let (server, client) = setup().await;

    let envelope = json!({
        "success": true,
        "data": {
            "hosts": [{
                "ip": "192.168.1.2",
                "name": "CISCO-SW-01",
                "type": "switch",
                "vendor": "Cisco",
                "status": "online",
                "lastSeen": "2026-02-03T10:30:00Z",
                "ping": 2
            }],
            "total_hosts": 1,
            "online_count": 1,
            "offline_count": 0,
            "warning_count": 0
        },
        "lastUpdate": "2026-02-03T10:30:00Z"
    });

    Mock::given(method("GET"))
        .and(path("/hosts"))
        .and(query_param("status", "online"))
        .and(query_param("search", "cisco"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&envelope))
        .mount(&server)
        .await;

    let query = HostQuery {
        status: Some("online".into()),
        search: Some("cisco".into()),
        ..HostQuery::default()
    };
    let env = client.fetch_hosts(&query).await.unwrap();

    assert_eq!(env.data.hosts.len(), 1);
    assert_eq!(env.data.hosts[0].vendor.as_deref(), Some("Cisco"));
}

// ── Error handling ──────────────────────────────────────────────────

#[tokio::test]
async fn test_malformed_body_fails_closed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/bandwidth"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let result = client.fetch_bandwidth(None).await;

    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_error_envelope_surfaces_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/alerts"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "store exploded" })),
        )
        .mount(&server)
        .await;

    let result = client.fetch_alerts(None).await;

    match result {
        Err(Error::Api { message, status }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "store exploded");
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

// ── Write path ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_publish_bandwidth_sends_write_key() {
    let (server, client) = setup().await;
    let client = client.with_write_key("write-secret".to_string().into());

    Mock::given(method("POST"))
        .and(path("/bandwidth"))
        .and(header("x-api-key", "write-secret"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "message": "Bandwidth data stored"
        })))
        .mount(&server)
        .await;

    let ack = client
        .publish_bandwidth(&BandwidthPush {
            upstream_gbps: 6.8,
            downstream_gbps: 9.0,
            wifi_gbps: 6.1,
            source: Some("scanner".into()),
        })
        .await
        .unwrap();

    assert!(ack.success);
}

#[tokio::test]
async fn test_publish_rejected_without_valid_key() {
    let (server, client) = setup().await;
    let client = client.with_write_key("wrong".to_string().into());

    Mock::given(method("POST"))
        .and(path("/bandwidth"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({ "error": "Unauthorized" })))
        .mount(&server)
        .await;

    let result = client
        .publish_bandwidth(&BandwidthPush {
            upstream_gbps: 1.0,
            downstream_gbps: 1.0,
            wifi_gbps: 1.0,
            source: None,
        })
        .await;

    assert!(matches!(result, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn test_delete_alert_is_idempotent() {
    let (server, client) = setup().await;

    Mock::given(method("DELETE"))
        .and(path("/alerts"))
        .and(query_param("id", "missing-id"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Alert deleted"
        })))
        .mount(&server)
        .await;

    let ack = client.delete_alert("missing-id").await.unwrap();
    assert!(ack.success);
}

// ── Fan-out isolation ───────────────────────────────────────────────

#[tokio::test]
async fn test_snapshot_tolerates_partial_failure() {
    let (server, client) = setup().await;

    // Only bandwidth answers; the other three topics 500.
    Mock::given(method("GET"))
        .and(path("/bandwidth"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": [],
            "count": 0,
            "lastUpdate": null
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "error": "down" })))
        .mount(&server)
        .await;

    let snap = client.fetch_dashboard_snapshot(6).await;

    assert!(snap.bandwidth.is_some());
    assert!(snap.infrastructure.is_none());
    assert!(snap.gaming.is_none());
    assert!(snap.alerts.is_none());
    assert!(snap.any_live());
}

#[tokio::test]
async fn test_snapshot_all_down_is_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "error": "offline" })))
        .mount(&server)
        .await;

    let snap = client.fetch_dashboard_snapshot(6).await;
    assert!(snap.is_empty());
}
