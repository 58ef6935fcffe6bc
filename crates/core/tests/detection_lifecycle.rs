//! Detection lifecycle integration tests.
//!
//! These tests drive the whole pipeline against a local HTTP server standing
//! in for NeoWs: identifiers -> NeoWsClient -> fetcher -> ranker.

use std::sync::Arc;

use chrono::NaiveDate;
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use neowatch_core::{
    ApproachDetector, ApproachFetcher, ApproachRanker, FeedConfig, FetcherConfig, NeoWsClient,
    RankingConfig,
};

const API_KEY: &str = "integration-key";

/// 2024-06-12 is a Wednesday; the active window is 2024-06-10 ..= 2024-06-16.
fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 12).unwrap()
}

fn lookup_body(id: &str, hazardous: bool, passes: &[(&str, &str)]) -> serde_json::Value {
    json!({
        "id": id,
        "name": format!("({})", id),
        "is_potentially_hazardous_asteroid": hazardous,
        "close_approach_data": passes
            .iter()
            .map(|(date, km)| json!({
                "close_approach_date": date,
                "relative_velocity": { "kilometers_per_second": "14.2" },
                "miss_distance": { "kilometers": km },
                "orbiting_body": "Earth"
            }))
            .collect::<Vec<_>>()
    })
}

async fn mount_object(server: &MockServer, id: &str, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/neo/{}", id)))
        .and(query_param("api_key", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

fn detector(server: &MockServer, fetcher_config: FetcherConfig) -> ApproachDetector {
    let client = NeoWsClient::new(FeedConfig {
        api_key: API_KEY.to_string(),
        base_url: server.uri(),
        timeout_secs: 5,
    })
    .expect("Failed to create client");

    ApproachDetector::new(
        ApproachFetcher::new(Arc::new(client), fetcher_config),
        ApproachRanker::new(RankingConfig::default()),
    )
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn test_closest_object_this_week_is_ranked_first() {
    let server = MockServer::start().await;

    mount_object(
        &server,
        "1000001",
        lookup_body("1000001", false, &[("2024-06-12", "50000.0")]),
    )
    .await;
    mount_object(
        &server,
        "1000002",
        lookup_body(
            "1000002",
            true,
            &[("2024-06-14", "10000.0"), ("2024-09-01", "900000.0")],
        ),
    )
    .await;

    let detection = detector(&server, FetcherConfig::default())
        .closest_approaches_at(&ids(&["1000001", "1000002"]), 1, today())
        .await;

    assert_eq!(detection.approaches.len(), 1);
    let closest = &detection.approaches[0];
    assert_eq!(closest.id, "1000002");
    assert!(closest.hazardous);
    assert_eq!(closest.approaches.len(), 1);
    assert_eq!(closest.approaches[0].miss_distance_km, 10000.0);
    assert_eq!(detection.hazardous_count, 1);
    assert_eq!(detection.fetch.succeeded, 2);
}

#[tokio::test]
async fn test_partial_feed_failure_still_ranks() {
    let server = MockServer::start().await;

    mount_object(
        &server,
        "1000001",
        lookup_body("1000001", false, &[("2024-06-10", "75000.0")]),
    )
    .await;
    Mock::given(method("GET"))
        .and(path("/neo/1000002"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/neo/1000003"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let detection = detector(&server, FetcherConfig::default())
        .closest_approaches_at(&ids(&["1000001", "1000002", "1000003", "9999999"]), 5, today())
        .await;

    assert_eq!(detection.approaches.len(), 1);
    assert_eq!(detection.approaches[0].id, "1000001");
    assert_eq!(detection.fetch.attempted, 4);
    assert_eq!(detection.fetch.succeeded, 1);
    assert_eq!(detection.fetch.failed, 3);
}

#[tokio::test]
async fn test_object_without_events_this_week_is_excluded() {
    let server = MockServer::start().await;

    mount_object(
        &server,
        "1000001",
        lookup_body("1000001", false, &[("2024-06-09", "100.0"), ("2024-06-17", "200.0")]),
    )
    .await;
    mount_object(&server, "1000002", lookup_body("1000002", false, &[])).await;

    let detection = detector(&server, FetcherConfig::default())
        .closest_approaches_at(&ids(&["1000001", "1000002"]), 5, today())
        .await;

    assert!(detection.approaches.is_empty());
    assert_eq!(detection.fetch.succeeded, 2);
}

#[tokio::test]
async fn test_rate_limited_request_is_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/neo/1000001"))
        .respond_with(ResponseTemplate::new(429))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_object(
        &server,
        "1000001",
        lookup_body("1000001", false, &[("2024-06-12", "42.0")]),
    )
    .await;

    let config = FetcherConfig {
        max_retries: 1,
        retry_backoff_ms: 1,
        ..FetcherConfig::default()
    };
    let detection = detector(&server, config)
        .closest_approaches_at(&ids(&["1000001"]), 5, today())
        .await;

    assert_eq!(detection.approaches.len(), 1);
    assert_eq!(detection.fetch.failed, 0);
}

#[tokio::test]
async fn test_ranked_ids_match_requested_ids() {
    let server = MockServer::start().await;

    // Looked up by SPK-ID, answered with the asteroid number.
    mount_object(
        &server,
        "2000433",
        lookup_body("433", false, &[("2024-06-13", "120000.0")]),
    )
    .await;

    let requested = ids(&["2000433"]);
    let detection = detector(&server, FetcherConfig::default())
        .closest_approaches_at(&requested, 5, today())
        .await;

    assert_eq!(detection.fetch.succeeded, 1);
    assert_eq!(detection.approaches.len(), 1);
    for object in &detection.approaches {
        assert!(requested.contains(&object.id), "unexpected id {}", object.id);
    }
}
