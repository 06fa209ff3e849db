use super::*;
use axum::{http::StatusCode, routing::get, Router};
use tokio::net::TcpListener;

const FEED_BODY: &str = r#"{
    "type": "FeatureCollection",
    "features": [
        {
            "type": "Feature",
            "id": "nc75000001",
            "properties": { "mag": 2.7, "place": "8 km NW of The Geysers, CA", "time": 1700000100000 },
            "geometry": { "type": "Point", "coordinates": [-122.8, 38.8, 2.1] }
        },
        {
            "type": "Feature",
            "id": "us6000abcd",
            "properties": { "mag": 5.9, "place": "Kermadec Islands region", "time": 1700000000000 },
            "geometry": { "type": "Point", "coordinates": [-178.2, -29.1, 35.0] }
        }
    ]
}"#;

async fn feed_ok() -> (StatusCode, &'static str) {
    (StatusCode::OK, FEED_BODY)
}

async fn feed_unavailable() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "upstream down")
}

async fn feed_garbage() -> (StatusCode, &'static str) {
    (StatusCode::OK, "<html>not a feed</html>")
}

async fn spawn_feed_server() -> String {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    let app = Router::new()
        .route("/all_day.geojson", get(feed_ok))
        .route("/broken.geojson", get(feed_unavailable))
        .route("/garbage.geojson", get(feed_garbage));
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn fetches_and_parses_snapshot_in_feed_order() {
    let base = spawn_feed_server().await;
    let client = HttpFeedClient::new(&format!("{base}/all_day.geojson")).expect("client");

    let snapshot = client.fetch_snapshot().await.expect("snapshot");

    assert_eq!(snapshot.len(), 2);
    assert_eq!(snapshot.records[0].id.as_str(), "nc75000001");
    assert_eq!(snapshot.records[0].depth_km, 2.1);
    assert_eq!(snapshot.records[1].magnitude, 5.9);
    assert_eq!(snapshot.records[1].latitude, -29.1);
    assert_eq!(snapshot.records[1].longitude, -178.2);
}

#[tokio::test]
async fn non_success_status_is_a_status_failure() {
    let base = spawn_feed_server().await;
    let client = HttpFeedClient::new(&format!("{base}/broken.geojson")).expect("client");

    let failure = client.fetch_snapshot().await.expect_err("should fail");

    assert_eq!(failure, FetchFailure::Status { code: 500 });
}

#[tokio::test]
async fn malformed_body_is_a_parse_failure() {
    let base = spawn_feed_server().await;
    let client = HttpFeedClient::new(&format!("{base}/garbage.geojson")).expect("client");

    let failure = client.fetch_snapshot().await.expect_err("should fail");

    assert!(matches!(failure, FetchFailure::Parse(_)));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let client = HttpFeedClient::new(&format!("http://{addr}/all_day.geojson")).expect("client");

    let failure = client.fetch_snapshot().await.expect_err("should fail");

    assert!(matches!(failure, FetchFailure::Transport(_)));
}

#[test]
fn rejects_relative_feed_url() {
    assert!(HttpFeedClient::new("summary/all_day.geojson").is_err());
    assert_eq!(
        HttpFeedClient::new(DEFAULT_FEED_URL)
            .expect("default url")
            .url()
            .host_str(),
        Some("earthquake.usgs.gov")
    );
}
