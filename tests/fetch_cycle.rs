//! Store fetch cycles end to end: real client, wiremock backend.

use farcaster_analytics::analytics_client::{AnalyticsClient, Fid};
use farcaster_analytics::fetchable::Status;
use farcaster_analytics::store::{Slices, Store};
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn summary_body(fid: &str) -> serde_json::Value {
    serde_json::json!({
        "account": { "farcasterId": fid, "handle": format!("user{fid}"), "displayName": null, "createdAt": "2024-01-01T00:00:00Z" },
        "summary": {
            "range": "Last 7 days",
            "totalCasts": 3,
            "totalImpressions": 1000,
            "totalEngagements": 30,
            "avgEngagementRatePercent": 3.0,
            "followerCount": 10,
            "accountAgeDays": 5
        },
        "highlights": { "bestDayImpressions": null, "topCastId": null }
    })
}

fn activity_body() -> serde_json::Value {
    serde_json::json!({
        "ok": true,
        "fid": 774643,
        "range": "7d",
        "days": [{ "date": "2024-05-01", "postCount": 1, "engagements": 4 }]
    })
}

fn store_for(server: &MockServer) -> Store {
    let client = AnalyticsClient::new(&server.uri()).expect("client");
    Store::new(Arc::new(client), Fid::default(), 5)
}

async fn run_cycle(store: &Store, fid: Fid) {
    let cycle = store.start_cycle(fid);
    let loads = Slices::all().each().map(|slice| store.load(slice, &cycle));
    for applied in futures_util::future::join_all(loads).await {
        assert!(applied);
    }
}

#[tokio::test]
async fn default_fid_is_used_for_all_three_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/live/summary"))
        .and(query_param("fid", "774643"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body("774643")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/live/top-posts"))
        .and(query_param("fid", "774643"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "account": summary_body("774643")["account"],
            "count": 0,
            "posts": []
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/live/activity"))
        .and(query_param("fid", "774643"))
        .respond_with(ResponseTemplate::new(200).set_body_json(activity_body()))
        .expect(1)
        .mount(&server)
        .await;

    let store = store_for(&server);
    run_cycle(&store, Fid::parse_or_default(None)).await;

    assert_eq!(
        store.account().map(|account| account.handle),
        Some("user774643".to_string())
    );
    assert_eq!(store.top_posts.lock().unwrap().status(), Status::Empty);
    assert!(matches!(
        store.activity.lock().unwrap().status(),
        Status::Populated(_)
    ));
}

#[tokio::test]
async fn failing_top_posts_leaves_other_slices_alone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/live/summary"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body("774643")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/live/top-posts"))
        .respond_with(ResponseTemplate::new(502).set_body_string("upstream down"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/live/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(activity_body()))
        .mount(&server)
        .await;

    let store = store_for(&server);
    run_cycle(&store, Fid::default()).await;

    assert_eq!(
        store.top_posts.lock().unwrap().status(),
        Status::Failed("Top posts error: 502 Bad Gateway – upstream down")
    );
    assert!(store.summary.lock().unwrap().error().is_none());
    assert!(store.account().is_some());
    assert!(store.activity.lock().unwrap().error().is_none());
    assert_eq!(
        store.activity.lock().unwrap().data().map(Vec::len),
        Some(1)
    );
}

#[tokio::test]
async fn refresh_failure_keeps_loaded_activity() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/live/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(activity_body()))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/live/activity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ok": false,
            "fid": 774643,
            "range": "7d",
            "days": []
        })))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let cycle = store.start_cycle(Fid::default());
    assert!(store.load_activity(&cycle).await);

    let refresh = store.refresh();
    assert!(store.load_activity(&refresh).await);

    let activity = store.activity.lock().unwrap();
    assert_eq!(activity.error(), Some("Activity response not ok"));
    assert_eq!(activity.data().map(Vec::len), Some(1));
}

#[tokio::test]
async fn response_for_previous_fid_is_discarded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/live/summary"))
        .and(query_param("fid", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body("1")))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/live/summary"))
        .and(query_param("fid", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(summary_body("2")))
        .mount(&server)
        .await;

    let store = store_for(&server);
    let old = store.start_cycle(Fid::parse_or_default(Some("1")));
    let new = store.start_cycle(Fid::parse_or_default(Some("2")));

    assert!(store.load_summary(&new).await);
    assert!(!store.load_summary(&old).await);

    assert_eq!(
        store.account().map(|account| account.farcaster_id),
        Some("2".to_string())
    );
}
