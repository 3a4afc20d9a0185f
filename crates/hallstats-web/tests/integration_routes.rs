//! Integration tests for the dashboard routes

#![allow(clippy::unwrap_used)]

mod common;

use axum::{
    Router,
    body::{Body, to_bytes},
};
use common::*;
use hallstats_web::build_app;
use http::{Request, StatusCode, header};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();

    (status, content_type, body.to_vec())
}

#[tokio::test]
async fn test_health_check() {
    init_test_logging();
    let app = build_app(config_for("http://127.0.0.1:1")).unwrap();

    let (status, _, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}

#[tokio::test]
async fn test_dashboard_json_fetches_once() {
    init_test_logging();
    let server = backend_with(backend_bookings(), 1).await;
    let app = build_app(config_for(&server.uri())).unwrap();

    let (status, _, body) = get(app, "/api/dashboard").await;
    let view: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        view["statusCounts"],
        json!({"total": 4, "approved": 1, "rejected": 1, "pending": 1, "other": 1})
    );
    assert_eq!(
        view["kpis"][0],
        json!({"label": "Total Bookings", "value": 4, "color": "#1976d2"})
    );
    assert_eq!(
        view["hallUsage"]["points"],
        json!([
            {"hall": "Main Auditorium", "count": 3},
            {"hall": "Seminar Hall 2", "count": 1}
        ])
    );
    assert_eq!(
        view["monthlyTrend"]["points"],
        json!([
            {"month": "2024-01", "count": 2},
            {"month": "2024-02", "count": 2}
        ])
    );
    assert_eq!(
        view["heatmap"]["buckets"],
        json!([
            {"dayOfWeek": "Monday", "hour": 9, "count": 2},
            {"dayOfWeek": "Tuesday", "hour": 14, "count": 1}
        ])
    );
    assert_eq!(view["eventTypes"]["slices"][0]["type"], "Academic/placement events");
    assert_eq!(view["eventTypes"]["slices"][0]["value"], 2);
    assert_eq!(view["report"]["invalidStartTimes"], 1);

    // MockServer verifies the expected request count on drop
    drop(server);
}

#[tokio::test]
async fn test_dashboard_json_with_failing_backend_is_empty() {
    init_test_logging();
    let server = backend_failing_with(500).await;
    let app = build_app(config_for(&server.uri())).unwrap();

    let (status, _, body) = get(app, "/api/dashboard").await;
    let view: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    let kpi_values: Vec<_> = view["kpis"]
        .as_array()
        .unwrap()
        .iter()
        .map(|k| k["value"].as_u64().unwrap())
        .collect();
    assert_eq!(kpi_values, vec![0, 0, 0, 0]);
    assert_eq!(view["hallUsage"]["points"], json!([]));
    assert_eq!(view["heatmap"]["buckets"], json!([]));
}

#[tokio::test]
async fn test_bookings_endpoint_returns_parsed_records() {
    init_test_logging();
    let server = backend_with(backend_bookings(), 1).await;
    let app = build_app(config_for(&server.uri())).unwrap();

    let (status, _, body) = get(app, "/api/bookings").await;
    let records: Value = serde_json::from_slice(&body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert_eq!(records.as_array().unwrap().len(), 4);
    assert_eq!(records[1]["hallName"], "Seminar Hall 2");
    assert_eq!(records[1]["bookingStatus"], "pending");
    assert_eq!(records[3]["bookingStatus"], "at_risk");
}

#[tokio::test]
async fn test_dashboard_page_renders_html() {
    init_test_logging();
    let server = backend_with(backend_bookings(), 1).await;
    let app = build_app(config_for(&server.uri())).unwrap();

    let (status, content_type, body) = get(app, "/").await;
    let html = String::from_utf8(body).unwrap();

    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/html"));
    for entry in ["Overview", "Hall Insights", "Trends", "Event Types", "Requester Types"] {
        assert!(html.contains(entry), "missing sidebar entry {entry}");
    }
    assert!(html.contains("Main Auditorium"));
    assert!(html.contains("#2A2A72"));
    assert!(html.contains("title=\"Monday 9:00\">2</td>"));
}
