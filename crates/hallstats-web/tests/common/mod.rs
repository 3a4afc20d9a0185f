//! Shared helpers for integration tests

#![allow(dead_code, clippy::unwrap_used)]

use hallstats_core::Config;
use serde_json::{Value, json};
use std::sync::Once;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

static INIT_LOGGER: Once = Once::new();

/// Initialize test logging once per test binary
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("debug")
            .with_test_writer()
            .try_init();
    });
}

/// Bookings as the backend serializes them
pub fn backend_bookings() -> Value {
    json!([
        {
            "Booking id": 1,
            "Hall name": "Main Auditorium",
            "event Type": "Academic/placement events",
            "Requester type": "Faculty",
            "Booking status": "Approved",
            "Booking date": "Mon, 01 Jan 2024 00:00:00 GMT",
            "Booking start time": "09:15"
        },
        {
            "Booking id": 2,
            "Hall name": "Seminar Hall 2",
            "event Type": "Student club activities",
            "Requester type": "Student club",
            "Booking status": "pending",
            "Booking date": "2024-01-01",
            "Booking start time": "09:45"
        },
        {
            "Booking id": 3,
            "Hall name": "Main Auditorium",
            "event Type": "Official admin meetings",
            "Requester type": "Admin",
            "Booking status": "Rejected",
            "Booking date": "2024-02-06",
            "Booking start time": "14:00"
        },
        {
            "Booking id": 4,
            "Hall name": "Main Auditorium",
            "event Type": "Academic/placement events",
            "Requester type": "Faculty",
            "Booking status": "at_risk",
            "Booking date": "2024-02-13",
            "Booking start time": "not set"
        }
    ])
}

/// Start a backend serving `body` at `/bookings`, expecting `calls` requests
pub async fn backend_with(body: Value, calls: u64) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(calls)
        .mount(&server)
        .await;
    server
}

/// Start a backend answering `/bookings` with `status`
pub async fn backend_failing_with(status: u16) -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/bookings"))
        .respond_with(ResponseTemplate::new(status))
        .mount(&server)
        .await;
    server
}

/// Configuration pointing at `base_url`
pub fn config_for(base_url: &str) -> Config {
    let mut config = Config::default();
    config.source.base_url = base_url.to_string();
    config.source.timeout_seconds = Some(5);
    config
}
