use std::sync::Arc;
use std::time::Duration;

use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use serde_json::Value;
use tower::ServiceExt;
use zodiac_ephemeris::chart::Ephemeris;
use zodiac_ephemeris::config::ServerConfig;
use zodiac_ephemeris::ephem::{
    AnalyticEphemeris, BodyId, CalcFlags, Calendar, CivilTime, EphemerisBackend, EphemerisError,
    JulianDays, RawPosition,
};
use zodiac_ephemeris::server::{AppState, router};

const J2000: &str = "2000-01-01T12:00:00Z";

fn state() -> AppState {
    AppState::new(Ephemeris::default(), ServerConfig::default())
}

async fn get_with(state: AppState, uri: &str) -> (StatusCode, String, String) {
    let response = router(state)
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|value| value.to_str().unwrap().to_string())
        .unwrap_or_default();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, content_type, String::from_utf8(bytes.to_vec()).unwrap())
}

async fn get_json(uri: &str) -> (StatusCode, Value) {
    let (status, content_type, body) = get_with(state(), uri).await;
    assert!(content_type.starts_with("application/json"), "{content_type}");
    (status, serde_json::from_str(&body).unwrap())
}

#[tokio::test]
async fn ephemeris_lists_all_bodies_in_canonical_order() {
    let (status, json) = get_json(&format!("/api/ephemeris?date={J2000}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["date"], "2000-01-01T12:00:00.000Z");
    assert_eq!(json["julianDay"], 2_451_545.0);

    let result = json["result"].as_array().unwrap();
    let ids: Vec<i64> = result.iter().map(|r| r["bodyId"].as_i64().unwrap()).collect();
    assert_eq!(ids, (0..10).collect::<Vec<_>>());

    let sun = &result[0];
    assert_eq!(sun["sign"], 9);
    assert_eq!(sun["degree"], 10);
    assert_eq!(sun["retrograde"], false);
    for reading in result {
        let lon = reading["longitude"].as_f64().unwrap();
        assert!((0.0..360.0).contains(&lon));
    }
}

#[tokio::test]
async fn missing_date_means_now_truncated_to_minute() {
    let (status, json) = get_json("/api/ephemeris").await;
    assert_eq!(status, StatusCode::OK);
    let date = json["date"].as_str().unwrap();
    assert!(date.ends_with(":00.000Z"), "{date}");

    let (status, json) = get_json("/api/ephemeris?date=").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["result"].as_array().unwrap().len(), 10);
}

#[tokio::test]
async fn body_subset_follows_caller_order() {
    let (status, json) = get_json(&format!("/api/ephemeris?date={J2000}&bodies=mars,0")).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<i64> = json["result"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["bodyId"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![4, 0]);
}

#[tokio::test]
async fn invalid_inputs_are_rejected_with_kinds() {
    let (status, json) = get_json("/api/ephemeris?date=not-a-date").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "InvalidDateError");
    assert!(json["message"].as_str().unwrap().contains("not-a-date"));

    let (status, json) = get_json("/api/ephemeris?bodies=ceres").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "InvalidBodyError");

    let (status, json) = get_json("/api/calculate/999").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "InvalidBodyError");

    let (status, json) = get_json("/api/calculate/4?date=yesterday").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "InvalidDateError");
}

#[tokio::test]
async fn malformed_query_strings_get_a_json_error() {
    for uri in [
        "/api/ephemeris?date=2000-01-01&date=2001-01-01",
        "/api/calculate/4?date=2000-01-01&date=x",
        "/api/ephemeris?bodies=4&bodies=5",
    ] {
        let (status, json) = get_json(uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(json["error"], "InvalidQueryError", "{uri}");
        assert!(json["message"].as_str().unwrap().contains("duplicate field"), "{uri}");
    }

    let (status, content_type, body) = get_with(state(), "/?body=4&body=5").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains("InvalidQueryError"));
}

#[tokio::test]
async fn dates_beyond_the_ephemeris_are_a_gateway_error() {
    let (status, json) = get_json("/api/ephemeris?date=4000-01-01T00:00:00Z").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(json["error"], "EphemerisRangeError");
    assert!(json["message"].as_str().unwrap().contains("outside the ephemeris range"));
}

#[tokio::test]
async fn single_body_by_id_or_name() {
    let (status, by_id) = get_json(&format!("/api/calculate/4?date={J2000}")).await;
    assert_eq!(status, StatusCode::OK);
    let (_, by_name) = get_json(&format!("/api/calculate/Mars?date={J2000}")).await;
    assert_eq!(by_id, by_name);
    assert!(by_id.get("result").is_none());
    assert_eq!(by_id["julianDay"], 2_451_545.0);

    let (_, all) = get_json(&format!("/api/ephemeris?date={J2000}")).await;
    assert_eq!(by_id["longitude"], all["result"][4]["longitude"]);
}

#[tokio::test]
async fn body_table_is_served() {
    let (status, json) = get_json("/api/bodies").await;
    assert_eq!(status, StatusCode::OK);
    let bodies = json.as_array().unwrap();
    assert_eq!(bodies.len(), 10);
    assert_eq!(bodies[1]["name"], "Moon");
    assert_eq!(bodies[1]["glyph"], "☽");
}

#[tokio::test]
async fn page_renders_table_and_single_body() {
    let (status, content_type, body) = get_with(state(), &format!("/?date={J2000}")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.starts_with("text/html"));
    assert_eq!(body.matches("<tr><td>").count(), 10);
    assert!(body.contains("<title>Ephemeris Online</title>"));

    let (status, _, body) = get_with(state(), "/?date=2000-01-01T12:00&body=1").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<ul>"));
    assert!(body.contains("Moon"));
    assert!(!body.contains("<table>"));
}

#[tokio::test]
async fn page_reports_errors_in_html() {
    let (status, content_type, body) = get_with(state(), "/?date=garbage").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(content_type.starts_with("text/html"));
    assert!(body.contains("InvalidDateError"));

    let (status, _, body) = get_with(state(), "/?body=vulcan").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("InvalidBodyError"));
}

/// Backend that takes longer than any reasonable render budget.
struct SlowBackend;

impl EphemerisBackend for SlowBackend {
    fn civil_to_julian_day(
        &self,
        civil: &CivilTime,
        calendar: Calendar,
    ) -> Result<JulianDays, EphemerisError> {
        AnalyticEphemeris.civil_to_julian_day(civil, calendar)
    }

    fn compute_position(
        &self,
        jd_ut: f64,
        body: BodyId,
        flags: CalcFlags,
    ) -> Result<RawPosition, EphemerisError> {
        std::thread::sleep(Duration::from_millis(100));
        AnalyticEphemeris.compute_position(jd_ut, body, flags)
    }

    fn body_name(&self, body: BodyId) -> Option<String> {
        AnalyticEphemeris.body_name(body)
    }
}

#[tokio::test]
async fn slow_page_times_out() {
    let config = ServerConfig {
        render_timeout_ms: 20,
        ..ServerConfig::default()
    };
    let slow = AppState::new(Ephemeris::new(Arc::new(SlowBackend)), config);
    let (status, _, body) = get_with(slow, &format!("/?date={J2000}&body=0")).await;
    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    assert!(body.contains("UpstreamTimeoutError"));
}
