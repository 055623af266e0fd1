use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;
use workout_map::{
    config::{Config, StorageBackend},
    routes,
    state::AppState,
};

fn app() -> Router {
    let config = Config {
        storage: StorageBackend::Memory,
        ..Config::default()
    };
    let state = AppState::new(config).expect("state");
    Router::new()
        .merge(routes::health::router())
        .merge(routes::workouts::router())
        .with_state(state)
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .expect("request"),
        )
        .await
        .expect("response");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn get(app: &Router, uri: &str) -> Value {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("GET")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&bytes).expect("json")
}

#[tokio::test]
async fn fresh_view_is_empty_and_sorted_by_distance() {
    let app = app();
    let view = get(&app, "/api/view").await;

    assert_eq!(view["list"], json!([]));
    assert_eq!(view["activeSort"], "distance");
    assert_eq!(view["visibility"]["form"], false);
    assert_eq!(view["visibility"]["sortControls"], false);
    assert_eq!(view["form"]["kind"], "running");
}

#[tokio::test]
async fn click_then_submit_renders_list_and_marker() {
    let app = app();

    let (status, view) = post(&app, "/api/map/click", json!({"lat": 50.45, "lng": 30.52})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["form"]["visible"], true);
    assert_eq!(view["form"]["target"], json!([50.45, 30.52]));

    let (status, view) = post(
        &app,
        "/api/workouts",
        json!({"kind": "running", "distance": "5", "duration": "25", "cadence": "170"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["list"].as_array().expect("list").len(), 1);
    assert_eq!(view["list"][0]["kind"], "running");
    assert_eq!(view["list"][0]["details"][2]["value"], "5.00");
    assert_eq!(view["map"]["markers"][0]["className"], "running-popup");
    assert_eq!(view["form"]["visible"], false);
}

#[tokio::test]
async fn invalid_submission_is_a_bad_request() {
    let app = app();
    post(&app, "/api/map/click", json!({"lat": 50.45, "lng": 30.52})).await;

    let (status, body) = post(
        &app,
        "/api/workouts",
        json!({"kind": "running", "distance": "5", "duration": "0", "cadence": "170"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").contains("duration"));

    let view = get(&app, "/api/view").await;
    assert_eq!(view["list"], json!([]));
}

#[tokio::test]
async fn click_outside_the_globe_is_rejected() {
    let app = app();
    let (status, _) = post(&app, "/api/map/click", json!({"lat": 120.0, "lng": 30.0})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn sort_switches_active_criterion() {
    let app = app();
    post(&app, "/api/map/click", json!({"lat": 50.45, "lng": 30.52})).await;
    post(
        &app,
        "/api/workouts",
        json!({"kind": "cycling", "distance": "20", "duration": "60", "elevation": "-5"}),
    )
    .await;

    let (status, view) = post(&app, "/api/sort", json!({"criterion": "time"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["activeSort"], "time");
    assert_eq!(view["list"][0]["kind"], "cycling");
}

#[tokio::test]
async fn geolocation_failure_is_not_an_error() {
    let app = app();
    let (status, view) = post(&app, "/api/geolocation", json!({"error": "denied"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["map"]["center"], Value::Null);

    let (status, view) = post(&app, "/api/geolocation", json!({"lat": 50.0, "lng": 30.0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["map"]["center"], Value::Null);
}

#[tokio::test]
async fn geolocation_centers_the_map_once() {
    let app = app();
    let (status, view) = post(&app, "/api/geolocation", json!({"lat": 50.0, "lng": 30.0})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["map"]["center"], json!([50.0, 30.0]));
    assert_eq!(view["map"]["zoom"], 15);

    let (_, view) = post(&app, "/api/geolocation", json!({"lat": 10.0, "lng": 20.0})).await;
    assert_eq!(view["map"]["center"], json!([50.0, 30.0]));
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = app();

    let (status, body) = post(&app, "/api/sort", json!({"criterion": "calories"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().expect("error").starts_with("Invalid request"));

    let (status, body) = post(&app, "/api/form/kind", json!({"kind": "swimming"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    let (status, _) = post(&app, "/api/map/click", json!({"lat": "north"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let view = get(&app, "/api/view").await;
    assert_eq!(view["activeSort"], "distance");
    assert_eq!(view["form"]["kind"], "running");
}

#[tokio::test]
async fn focusing_unknown_workout_is_a_no_op() {
    let app = app();
    let (status, view) = post(&app, "/api/workouts/0000000000/focus", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["map"]["center"], Value::Null);
}

#[tokio::test]
async fn reset_requests_reload() {
    let app = app();
    post(&app, "/api/map/click", json!({"lat": 50.45, "lng": 30.52})).await;
    post(
        &app,
        "/api/workouts",
        json!({"kind": "running", "distance": "5", "duration": "25", "cadence": "170"}),
    )
    .await;

    let (status, view) = post(&app, "/api/reset", json!({})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(view["reload"], true);
    assert_eq!(view["list"], json!([]));

    let health = get(&app, "/health").await;
    assert_eq!(health["workouts"], 0);
}
