//! Integration tests for attendance endpoints.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use crate::api::{AppState, routes};
use crate::db::{Database, SqliteDatabase};

async fn test_app() -> axum::Router {
    let db = SqliteDatabase::in_memory().await.unwrap();
    db.migrate().await.unwrap();
    routes::create_router(AppState::new(db))
}

async fn json_body(response: axum::response::Response) -> Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[tokio::test(flavor = "multi_thread")]
async fn new_pupil_defaults_to_absent() {
    let app = test_app().await;

    let response = app
        .oneshot(json_request("POST", "/attendance", json!({"name": "Budi"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        json_body(response).await,
        json!({"id": 1, "name": "Budi", "present": false})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn mark_present_sets_flag_and_persists() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request("POST", "/attendance", json!({"name": "Budi"})))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(empty_request("PUT", "/attendance/1/present"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"id": 1, "name": "Budi", "present": true})
    );

    let response = app
        .oneshot(empty_request("GET", "/attendance/1"))
        .await
        .unwrap();
    assert_eq!(json_body(response).await["present"], true);
}

#[tokio::test(flavor = "multi_thread")]
async fn mark_present_keeps_a_renamed_pupil() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request("POST", "/attendance", json!({"name": "Budi"})))
        .await
        .unwrap();
    app.clone()
        .oneshot(json_request(
            "PUT",
            "/attendance/1",
            json!({"name": "Budi Santoso", "present": false}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request("PUT", "/attendance/1/present"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await,
        json!({"id": 1, "name": "Budi Santoso", "present": true})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn mark_present_twice_is_still_ok() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/attendance",
            json!({"name": "Siti", "present": true}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(empty_request("PUT", "/attendance/1/present"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test(flavor = "multi_thread")]
async fn mark_present_missing_pupil_is_404() {
    let app = test_app().await;

    let response = app
        .oneshot(empty_request("PUT", "/attendance/9/present"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(response).await,
        json!({"message": "Attendance record not found"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn mark_present_invalid_id_is_400() {
    let app = test_app().await;

    let response = app
        .oneshot(empty_request("PUT", "/attendance/abc/present"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        json_body(response).await,
        json!({"message": "Invalid attendance record ID"})
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn full_update_can_clear_presence() {
    let app = test_app().await;

    app.clone()
        .oneshot(json_request(
            "POST",
            "/attendance",
            json!({"name": "Budi", "present": true}),
        ))
        .await
        .unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/attendance/1",
            json!({"name": "Budi", "present": false}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/attendance"))
        .await
        .unwrap();
    assert_eq!(
        json_body(response).await,
        json!([{"id": 1, "name": "Budi", "present": false}])
    );

    let response = app
        .oneshot(empty_request("DELETE", "/attendance/1"))
        .await
        .unwrap();
    assert_eq!(
        json_body(response).await,
        json!({"message": "Attendance record deleted successfully"})
    );
}
