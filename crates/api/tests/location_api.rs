//! Integration tests for location sharing and the assignee's view of it.

mod common;

use axum::http::StatusCode;
use common::{body_json, get_auth, post_auth, post_json_auth, put_json_auth};
use serde_json::json;

#[tokio::test]
async fn update_then_read_current_location() {
    let (app, _store) = common::build_test_app();
    let consumer = common::signup(&app, "c@example.com", "consumer").await;

    let missing = get_auth(&app, "/api/consumer/location/current", &consumer.token).await;
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let response = post_json_auth(
        &app,
        "/api/consumer/location/update",
        &consumer.token,
        json!({ "latitude": 5.6037, "longitude": -0.187, "accuracy": 12.5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["latitude"], 5.6037);
    assert_eq!(json["data"]["is_sharing"], true);

    // A second update replaces the first.
    post_json_auth(
        &app,
        "/api/consumer/location/update",
        &consumer.token,
        json!({ "latitude": 6.0, "longitude": -1.0 }),
    )
    .await;
    let current = get_auth(&app, "/api/consumer/location/current", &consumer.token).await;
    let json = body_json(current).await;
    assert_eq!(json["data"]["latitude"], 6.0);
    assert_eq!(json["data"]["longitude"], -1.0);

    let history = get_auth(&app, "/api/consumer/location/history", &consumer.token).await;
    assert_eq!(body_json(history).await["data"]["total"], 1);
}

#[tokio::test]
async fn out_of_range_coordinates_are_rejected() {
    let (app, _store) = common::build_test_app();
    let consumer = common::signup(&app, "c@example.com", "consumer").await;

    let response = post_json_auth(
        &app,
        "/api/consumer/location/update",
        &consumer.token,
        json!({ "latitude": 91.0, "longitude": 0.0 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn history_limit_is_bounded() {
    let (app, _store) = common::build_test_app();
    let consumer = common::signup(&app, "c@example.com", "consumer").await;

    let response =
        get_auth(&app, "/api/consumer/location/history?limit=0", &consumer.token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response =
        get_auth(&app, "/api/consumer/location/history?limit=5", &consumer.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["total"], 0);
}

#[tokio::test]
async fn assignee_sees_reporter_only_while_sharing() {
    let (app, _store) = common::build_test_app();
    let consumer = common::signup(&app, "c@example.com", "consumer").await;
    let electrician = common::signup(&app, "e@example.com", "electrician").await;
    let other = common::signup(&app, "o@example.com", "electrician").await;
    let id = common::create_fault_request(&app, &consumer, "Transformer spark").await;
    put_json_auth(
        &app,
        &format!("/api/electrician/fault-request/{id}/assign"),
        &electrician.token,
        json!({ "status": "assigned" }),
    )
    .await;
    post_json_auth(
        &app,
        "/api/consumer/location/update",
        &consumer.token,
        json!({ "latitude": 5.6, "longitude": -0.2 }),
    )
    .await;
    let uri = format!("/api/electrician/fault-request/{id}/consumer-location");

    let response = get_auth(&app, &uri, &electrician.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["user_id"], consumer.id);

    let response = get_auth(&app, &uri, &other.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(&app, &uri, &consumer.token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let stop = post_auth(&app, "/api/consumer/location/stop-sharing", &consumer.token).await;
    assert_eq!(stop.status(), StatusCode::OK);
    assert_eq!(body_json(stop).await["data"]["is_sharing"], false);
    let response = get_auth(&app, &uri, &electrician.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let resume = post_auth(&app, "/api/consumer/location/resume-sharing", &consumer.token).await;
    assert_eq!(resume.status(), StatusCode::OK);
    let response = get_auth(&app, &uri, &electrician.token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn toggling_sharing_without_a_location_is_404() {
    let (app, _store) = common::build_test_app();
    let consumer = common::signup(&app, "c@example.com", "consumer").await;

    let response = post_auth(&app, "/api/consumer/location/stop-sharing", &consumer.token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
