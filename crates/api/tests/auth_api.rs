//! Integration tests for `/api/auth/*`.

mod common;

use axum::http::StatusCode;
use chrono::Utc;
use common::{body_json, get, get_auth, post_json, put_auth, put_json_auth, PASSWORD};
use serde_json::json;
use voltguard_api::auth::jwt::generate_access_token_at;
use voltguard_core::roles::Role;

#[tokio::test]
async fn signup_returns_token_and_user() {
    let (app, _store) = common::build_test_app();
    let body = json!({
        "email": "ada@example.com",
        "password": PASSWORD,
        "full_name": "Ada Okafor",
    });
    let response = post_json(&app, "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let json = body_json(response).await;
    assert_eq!(json["token_type"], "bearer");
    assert!(json["access_token"].as_str().is_some_and(|t| !t.is_empty()));
    assert_eq!(json["user"]["email"], "ada@example.com");
    assert_eq!(json["user"]["role"], "consumer");
    assert!(json["user"].get("password_hash").is_none());
}

#[tokio::test]
async fn duplicate_email_is_rejected() {
    let (app, _store) = common::build_test_app();
    common::signup(&app, "dup@example.com", "consumer").await;

    let body = json!({
        "email": "dup@example.com",
        "password": PASSWORD,
        "full_name": "Second Person",
    });
    let response = post_json(&app, "/api/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"], "Email already registered");
}

#[tokio::test]
async fn signup_rejects_admin_role_and_short_password() {
    let (app, _store) = common::build_test_app();

    let admin = json!({
        "email": "root@example.com",
        "password": PASSWORD,
        "full_name": "Root User",
        "role": "admin",
    });
    let response = post_json(&app, "/api/auth/signup", admin).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let short = json!({
        "email": "short@example.com",
        "password": "abc",
        "full_name": "Short Pass",
    });
    let response = post_json(&app, "/api/auth/signup", short).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn signin_accepts_correct_password_only() {
    let (app, _store) = common::build_test_app();
    common::signup(&app, "bo@example.com", "electrician").await;

    let ok = post_json(
        &app,
        "/api/auth/signin",
        json!({ "email": "bo@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["user"]["role"], "electrician");

    let wrong = post_json(
        &app,
        "/api/auth/signin",
        json!({ "email": "bo@example.com", "password": "not-the-password" }),
    )
    .await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let wrong_json = body_json(wrong).await;

    let unknown = post_json(
        &app,
        "/api/auth/signin",
        json!({ "email": "nobody@example.com", "password": PASSWORD }),
    )
    .await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await["error"], wrong_json["error"]);
}

#[tokio::test]
async fn me_requires_a_valid_token() {
    let (app, _store) = common::build_test_app();
    let account = common::signup(&app, "me@example.com", "consumer").await;

    let missing = get(&app, "/api/auth/me").await;
    assert_eq!(missing.status(), StatusCode::UNAUTHORIZED);

    let garbage = get_auth(&app, "/api/auth/me", "not-a-jwt").await;
    assert_eq!(garbage.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(garbage).await["error"], "Invalid or expired token");

    let ok = get_auth(&app, "/api/auth/me", &account.token).await;
    assert_eq!(ok.status(), StatusCode::OK);
    let json = body_json(ok).await;
    assert_eq!(json["data"]["id"], account.id);
    assert_eq!(json["data"]["email"], "me@example.com");
}

#[tokio::test]
async fn expired_token_is_rejected() {
    let (app, _store) = common::build_test_app();
    let account = common::signup(&app, "old@example.com", "consumer").await;
    let config = common::test_config();

    let issued = Utc::now().timestamp() - (config.jwt.expiration_hours + 2) * 3600;
    let token =
        generate_access_token_at(account.id, "old@example.com", Role::Consumer, &config.jwt, issued)
            .unwrap();

    let response = get_auth(&app, "/api/auth/me", &token).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Invalid or expired token");
}

#[tokio::test]
async fn profile_update_changes_only_given_fields() {
    let (app, _store) = common::build_test_app();
    let account = common::signup(&app, "pat@example.com", "consumer").await;

    let response = put_json_auth(
        &app,
        "/api/auth/profile",
        &account.token,
        json!({ "full_name": "Pat Mensah", "phone": "+233 20 000 0000" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["full_name"], "Pat Mensah");
    assert_eq!(json["data"]["phone"], "+233 20 000 0000");
    assert_eq!(json["data"]["email"], "pat@example.com");
    assert_eq!(json["data"]["role"], "consumer");
}

#[tokio::test]
async fn profile_update_cannot_take_another_users_email() {
    let (app, _store) = common::build_test_app();
    common::signup(&app, "taken@example.com", "consumer").await;
    let account = common::signup(&app, "mine@example.com", "consumer").await;

    let response = put_json_auth(
        &app,
        "/api/auth/profile",
        &account.token,
        json!({ "email": "taken@example.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn role_promotion_issues_an_electrician_token() {
    let (app, _store) = common::build_test_app();
    let account = common::signup(&app, "promote@example.com", "consumer").await;

    let before = get_auth(&app, "/api/electrician/fault-requests", &account.token).await;
    assert_eq!(before.status(), StatusCode::FORBIDDEN);

    let response = put_auth(&app, "/api/auth/role", &account.token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["user"]["role"], "electrician");
    let new_token = json["access_token"].as_str().unwrap();

    let after = get_auth(&app, "/api/electrician/fault-requests", new_token).await;
    assert_eq!(after.status(), StatusCode::OK);
}
