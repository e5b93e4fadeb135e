pub mod auth;
pub mod chat;
pub mod consumer;
pub mod electrician;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                                   register (public)
/// /auth/signin                                   sign in (public)
/// /auth/me                                       current profile
/// /auth/profile                                  edit profile (PUT)
/// /auth/role                                     consumer -> electrician (PUT)
///
/// /consumer/location/update                      upsert position (POST)
/// /consumer/location/current                     current position
/// /consumer/location/stop-sharing                hide position (POST)
/// /consumer/location/resume-sharing              show position (POST)
/// /consumer/location/history                     position list
/// /consumer/fault-request/create                 report a fault (POST)
/// /consumer/fault-requests                       own reports
/// /consumer/fault-request/{id}                   one own report
/// /consumer/fault-request/{id}/cancel            close own report (PUT)
///
/// /electrician/fault-requests                    triage queue
/// /electrician/fault-request/{id}                one request
/// /electrician/fault-request/{id}/assign         status / assignee (PUT)
/// /electrician/fault-request/{id}/consumer-location  reporter position
/// /electrician/my-assignments                    caller's assignments
///
/// /chat/send                                     post a message (POST)
/// /chat/request/{request_id}                     read a thread
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/consumer", consumer::router())
        .nest("/electrician", electrician::router())
        .nest("/chat", chat::router())
}
