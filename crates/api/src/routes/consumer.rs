//! Route definitions for the `/consumer` surface.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::{consumer, location};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/location/update", post(location::update_location))
        .route("/location/current", get(location::current_location))
        .route("/location/stop-sharing", post(location::stop_sharing))
        .route("/location/resume-sharing", post(location::resume_sharing))
        .route("/location/history", get(location::location_history))
        .route("/fault-request/create", post(consumer::create_fault_request))
        .route("/fault-requests", get(consumer::list_my_fault_requests))
        .route("/fault-request/{id}", get(consumer::get_fault_request))
        .route("/fault-request/{id}/cancel", put(consumer::cancel_fault_request))
}
