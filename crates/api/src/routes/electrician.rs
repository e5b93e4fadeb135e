//! Route definitions for the `/electrician` surface.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::electrician;
use crate::state::AppState;

/// Routes mounted at `/electrician`. All require the electrician or lineman role.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/fault-requests", get(electrician::list_fault_requests))
        .route("/fault-request/{id}", get(electrician::get_fault_request))
        .route("/fault-request/{id}/assign", put(electrician::assign_fault_request))
        .route(
            "/fault-request/{id}/consumer-location",
            get(electrician::consumer_location),
        )
        .route("/my-assignments", get(electrician::my_assignments))
}
