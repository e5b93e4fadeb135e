//! Handlers for the electrician surface (`/electrician/*`).
//!
//! Every route here takes [`RequireFieldStaff`], so consumers are turned away
//! with 403 before any record is read.

use axum::extract::State;
use axum::Json;
use voltguard_core::types::DbId;
use voltguard_db::models::fault_request::{
    AssignFaultRequest, FaultRequestList, FaultRequestResponse,
};
use voltguard_db::models::location::Location;

use crate::engine::{fault_requests, locations};
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::rbac::RequireFieldStaff;
use crate::query::StatusFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /electrician/fault-requests
pub async fn list_fault_requests(
    RequireFieldStaff(auth): RequireFieldStaff,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<StatusFilterParams>,
) -> AppResult<Json<DataResponse<FaultRequestList>>> {
    let status = params.status()?;
    let list = fault_requests::list_all(state.store.as_ref(), &auth.caller(), status).await?;
    Ok(Json(DataResponse { data: list }))
}

/// GET /electrician/fault-request/{id}
pub async fn get_fault_request(
    RequireFieldStaff(auth): RequireFieldStaff,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<FaultRequestResponse>>> {
    let request = fault_requests::get_as_staff(state.store.as_ref(), &auth.caller(), id).await?;
    Ok(Json(DataResponse { data: request }))
}

/// PUT /electrician/fault-request/{id}/assign
pub async fn assign_fault_request(
    RequireFieldStaff(auth): RequireFieldStaff,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
    AppJson(input): AppJson<AssignFaultRequest>,
) -> AppResult<Json<DataResponse<FaultRequestResponse>>> {
    let request = fault_requests::assign(state.store.as_ref(), &auth.caller(), id, input).await?;
    Ok(Json(DataResponse { data: request }))
}

/// GET /electrician/my-assignments
pub async fn my_assignments(
    RequireFieldStaff(auth): RequireFieldStaff,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<StatusFilterParams>,
) -> AppResult<Json<DataResponse<FaultRequestList>>> {
    let status = params.status()?;
    let list = fault_requests::list_assigned(state.store.as_ref(), &auth.caller(), status).await?;
    Ok(Json(DataResponse { data: list }))
}

/// GET /electrician/fault-request/{id}/consumer-location
pub async fn consumer_location(
    RequireFieldStaff(auth): RequireFieldStaff,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<Location>>> {
    let location = locations::reporter_location(state.store.as_ref(), &auth.caller(), id).await?;
    Ok(Json(DataResponse { data: location }))
}
