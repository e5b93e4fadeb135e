//! Handlers for the consumer surface of fault requests.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use voltguard_core::types::DbId;
use voltguard_db::models::fault_request::{CreateFaultRequest, FaultRequestList, FaultRequestResponse};

use crate::engine::fault_requests;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::StatusFilterParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// POST /consumer/fault-request/create
// ---------------------------------------------------------------------------

pub async fn create_fault_request(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<CreateFaultRequest>,
) -> AppResult<impl IntoResponse> {
    let created = fault_requests::create(state.store.as_ref(), &auth.caller(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

// ---------------------------------------------------------------------------
// GET /consumer/fault-requests
// ---------------------------------------------------------------------------

pub async fn list_my_fault_requests(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<StatusFilterParams>,
) -> AppResult<Json<DataResponse<FaultRequestList>>> {
    let status = params.status()?;
    let list = fault_requests::list_own(state.store.as_ref(), &auth.caller(), status).await?;
    Ok(Json(DataResponse { data: list }))
}

// ---------------------------------------------------------------------------
// GET /consumer/fault-request/{id}
// ---------------------------------------------------------------------------

pub async fn get_fault_request(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<FaultRequestResponse>>> {
    let request = fault_requests::get_owned(state.store.as_ref(), &auth.caller(), id).await?;
    Ok(Json(DataResponse { data: request }))
}

// ---------------------------------------------------------------------------
// PUT /consumer/fault-request/{id}/cancel
// ---------------------------------------------------------------------------

pub async fn cancel_fault_request(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<FaultRequestResponse>>> {
    let request = fault_requests::cancel(state.store.as_ref(), &auth.caller(), id).await?;
    Ok(Json(DataResponse { data: request }))
}
