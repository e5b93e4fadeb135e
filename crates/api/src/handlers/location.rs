//! Handlers for the caller's own shared location (`/consumer/location/*`).

use axum::extract::State;
use axum::Json;
use voltguard_db::models::location::{Location, LocationHistory, LocationUpdate};

use crate::engine::locations;
use crate::error::AppResult;
use crate::extract::{AppJson, AppQuery};
use crate::middleware::auth::AuthUser;
use crate::query::HistoryParams;
use crate::response::DataResponse;
use crate::state::AppState;

type LocationResponse = AppResult<Json<DataResponse<Location>>>;

/// POST /consumer/location/update
pub async fn update_location(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<LocationUpdate>,
) -> LocationResponse {
    let location = locations::update(state.store.as_ref(), auth.user_id, input).await?;
    Ok(Json(DataResponse { data: location }))
}

/// GET /consumer/location/current
pub async fn current_location(auth: AuthUser, State(state): State<AppState>) -> LocationResponse {
    let location = locations::current(state.store.as_ref(), auth.user_id).await?;
    Ok(Json(DataResponse { data: location }))
}

/// POST /consumer/location/stop-sharing
pub async fn stop_sharing(auth: AuthUser, State(state): State<AppState>) -> LocationResponse {
    let location = locations::set_sharing(state.store.as_ref(), auth.user_id, false).await?;
    Ok(Json(DataResponse { data: location }))
}

/// POST /consumer/location/resume-sharing
pub async fn resume_sharing(auth: AuthUser, State(state): State<AppState>) -> LocationResponse {
    let location = locations::set_sharing(state.store.as_ref(), auth.user_id, true).await?;
    Ok(Json(DataResponse { data: location }))
}

/// GET /consumer/location/history
pub async fn location_history(
    auth: AuthUser,
    State(state): State<AppState>,
    AppQuery(params): AppQuery<HistoryParams>,
) -> AppResult<Json<DataResponse<LocationHistory>>> {
    let history = locations::history(state.store.as_ref(), auth.user_id, params.limit).await?;
    Ok(Json(DataResponse { data: history }))
}
