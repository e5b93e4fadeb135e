//! Handlers for the `/auth` resource.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use voltguard_db::models::user::{UpdateProfile, UserResponse};

use crate::engine::identity::{self, SigninRequest, SignupRequest, TokenResponse};
use crate::error::AppResult;
use crate::extract::AppJson;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/auth/signup
///
/// Register an account and return a token for it.
pub async fn signup(
    State(state): State<AppState>,
    AppJson(input): AppJson<SignupRequest>,
) -> AppResult<impl IntoResponse> {
    let response = identity::signup(state.store.as_ref(), &state.config.jwt, input).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// POST /api/auth/signin
pub async fn signin(
    State(state): State<AppState>,
    AppJson(input): AppJson<SigninRequest>,
) -> AppResult<Json<TokenResponse>> {
    let response = identity::signin(state.store.as_ref(), &state.config.jwt, input).await?;
    Ok(Json(response))
}

/// GET /api/auth/me
pub async fn me(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = identity::current_user(state.store.as_ref(), auth.user_id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/auth/profile
pub async fn update_profile(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<UpdateProfile>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = identity::update_profile(state.store.as_ref(), auth.user_id, input).await?;
    Ok(Json(DataResponse { data: user }))
}

/// PUT /api/auth/role
///
/// Self-promotion from consumer to electrician. The old token keeps the old
/// role until it expires, so clients should switch to the returned one.
pub async fn update_role(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<TokenResponse>> {
    let response =
        identity::promote_to_electrician(state.store.as_ref(), &state.config.jwt, auth.user_id)
            .await?;
    Ok(Json(response))
}
