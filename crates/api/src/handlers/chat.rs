//! Handlers for request chat threads (`/chat/*`).

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use voltguard_core::types::DbId;
use voltguard_db::models::message::{MessageList, SendMessage};

use crate::engine::chat;
use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /chat/send
pub async fn send_message(
    auth: AuthUser,
    State(state): State<AppState>,
    AppJson(input): AppJson<SendMessage>,
) -> AppResult<impl IntoResponse> {
    let message = chat::send(state.store.as_ref(), &auth.caller(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: message })))
}

/// GET /chat/request/{request_id}
pub async fn list_messages(
    auth: AuthUser,
    State(state): State<AppState>,
    AppPath(request_id): AppPath<DbId>,
) -> AppResult<Json<DataResponse<MessageList>>> {
    let thread = chat::list(state.store.as_ref(), &auth.caller(), request_id).await?;
    Ok(Json(DataResponse { data: thread }))
}
