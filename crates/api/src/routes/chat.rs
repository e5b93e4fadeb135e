use axum::routing::{get, post};
use axum::Router;

use crate::handlers::chat;
use crate::state::AppState;

/// Routes mounted at `/chat`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/send", post(chat::send_message))
        .route("/request/{request_id}", get(chat::list_messages))
}
