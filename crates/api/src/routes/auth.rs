//! Route definitions for the `/auth` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup   -> signup
/// POST /signin   -> signin
/// GET  /me       -> me (requires auth)
/// PUT  /profile  -> update_profile (requires auth)
/// PUT  /role     -> update_role (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/me", get(auth::me))
        .route("/profile", put(auth::update_profile))
        .route("/role", put(auth::update_role))
}
