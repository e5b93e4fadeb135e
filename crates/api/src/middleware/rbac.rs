//! Role-based access control (RBAC) extractors.
//!
//! Each extractor wraps [`AuthUser`] and rejects requests whose role does not
//! meet the requirement, before the handler loads anything.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use voltguard_core::access::{authorize_collection, CollectionAction};

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires the `electrician` or `lineman` role. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn staff_only(RequireFieldStaff(user): RequireFieldStaff) -> AppResult<Json<()>> {
///     Ok(Json(()))
/// }
/// ```
pub struct RequireFieldStaff(pub AuthUser);

impl FromRequestParts<AppState> for RequireFieldStaff {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if let Err(err) = authorize_collection(&user.caller(), CollectionAction::ListAll) {
            tracing::warn!(user_id = user.user_id, role = %user.role, "Field staff route denied");
            return Err(err.into());
        }
        Ok(RequireFieldStaff(user))
    }
}
