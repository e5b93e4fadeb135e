//! Orchestration layer.
//!
//! Each flow loads records through the [`Store`], hands them to the
//! `voltguard_core` rules for a decision and writes back what those rules
//! compute. Functions take the store as `&dyn Store` and the caller identity
//! explicitly, so they run the same against `PgStore` and `MemoryStore`.

use std::collections::HashMap;

use voltguard_core::error::CoreError;
use voltguard_core::types::DbId;
use voltguard_db::models::fault_request::{FaultRequest, FaultRequestResponse};
use voltguard_db::store::Store;

use crate::error::{AppError, AppResult};

pub mod chat;
pub mod fault_requests;
pub mod identity;
pub mod locations;

/// Load a fault request or fail with `NotFound`.
pub(crate) async fn load_fault_request(store: &dyn Store, id: DbId) -> AppResult<FaultRequest> {
    store
        .get_fault_request(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Fault request",
            id,
        }))
}

/// Attach `assigned_to_name` to each request with a single batched user lookup.
pub(crate) async fn with_assignee_names(
    store: &dyn Store,
    requests: Vec<FaultRequest>,
) -> AppResult<Vec<FaultRequestResponse>> {
    let mut ids: Vec<DbId> = requests.iter().filter_map(|r| r.assigned_to).collect();
    ids.sort_unstable();
    ids.dedup();

    let names: HashMap<DbId, String> = if ids.is_empty() {
        HashMap::new()
    } else {
        store
            .get_users_by_ids(&ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u.full_name))
            .collect()
    };

    Ok(requests
        .into_iter()
        .map(|request| {
            let assigned_to_name = request.assigned_to.and_then(|id| names.get(&id).cloned());
            FaultRequestResponse {
                request,
                assigned_to_name,
            }
        })
        .collect())
}

pub(crate) async fn with_assignee_name(
    store: &dyn Store,
    request: FaultRequest,
) -> AppResult<FaultRequestResponse> {
    let mut responses = with_assignee_names(store, vec![request]).await?;
    responses
        .pop()
        .ok_or_else(|| AppError::InternalError("assignee name resolution dropped a row".into()))
}
