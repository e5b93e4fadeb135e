//! Fault request flows for both the consumer and the electrician surface.
//!
//! Staff-only flows check the caller's role before loading the target, so a
//! consumer probing ids gets 403 rather than learning which ids exist.
//! Owner flows load first (404) and then apply the ownership rule (403).
//!
//! Two concurrent assigns on the same request are last-write-wins; the only
//! guard on the write is that a `closed` row is never reopened.

use voltguard_core::access::{
    authorize, authorize_collection, require_field_staff, Action, Caller, CollectionAction,
};
use voltguard_core::error::CoreError;
use voltguard_core::fault_request::{
    plan_assignment, plan_cancel, validate_transition, CancelOutcome, FaultStatus,
};
use voltguard_core::types::DbId;
use voltguard_db::models::fault_request::{
    AssignFaultRequest, CreateFaultRequest, FaultRequestFilter, FaultRequestList,
    FaultRequestResponse, FaultRequestSort, FaultRequestUpdate, NewFaultRequest,
};
use voltguard_db::store::Store;

use super::{load_fault_request, with_assignee_name, with_assignee_names};
use crate::error::{AppError, AppResult};

// ---------------------------------------------------------------------------
// Consumer surface
// ---------------------------------------------------------------------------

/// Report a new fault. The caller becomes the owner; status starts at `open`.
pub async fn create(
    store: &dyn Store,
    caller: &Caller,
    input: CreateFaultRequest,
) -> AppResult<FaultRequestResponse> {
    authorize_collection(caller, CollectionAction::Create)?;
    input.check()?;

    let request = store
        .insert_fault_request(&NewFaultRequest::from_input(caller.user_id, input))
        .await?;

    tracing::info!(
        fault_request_id = request.id,
        consumer_id = caller.user_id,
        priority = %request.priority,
        "Fault request created",
    );

    Ok(FaultRequestResponse {
        request,
        assigned_to_name: None,
    })
}

/// The caller's own reports, newest first.
pub async fn list_own(
    store: &dyn Store,
    caller: &Caller,
    status: Option<FaultStatus>,
) -> AppResult<FaultRequestList> {
    authorize_collection(caller, CollectionAction::ListOwn)?;
    let filter = FaultRequestFilter {
        consumer_id: Some(caller.user_id),
        status,
        ..Default::default()
    };
    list(store, &filter, FaultRequestSort::NewestFirst).await
}

pub async fn get_owned(
    store: &dyn Store,
    caller: &Caller,
    id: DbId,
) -> AppResult<FaultRequestResponse> {
    let request = load_fault_request(store, id).await?;
    authorize(caller, Action::ViewOwned, &request.state())?;
    with_assignee_name(store, request).await
}

/// Close the caller's own request. Cancelling a closed request is a no-op.
pub async fn cancel(
    store: &dyn Store,
    caller: &Caller,
    id: DbId,
) -> AppResult<FaultRequestResponse> {
    let request = load_fault_request(store, id).await?;
    authorize(caller, Action::Cancel, &request.state())?;

    match plan_cancel(request.status) {
        CancelOutcome::AlreadyClosed => {
            tracing::debug!(fault_request_id = id, "Cancel on closed request, nothing to do");
            with_assignee_name(store, request).await
        }
        CancelOutcome::Close => {
            let update = FaultRequestUpdate {
                status: FaultStatus::Closed,
                assigned_to: None,
                refuse_if_closed: true,
            };
            // Zero matches means a concurrent cancel already closed it.
            store.update_fault_request_fields(id, &update).await?;
            tracing::info!(fault_request_id = id, consumer_id = caller.user_id, "Fault request cancelled");
            let closed = load_fault_request(store, id).await?;
            with_assignee_name(store, closed).await
        }
    }
}

// ---------------------------------------------------------------------------
// Electrician surface
// ---------------------------------------------------------------------------

/// Triage queue: every request, highest priority first, then newest.
pub async fn list_all(
    store: &dyn Store,
    caller: &Caller,
    status: Option<FaultStatus>,
) -> AppResult<FaultRequestList> {
    authorize_collection(caller, CollectionAction::ListAll)?;
    let filter = FaultRequestFilter {
        status,
        ..Default::default()
    };
    list(store, &filter, FaultRequestSort::PriorityThenNewest).await
}

/// Requests currently assigned to the caller, newest first.
pub async fn list_assigned(
    store: &dyn Store,
    caller: &Caller,
    status: Option<FaultStatus>,
) -> AppResult<FaultRequestList> {
    authorize_collection(caller, CollectionAction::ListAssigned)?;
    let filter = FaultRequestFilter {
        assigned_to: Some(caller.user_id),
        status,
        ..Default::default()
    };
    list(store, &filter, FaultRequestSort::NewestFirst).await
}

pub async fn get_as_staff(
    store: &dyn Store,
    caller: &Caller,
    id: DbId,
) -> AppResult<FaultRequestResponse> {
    require_field_staff(caller, Action::ViewAsStaff)?;
    let request = load_fault_request(store, id).await?;
    authorize(caller, Action::ViewAsStaff, &request.state())?;
    with_assignee_name(store, request).await
}

/// Set a request's status and, where the rules call for it, its assignee.
pub async fn assign(
    store: &dyn Store,
    caller: &Caller,
    id: DbId,
    input: AssignFaultRequest,
) -> AppResult<FaultRequestResponse> {
    require_field_staff(caller, Action::Assign)?;
    let requested: FaultStatus = input.status.trim().parse()?;

    let current = load_fault_request(store, id).await?;
    authorize(caller, Action::Assign, &current.state())?;

    if let Some(assignee_id) = input.assigned_to {
        ensure_assignable(store, assignee_id).await?;
    }

    let plan = plan_assignment(caller, &current.state(), requested, input.assigned_to)?;
    let update = FaultRequestUpdate {
        status: plan.status,
        assigned_to: plan.assigned_to,
        refuse_if_closed: true,
    };

    let matched = store.update_fault_request_fields(id, &update).await?;
    if matched == 0 {
        // Closed (or gone) between the read and the write.
        let latest = load_fault_request(store, id).await?;
        validate_transition(latest.status, requested)?;
        return Err(AppError::InternalError(format!(
            "Update of fault request {id} matched no rows"
        )));
    }

    tracing::info!(
        fault_request_id = id,
        user_id = caller.user_id,
        status = %plan.status,
        assigned_to = ?plan.assigned_to,
        "Fault request status updated",
    );

    let updated = load_fault_request(store, id).await?;
    with_assignee_name(store, updated).await
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn list(
    store: &dyn Store,
    filter: &FaultRequestFilter,
    sort: FaultRequestSort,
) -> AppResult<FaultRequestList> {
    let rows = store.list_fault_requests(filter, sort).await?;
    let requests = with_assignee_names(store, rows).await?;
    Ok(FaultRequestList {
        total: requests.len(),
        requests,
    })
}

/// An explicit assignee must be an existing electrician or lineman.
async fn ensure_assignable(store: &dyn Store, assignee_id: DbId) -> AppResult<()> {
    match store.get_user(assignee_id).await? {
        Some(user) if user.role.is_field_staff() => Ok(()),
        Some(_) => Err(CoreError::Validation(format!(
            "User {assignee_id} is not an electrician or lineman"
        ))
        .into()),
        None => Err(CoreError::Validation(format!(
            "Assignee {assignee_id} does not exist"
        ))
        .into()),
    }
}
