//! Access policy for fault requests and their chat threads.
//!
//! Every rule is a single exhaustive `match` on the action so that a new
//! action cannot be added without deciding who may perform it. Failed checks
//! always produce [`CoreError::Forbidden`]; whether the target exists is
//! settled by the caller before the policy runs.

use crate::error::CoreError;
use crate::fault_request::FaultState;
use crate::roles::Role;
use crate::types::DbId;

/// The authenticated identity performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: DbId,
    pub role: Role,
}

impl Caller {
    pub fn new(user_id: DbId, role: Role) -> Self {
        Self { user_id, role }
    }

    pub fn is_owner(&self, request: &FaultState) -> bool {
        request.consumer_id == self.user_id
    }

    pub fn is_assignee(&self, request: &FaultState) -> bool {
        self.role.is_field_staff() && request.assigned_to == Some(self.user_id)
    }
}

/// Operations that do not target an existing fault request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionAction {
    /// Report a new fault; the caller becomes the owner.
    Create,
    /// List the caller's own reports.
    ListOwn,
    /// Triage queue: every request in the system.
    ListAll,
    /// Requests assigned to the caller.
    ListAssigned,
}

/// Operations on one existing fault request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Consumer surface read.
    ViewOwned,
    /// Electrician surface read.
    ViewAsStaff,
    /// Assign and/or change status.
    Assign,
    Cancel,
    ReadThread,
    PostToThread,
    /// See the reporting consumer's live location.
    TrackReporter,
}

impl Action {
    fn describe(self) -> &'static str {
        match self {
            Action::ViewOwned => "view this fault request",
            Action::ViewAsStaff => "view fault requests",
            Action::Assign => "assign fault requests",
            Action::Cancel => "cancel this fault request",
            Action::ReadThread => "view messages in this request",
            Action::PostToThread => "message in this request",
            Action::TrackReporter => "see the reporter's location",
        }
    }
}

/// Decide a collection-level operation.
pub fn authorize_collection(caller: &Caller, action: CollectionAction) -> Result<(), CoreError> {
    let allowed = match action {
        CollectionAction::Create | CollectionAction::ListOwn => true,
        CollectionAction::ListAll | CollectionAction::ListAssigned => caller.role.is_field_staff(),
    };
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(
            "Only electricians can view fault requests".into(),
        ))
    }
}

/// Decide whether `caller` may perform `action` on `request`.
pub fn authorize(caller: &Caller, action: Action, request: &FaultState) -> Result<(), CoreError> {
    let allowed = match action {
        Action::ViewOwned | Action::Cancel => caller.is_owner(request),
        Action::ViewAsStaff | Action::Assign => caller.role.is_field_staff(),
        Action::ReadThread | Action::PostToThread => {
            caller.is_owner(request) || caller.is_assignee(request)
        }
        Action::TrackReporter => caller.is_assignee(request),
    };
    if allowed {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Not authorized to {}",
            action.describe()
        )))
    }
}

/// Role-only gate for staff actions, checked before the target is loaded.
pub fn require_field_staff(caller: &Caller, action: Action) -> Result<(), CoreError> {
    if caller.role.is_field_staff() {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "Only electricians can {}",
            action.describe()
        )))
    }
}
