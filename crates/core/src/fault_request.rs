//! Fault request lifecycle: statuses, priorities and the transition rules.
//!
//! ```text
//! open -> assigned -> in_progress -> resolved -> closed
//!   \________\______________\____________\______/   (owner cancel)
//! ```
//!
//! Field staff may set any non-terminal status through the assign action.
//! `closed` is terminal: further status writes are rejected, while a repeated
//! owner cancel is a no-op.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::access::Caller;
use crate::error::CoreError;
use crate::roles::Role;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

pub const STATUS_OPEN: &str = "open";
pub const STATUS_ASSIGNED: &str = "assigned";
pub const STATUS_IN_PROGRESS: &str = "in_progress";
pub const STATUS_RESOLVED: &str = "resolved";
pub const STATUS_CLOSED: &str = "closed";

/// All valid fault request statuses, in lifecycle order.
pub const VALID_STATUSES: &[&str] = &[
    STATUS_OPEN,
    STATUS_ASSIGNED,
    STATUS_IN_PROGRESS,
    STATUS_RESOLVED,
    STATUS_CLOSED,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultStatus {
    Open,
    Assigned,
    InProgress,
    Resolved,
    Closed,
}

impl FaultStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            FaultStatus::Open => STATUS_OPEN,
            FaultStatus::Assigned => STATUS_ASSIGNED,
            FaultStatus::InProgress => STATUS_IN_PROGRESS,
            FaultStatus::Resolved => STATUS_RESOLVED,
            FaultStatus::Closed => STATUS_CLOSED,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == FaultStatus::Closed
    }

    /// Statuses past `open` that an assign action may set. Each needs an assignee.
    pub fn requires_assignee(self) -> bool {
        matches!(
            self,
            FaultStatus::Assigned | FaultStatus::InProgress | FaultStatus::Resolved
        )
    }
}

impl fmt::Display for FaultStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FaultStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            STATUS_OPEN => Ok(FaultStatus::Open),
            STATUS_ASSIGNED => Ok(FaultStatus::Assigned),
            STATUS_IN_PROGRESS => Ok(FaultStatus::InProgress),
            STATUS_RESOLVED => Ok(FaultStatus::Resolved),
            STATUS_CLOSED => Ok(FaultStatus::Closed),
            other => Err(CoreError::Validation(format!(
                "Invalid fault request status '{other}'. Must be one of: {}",
                VALID_STATUSES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for FaultStatus {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Priority
// ---------------------------------------------------------------------------

pub const PRIORITY_LOW: &str = "low";
pub const PRIORITY_MEDIUM: &str = "medium";
pub const PRIORITY_HIGH: &str = "high";
pub const PRIORITY_CRITICAL: &str = "critical";

pub const VALID_PRIORITIES: &[&str] =
    &[PRIORITY_LOW, PRIORITY_MEDIUM, PRIORITY_HIGH, PRIORITY_CRITICAL];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => PRIORITY_LOW,
            Priority::Medium => PRIORITY_MEDIUM,
            Priority::High => PRIORITY_HIGH,
            Priority::Critical => PRIORITY_CRITICAL,
        }
    }

    /// Sort key for triage queues; higher is more urgent.
    pub fn severity(self) -> u8 {
        match self {
            Priority::Low => 1,
            Priority::Medium => 2,
            Priority::High => 3,
            Priority::Critical => 4,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            PRIORITY_LOW => Ok(Priority::Low),
            PRIORITY_MEDIUM => Ok(Priority::Medium),
            PRIORITY_HIGH => Ok(Priority::High),
            PRIORITY_CRITICAL => Ok(Priority::Critical),
            other => Err(CoreError::Validation(format!(
                "Invalid priority '{other}'. Must be one of: {}",
                VALID_PRIORITIES.join(", ")
            ))),
        }
    }
}

impl TryFrom<String> for Priority {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// The slice of a fault request that policy and lifecycle decisions read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaultState {
    pub consumer_id: DbId,
    pub status: FaultStatus,
    pub assigned_to: Option<DbId>,
}

/// Validate that a status write from `current` to `next` is allowed.
///
/// Any member of the status enum may follow a non-terminal status.
pub fn validate_transition(current: FaultStatus, next: FaultStatus) -> Result<(), CoreError> {
    if current.is_terminal() {
        return Err(CoreError::Validation(format!(
            "Fault request is {current} and cannot move to '{next}'"
        )));
    }
    Ok(())
}

/// Field values an assign action writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    pub status: FaultStatus,
    /// `None` leaves the current assignee untouched.
    pub assigned_to: Option<DbId>,
}

/// Compute the outcome of an assign / status-update action.
///
/// An explicit assignee always wins. Without one, a caller whose role is
/// exactly `electrician` takes the request; a lineman leaves the assignee
/// as it is.
///
/// A request has an assignee exactly when it has moved past `open`: setting
/// `open` never assigns anyone and is refused once someone holds the request,
/// and `assigned`, `in_progress` and `resolved` need someone assigned once the
/// write lands.
pub fn plan_assignment(
    caller: &Caller,
    current: &FaultState,
    requested: FaultStatus,
    explicit_assignee: Option<DbId>,
) -> Result<Assignment, CoreError> {
    validate_transition(current.status, requested)?;

    if requested == FaultStatus::Open {
        if explicit_assignee.is_some() || current.assigned_to.is_some() {
            return Err(CoreError::Validation(
                "An open fault request cannot have an assignee".into(),
            ));
        }
        return Ok(Assignment {
            status: FaultStatus::Open,
            assigned_to: None,
        });
    }

    let assigned_to = match explicit_assignee {
        Some(id) => Some(id),
        None if caller.role == Role::Electrician => Some(caller.user_id),
        None => None,
    };

    if requested.requires_assignee() && assigned_to.or(current.assigned_to).is_none() {
        return Err(CoreError::Validation(format!(
            "Status '{requested}' requires an assignee; supply assigned_to"
        )));
    }

    Ok(Assignment {
        status: requested,
        assigned_to,
    })
}

/// What an owner cancel does to the stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelOutcome {
    /// Status must be written as `closed`.
    Close,
    /// Already closed; nothing to write.
    AlreadyClosed,
}

pub fn plan_cancel(current: FaultStatus) -> CancelOutcome {
    if current.is_terminal() {
        CancelOutcome::AlreadyClosed
    } else {
        CancelOutcome::Close
    }
}
