//! Fault request entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use voltguard_core::error::CoreError;
use voltguard_core::fault_request::{FaultState, FaultStatus, Priority};
use voltguard_core::location::validate_optional_coordinates;
use voltguard_core::types::{DbId, Timestamp};

/// A row from the `fault_requests` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct FaultRequest {
    pub id: DbId,
    pub consumer_id: DbId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo_url: Option<String>,
    #[sqlx(try_from = "String")]
    pub status: FaultStatus,
    #[sqlx(try_from = "String")]
    pub priority: Priority,
    pub assigned_to: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl FaultRequest {
    /// The subset of the row the access policy and lifecycle rules look at.
    pub fn state(&self) -> FaultState {
        FaultState {
            consumer_id: self.consumer_id,
            status: self.status,
            assigned_to: self.assigned_to,
        }
    }
}

/// Request body for `POST /consumer/fault-request`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateFaultRequest {
    #[validate(length(min = 3, message = "must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "must be at least 10 characters"))]
    pub description: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub priority: Option<Priority>,
    pub photo_url: Option<String>,
}

impl CreateFaultRequest {
    /// The input with surrounding whitespace stripped from its text fields.
    pub fn trimmed(self) -> Self {
        Self {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            location: self.location.trim().to_string(),
            ..self
        }
    }

    /// Length rules apply to the text as it will be stored, so padding does
    /// not count toward the minimums.
    pub fn check(&self) -> Result<(), CoreError> {
        self.clone().trimmed().validate()?;
        validate_optional_coordinates(self.latitude, self.longitude)
    }
}

/// Internal insert DTO. Status always starts at `open` with no assignee.
#[derive(Debug, Clone)]
pub struct NewFaultRequest {
    pub consumer_id: DbId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub photo_url: Option<String>,
    pub priority: Priority,
}

impl NewFaultRequest {
    pub fn from_input(consumer_id: DbId, input: CreateFaultRequest) -> Self {
        let input = input.trimmed();
        Self {
            consumer_id,
            title: input.title,
            description: input.description,
            location: input.location,
            latitude: input.latitude,
            longitude: input.longitude,
            photo_url: input.photo_url,
            priority: input.priority.unwrap_or_default(),
        }
    }
}

/// Status/assignee write. `assigned_to: None` leaves the assignee unchanged.
#[derive(Debug, Clone)]
pub struct FaultRequestUpdate {
    pub status: FaultStatus,
    pub assigned_to: Option<DbId>,
    /// When set, the write only applies while the stored status is not `closed`.
    pub refuse_if_closed: bool,
}

/// Request body for `PUT /electrician/fault-request/{id}/assign`.
///
/// `status` stays a raw string so unknown values surface as a validation
/// error instead of a body rejection.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignFaultRequest {
    pub status: String,
    pub assigned_to: Option<DbId>,
}

#[derive(Debug, Clone, Default)]
pub struct FaultRequestFilter {
    pub consumer_id: Option<DbId>,
    pub assigned_to: Option<DbId>,
    pub status: Option<FaultStatus>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FaultRequestSort {
    #[default]
    NewestFirst,
    /// Highest priority severity first, newest first within a priority.
    PriorityThenNewest,
}

/// Fault request as returned to clients, with the assignee's display name.
#[derive(Debug, Clone, Serialize)]
pub struct FaultRequestResponse {
    #[serde(flatten)]
    pub request: FaultRequest,
    pub assigned_to_name: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FaultRequestList {
    pub requests: Vec<FaultRequestResponse>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> CreateFaultRequest {
        CreateFaultRequest {
            title: "Power outage".into(),
            description: "No power since 9am in the whole block".into(),
            location: "12 Elm St".into(),
            latitude: None,
            longitude: None,
            priority: None,
            photo_url: None,
        }
    }

    #[test]
    fn valid_input_passes() {
        assert!(input().check().is_ok());
    }

    #[test]
    fn short_description_is_rejected() {
        let req = CreateFaultRequest {
            description: "too short".into(),
            ..input()
        };
        let err = req.check().unwrap_err();
        assert!(err.to_string().contains("description"));
    }

    #[test]
    fn whitespace_title_is_rejected() {
        let req = CreateFaultRequest {
            title: "     ".into(),
            ..input()
        };
        assert!(req.check().is_err());
    }

    #[test]
    fn padding_does_not_count_toward_minimum_lengths() {
        let padded_title = CreateFaultRequest {
            title: "  a  ".into(),
            ..input()
        };
        let err = padded_title.check().unwrap_err();
        assert!(err.to_string().contains("title"));

        let padded_description = CreateFaultRequest {
            description: "   short    ".into(),
            ..input()
        };
        assert!(padded_description.check().is_err());
    }

    #[test]
    fn stored_text_is_trimmed() {
        let req = CreateFaultRequest {
            title: "  Power outage ".into(),
            location: " 12 Elm St ".into(),
            ..input()
        };
        assert!(req.check().is_ok());
        let new = NewFaultRequest::from_input(7, req);
        assert_eq!(new.title, "Power outage");
        assert_eq!(new.location, "12 Elm St");
    }

    #[test]
    fn half_a_coordinate_pair_is_rejected() {
        let req = CreateFaultRequest {
            latitude: Some(12.0),
            ..input()
        };
        assert!(req.check().is_err());
    }

    #[test]
    fn priority_defaults_to_medium() {
        let new = NewFaultRequest::from_input(7, input());
        assert_eq!(new.priority, Priority::Medium);
        assert_eq!(new.consumer_id, 7);
    }
}
