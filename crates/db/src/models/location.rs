//! Consumer location entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;
use voltguard_core::error::CoreError;
use voltguard_core::location::validate_coordinates;
use voltguard_core::types::{DbId, Timestamp};

/// The single location record kept per user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Location {
    pub user_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub is_sharing: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Request body for `POST /consumer/location/update`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LocationUpdate {
    pub latitude: f64,
    pub longitude: f64,
    #[validate(range(min = 0.0, message = "must not be negative"))]
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    /// Defaults to sharing when omitted.
    pub is_sharing: Option<bool>,
}

impl LocationUpdate {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()?;
        validate_coordinates(self.latitude, self.longitude)
    }
}

/// Internal upsert DTO.
#[derive(Debug, Clone)]
pub struct UpsertLocation {
    pub user_id: DbId,
    pub latitude: f64,
    pub longitude: f64,
    pub accuracy: Option<f64>,
    pub altitude: Option<f64>,
    pub is_sharing: bool,
}

impl UpsertLocation {
    pub fn from_input(user_id: DbId, input: LocationUpdate) -> Self {
        Self {
            user_id,
            latitude: input.latitude,
            longitude: input.longitude,
            accuracy: input.accuracy,
            altitude: input.altitude,
            is_sharing: input.is_sharing.unwrap_or(true),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationHistory {
    pub locations: Vec<Location>,
    pub total: usize,
}
