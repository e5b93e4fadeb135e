//! Shared query parameter types for API handlers.

use serde::Deserialize;
use voltguard_core::error::CoreError;
use voltguard_core::fault_request::FaultStatus;

/// `?status_filter=` on the fault request list endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct StatusFilterParams {
    pub status_filter: Option<String>,
}

impl StatusFilterParams {
    /// Parse the filter; an empty value means no filter.
    pub fn status(&self) -> Result<Option<FaultStatus>, CoreError> {
        match self.status_filter.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(raw) => raw.parse::<FaultStatus>().map(Some),
        }
    }
}

/// `?limit=` on the location history endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct HistoryParams {
    pub limit: Option<i64>,
}
