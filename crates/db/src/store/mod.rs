//! Storage port.
//!
//! Handlers and the orchestration layer talk to persistence only through
//! [`Store`]. [`PgStore`] backs it with the repositories; [`MemoryStore`] is an
//! in-process fixture with the same contract.

use async_trait::async_trait;
use voltguard_core::types::DbId;

use crate::models::fault_request::{
    FaultRequest, FaultRequestFilter, FaultRequestSort, FaultRequestUpdate, NewFaultRequest,
};
use crate::models::location::{Location, UpsertLocation};
use crate::models::message::{Message, NewMessage};
use crate::models::user::{CreateUser, UpdateUser, User};

pub mod memory;
pub mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Failures surfaced by a [`Store`] implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    /// A write hit a unique constraint.
    #[error("Duplicate value violates unique constraint: {constraint}")]
    Duplicate { constraint: String },

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A stored value could not be decoded into its domain type.
    #[error("Corrupt record: {0}")]
    Corrupt(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(ref db_err) => {
                // PostgreSQL unique constraint violation: error code 23505
                if db_err.code().as_deref() == Some("23505") {
                    let constraint = db_err.constraint().unwrap_or("unknown");
                    if constraint.starts_with("uq_") {
                        return StoreError::Duplicate {
                            constraint: constraint.to_string(),
                        };
                    }
                }
                StoreError::Database(err)
            }
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                StoreError::Unavailable(err.to_string())
            }
            sqlx::Error::Io(ref io) => StoreError::Unavailable(io.to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                StoreError::Corrupt(err.to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence contract for users, fault requests, locations and messages.
///
/// Lookups return `Ok(None)` for absent rows. Updates return the number of
/// rows matched.
#[async_trait]
pub trait Store: Send + Sync {
    /// Cheap liveness probe.
    async fn ping(&self) -> StoreResult<()>;

    // -- users --
    async fn get_user(&self, id: DbId) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn get_users_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<User>>;
    async fn insert_user(&self, input: &CreateUser) -> StoreResult<User>;
    async fn update_user_fields(&self, id: DbId, input: &UpdateUser) -> StoreResult<u64>;

    // -- fault requests --
    async fn get_fault_request(&self, id: DbId) -> StoreResult<Option<FaultRequest>>;
    async fn insert_fault_request(&self, input: &NewFaultRequest) -> StoreResult<FaultRequest>;
    async fn update_fault_request_fields(
        &self,
        id: DbId,
        input: &FaultRequestUpdate,
    ) -> StoreResult<u64>;
    async fn list_fault_requests(
        &self,
        filter: &FaultRequestFilter,
        sort: FaultRequestSort,
    ) -> StoreResult<Vec<FaultRequest>>;

    // -- locations --
    async fn upsert_location(&self, input: &UpsertLocation) -> StoreResult<Location>;
    async fn set_location_sharing(&self, user_id: DbId, sharing: bool) -> StoreResult<u64>;
    async fn get_location(&self, user_id: DbId) -> StoreResult<Option<Location>>;

    // -- messages --
    async fn insert_message(&self, input: &NewMessage) -> StoreResult<Message>;
    /// Thread for one request, ascending by `created_at`, ties by id.
    async fn list_messages(&self, request_id: DbId) -> StoreResult<Vec<Message>>;
}
