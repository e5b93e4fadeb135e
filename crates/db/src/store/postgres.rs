//! PostgreSQL-backed [`Store`].

use async_trait::async_trait;
use voltguard_core::types::DbId;

use super::{Store, StoreResult};
use crate::models::fault_request::{
    FaultRequest, FaultRequestFilter, FaultRequestSort, FaultRequestUpdate, NewFaultRequest,
};
use crate::models::location::{Location, UpsertLocation};
use crate::models::message::{Message, NewMessage};
use crate::models::user::{CreateUser, UpdateUser, User};
use crate::repositories::{FaultRequestRepo, LocationRepo, MessageRepo, UserRepo};
use crate::DbPool;

/// Delegates every call to the zero-sized repositories over a shared pool.
#[derive(Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl Store for PgStore {
    async fn ping(&self) -> StoreResult<()> {
        crate::health_check(&self.pool).await?;
        Ok(())
    }

    async fn get_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_id(&self.pool, id).await?)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(UserRepo::find_by_email(&self.pool, email).await?)
    }

    async fn get_users_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Ok(UserRepo::find_by_ids(&self.pool, ids).await?)
    }

    async fn insert_user(&self, input: &CreateUser) -> StoreResult<User> {
        Ok(UserRepo::create(&self.pool, input).await?)
    }

    async fn update_user_fields(&self, id: DbId, input: &UpdateUser) -> StoreResult<u64> {
        Ok(UserRepo::update(&self.pool, id, input).await?)
    }

    async fn get_fault_request(&self, id: DbId) -> StoreResult<Option<FaultRequest>> {
        Ok(FaultRequestRepo::find_by_id(&self.pool, id).await?)
    }

    async fn insert_fault_request(&self, input: &NewFaultRequest) -> StoreResult<FaultRequest> {
        Ok(FaultRequestRepo::create(&self.pool, input).await?)
    }

    async fn update_fault_request_fields(
        &self,
        id: DbId,
        input: &FaultRequestUpdate,
    ) -> StoreResult<u64> {
        Ok(FaultRequestRepo::update(&self.pool, id, input).await?)
    }

    async fn list_fault_requests(
        &self,
        filter: &FaultRequestFilter,
        sort: FaultRequestSort,
    ) -> StoreResult<Vec<FaultRequest>> {
        Ok(FaultRequestRepo::list(&self.pool, filter, sort).await?)
    }

    async fn upsert_location(&self, input: &UpsertLocation) -> StoreResult<Location> {
        Ok(LocationRepo::upsert(&self.pool, input).await?)
    }

    async fn set_location_sharing(&self, user_id: DbId, sharing: bool) -> StoreResult<u64> {
        Ok(LocationRepo::set_sharing(&self.pool, user_id, sharing).await?)
    }

    async fn get_location(&self, user_id: DbId) -> StoreResult<Option<Location>> {
        Ok(LocationRepo::find_by_user(&self.pool, user_id).await?)
    }

    async fn insert_message(&self, input: &NewMessage) -> StoreResult<Message> {
        Ok(MessageRepo::create(&self.pool, input).await?)
    }

    async fn list_messages(&self, request_id: DbId) -> StoreResult<Vec<Message>> {
        Ok(MessageRepo::list_for_request(&self.pool, request_id).await?)
    }
}
