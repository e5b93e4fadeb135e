//! In-process [`Store`] used by tests and local runs without PostgreSQL.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use voltguard_core::chat::thread_order;
use voltguard_core::fault_request::FaultStatus;
use voltguard_core::types::DbId;

use super::{Store, StoreError, StoreResult};
use crate::models::fault_request::{
    FaultRequest, FaultRequestFilter, FaultRequestSort, FaultRequestUpdate, NewFaultRequest,
};
use crate::models::location::{Location, UpsertLocation};
use crate::models::message::{Message, NewMessage};
use crate::models::user::{CreateUser, UpdateUser, User};

#[derive(Default)]
struct Tables {
    next_id: DbId,
    users: HashMap<DbId, User>,
    fault_requests: HashMap<DbId, FaultRequest>,
    locations: HashMap<DbId, Location>,
    messages: Vec<Message>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.next_id += 1;
        self.next_id
    }
}

/// Mutex-guarded tables with sequential ids shared across all entities.
///
/// Mirrors the unique constraints of the PostgreSQL schema and can be switched
/// offline to exercise store-failure paths.
pub struct MemoryStore {
    tables: Mutex<Tables>,
    available: AtomicBool,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            available: AtomicBool::new(true),
        }
    }

    /// Make every subsequent call fail with [`StoreError::Unavailable`] (or succeed again).
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn tables(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        if !self.available.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store is offline".into()));
        }
        self.tables
            .lock()
            .map_err(|_| StoreError::Unavailable("memory store lock poisoned".into()))
    }
}

fn duplicate(constraint: &str) -> StoreError {
    StoreError::Duplicate {
        constraint: constraint.to_string(),
    }
}

fn matches_filter(request: &FaultRequest, filter: &FaultRequestFilter) -> bool {
    filter.consumer_id.map_or(true, |id| request.consumer_id == id)
        && filter.assigned_to.map_or(true, |id| request.assigned_to == Some(id))
        && filter.status.map_or(true, |s| request.status == s)
}

#[async_trait]
impl Store for MemoryStore {
    async fn ping(&self) -> StoreResult<()> {
        self.tables().map(|_| ())
    }

    async fn get_user(&self, id: DbId) -> StoreResult<Option<User>> {
        Ok(self.tables()?.users.get(&id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables()?
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn get_users_by_ids(&self, ids: &[DbId]) -> StoreResult<Vec<User>> {
        let tables = self.tables()?;
        Ok(ids
            .iter()
            .filter_map(|id| tables.users.get(id).cloned())
            .collect())
    }

    async fn insert_user(&self, input: &CreateUser) -> StoreResult<User> {
        let mut tables = self.tables()?;
        if tables.users.values().any(|u| u.email == input.email) {
            return Err(duplicate("uq_users_email"));
        }
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            email: input.email.clone(),
            password_hash: input.password_hash.clone(),
            full_name: input.full_name.clone(),
            role: input.role,
            phone: input.phone.clone(),
            company: input.company.clone(),
            street_address: None,
            city: None,
            state: None,
            postal_code: None,
            country: None,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        tables.users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn update_user_fields(&self, id: DbId, input: &UpdateUser) -> StoreResult<u64> {
        let mut tables = self.tables()?;
        if let Some(email) = &input.email {
            if tables.users.values().any(|u| u.id != id && &u.email == email) {
                return Err(duplicate("uq_users_email"));
            }
        }
        let Some(user) = tables.users.get_mut(&id) else {
            return Ok(0);
        };
        fn set<T: Clone>(slot: &mut T, value: &Option<T>) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        fn set_opt<T: Clone>(slot: &mut Option<T>, value: &Option<T>) {
            if value.is_some() {
                *slot = value.clone();
            }
        }
        set(&mut user.email, &input.email);
        set(&mut user.full_name, &input.full_name);
        set(&mut user.role, &input.role);
        set_opt(&mut user.phone, &input.phone);
        set_opt(&mut user.company, &input.company);
        set_opt(&mut user.street_address, &input.street_address);
        set_opt(&mut user.city, &input.city);
        set_opt(&mut user.state, &input.state);
        set_opt(&mut user.postal_code, &input.postal_code);
        set_opt(&mut user.country, &input.country);
        user.updated_at = Utc::now();
        Ok(1)
    }

    async fn get_fault_request(&self, id: DbId) -> StoreResult<Option<FaultRequest>> {
        Ok(self.tables()?.fault_requests.get(&id).cloned())
    }

    async fn insert_fault_request(&self, input: &NewFaultRequest) -> StoreResult<FaultRequest> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let request = FaultRequest {
            id: tables.next_id(),
            consumer_id: input.consumer_id,
            title: input.title.clone(),
            description: input.description.clone(),
            location: input.location.clone(),
            latitude: input.latitude,
            longitude: input.longitude,
            photo_url: input.photo_url.clone(),
            status: FaultStatus::Open,
            priority: input.priority,
            assigned_to: None,
            created_at: now,
            updated_at: now,
        };
        tables.fault_requests.insert(request.id, request.clone());
        Ok(request)
    }

    async fn update_fault_request_fields(
        &self,
        id: DbId,
        input: &FaultRequestUpdate,
    ) -> StoreResult<u64> {
        let mut tables = self.tables()?;
        let Some(request) = tables.fault_requests.get_mut(&id) else {
            return Ok(0);
        };
        if input.refuse_if_closed && request.status == FaultStatus::Closed {
            return Ok(0);
        }
        request.status = input.status;
        if input.assigned_to.is_some() {
            request.assigned_to = input.assigned_to;
        }
        request.updated_at = Utc::now();
        Ok(1)
    }

    async fn list_fault_requests(
        &self,
        filter: &FaultRequestFilter,
        sort: FaultRequestSort,
    ) -> StoreResult<Vec<FaultRequest>> {
        let tables = self.tables()?;
        let mut rows: Vec<FaultRequest> = tables
            .fault_requests
            .values()
            .filter(|r| matches_filter(r, filter))
            .cloned()
            .collect();
        let newest_first = |a: &FaultRequest, b: &FaultRequest| {
            (b.created_at, b.id).cmp(&(a.created_at, a.id))
        };
        match sort {
            FaultRequestSort::NewestFirst => rows.sort_by(newest_first),
            FaultRequestSort::PriorityThenNewest => rows.sort_by(|a, b| {
                b.priority
                    .severity()
                    .cmp(&a.priority.severity())
                    .then_with(|| newest_first(a, b))
            }),
        }
        Ok(rows)
    }

    async fn upsert_location(&self, input: &UpsertLocation) -> StoreResult<Location> {
        let mut tables = self.tables()?;
        let now = Utc::now();
        let created_at = tables
            .locations
            .get(&input.user_id)
            .map_or(now, |existing| existing.created_at);
        let location = Location {
            user_id: input.user_id,
            latitude: input.latitude,
            longitude: input.longitude,
            accuracy: input.accuracy,
            altitude: input.altitude,
            is_sharing: input.is_sharing,
            created_at,
            updated_at: now,
        };
        tables.locations.insert(input.user_id, location.clone());
        Ok(location)
    }

    async fn set_location_sharing(&self, user_id: DbId, sharing: bool) -> StoreResult<u64> {
        let mut tables = self.tables()?;
        match tables.locations.get_mut(&user_id) {
            Some(location) => {
                location.is_sharing = sharing;
                location.updated_at = Utc::now();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn get_location(&self, user_id: DbId) -> StoreResult<Option<Location>> {
        Ok(self.tables()?.locations.get(&user_id).cloned())
    }

    async fn insert_message(&self, input: &NewMessage) -> StoreResult<Message> {
        let mut tables = self.tables()?;
        let message = Message {
            id: tables.next_id(),
            request_id: input.request_id,
            sender_id: input.sender_id,
            sender_type: input.sender_type,
            content: input.content.clone(),
            created_at: Utc::now(),
        };
        tables.messages.push(message.clone());
        Ok(message)
    }

    async fn list_messages(&self, request_id: DbId) -> StoreResult<Vec<Message>> {
        let tables = self.tables()?;
        let mut thread: Vec<Message> = tables
            .messages
            .iter()
            .filter(|m| m.request_id == request_id)
            .cloned()
            .collect();
        thread.sort_by(|a, b| thread_order((a.created_at, a.id), (b.created_at, b.id)));
        Ok(thread)
    }
}
