//! Repository for the `fault_requests` table.

use sqlx::PgPool;
use voltguard_core::fault_request::STATUS_CLOSED;
use voltguard_core::types::DbId;

use crate::models::fault_request::{
    FaultRequest, FaultRequestFilter, FaultRequestSort, FaultRequestUpdate, NewFaultRequest,
};

const COLUMNS: &str = "id, consumer_id, title, description, location, latitude, longitude, \
                       photo_url, status, priority, assigned_to, created_at, updated_at";

/// Priority rank used for the staff queue ordering.
const PRIORITY_RANK: &str = "CASE priority \
                                WHEN 'critical' THEN 4 \
                                WHEN 'high' THEN 3 \
                                WHEN 'medium' THEN 2 \
                                ELSE 1 \
                             END";

/// Provides CRUD operations for fault requests.
pub struct FaultRequestRepo;

impl FaultRequestRepo {
    /// Insert a new fault request in the `open` state.
    pub async fn create(
        pool: &PgPool,
        input: &NewFaultRequest,
    ) -> Result<FaultRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO fault_requests
                (consumer_id, title, description, location, latitude, longitude, photo_url, priority)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, FaultRequest>(&query)
            .bind(input.consumer_id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.location)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(&input.photo_url)
            .bind(input.priority.as_str())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<FaultRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM fault_requests WHERE id = $1");
        sqlx::query_as::<_, FaultRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List fault requests matching every set field of `filter`.
    pub async fn list(
        pool: &PgPool,
        filter: &FaultRequestFilter,
        sort: FaultRequestSort,
    ) -> Result<Vec<FaultRequest>, sqlx::Error> {
        let order = match sort {
            FaultRequestSort::NewestFirst => "created_at DESC, id DESC".to_string(),
            FaultRequestSort::PriorityThenNewest => {
                format!("{PRIORITY_RANK} DESC, created_at DESC, id DESC")
            }
        };
        let query = format!(
            "SELECT {COLUMNS} FROM fault_requests
             WHERE ($1::BIGINT IS NULL OR consumer_id = $1)
               AND ($2::BIGINT IS NULL OR assigned_to = $2)
               AND ($3::TEXT IS NULL OR status = $3)
             ORDER BY {order}"
        );
        sqlx::query_as::<_, FaultRequest>(&query)
            .bind(filter.consumer_id)
            .bind(filter.assigned_to)
            .bind(filter.status.map(|s| s.as_str()))
            .fetch_all(pool)
            .await
    }

    /// Apply a status/assignee write. Returns the number of rows matched.
    ///
    /// With `refuse_if_closed`, a row already in `closed` is not matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &FaultRequestUpdate,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE fault_requests SET
                status = $2,
                assigned_to = COALESCE($3, assigned_to),
                updated_at = NOW()
             WHERE id = $1
               AND (NOT $4 OR status <> $5)",
        )
        .bind(id)
        .bind(input.status.as_str())
        .bind(input.assigned_to)
        .bind(input.refuse_if_closed)
        .bind(STATUS_CLOSED)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
