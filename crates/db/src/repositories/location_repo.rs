//! Repository for the `user_locations` table.

use sqlx::PgPool;
use voltguard_core::types::DbId;

use crate::models::location::{Location, UpsertLocation};

const COLUMNS: &str = "user_id, latitude, longitude, accuracy, altitude, is_sharing, \
                       created_at, updated_at";

/// Keeps the single current position per user.
pub struct LocationRepo;

impl LocationRepo {
    /// Insert or replace the user's current position.
    pub async fn upsert(pool: &PgPool, input: &UpsertLocation) -> Result<Location, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_locations (user_id, latitude, longitude, accuracy, altitude, is_sharing)
             VALUES ($1, $2, $3, $4, $5, $6)
             ON CONFLICT ON CONSTRAINT uq_user_locations_user_id DO UPDATE SET
                latitude = EXCLUDED.latitude,
                longitude = EXCLUDED.longitude,
                accuracy = EXCLUDED.accuracy,
                altitude = EXCLUDED.altitude,
                is_sharing = EXCLUDED.is_sharing,
                updated_at = NOW()
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Location>(&query)
            .bind(input.user_id)
            .bind(input.latitude)
            .bind(input.longitude)
            .bind(input.accuracy)
            .bind(input.altitude)
            .bind(input.is_sharing)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Location>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM user_locations WHERE user_id = $1");
        sqlx::query_as::<_, Location>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Flip the sharing flag. Returns the number of rows matched.
    pub async fn set_sharing(pool: &PgPool, user_id: DbId, sharing: bool) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE user_locations SET is_sharing = $2, updated_at = NOW() WHERE user_id = $1",
        )
        .bind(user_id)
        .bind(sharing)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
