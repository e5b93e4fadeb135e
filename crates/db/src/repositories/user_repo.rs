//! Repository for the `users` table.

use sqlx::PgPool;
use voltguard_core::types::DbId;

use crate::models::user::{CreateUser, UpdateUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, email, password_hash, full_name, role, phone, company, \
                       street_address, city, state, postal_code, country, is_active, \
                       created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (email, password_hash, full_name, role, phone, company)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.email)
            .bind(&input.password_hash)
            .bind(&input.full_name)
            .bind(input.role.as_str())
            .bind(&input.phone)
            .bind(&input.company)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Fetch every user whose id is in `ids`. Missing ids are skipped.
    pub async fn find_by_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = ANY($1)");
        sqlx::query_as::<_, User>(&query)
            .bind(ids)
            .fetch_all(pool)
            .await
    }

    /// Update a user. Only non-`None` fields in `input` are applied.
    ///
    /// Returns the number of rows matched (0 or 1).
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateUser) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE users SET
                email = COALESCE($2, email),
                full_name = COALESCE($3, full_name),
                role = COALESCE($4, role),
                phone = COALESCE($5, phone),
                company = COALESCE($6, company),
                street_address = COALESCE($7, street_address),
                city = COALESCE($8, city),
                state = COALESCE($9, state),
                postal_code = COALESCE($10, postal_code),
                country = COALESCE($11, country),
                updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&input.email)
        .bind(&input.full_name)
        .bind(input.role.map(|r| r.as_str()))
        .bind(&input.phone)
        .bind(&input.company)
        .bind(&input.street_address)
        .bind(&input.city)
        .bind(&input.state)
        .bind(&input.postal_code)
        .bind(&input.country)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }
}
