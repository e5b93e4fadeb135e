//! Repository for the `messages` table.

use sqlx::PgPool;
use voltguard_core::types::DbId;

use crate::models::message::{Message, NewMessage};

const COLUMNS: &str = "id, request_id, sender_id, sender_type, content, created_at";

/// Provides append and thread reads for chat messages.
pub struct MessageRepo;

impl MessageRepo {
    pub async fn create(pool: &PgPool, input: &NewMessage) -> Result<Message, sqlx::Error> {
        let query = format!(
            "INSERT INTO messages (request_id, sender_id, sender_type, content)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(input.request_id)
            .bind(input.sender_id)
            .bind(input.sender_type.as_str())
            .bind(&input.content)
            .fetch_one(pool)
            .await
    }

    /// All messages of one thread, oldest first. Ties on `created_at` fall back to id.
    pub async fn list_for_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<Message>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM messages
             WHERE request_id = $1
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Message>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await
    }
}
