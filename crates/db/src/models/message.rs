//! Chat message entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use voltguard_core::chat::SenderType;
use voltguard_core::types::{DbId, Timestamp};

/// A row from the `messages` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Message {
    pub id: DbId,
    pub request_id: DbId,
    pub sender_id: DbId,
    #[sqlx(try_from = "String")]
    pub sender_type: SenderType,
    pub content: String,
    pub created_at: Timestamp,
}

/// Request body for `POST /chat/send`.
#[derive(Debug, Clone, Deserialize)]
pub struct SendMessage {
    pub request_id: DbId,
    pub content: String,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub request_id: DbId,
    pub sender_id: DbId,
    pub sender_type: SenderType,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageList {
    pub messages: Vec<Message>,
    pub total: usize,
}
