//! Chat thread flows. Only the reporter and the assignee may read or post.

use voltguard_core::access::{authorize, Action, Caller};
use voltguard_core::chat::{validate_content, SenderType};
use voltguard_core::types::DbId;
use voltguard_db::models::message::{Message, MessageList, NewMessage, SendMessage};
use voltguard_db::store::Store;

use super::load_fault_request;
use crate::error::AppResult;

/// Append a message to a request's thread.
pub async fn send(store: &dyn Store, caller: &Caller, input: SendMessage) -> AppResult<Message> {
    let request = load_fault_request(store, input.request_id).await?;
    validate_content(&input.content)?;
    authorize(caller, Action::PostToThread, &request.state())?;
    let sender_type = SenderType::for_role(caller.role)?;

    let message = store
        .insert_message(&NewMessage {
            request_id: request.id,
            sender_id: caller.user_id,
            sender_type,
            content: input.content,
        })
        .await?;

    tracing::info!(
        message_id = message.id,
        fault_request_id = request.id,
        user_id = caller.user_id,
        sender_type = %sender_type,
        "Message sent",
    );
    Ok(message)
}

/// The full thread, oldest first.
pub async fn list(store: &dyn Store, caller: &Caller, request_id: DbId) -> AppResult<MessageList> {
    let request = load_fault_request(store, request_id).await?;
    authorize(caller, Action::ReadThread, &request.state())?;

    let messages = store.list_messages(request.id).await?;
    Ok(MessageList {
        total: messages.len(),
        messages,
    })
}
