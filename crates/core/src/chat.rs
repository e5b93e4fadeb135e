//! Chat thread rules: who a sender is, what a message may contain, and the
//! order a thread is read back in.
//!
//! Thread access itself is decided by [`crate::access`] with
//! [`Action::ReadThread`](crate::access::Action::ReadThread) and
//! [`Action::PostToThread`](crate::access::Action::PostToThread).

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::roles::Role;
use crate::types::{DbId, Timestamp};

pub const SENDER_CONSUMER: &str = "consumer";
pub const SENDER_ELECTRICIAN: &str = "electrician";

/// Maximum message body length in characters.
pub const MAX_CONTENT_LENGTH: usize = 4_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Consumer,
    Electrician,
}

impl SenderType {
    pub fn as_str(self) -> &'static str {
        match self {
            SenderType::Consumer => SENDER_CONSUMER,
            SenderType::Electrician => SENDER_ELECTRICIAN,
        }
    }

    /// Derive the sender type from the caller's role.
    ///
    /// Linemen post as field staff, the same as electricians. Admins have no
    /// side in a thread and cannot post.
    pub fn for_role(role: Role) -> Result<Self, CoreError> {
        match role {
            Role::Consumer => Ok(SenderType::Consumer),
            Role::Electrician | Role::Lineman => Ok(SenderType::Electrician),
            Role::Admin => Err(CoreError::Forbidden(
                "Invalid user role for messaging".into(),
            )),
        }
    }
}

impl fmt::Display for SenderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SenderType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            SENDER_CONSUMER => Ok(SenderType::Consumer),
            SENDER_ELECTRICIAN => Ok(SenderType::Electrician),
            other => Err(CoreError::Validation(format!(
                "Invalid sender type '{other}'"
            ))),
        }
    }
}

impl TryFrom<String> for SenderType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Validate a message body: non-blank and within [`MAX_CONTENT_LENGTH`].
pub fn validate_content(content: &str) -> Result<(), CoreError> {
    if content.trim().is_empty() {
        return Err(CoreError::Validation(
            "Message content must not be empty".into(),
        ));
    }
    let len = content.chars().count();
    if len > MAX_CONTENT_LENGTH {
        return Err(CoreError::Validation(format!(
            "Message content exceeds maximum length of {MAX_CONTENT_LENGTH} characters (got {len})"
        )));
    }
    Ok(())
}

/// Thread order: `created_at` ascending, ties broken by insertion id.
pub fn thread_order(a: (Timestamp, DbId), b: (Timestamp, DbId)) -> Ordering {
    a.0.cmp(&b.0).then(a.1.cmp(&b.1))
}
