//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - `Deserialize` input DTOs accepted from the HTTP layer
//! - Internal write DTOs the store adapters consume

pub mod fault_request;
pub mod location;
pub mod message;
pub mod user;
