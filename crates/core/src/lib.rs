//! Domain rules for the VoltGuard fault-dispatch backend.
//!
//! Nothing in this crate performs I/O. The API layer loads records through
//! the store, hands them to these functions for a decision, and writes back
//! whatever they compute.

pub mod access;
pub mod chat;
pub mod error;
pub mod fault_request;
pub mod location;
pub mod roles;
pub mod types;
