//! Authentication primitives.
//!
//! - [`password`] -- Argon2id password hashing and verification.
//! - [`jwt`] -- signed, time-limited identity tokens.

pub mod jwt;
pub mod password;
