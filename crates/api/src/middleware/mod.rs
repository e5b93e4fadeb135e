//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the caller from a Bearer token.
//! - [`rbac::RequireFieldStaff`] -- Requires the `electrician` or `lineman` role.

pub mod auth;
pub mod rbac;
