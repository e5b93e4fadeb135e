pub mod auth;
pub mod chat;
pub mod consumer;
pub mod electrician;
pub mod location;
