//! HTTP route handlers.

pub mod auth;
pub mod health;
pub mod inventory;
pub mod roles;
pub mod staff;
