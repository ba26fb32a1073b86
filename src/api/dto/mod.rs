//! Request/response DTOs for the HTTP surface.

pub mod dashboard;
pub mod health;
pub mod shorten;
