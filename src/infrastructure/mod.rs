//! Infrastructure layer: persistence and background tasks.

pub mod persistence;
pub mod tasks;
