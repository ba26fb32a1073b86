//! Core business entities.

mod link;
mod user;

pub use link::{Link, NewLink};
pub use user::UserAccount;
