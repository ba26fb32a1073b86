//! Database-backed repository implementations.

mod pg_link_repository;
mod pg_user_repository;

pub use pg_link_repository::PgLinkRepository;
pub use pg_user_repository::PgUserRepository;
