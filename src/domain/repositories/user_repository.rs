//! Repository trait for account lookups.

use crate::domain::entities::UserAccount;
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to accounts provisioned by the external auth collaborator.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds an account by id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_id(&self, id: i64) -> Result<Option<UserAccount>, AppError>;
}
