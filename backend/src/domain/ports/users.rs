//! Driving ports for user operations.

use async_trait::async_trait;
use pagination::PageEnvelope;

use crate::domain::{DocumentId, Error, NewUser, User, UserChanges};

/// User mutations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersCommand: Send + Sync {
    /// Create a user from a validated payload.
    ///
    /// Fails with a validation error when the email is already in use.
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error>;

    /// Apply a partial update and return the post-update record.
    async fn update_user(&self, id: DocumentId, changes: UserChanges) -> Result<User, Error>;

    /// Remove a user.
    async fn delete_user(&self, id: DocumentId) -> Result<(), Error>;
}

/// User reads exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UsersQuery: Send + Sync {
    /// Fetch one page of users plus the total count.
    ///
    /// Fails with a validation error when `page` or `limit` is below 1.
    async fn list_users(&self, page: i64, limit: i64) -> Result<PageEnvelope<User>, Error>;

    /// Fetch a single user.
    async fn get_user(&self, id: DocumentId) -> Result<User, Error>;
}
