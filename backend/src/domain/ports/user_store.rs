//! Driven port for user persistence adapters.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{DocumentId, User};

/// Errors raised by user store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UserStoreError {
    /// The store could not be reached.
    #[error("user store connection failed: {message}")]
    Connection {
        /// Driver-level failure description, for logs only.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("user store query failed: {message}")]
    Query {
        /// Driver-level failure description, for logs only.
        message: String,
    },
    /// A write collided with the unique email index.
    #[error("another user already holds email {email}")]
    DuplicateEmail {
        /// The conflicting address.
        email: String,
    },
}

impl UserStoreError {
    /// Connection-class failure.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    /// Query-class failure.
    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
        }
    }

    /// Unique-index collision on the email field.
    pub fn duplicate_email(email: impl Into<String>) -> Self {
        Self::DuplicateEmail {
            email: email.into(),
        }
    }
}

/// Insert payload handed to the store; the password is already hashed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUserRecord {
    /// Display name.
    pub name: String,
    /// Contact address.
    pub email: String,
    /// One-way password digest.
    pub password_hash: String,
}

/// Partial update handed to the store; absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRecordChanges {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement contact address.
    pub email: Option<String>,
    /// Replacement password digest.
    pub password_hash: Option<String>,
}

/// Port for user document storage.
///
/// Timestamps are owned by the adapter: `insert` stamps both `created_at` and
/// `updated_at`, mutations refresh `updated_at`. Lookup methods return
/// `Ok(None)` for absent identifiers; turning that into a `NotFound` domain
/// error is the service's job.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new user and return the stored record.
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserStoreError>;

    /// Fetch a user by identifier.
    async fn find_by_id(&self, id: DocumentId) -> Result<Option<User>, UserStoreError>;

    /// Fetch a user by exact email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError>;

    /// Fetch one page of users.
    async fn find_page(&self, page: PageRequest) -> Result<Vec<User>, UserStoreError>;

    /// Count all stored users.
    async fn count(&self) -> Result<u64, UserStoreError>;

    /// Apply a partial update and return the post-update record, or `None`
    /// when no document has this identifier.
    async fn update(
        &self,
        id: DocumentId,
        changes: &UserRecordChanges,
    ) -> Result<Option<User>, UserStoreError>;

    /// Remove a user and return the removed record, or `None` when absent.
    async fn delete(&self, id: DocumentId) -> Result<Option<User>, UserStoreError>;
}
