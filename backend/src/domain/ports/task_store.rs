//! Driven port for task persistence adapters.

use async_trait::async_trait;
use pagination::PageRequest;

use crate::domain::{DocumentId, Task, TaskStatus};

/// Errors raised by task store adapters.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TaskStoreError {
    /// The store could not be reached.
    #[error("task store connection failed: {message}")]
    Connection {
        /// Driver-level failure description, for logs only.
        message: String,
    },
    /// A query or mutation failed during execution.
    #[error("task store query failed: {message}")]
    Query {
        /// Driver-level failure description, for logs only.
        message: String,
    },
}

impl TaskStoreError {
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
}

/// Insert payload handed to the store; the status default has already been
/// applied by the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTaskRecord {
    /// Short summary.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Identifier of the owning user.
    pub user_id: DocumentId,
    /// Initial lifecycle state.
    pub status: TaskStatus,
}

/// Port for task document storage.
///
/// `owner` filters restrict paging and counting to one user's tasks. As with
/// the user store, absent identifiers surface as `Ok(None)`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Persist a new task and return the stored record.
    async fn insert(&self, record: &NewTaskRecord) -> Result<Task, TaskStoreError>;

    /// Fetch a task by identifier.
    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Task>, TaskStoreError>;

    /// Fetch one page of tasks, optionally restricted to one owner.
    async fn find_page(
        &self,
        owner: Option<DocumentId>,
        page: PageRequest,
    ) -> Result<Vec<Task>, TaskStoreError>;

    /// Count tasks, optionally restricted to one owner.
    async fn count(&self, owner: Option<DocumentId>) -> Result<u64, TaskStoreError>;

    /// Replace the status field and return the post-update record, or `None`
    /// when no document has this identifier.
    async fn update_status(
        &self,
        id: DocumentId,
        status: TaskStatus,
    ) -> Result<Option<Task>, TaskStoreError>;

    /// Remove a task and return the removed record, or `None` when absent.
    async fn delete(&self, id: DocumentId) -> Result<Option<Task>, TaskStoreError>;
}
