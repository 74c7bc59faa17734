//! Driving ports for task operations.

use async_trait::async_trait;
use pagination::PageEnvelope;

use crate::domain::{DocumentId, Error, NewTask, Task, TaskStatus};

/// Task mutations exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksCommand: Send + Sync {
    /// Create a task from a validated payload; status defaults to pending.
    async fn create_task(&self, new_task: NewTask) -> Result<Task, Error>;

    /// Replace the status field and return the post-update record.
    async fn update_task_status(&self, id: DocumentId, status: TaskStatus)
        -> Result<Task, Error>;

    /// Remove a task.
    async fn delete_task(&self, id: DocumentId) -> Result<(), Error>;
}

/// Task reads exposed to inbound adapters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TasksQuery: Send + Sync {
    /// Fetch one page of tasks plus the total count, optionally restricted
    /// to one owner.
    ///
    /// Fails with a validation error when `page` or `limit` is below 1.
    async fn list_tasks(
        &self,
        owner: Option<DocumentId>,
        page: i64,
        limit: i64,
    ) -> Result<PageEnvelope<Task>, Error>;

    /// Fetch a single task.
    async fn get_task(&self, id: DocumentId) -> Result<Task, Error>;
}
