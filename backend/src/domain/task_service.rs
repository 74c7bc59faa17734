//! Task domain service.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageEnvelope, PageRequest};
use tracing::error;

use crate::domain::ports::{NewTaskRecord, TaskStore, TaskStoreError, TasksCommand, TasksQuery};
use crate::domain::{DocumentId, Error, NewTask, Task, TaskStatus};

const EMPTY_TITLE: &str = "Task title is required.";
const INVALID_PAGINATION: &str = "Invalid pagination parameters.";
const ENTITY: &str = "Task";

/// Task service implementing the driving ports.
#[derive(Clone)]
pub struct TaskService<S> {
    store: Arc<S>,
}

impl<S> TaskService<S> {
    /// Create a new service around the given store adapter.
    pub const fn new(store: Arc<S>) -> Self {
        Self { store }
    }
}

impl<S: TaskStore> TaskService<S> {
    fn map_store_error(error: TaskStoreError) -> Error {
        error!(error = %error, "task store operation failed");
        Error::database()
    }
}

#[async_trait]
impl<S: TaskStore> TasksCommand for TaskService<S> {
    async fn create_task(&self, new_task: NewTask) -> Result<Task, Error> {
        // Inbound validation already trims; re-check here so the invariant
        // holds for every adapter, not just HTTP.
        if new_task.title.trim().is_empty() {
            return Err(Error::invalid_request(EMPTY_TITLE));
        }
        let record = NewTaskRecord {
            title: new_task.title,
            description: new_task.description,
            user_id: new_task.user_id,
            status: new_task.status.unwrap_or_default(),
        };
        self.store
            .insert(&record)
            .await
            .map_err(Self::map_store_error)
    }

    async fn update_task_status(
        &self,
        id: DocumentId,
        status: TaskStatus,
    ) -> Result<Task, Error> {
        self.store
            .update_status(id, status)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(ENTITY))
    }

    async fn delete_task(&self, id: DocumentId) -> Result<(), Error> {
        self.store
            .delete(id)
            .await
            .map_err(Self::map_store_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(ENTITY))
    }
}

#[async_trait]
impl<S: TaskStore> TasksQuery for TaskService<S> {
    async fn list_tasks(
        &self,
        owner: Option<DocumentId>,
        page: i64,
        limit: i64,
    ) -> Result<PageEnvelope<Task>, Error> {
        let request = PageRequest::new(page, limit)
            .map_err(|_| Error::invalid_request(INVALID_PAGINATION))?;
        let (tasks, total) = tokio::try_join!(
            async {
                self.store
                    .find_page(owner, request)
                    .await
                    .map_err(Self::map_store_error)
            },
            async { self.store.count(owner).await.map_err(Self::map_store_error) },
        )?;
        Ok(PageEnvelope::new(tasks, total, request))
    }

    async fn get_task(&self, id: DocumentId) -> Result<Task, Error> {
        self.store
            .find_by_id(id)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(ENTITY))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockTaskStore;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// In-memory store for tests that need writes to be visible to later
    /// reads, which per-call mocks cannot provide.
    #[derive(Default)]
    struct InMemoryTaskStore {
        tasks: Mutex<HashMap<DocumentId, Task>>,
    }

    #[async_trait]
    impl TaskStore for InMemoryTaskStore {
        async fn insert(&self, record: &NewTaskRecord) -> Result<Task, TaskStoreError> {
            let now = Utc::now();
            let task = Task {
                id: DocumentId::generate(),
                title: record.title.clone(),
                description: record.description.clone(),
                status: record.status,
                user_id: record.user_id,
                created_at: now,
                updated_at: now,
            };
            self.tasks
                .lock()
                .expect("state lock")
                .insert(task.id, task.clone());
            Ok(task)
        }

        async fn find_by_id(&self, id: DocumentId) -> Result<Option<Task>, TaskStoreError> {
            Ok(self.tasks.lock().expect("state lock").get(&id).cloned())
        }

        async fn find_page(
            &self,
            owner: Option<DocumentId>,
            page: PageRequest,
        ) -> Result<Vec<Task>, TaskStoreError> {
            let tasks = self.tasks.lock().expect("state lock");
            let mut selected: Vec<Task> = tasks
                .values()
                .filter(|task| owner.map_or(true, |owner| task.user_id == owner))
                .cloned()
                .collect();
            selected.sort_by_key(|task| task.id.to_string());
            Ok(selected
                .into_iter()
                .skip(usize::try_from(page.skip()).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
                .collect())
        }

        async fn count(&self, owner: Option<DocumentId>) -> Result<u64, TaskStoreError> {
            let tasks = self.tasks.lock().expect("state lock");
            let count = tasks
                .values()
                .filter(|task| owner.map_or(true, |owner| task.user_id == owner))
                .count();
            Ok(count as u64)
        }

        async fn update_status(
            &self,
            id: DocumentId,
            status: TaskStatus,
        ) -> Result<Option<Task>, TaskStoreError> {
            let mut tasks = self.tasks.lock().expect("state lock");
            Ok(tasks.get_mut(&id).map(|task| {
                task.status = status;
                task.updated_at = Utc::now();
                task.clone()
            }))
        }

        async fn delete(&self, id: DocumentId) -> Result<Option<Task>, TaskStoreError> {
            Ok(self.tasks.lock().expect("state lock").remove(&id))
        }
    }

    fn sample_task(status: TaskStatus) -> Task {
        Task {
            id: DocumentId::generate(),
            title: "Write report".into(),
            description: None,
            status,
            user_id: DocumentId::generate(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn service(store: MockTaskStore) -> TaskService<MockTaskStore> {
        TaskService::new(Arc::new(store))
    }

    #[tokio::test]
    async fn create_task_defaults_status_to_pending() {
        let mut store = MockTaskStore::new();
        store
            .expect_insert()
            .withf(|record: &NewTaskRecord| record.status == TaskStatus::Pending)
            .times(1)
            .return_once(|record| {
                let mut task = sample_task(record.status);
                task.title = record.title.clone();
                Ok(task)
            });

        let created = service(store)
            .create_task(NewTask {
                title: "Write report".into(),
                description: None,
                user_id: DocumentId::generate(),
                status: None,
            })
            .await
            .expect("create succeeds");
        assert_eq!(created.status, TaskStatus::Pending);
    }

    #[tokio::test]
    async fn create_task_preserves_explicit_status() {
        let mut store = MockTaskStore::new();
        store
            .expect_insert()
            .withf(|record: &NewTaskRecord| record.status == TaskStatus::Done)
            .times(1)
            .return_once(|record| Ok(sample_task(record.status)));

        let created = service(store)
            .create_task(NewTask {
                title: "Write report".into(),
                description: Some("quarterly numbers".into()),
                user_id: DocumentId::generate(),
                status: Some(TaskStatus::Done),
            })
            .await
            .expect("create succeeds");
        assert_eq!(created.status, TaskStatus::Done);
    }

    #[tokio::test]
    async fn created_task_is_fetchable_with_identical_fields() {
        let service = TaskService::new(Arc::new(InMemoryTaskStore::default()));
        let owner = DocumentId::generate();

        let created = service
            .create_task(NewTask {
                title: "Write report".into(),
                description: None,
                user_id: owner,
                status: None,
            })
            .await
            .expect("create succeeds");
        let fetched = service.get_task(created.id).await.expect("fetch succeeds");

        assert_eq!(fetched.title, "Write report");
        assert_eq!(fetched.user_id, owner);
        assert_eq!(fetched.status, TaskStatus::Pending);
        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn create_task_rejects_blank_title_without_insert() {
        let mut store = MockTaskStore::new();
        store.expect_insert().times(0);

        let err = service(store)
            .create_task(NewTask {
                title: "   ".into(),
                description: None,
                user_id: DocumentId::generate(),
                status: None,
            })
            .await
            .expect_err("blank title rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, EMPTY_TITLE);
    }

    #[tokio::test]
    async fn list_tasks_forwards_owner_filter() {
        let owner = DocumentId::generate();
        let mut store = MockTaskStore::new();
        store
            .expect_find_page()
            .withf(move |filter, request| *filter == Some(owner) && request.skip() == 0)
            .times(1)
            .return_once(|_, _| Ok(vec![sample_task(TaskStatus::Pending)]));
        store
            .expect_count()
            .withf(move |filter| *filter == Some(owner))
            .times(1)
            .return_once(|_| Ok(1));

        let page = service(store)
            .list_tasks(Some(owner), 1, 10)
            .await
            .expect("list succeeds");
        assert_eq!((page.items.len(), page.total), (1, 1));
    }

    #[tokio::test]
    async fn list_tasks_rejects_non_positive_pagination() {
        let store = MockTaskStore::new();
        let err = service(store)
            .list_tasks(None, 1, -2)
            .await
            .expect_err("non-positive limit rejected");
        assert_eq!(err.code, ErrorCode::InvalidRequest);
        assert_eq!(err.message, INVALID_PAGINATION);
    }

    #[tokio::test]
    async fn update_status_maps_absent_record_to_not_found() {
        let mut store = MockTaskStore::new();
        store
            .expect_update_status()
            .times(1)
            .return_once(|_, _| Ok(None));

        let err = service(store)
            .update_task_status(DocumentId::generate(), TaskStatus::Done)
            .await
            .expect_err("absent task");
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Task not found.");
    }

    #[tokio::test]
    async fn update_status_returns_updated_record() {
        let mut store = MockTaskStore::new();
        store
            .expect_update_status()
            .withf(|_, status| *status == TaskStatus::InProgress)
            .times(1)
            .return_once(|_, status| Ok(Some(sample_task(status))));

        let updated = service(store)
            .update_task_status(DocumentId::generate(), TaskStatus::InProgress)
            .await
            .expect("update succeeds");
        assert_eq!(updated.status, TaskStatus::InProgress);
    }

    #[tokio::test]
    async fn delete_task_maps_absent_record_to_not_found() {
        let mut store = MockTaskStore::new();
        store.expect_delete().times(1).return_once(|_| Ok(None));

        let err = service(store)
            .delete_task(DocumentId::generate())
            .await
            .expect_err("absent task");
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn store_failures_surface_as_database_errors() {
        let mut store = MockTaskStore::new();
        store
            .expect_find_by_id()
            .times(1)
            .return_once(|_| Err(TaskStoreError::query("cursor dropped")));

        let err = service(store)
            .get_task(DocumentId::generate())
            .await
            .expect_err("store failure surfaces");
        assert_eq!(err.code, ErrorCode::DatabaseFailure);
    }
}
