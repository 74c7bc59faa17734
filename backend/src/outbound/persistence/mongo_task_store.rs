//! MongoDB-backed `TaskStore` adapter.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Document, doc};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use pagination::PageRequest;

use crate::domain::ports::{NewTaskRecord, TaskStore, TaskStoreError};
use crate::domain::{DocumentId, Task, TaskStatus};
use crate::outbound::persistence::documents::TaskDocument;
use crate::outbound::persistence::error_mapping::map_mongo_error;

const COLLECTION: &str = "tasks";

/// Task store backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoTaskStore {
    collection: Collection<TaskDocument>,
}

impl MongoTaskStore {
    /// Create a store over the `tasks` collection of the given database.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    fn map_error(error: mongodb::error::Error) -> TaskStoreError {
        map_mongo_error(error, TaskStoreError::query, TaskStoreError::connection)
    }
}

fn owner_filter(owner: Option<DocumentId>) -> Document {
    owner.map_or_else(
        || doc! {},
        |id| doc! { "userId": id.as_object_id() },
    )
}

#[async_trait]
impl TaskStore for MongoTaskStore {
    async fn insert(&self, record: &NewTaskRecord) -> Result<Task, TaskStoreError> {
        let now = Utc::now();
        let document = TaskDocument {
            id: ObjectId::new(),
            title: record.title.clone(),
            description: record.description.clone(),
            status: record.status,
            user_id: record.user_id.as_object_id(),
            created_at: now,
            updated_at: now,
        };
        self.collection
            .insert_one(&document)
            .await
            .map_err(Self::map_error)?;
        Ok(document.into())
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<Task>, TaskStoreError> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(Self::map_error)?;
        Ok(found.map(Task::from))
    }

    async fn find_page(
        &self,
        owner: Option<DocumentId>,
        page: PageRequest,
    ) -> Result<Vec<Task>, TaskStoreError> {
        let cursor = self
            .collection
            .find(owner_filter(owner))
            .sort(doc! { "_id": 1 })
            .skip(page.skip())
            .limit(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .await
            .map_err(Self::map_error)?;
        let documents: Vec<TaskDocument> =
            cursor.try_collect().await.map_err(Self::map_error)?;
        Ok(documents.into_iter().map(Task::from).collect())
    }

    async fn count(&self, owner: Option<DocumentId>) -> Result<u64, TaskStoreError> {
        self.collection
            .count_documents(owner_filter(owner))
            .await
            .map_err(Self::map_error)
    }

    async fn update_status(
        &self,
        id: DocumentId,
        status: TaskStatus,
    ) -> Result<Option<Task>, TaskStoreError> {
        let update = doc! {
            "$set": {
                "status": status.as_str(),
                "updatedAt": bson::DateTime::now(),
            }
        };
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id.as_object_id() }, update)
            .return_document(ReturnDocument::After)
            .await
            .map_err(Self::map_error)?;
        Ok(updated.map(Task::from))
    }

    async fn delete(&self, id: DocumentId) -> Result<Option<Task>, TaskStoreError> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": id.as_object_id() })
            .await
            .map_err(Self::map_error)?;
        Ok(removed.map(Task::from))
    }
}
