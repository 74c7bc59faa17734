//! MongoDB-backed `UserStore` adapter.

use async_trait::async_trait;
use bson::oid::ObjectId;
use bson::{Document, doc};
use chrono::Utc;
use futures_util::TryStreamExt;
use mongodb::options::{IndexOptions, ReturnDocument};
use mongodb::{Collection, Database, IndexModel};
use pagination::PageRequest;

use crate::domain::ports::{NewUserRecord, UserRecordChanges, UserStore, UserStoreError};
use crate::domain::{DocumentId, User};
use crate::outbound::persistence::documents::UserDocument;
use crate::outbound::persistence::error_mapping::{is_duplicate_key, map_mongo_error};

const COLLECTION: &str = "users";

/// User store backed by a MongoDB collection.
#[derive(Clone)]
pub struct MongoUserStore {
    collection: Collection<UserDocument>,
}

impl MongoUserStore {
    /// Create a store over the `users` collection of the given database.
    pub fn new(database: &Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    /// Create the unique email index.
    ///
    /// Must run once at startup; uniqueness enforcement on insert and update
    /// depends on it.
    pub async fn ensure_indexes(&self) -> Result<(), UserStoreError> {
        let index = IndexModel::builder()
            .keys(doc! { "email": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.collection
            .create_index(index)
            .await
            .map_err(|err| {
                map_mongo_error(err, UserStoreError::query, UserStoreError::connection)
            })?;
        Ok(())
    }

    fn map_error(error: mongodb::error::Error) -> UserStoreError {
        map_mongo_error(error, UserStoreError::query, UserStoreError::connection)
    }

    fn map_write_error(email: &str, error: mongodb::error::Error) -> UserStoreError {
        if is_duplicate_key(&error) {
            UserStoreError::duplicate_email(email)
        } else {
            Self::map_error(error)
        }
    }
}

fn changes_document(changes: &UserRecordChanges) -> Document {
    let mut set = doc! { "updatedAt": bson::DateTime::now() };
    if let Some(name) = &changes.name {
        set.insert("name", name);
    }
    if let Some(email) = &changes.email {
        set.insert("email", email);
    }
    if let Some(password_hash) = &changes.password_hash {
        set.insert("passwordHash", password_hash);
    }
    doc! { "$set": set }
}

#[async_trait]
impl UserStore for MongoUserStore {
    async fn insert(&self, record: &NewUserRecord) -> Result<User, UserStoreError> {
        let now = Utc::now();
        let document = UserDocument {
            id: ObjectId::new(),
            name: record.name.clone(),
            email: record.email.clone(),
            password_hash: record.password_hash.clone(),
            created_at: now,
            updated_at: now,
        };
        self.collection
            .insert_one(&document)
            .await
            .map_err(|err| Self::map_write_error(&record.email, err))?;
        Ok(document.into())
    }

    async fn find_by_id(&self, id: DocumentId) -> Result<Option<User>, UserStoreError> {
        let found = self
            .collection
            .find_one(doc! { "_id": id.as_object_id() })
            .await
            .map_err(Self::map_error)?;
        Ok(found.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserStoreError> {
        let found = self
            .collection
            .find_one(doc! { "email": email })
            .await
            .map_err(Self::map_error)?;
        Ok(found.map(User::from))
    }

    async fn find_page(&self, page: PageRequest) -> Result<Vec<User>, UserStoreError> {
        let cursor = self
            .collection
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .skip(page.skip())
            .limit(i64::try_from(page.limit()).unwrap_or(i64::MAX))
            .await
            .map_err(Self::map_error)?;
        let documents: Vec<UserDocument> =
            cursor.try_collect().await.map_err(Self::map_error)?;
        Ok(documents.into_iter().map(User::from).collect())
    }

    async fn count(&self) -> Result<u64, UserStoreError> {
        self.collection
            .count_documents(doc! {})
            .await
            .map_err(Self::map_error)
    }

    async fn update(
        &self,
        id: DocumentId,
        changes: &UserRecordChanges,
    ) -> Result<Option<User>, UserStoreError> {
        let email = changes.email.clone().unwrap_or_default();
        let updated = self
            .collection
            .find_one_and_update(doc! { "_id": id.as_object_id() }, changes_document(changes))
            .return_document(ReturnDocument::After)
            .await
            .map_err(|err| Self::map_write_error(&email, err))?;
        Ok(updated.map(User::from))
    }

    async fn delete(&self, id: DocumentId) -> Result<Option<User>, UserStoreError> {
        let removed = self
            .collection
            .find_one_and_delete(doc! { "_id": id.as_object_id() })
            .await
            .map_err(Self::map_error)?;
        Ok(removed.map(User::from))
    }
}
