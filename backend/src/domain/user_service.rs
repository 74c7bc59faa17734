//! User domain service.
//!
//! Enforces email uniqueness and existence checks atop the user store and
//! owns the plain-text → digest boundary for passwords.

use std::sync::Arc;

use async_trait::async_trait;
use pagination::{PageEnvelope, PageRequest};
use tracing::error;

use crate::domain::ports::{
    NewUserRecord, PasswordHasher, UserRecordChanges, UserStore, UserStoreError, UsersCommand,
    UsersQuery,
};
use crate::domain::{DocumentId, Error, NewUser, User, UserChanges};

const EMAIL_IN_USE: &str = "Email already in use.";
const INVALID_PAGINATION: &str = "Invalid pagination parameters.";
const ENTITY: &str = "User";

/// User service implementing the driving ports.
#[derive(Clone)]
pub struct UserService<S, H> {
    store: Arc<S>,
    hasher: Arc<H>,
}

impl<S, H> UserService<S, H> {
    /// Create a new service with the given store and hashing adapters.
    pub const fn new(store: Arc<S>, hasher: Arc<H>) -> Self {
        Self { store, hasher }
    }
}

impl<S, H> UserService<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    fn map_store_error(error: UserStoreError) -> Error {
        match error {
            // The unique index is the authoritative uniqueness signal; the
            // pre-check only exists to fail early.
            UserStoreError::DuplicateEmail { .. } => Error::invalid_request(EMAIL_IN_USE),
            other => {
                error!(error = %other, "user store operation failed");
                Error::database()
            }
        }
    }

    fn hash_password(&self, plain: &str) -> Result<String, Error> {
        self.hasher.hash(plain).map_err(|err| {
            error!(error = %err, "password hashing failed");
            Error::internal("password hashing failed")
        })
    }
}

#[async_trait]
impl<S, H> UsersCommand for UserService<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    async fn create_user(&self, new_user: NewUser) -> Result<User, Error> {
        let existing = self
            .store
            .find_by_email(&new_user.email)
            .await
            .map_err(Self::map_store_error)?;
        if existing.is_some() {
            return Err(Error::invalid_request(EMAIL_IN_USE));
        }

        let password_hash = self.hash_password(&new_user.password)?;
        let record = NewUserRecord {
            name: new_user.name,
            email: new_user.email,
            password_hash,
        };
        self.store
            .insert(&record)
            .await
            .map_err(Self::map_store_error)
    }

    async fn update_user(&self, id: DocumentId, changes: UserChanges) -> Result<User, Error> {
        let password_hash = match changes.password {
            Some(plain) => Some(self.hash_password(&plain)?),
            None => None,
        };
        let record_changes = UserRecordChanges {
            name: changes.name,
            email: changes.email,
            password_hash,
        };
        self.store
            .update(id, &record_changes)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(ENTITY))
    }

    async fn delete_user(&self, id: DocumentId) -> Result<(), Error> {
        self.store
            .delete(id)
            .await
            .map_err(Self::map_store_error)?
            .map(|_| ())
            .ok_or_else(|| Error::not_found(ENTITY))
    }
}

#[async_trait]
impl<S, H> UsersQuery for UserService<S, H>
where
    S: UserStore,
    H: PasswordHasher,
{
    async fn list_users(&self, page: i64, limit: i64) -> Result<PageEnvelope<User>, Error> {
        let request = PageRequest::new(page, limit)
            .map_err(|_| Error::invalid_request(INVALID_PAGINATION))?;
        // Listing and counting are independent reads; run them concurrently.
        let (users, total) = tokio::try_join!(
            async {
                self.store
                    .find_page(request)
                    .await
                    .map_err(Self::map_store_error)
            },
            async { self.store.count().await.map_err(Self::map_store_error) },
        )?;
        Ok(PageEnvelope::new(users, total, request))
    }

    async fn get_user(&self, id: DocumentId) -> Result<User, Error> {
        self.store
            .find_by_id(id)
            .await
            .map_err(Self::map_store_error)?
            .ok_or_else(|| Error::not_found(ENTITY))
    }
}
