//! Domain ports for the hexagonal boundary.
//!
//! Driven ports (`UserStore`, `TaskStore`, `PasswordHasher`) are implemented
//! by outbound adapters; driving ports (`UsersCommand`/`UsersQuery`,
//! `TasksCommand`/`TasksQuery`) are implemented by the domain services and
//! consumed by the HTTP adapter.

mod password_hasher;
mod task_store;
mod tasks;
mod user_store;
mod users;

#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{FixturePasswordHasher, PasswordHashError, PasswordHasher};
#[cfg(test)]
pub use task_store::MockTaskStore;
pub use task_store::{NewTaskRecord, TaskStore, TaskStoreError};
#[cfg(test)]
pub use tasks::{MockTasksCommand, MockTasksQuery};
pub use tasks::{TasksCommand, TasksQuery};
#[cfg(test)]
pub use user_store::MockUserStore;
pub use user_store::{NewUserRecord, UserRecordChanges, UserStore, UserStoreError};
#[cfg(test)]
pub use users::{MockUsersCommand, MockUsersQuery};
pub use users::{UsersCommand, UsersQuery};
