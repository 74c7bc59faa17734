//! MongoDB-backed persistence adapters.

mod documents;
mod error_mapping;
mod mongo_task_store;
mod mongo_user_store;

pub use mongo_task_store::MongoTaskStore;
pub use mongo_user_store::MongoUserStore;
