//! Transport-agnostic domain types, ports, and services.

pub mod error;
pub mod id;
pub mod ports;
pub mod task;
pub mod task_service;
pub mod user;
pub mod user_service;

pub use error::{Error, ErrorCode};
pub use id::{DocumentId, InvalidDocumentId};
pub use task::{NewTask, ParseTaskStatusError, Task, TaskStatus};
pub use task_service::TaskService;
pub use user::{NewUser, User, UserChanges};
pub use user_service::UserService;
