//! HTTP adapter: request DTOs, validation, handlers, and error mapping.

pub mod error;
pub mod state;
pub mod tasks;
pub mod users;
pub mod validation;

pub use error::ApiResult;
pub use state::HttpState;
