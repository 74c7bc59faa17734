//! Domain error taxonomy.
//!
//! These errors are transport agnostic: services raise them, controllers
//! forward them untouched, and the HTTP adapter renders every one of them in
//! a single place (`inbound::http::error`).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::middleware::request_id::RequestId;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// The request is malformed or fails validation.
    InvalidRequest,
    /// The referenced entity does not exist.
    NotFound,
    /// The document store could not complete an operation.
    DatabaseFailure,
    /// An unexpected error occurred on the server.
    InternalError,
}

/// Fixed wire message for [`ErrorCode::DatabaseFailure`].
const DATABASE_FAILURE_MESSAGE: &str = "Error accessing the database.";

/// Domain error payload.
///
/// Carries the wire-facing code and message plus optional structured details
/// (for example the field-error list produced by schema validation) and the
/// request identifier captured from the middleware scope.
///
/// # Examples
/// ```
/// use backend::domain::{Error, ErrorCode};
///
/// let err = Error::not_found("Task");
/// assert_eq!(err.code, ErrorCode::NotFound);
/// assert_eq!(err.message, "Task not found.");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct Error {
    /// Stable machine-readable error code.
    pub code: ErrorCode,
    /// Human-readable error message.
    pub message: String,
    /// Supplementary structured details, such as per-field validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
    /// Correlation identifier echoed from the request-id middleware.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

impl Error {
    /// Create a new error, capturing the in-scope request identifier.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            request_id: RequestId::current(),
        }
    }

    /// Attach structured details to the error.
    ///
    /// # Examples
    /// ```
    /// use backend::domain::Error;
    /// use serde_json::json;
    ///
    /// let err = Error::invalid_request("bad").with_details(json!({ "field": "name" }));
    /// assert!(err.details.is_some());
    /// ```
    #[must_use]
    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Client input fault, rendered as HTTP 400.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidRequest, message)
    }

    /// Absent entity, rendered as HTTP 404 with the message
    /// `"{entity} not found."`.
    pub fn not_found(entity: &str) -> Self {
        Self::new(ErrorCode::NotFound, format!("{entity} not found."))
    }

    /// Store fault, rendered as HTTP 500 with a fixed generic message.
    /// The underlying driver error must be logged by the caller, never
    /// forwarded here.
    pub fn database() -> Self {
        Self::new(ErrorCode::DatabaseFailure, DATABASE_FAILURE_MESSAGE)
    }

    /// Unexpected internal fault; the HTTP adapter redacts the message
    /// before it reaches the wire.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for Error {}
