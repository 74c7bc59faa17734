//! Request payload validation.
//!
//! Validators are pure functions from loosely typed request bodies to domain
//! inputs. They collect every field failure rather than stopping at the
//! first, so a client can fix a whole payload in one round trip.

use serde::Serialize;
use serde_json::json;

use crate::domain::{DocumentId, Error, NewTask, NewUser, TaskStatus, UserChanges};
use crate::inbound::http::tasks::{CreateTaskRequestBody, UpdateTaskStatusRequestBody};
use crate::inbound::http::users::{CreateUserRequestBody, UpdateUserRequestBody};

const MIN_PASSWORD_LENGTH: usize = 5;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Offending request field, in wire casing.
    pub field: &'static str,
    /// What the field failed to satisfy.
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Fold field failures into the canonical validation error payload.
pub fn validation_failed(errors: Vec<FieldError>) -> Error {
    Error::invalid_request("Validation failed.").with_details(json!({ "errors": errors }))
}

/// Parse a path or query identifier, naming the field on failure.
pub fn parse_document_id(raw: &str, field: &'static str) -> Result<DocumentId, Error> {
    DocumentId::parse(raw)
        .map_err(|_| validation_failed(vec![FieldError::new(field, "must be a valid identifier")]))
}

fn require_text(
    value: Option<&str>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value.map(str::trim) {
        Some(text) if !text.is_empty() => Some(text.to_owned()),
        Some(_) => {
            errors.push(FieldError::new(field, "must not be empty"));
            None
        }
        None => {
            errors.push(FieldError::new(field, "is required"));
            None
        }
    }
}

// Deliberately loose: one `@`, a dot somewhere after it, no whitespace.
// Deliverability is the mail server's problem.
fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn check_email(email: String, errors: &mut Vec<FieldError>) -> Option<String> {
    if is_valid_email(&email) {
        Some(email)
    } else {
        errors.push(FieldError::new("email", "must be a valid email address"));
        None
    }
}

fn check_password(password: String, errors: &mut Vec<FieldError>) -> Option<String> {
    if password.len() >= MIN_PASSWORD_LENGTH {
        Some(password)
    } else {
        errors.push(FieldError::new(
            "password",
            format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
        ));
        None
    }
}

fn parse_status(raw: &str, errors: &mut Vec<FieldError>) -> Option<TaskStatus> {
    match raw.parse() {
        Ok(status) => Some(status),
        Err(_) => {
            errors.push(FieldError::new(
                "status",
                "must be one of: pending, in-progress, done",
            ));
            None
        }
    }
}

/// Validate a user creation payload.
pub fn validate_create_user(body: CreateUserRequestBody) -> Result<NewUser, Vec<FieldError>> {
    let mut errors = Vec::new();
    let name = require_text(body.name.as_deref(), "name", &mut errors);
    let email = require_text(body.email.as_deref(), "email", &mut errors)
        .and_then(|email| check_email(email, &mut errors));
    // Passwords keep their whitespace; only presence and length are checked.
    let password = match body.password {
        Some(password) => check_password(password, &mut errors),
        None => {
            errors.push(FieldError::new("password", "is required"));
            None
        }
    };
    match (name, email, password) {
        (Some(name), Some(email), Some(password)) => Ok(NewUser {
            name,
            email,
            password,
        }),
        _ => Err(errors),
    }
}

/// Validate a partial user update; absent fields stay untouched.
pub fn validate_update_user(body: UpdateUserRequestBody) -> Result<UserChanges, Vec<FieldError>> {
    let mut errors = Vec::new();
    let name = body
        .name
        .and_then(|name| require_text(Some(&name), "name", &mut errors));
    let email = body
        .email
        .and_then(|email| require_text(Some(&email), "email", &mut errors))
        .and_then(|email| check_email(email, &mut errors));
    let password = body
        .password
        .and_then(|password| check_password(password, &mut errors));
    if errors.is_empty() {
        Ok(UserChanges {
            name,
            email,
            password,
        })
    } else {
        Err(errors)
    }
}

/// Validate a task creation payload.
pub fn validate_create_task(body: CreateTaskRequestBody) -> Result<NewTask, Vec<FieldError>> {
    let mut errors = Vec::new();
    let title = require_text(body.title.as_deref(), "title", &mut errors);
    let description = body
        .description
        .map(|text| text.trim().to_owned())
        .filter(|text| !text.is_empty());
    let user_id = match body.user_id.as_deref() {
        Some(raw) => match DocumentId::parse(raw) {
            Ok(id) => Some(id),
            Err(_) => {
                errors.push(FieldError::new("userId", "must be a valid identifier"));
                None
            }
        },
        None => {
            errors.push(FieldError::new("userId", "is required"));
            None
        }
    };
    let status = match body.status.as_deref() {
        Some(raw) => parse_status(raw, &mut errors),
        None => None,
    };
    match (title, user_id) {
        (Some(title), Some(user_id)) if errors.is_empty() => Ok(NewTask {
            title,
            description,
            user_id,
            status,
        }),
        _ => Err(errors),
    }
}

/// Validate a status replacement payload.
pub fn validate_task_status(body: UpdateTaskStatusRequestBody) -> Result<TaskStatus, Vec<FieldError>> {
    let mut errors = Vec::new();
    let status = match body.status.as_deref() {
        Some(raw) => parse_status(raw, &mut errors),
        None => {
            errors.push(FieldError::new("status", "is required"));
            None
        }
    };
    status.ok_or(errors)
}
