//! User entity and service payloads.

use chrono::{DateTime, Utc};

use crate::domain::DocumentId;

/// A stored user record.
///
/// `password_hash` is the one-way digest produced at creation time; the HTTP
/// adapter never serializes it.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    /// Store-assigned identifier.
    pub id: DocumentId,
    /// Display name, non-empty.
    pub name: String,
    /// Contact address, unique across users.
    pub email: String,
    /// One-way password digest.
    pub password_hash: String,
    /// Set by the store adapter at insert time.
    pub created_at: DateTime<Utc>,
    /// Set by the store adapter at every write.
    pub updated_at: DateTime<Utc>,
}

/// Validated payload for creating a user.
///
/// `password` is still plain text here; the service hashes it before anything
/// is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Display name, non-empty.
    pub name: String,
    /// Contact address, syntax-checked.
    pub email: String,
    /// Plain-text password, at least 5 characters.
    pub password: String,
}

/// Validated partial update for a user; each field is independently optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserChanges {
    /// Replacement display name.
    pub name: Option<String>,
    /// Replacement contact address.
    pub email: Option<String>,
    /// Replacement plain-text password, re-hashed by the service.
    pub password: Option<String>,
}
