//! BSON document shapes stored in MongoDB.
//!
//! Documents keep camelCase field names on disk and convert into the domain
//! entities at the adapter boundary.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Task, TaskStatus, User};

/// Stored shape of a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<UserDocument> for User {
    fn from(doc: UserDocument) -> Self {
        Self {
            id: doc.id.into(),
            name: doc.name,
            email: doc.email,
            password_hash: doc.password_hash,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

/// Stored shape of a task.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: TaskStatus,
    pub user_id: ObjectId,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<TaskDocument> for Task {
    fn from(doc: TaskDocument) -> Self {
        Self {
            id: doc.id.into(),
            title: doc.title,
            description: doc.description,
            status: doc.status,
            user_id: doc.user_id.into(),
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_document_round_trips_through_bson() {
        let doc = UserDocument {
            id: ObjectId::new(),
            name: "Ada".into(),
            email: "ada@example.com".into(),
            password_hash: "$2b$10$abcdefghijklmnopqrstuv".into(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let bson = bson::to_document(&doc).expect("document serializes");
        assert!(bson.contains_key("_id"));
        assert!(bson.contains_key("passwordHash"));
        let back: UserDocument = bson::from_document(bson).expect("document deserializes");
        assert_eq!(back.email, "ada@example.com");
    }

    #[test]
    fn task_document_stores_wire_status_strings() {
        let doc = TaskDocument {
            id: ObjectId::new(),
            title: "Write report".into(),
            description: None,
            status: TaskStatus::InProgress,
            user_id: ObjectId::new(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let bson = bson::to_document(&doc).expect("document serializes");
        assert_eq!(bson.get_str("status"), Ok("in-progress"));
        assert!(!bson.contains_key("description"));
    }

    #[test]
    fn task_document_converts_into_domain_entity() {
        let owner = ObjectId::new();
        let doc = TaskDocument {
            id: ObjectId::new(),
            title: "Write report".into(),
            description: Some("quarterly numbers".into()),
            status: TaskStatus::Done,
            user_id: owner,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let task = Task::from(doc);
        assert_eq!(task.status, TaskStatus::Done);
        assert_eq!(task.user_id.as_object_id(), owner);
    }
}
