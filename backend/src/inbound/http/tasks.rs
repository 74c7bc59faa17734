//! Tasks API handlers.
//!
//! ```text
//! POST   /api/tasks                {"title":"Write report","userId":"507f..."}
//! GET    /api/tasks?page=1&limit=10&userId=507f...
//! GET    /api/tasks/{id}
//! PATCH  /api/tasks/{id}/status    {"status":"done"}
//! DELETE /api/tasks/{id}
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use pagination::PageEnvelope;
use serde::{Deserialize, Serialize};

use crate::domain::Task;
use crate::inbound::http::validation::{
    parse_document_id, validate_create_task, validate_task_status, validation_failed,
};
use crate::inbound::http::{ApiResult, HttpState};

/// Task creation body for `POST /api/tasks`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequestBody {
    pub title: Option<String>,
    pub description: Option<String>,
    pub user_id: Option<String>,
    pub status: Option<String>,
}

/// Status replacement body for `PATCH /api/tasks/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskStatusRequestBody {
    pub status: Option<String>,
}

/// Task representation on the wire.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskResponseBody {
    pub id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: String,
    pub user_id: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Task> for TaskResponseBody {
    fn from(task: Task) -> Self {
        Self {
            id: task.id.to_string(),
            title: task.title,
            description: task.description,
            status: task.status.as_str().to_owned(),
            user_id: task.user_id.to_string(),
            created_at: task.created_at.to_rfc3339(),
            updated_at: task.updated_at.to_rfc3339(),
        }
    }
}

/// Task listing query: raw pagination text plus an optional owner filter.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTasksQuery {
    page: Option<String>,
    limit: Option<String>,
    user_id: Option<String>,
}

/// Create a task.
#[post("/tasks")]
pub async fn create_task(
    state: web::Data<HttpState>,
    payload: web::Json<CreateTaskRequestBody>,
) -> ApiResult<HttpResponse> {
    let new_task = validate_create_task(payload.into_inner()).map_err(validation_failed)?;
    let created = state.tasks_command.create_task(new_task).await?;
    Ok(HttpResponse::Created().json(TaskResponseBody::from(created)))
}

/// List tasks, paginated, optionally filtered to one owner.
#[get("/tasks")]
pub async fn list_tasks(
    state: web::Data<HttpState>,
    query: web::Query<ListTasksQuery>,
) -> ApiResult<web::Json<PageEnvelope<TaskResponseBody>>> {
    let page = pagination::parse_param(query.page.as_deref(), pagination::DEFAULT_PAGE);
    let limit = pagination::parse_param(query.limit.as_deref(), pagination::DEFAULT_LIMIT);
    // Unlike pagination text, a malformed owner filter is a hard error: it
    // would otherwise silently list every task.
    let owner = match query.user_id.as_deref() {
        Some(raw) => Some(parse_document_id(raw, "userId")?),
        None => None,
    };
    let envelope = state.tasks_query.list_tasks(owner, page, limit).await?;
    Ok(web::Json(envelope.map(TaskResponseBody::from)))
}

/// Fetch a single task.
#[get("/tasks/{id}")]
pub async fn get_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TaskResponseBody>> {
    let id = parse_document_id(&path, "id")?;
    let task = state.tasks_query.get_task(id).await?;
    Ok(web::Json(task.into()))
}

/// Replace a task's status.
#[patch("/tasks/{id}/status")]
pub async fn update_task_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateTaskStatusRequestBody>,
) -> ApiResult<web::Json<TaskResponseBody>> {
    let id = parse_document_id(&path, "id")?;
    let status = validate_task_status(payload.into_inner()).map_err(validation_failed)?;
    let updated = state.tasks_command.update_task_status(id, status).await?;
    Ok(web::Json(updated.into()))
}

/// Delete a task.
#[delete("/tasks/{id}")]
pub async fn delete_task(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_document_id(&path, "id")?;
    state.tasks_command.delete_task(id).await?;
    Ok(HttpResponse::NoContent().finish())
}
