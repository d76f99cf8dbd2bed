//! Per-route business logic: validation, store calls, response shaping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::http::error::ApiError;
use crate::http::server::RequestContext;
use crate::routing::template::PathParams;
use crate::storage::{Task, TaskDraft, TaskPatch};

const TASKS_TABLE: &str = "tasks";

/// POST /tasks — create a task from `{title, description}`.
pub async fn create_task(ctx: RequestContext) -> Result<Response, ApiError> {
    let draft = parse_draft(ctx.body.as_ref())?;
    let task = ctx.store.insert(TASKS_TABLE, Task::new(draft)).await?;
    Ok((StatusCode::CREATED, Json(task)).into_response())
}

/// GET /tasks — list tasks, optionally filtered by the `search` query
/// parameter. Never fails: a missing table is an empty list.
pub async fn list_tasks(ctx: RequestContext) -> Result<Response, ApiError> {
    let filter = ctx.query.get("search").map(String::as_str);
    let tasks = ctx.store.select(TASKS_TABLE, filter).await;
    Ok(Json(tasks).into_response())
}

/// PATCH /tasks/:id — partially update a task.
pub async fn update_task(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = parse_id(&ctx.params)?;
    let patch = parse_patch(ctx.body.as_ref())?;
    let task = ctx.store.update(TASKS_TABLE, id, patch).await?.ok_or(ApiError::NotFound)?;
    Ok(Json(task).into_response())
}

/// DELETE /tasks/:id — remove a task.
pub async fn delete_task(ctx: RequestContext) -> Result<Response, ApiError> {
    let id = parse_id(&ctx.params)?;
    if ctx.store.delete(TASKS_TABLE, id).await? {
        Ok(StatusCode::NO_CONTENT.into_response())
    } else {
        Err(ApiError::NotFound)
    }
}

/// An `:id` segment that is not a UUID cannot reference any record.
fn parse_id(params: &PathParams) -> Result<Uuid, ApiError> {
    params
        .get("id")
        .and_then(|raw| Uuid::parse_str(raw).ok())
        .ok_or(ApiError::NotFound)
}

fn parse_draft(body: Option<&Value>) -> Result<TaskDraft, ApiError> {
    let fields = body
        .and_then(Value::as_object)
        .ok_or_else(|| ApiError::Validation("request body must be a JSON object".to_string()))?;

    Ok(TaskDraft {
        title: required_text(fields, "title")?,
        description: required_text(fields, "description")?,
    })
}

/// Absent or non-object body is an empty patch: only `updated_at` is
/// refreshed. Present fields must carry the right type.
fn parse_patch(body: Option<&Value>) -> Result<TaskPatch, ApiError> {
    let Some(fields) = body.and_then(Value::as_object) else {
        return Ok(TaskPatch::default());
    };

    let mut patch = TaskPatch::default();
    if let Some(value) = fields.get("title") {
        patch.title = Some(text_field(value, "title")?);
    }
    if let Some(value) = fields.get("description") {
        patch.description = Some(text_field(value, "description")?);
    }
    if let Some(value) = fields.get("completed_at") {
        let completed = value
            .as_bool()
            .ok_or_else(|| ApiError::Validation("completed_at must be a boolean".to_string()))?;
        patch.completed = Some(completed);
    }
    Ok(patch)
}

fn required_text(fields: &Map<String, Value>, name: &str) -> Result<String, ApiError> {
    let value = fields
        .get(name)
        .ok_or_else(|| ApiError::Validation(format!("{name} is required")))?;
    text_field(value, name)
}

fn text_field(value: &Value, name: &str) -> Result<String, ApiError> {
    let text = value
        .as_str()
        .ok_or_else(|| ApiError::Validation(format!("{name} must be a string")))?;
    if text.trim().is_empty() {
        return Err(ApiError::Validation(format!("{name} must not be blank")));
    }
    Ok(text.to_string())
}
