//! Route handlers for `/todos`.
//!
//! Each handler makes exactly one store call. Ids arrive as raw path strings:
//! a value that is not a UUID cannot match any row, so it is answered the same
//! way as an unknown id.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use todo_core::{CreateTodo, Todo, UpdateTodo};
use tracing::info;
use uuid::Uuid;

use crate::error::{ApiError, ErrorBody};
use crate::AppState;

fn parse_id(raw: &str) -> Option<Uuid> {
    Uuid::parse_str(raw).ok()
}

/// List all todos, newest first.
#[utoipa::path(
    get,
    path = "/todos",
    tag = "todos",
    responses(
        (status = 200, description = "All todos ordered by creation time, newest first", body = Vec<Todo>),
        (status = 500, description = "Database unavailable", body = ErrorBody)
    )
)]
pub async fn list_todos(State(state): State<AppState>) -> Result<Json<Vec<Todo>>, ApiError> {
    let todos = state.store.list().await?;
    info!(count = todos.len(), "listed todos");
    Ok(Json(todos))
}

/// Create a todo. `title` is required and must not be empty.
#[utoipa::path(
    post,
    path = "/todos",
    tag = "todos",
    request_body = CreateTodo,
    responses(
        (status = 201, description = "The created todo", body = Todo),
        (status = 400, description = "Title is missing or the body is malformed", body = ErrorBody),
        (status = 413, description = "Body larger than 2 MiB", body = ErrorBody),
        (status = 500, description = "Database unavailable", body = ErrorBody)
    )
)]
pub async fn create_todo(
    State(state): State<AppState>,
    payload: Result<Json<CreateTodo>, JsonRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let Json(input) = payload?;
    let new_todo = input.into_new_todo()?;
    let todo = state.store.create(new_todo).await?;
    info!(id = %todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

/// Fetch one todo by id.
#[utoipa::path(
    get,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo id (UUID)")),
    responses(
        (status = 200, description = "The todo", body = Todo),
        (status = 404, description = "No todo with this id", body = ErrorBody),
        (status = 500, description = "Database unavailable", body = ErrorBody)
    )
)]
pub async fn get_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound)?;
    let todo = state.store.get(id).await?;
    Ok(Json(todo))
}

/// Update a todo. Only the fields present in the body are changed;
/// `"due_date": null` clears the due date.
#[utoipa::path(
    put,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo id (UUID)")),
    request_body = UpdateTodo,
    responses(
        (status = 200, description = "The updated todo", body = Todo),
        (status = 400, description = "Malformed body", body = ErrorBody),
        (status = 404, description = "No todo with this id", body = ErrorBody),
        (status = 413, description = "Body larger than 2 MiB", body = ErrorBody),
        (status = 500, description = "Database unavailable", body = ErrorBody)
    )
)]
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTodo>, JsonRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = parse_id(&id).ok_or(ApiError::NotFound)?;
    let Json(changes) = payload?;
    let todo = state.store.update(id, changes).await?;
    info!(%id, "updated todo");
    Ok(Json(todo))
}

/// Delete a todo. Succeeds whether or not the todo existed.
#[utoipa::path(
    delete,
    path = "/todos/{id}",
    tag = "todos",
    params(("id" = String, Path, description = "Todo id (UUID)")),
    responses(
        (status = 204, description = "Deleted, or never existed"),
        (status = 500, description = "Database unavailable", body = ErrorBody)
    )
)]
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if let Some(id) = parse_id(&id) {
        state.store.delete(id).await?;
        info!(%id, "deleted todo");
    }
    Ok(StatusCode::NO_CONTENT)
}
