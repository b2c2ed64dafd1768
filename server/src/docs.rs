//! OpenAPI description of the HTTP surface, generated from the
//! `#[utoipa::path]` annotations on the handlers.

use axum::Json;
use todo_core::{CreateTodo, Todo, UpdateTodo};
use utoipa::OpenApi;

use crate::error::ErrorBody;
use crate::handlers;

/// Where the document is served. Both paths answer with the same JSON.
pub const DOCS_PATH: &str = "/api-docs";
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "To-Do API",
        version = "1.0.0",
        description = "Simple To-Do API with PostgreSQL"
    ),
    paths(
        handlers::list_todos,
        handlers::create_todo,
        handlers::get_todo,
        handlers::update_todo,
        handlers::delete_todo
    ),
    components(schemas(Todo, CreateTodo, UpdateTodo, ErrorBody)),
    tags((name = "todos", description = "Todo management"))
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
