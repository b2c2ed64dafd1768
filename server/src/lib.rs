//! HTTP front end for the todo service.
//!
//! # Design
//! `app` builds the router around any `TodoStore`, so tests can drive the
//! real routes against an in-process store while the binary passes a
//! `PgTodoStore`. The only shared state is the store handle itself.

pub mod config;
pub mod docs;
pub mod error;
pub mod handlers;

use std::future::Future;
use std::sync::Arc;

use axum::{routing::get, Router};
use todo_core::TodoStore;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

pub use config::ServerConfig;
pub use error::{ApiError, ErrorBody};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn TodoStore>,
}

pub fn app(store: Arc<dyn TodoStore>) -> Router {
    Router::new()
        .route(
            "/todos",
            get(handlers::list_todos).post(handlers::create_todo),
        )
        .route(
            "/todos/{id}",
            get(handlers::get_todo)
                .put(handlers::update_todo)
                .delete(handlers::delete_todo),
        )
        .route(docs::DOCS_PATH, get(docs::openapi_json))
        .route(docs::OPENAPI_PATH, get(docs::openapi_json))
        .with_state(AppState { store })
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Serve `app(store)` on `listener` until `shutdown` resolves.
pub async fn run<F>(
    listener: TcpListener,
    store: Arc<dyn TodoStore>,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app(store))
        .with_graceful_shutdown(shutdown)
        .await
}
