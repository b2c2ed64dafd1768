//! Persistence for todos.
//!
//! # Design
//! Every `TodoStore` method maps to exactly one SQL statement, so each
//! operation is atomic on its own and no transaction is ever opened. Partial
//! updates are folded into a single `UPDATE ... RETURNING` with `COALESCE`
//! rather than a read-modify-write pair.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use crate::error::StoreError;
use crate::types::{NewTodo, Todo, UpdateTodo};

/// The five operations the HTTP layer needs.
#[async_trait]
pub trait TodoStore: Send + Sync {
    /// All todos, most recently created first.
    async fn list(&self) -> Result<Vec<Todo>, StoreError>;

    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError>;

    /// Returns `StoreError::NotFound` when no row has this id.
    async fn get(&self, id: Uuid) -> Result<Todo, StoreError>;

    /// Overwrite the fields present in `changes`. Returns
    /// `StoreError::NotFound` when no row has this id.
    async fn update(&self, id: Uuid, changes: UpdateTodo) -> Result<Todo, StoreError>;

    /// Remove the row if it exists. Deleting a missing id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;
}

const COLUMNS: &str = "id, title, completed, due_date, created_at";

/// `TodoStore` backed by the `todos` table in PostgreSQL.
#[derive(Debug, Clone)]
pub struct PgTodoStore {
    pool: PgPool,
}

impl PgTodoStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl TodoStore for PgTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let todos = sqlx::query_as::<_, Todo>(&format!(
            "SELECT {COLUMNS} FROM todos ORDER BY created_at DESC, id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        debug!(count = todos.len(), "listed todos");
        Ok(todos)
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let created = sqlx::query_as::<_, Todo>(&format!(
            "INSERT INTO todos (id, title, completed, due_date) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        ))
        .bind(todo.id)
        .bind(&todo.title)
        .bind(todo.completed)
        .bind(todo.due_date)
        .fetch_one(&self.pool)
        .await?;

        debug!(id = %created.id, "inserted todo");
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Todo, StoreError> {
        sqlx::query_as::<_, Todo>(&format!("SELECT {COLUMNS} FROM todos WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: Uuid, changes: UpdateTodo) -> Result<Todo, StoreError> {
        // $4 says whether due_date was supplied at all, since $5 = NULL is a
        // legitimate value meaning "clear the date".
        let (set_due_date, due_date) = match changes.due_date {
            Some(value) => (true, value),
            None => (false, None),
        };

        let updated = sqlx::query_as::<_, Todo>(&format!(
            "UPDATE todos SET \
                 title = COALESCE($2, title), \
                 completed = COALESCE($3, completed), \
                 due_date = CASE WHEN $4 THEN $5 ELSE due_date END \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        ))
        .bind(id)
        .bind(changes.title)
        .bind(changes.completed)
        .bind(set_due_date)
        .bind(due_date)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(StoreError::NotFound)?;

        debug!(%id, "updated todo");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM todos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        debug!(%id, rows = result.rows_affected(), "deleted todo");
        Ok(())
    }
}
