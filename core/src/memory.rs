//! Test doubles for `TodoStore`. Only compiled with the `test-utils` feature.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::TodoStore;
use crate::types::{NewTodo, Todo, UpdateTodo};

#[derive(Default)]
struct Rows {
    todos: HashMap<Uuid, Todo>,
    // Creation timestamps are strictly increasing within one store.
    last_created: Option<DateTime<Utc>>,
}

impl Rows {
    fn next_created_at(&mut self) -> DateTime<Utc> {
        let now = Utc::now();
        let created_at = match self.last_created {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        };
        self.last_created = Some(created_at);
        created_at
    }
}

/// Newest first; equal timestamps fall back to the id, matching the SQL
/// `ORDER BY created_at DESC, id DESC`.
fn newest_first(a: &Todo, b: &Todo) -> std::cmp::Ordering {
    b.created_at
        .cmp(&a.created_at)
        .then_with(|| b.id.cmp(&a.id))
}

/// Process-local store with the same observable behaviour as `PgTodoStore`.
#[derive(Default)]
pub struct MemoryTodoStore {
    rows: RwLock<Rows>,
}

impl MemoryTodoStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.todos.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl TodoStore for MemoryTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = self.rows.read().await;
        let mut todos: Vec<Todo> = rows.todos.values().cloned().collect();
        todos.sort_by(newest_first);
        Ok(todos)
    }

    async fn create(&self, todo: NewTodo) -> Result<Todo, StoreError> {
        let mut rows = self.rows.write().await;
        let created = Todo {
            id: todo.id,
            title: todo.title,
            completed: todo.completed,
            due_date: todo.due_date,
            created_at: rows.next_created_at(),
        };
        rows.todos.insert(created.id, created.clone());
        Ok(created)
    }

    async fn get(&self, id: Uuid) -> Result<Todo, StoreError> {
        let rows = self.rows.read().await;
        rows.todos.get(&id).cloned().ok_or(StoreError::NotFound)
    }

    async fn update(&self, id: Uuid, changes: UpdateTodo) -> Result<Todo, StoreError> {
        let mut rows = self.rows.write().await;
        let todo = rows.todos.get_mut(&id).ok_or(StoreError::NotFound)?;
        if let Some(title) = changes.title {
            todo.title = title;
        }
        if let Some(completed) = changes.completed {
            todo.completed = completed;
        }
        if let Some(due_date) = changes.due_date {
            todo.due_date = due_date;
        }
        Ok(todo.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        self.rows.write().await.todos.remove(&id);
        Ok(())
    }
}

/// A store whose every operation fails as if the database were down.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableTodoStore;

#[async_trait]
impl TodoStore for UnavailableTodoStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        Err(unavailable())
    }

    async fn create(&self, _todo: NewTodo) -> Result<Todo, StoreError> {
        Err(unavailable())
    }

    async fn get(&self, _id: Uuid) -> Result<Todo, StoreError> {
        Err(unavailable())
    }

    async fn update(&self, _id: Uuid, _changes: UpdateTodo) -> Result<Todo, StoreError> {
        Err(unavailable())
    }

    async fn delete(&self, _id: Uuid) -> Result<(), StoreError> {
        Err(unavailable())
    }
}

fn unavailable() -> StoreError {
    StoreError::Database(sqlx::Error::PoolTimedOut)
}
