//! Domain types for the todo service.
//!
//! # Design
//! `Todo` is the persisted row and doubles as the JSON response body.
//! Request payloads are separate structs with optional fields so that a
//! missing title is a validation error rather than a deserialization failure,
//! and so that an update can tell "field absent" from "field set to null".

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::error::StoreError;

/// A single todo item as stored in the `todos` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Todo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

/// Request payload for creating a todo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CreateTodo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl CreateTodo {
    /// Check the title and fill in defaults, producing the row to insert.
    pub fn into_new_todo(self) -> Result<NewTodo, StoreError> {
        let title = match self.title {
            Some(title) if !title.is_empty() => title,
            _ => return Err(StoreError::Validation("Title is required".to_string())),
        };

        Ok(NewTodo {
            id: Uuid::new_v4(),
            title,
            completed: self.completed.unwrap_or(false),
            due_date: self.due_date,
        })
    }
}

/// A validated todo ready to be inserted. `created_at` is assigned by the
/// database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
}

/// Request payload for updating a todo. Only fields present in the JSON are
/// written. `due_date: null` clears the date; omitting `due_date` keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    #[cfg_attr(feature = "openapi", schema(value_type = Option<NaiveDate>))]
    pub due_date: Option<Option<NaiveDate>>,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.due_date.is_none()
    }
}

// Wraps any value that appears in the input, including `null`, in `Some`.
// Combined with `#[serde(default)]` an absent key stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
