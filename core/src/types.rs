//! Domain types for the todo service.
//!
//! Field order on `Todo` and `Stats` is the order they appear in JSON
//! responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Todo {
    pub id: u64,
    pub title: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a new todo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodo {
    pub title: String,
}

/// Payload for updating an existing todo. Only the fields present are
/// applied; a `null` value counts as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl UpdateTodo {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none()
    }
}

/// Aggregate counts over the current contents of the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    /// Percentage of completed todos, `0.0` for an empty store.
    pub completion_rate: f64,
}

impl Stats {
    pub fn from_todos<'a>(todos: impl IntoIterator<Item = &'a Todo>) -> Self {
        let (total, completed) = todos.into_iter().fold((0, 0), |(total, done), todo| {
            (total + 1, done + usize::from(todo.completed))
        });
        let completion_rate = if total > 0 {
            completed as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            completed,
            pending: total - completed,
            completion_rate,
        }
    }
}
