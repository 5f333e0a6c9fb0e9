//! The in-memory todo collection and its id allocator.
//!
//! # Design
//! Records live in a `BTreeMap` keyed by id. Ids come from a counter that
//! only increases, so key order is also insertion order and `list` needs no
//! extra bookkeeping. The store takes `&mut self` for mutations and leaves
//! synchronization to its owner.

use std::collections::BTreeMap;

use chrono::Utc;

use crate::error::TodoError;
use crate::types::{CreateTodo, Stats, Todo, UpdateTodo};

const SEED_TITLES: [&str; 2] = ["Learn GitHub Actions", "Build CI/CD pipeline"];

#[derive(Debug, Clone)]
pub struct TodoStore {
    todos: BTreeMap<u64, Todo>,
    next_id: u64,
}

impl TodoStore {
    /// An empty store whose first id will be 1.
    pub fn new() -> Self {
        Self {
            todos: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// A store holding the two default records (ids 1 and 2); the next id is 3.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        for title in SEED_TITLES {
            store.insert_new(title.to_string());
        }
        store
    }

    pub fn list(&self) -> Vec<Todo> {
        self.todos.values().cloned().collect()
    }

    pub fn get(&self, id: u64) -> Result<Todo, TodoError> {
        self.todos.get(&id).cloned().ok_or(TodoError::NotFound(id))
    }

    pub fn contains(&self, id: u64) -> bool {
        self.todos.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn create(&mut self, input: CreateTodo) -> Result<Todo, TodoError> {
        validate_title(&input.title)?;
        Ok(self.insert_new(input.title))
    }

    /// Applies the fields present in `input`. Validation happens before any
    /// field is written, so a rejected update leaves the record untouched.
    pub fn update(&mut self, id: u64, input: UpdateTodo) -> Result<Todo, TodoError> {
        let todo = self.todos.get_mut(&id).ok_or(TodoError::NotFound(id))?;
        if let Some(title) = &input.title {
            validate_title(title)?;
        }
        if let Some(title) = input.title {
            todo.title = title;
        }
        if let Some(completed) = input.completed {
            todo.completed = completed;
        }
        Ok(todo.clone())
    }

    pub fn delete(&mut self, id: u64) -> Result<Todo, TodoError> {
        self.todos.remove(&id).ok_or(TodoError::NotFound(id))
    }

    /// Computed on every call.
    pub fn stats(&self) -> Stats {
        Stats::from_todos(self.todos.values())
    }

    fn insert_new(&mut self, title: String) -> Todo {
        let todo = Todo {
            id: self.next_id,
            title,
            completed: false,
            created_at: Utc::now(),
        };
        self.todos.insert(todo.id, todo.clone());
        self.next_id += 1;
        todo
    }
}

impl Default for TodoStore {
    fn default() -> Self {
        Self::new()
    }
}

fn validate_title(title: &str) -> Result<(), TodoError> {
    if title.trim().is_empty() {
        return Err(TodoError::Validation("Title is required".to_string()));
    }
    Ok(())
}
