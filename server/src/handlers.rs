//! Request handlers. Each one translates a request into a `TodoStore` call
//! and serializes the result as JSON.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use todo_core::{CreateTodo, Stats, Todo, TodoError, TodoStore, UpdateTodo};
use tracing::{debug, info};

use crate::error::ApiError;
use crate::page;

/// Shared store. Mutations hold the write lock, which also serializes id
/// allocation.
pub type Db = Arc<RwLock<TodoStore>>;

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub version: &'static str,
}

pub async fn health() -> Json<Health> {
    Json(Health {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

pub async fn index(State(db): State<Db>) -> Html<String> {
    let todos = db.read().await.list();
    Html(page::render_index(&todos))
}

pub async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let todos = db.read().await.list();
    debug!(count = todos.len(), "listed todos");
    Json(todos)
}

pub async fn todo_stats(State(db): State<Db>) -> Json<Stats> {
    Json(db.read().await.stats())
}

pub async fn create_todo(
    State(db): State<Db>,
    body: Result<Bytes, BytesRejection>,
) -> Result<(StatusCode, Json<Todo>), ApiError> {
    let input = parse_create(&body?)?;
    let todo = db.write().await.create(input)?;
    info!(id = todo.id, "created todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn get_todo(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(path)?;
    let todo = db.read().await.get(id)?;
    Ok(Json(todo))
}

pub async fn update_todo(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(path)?;
    let mut store = db.write().await;
    // An unknown id wins over a bad body.
    if !store.contains(id) {
        return Err(TodoError::NotFound(id).into());
    }
    let input = parse_update(&body?)?;
    let todo = store.update(id, input)?;
    info!(id, completed = todo.completed, "updated todo");
    Ok(Json(todo))
}

pub async fn delete_todo(
    State(db): State<Db>,
    path: Result<Path<String>, PathRejection>,
) -> Result<Json<Todo>, ApiError> {
    let id = todo_id(path)?;
    let todo = db.write().await.delete(id)?;
    info!(id, "deleted todo");
    Ok(Json(todo))
}

pub async fn route_not_found() -> ApiError {
    ApiError::RouteNotFound
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}

fn todo_id(path: Result<Path<String>, PathRejection>) -> Result<u64, ApiError> {
    let Path(raw) = path?;
    parse_id(&raw)
}

/// Only plain decimal digits address a todo; anything else is a route miss.
fn parse_id(raw: &str) -> Result<u64, ApiError> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ApiError::RouteNotFound);
    }
    raw.parse().map_err(|_| ApiError::RouteNotFound)
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn parse_json(body: &[u8]) -> Result<Value, ApiError> {
    serde_json::from_slice(body).map_err(|e| ApiError::Internal(format!("malformed JSON body: {e}")))
}

fn parse_create(body: &[u8]) -> Result<CreateTodo, ApiError> {
    let title_required = || ApiError::Validation("Title is required".to_string());
    if is_blank(body) {
        return Err(title_required());
    }
    match parse_json(body)?.get("title") {
        Some(Value::String(title)) => Ok(CreateTodo {
            title: title.clone(),
        }),
        _ => Err(title_required()),
    }
}

fn parse_update(body: &[u8]) -> Result<UpdateTodo, ApiError> {
    if is_blank(body) {
        return Ok(UpdateTodo::default());
    }
    let value = parse_json(body)?;
    if !value.is_object() {
        return Err(ApiError::Validation(
            "Request body must be a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| ApiError::Validation(format!("Invalid update: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_id_accepts_digits_only() {
        assert_eq!(parse_id("42").unwrap(), 42);
        assert_eq!(parse_id("0").unwrap(), 0);
        for raw in ["", "abc", "-1", "+1", "1.5", "99999999999999999999999"] {
            assert!(
                matches!(parse_id(raw), Err(ApiError::RouteNotFound)),
                "{raw:?} should not parse"
            );
        }
    }

    #[test]
    fn create_requires_string_title() {
        for body in ["", "  ", "{}", r#"{"title":7}"#, r#"{"title":null}"#, "[1,2]"] {
            assert!(
                matches!(parse_create(body.as_bytes()), Err(ApiError::Validation(_))),
                "{body:?} should be rejected"
            );
        }
        let input = parse_create(br#"{"title":"Test Task"}"#).unwrap();
        assert_eq!(input.title, "Test Task");
    }

    #[test]
    fn malformed_json_is_internal() {
        assert!(matches!(
            parse_create(b"{not json"),
            Err(ApiError::Internal(_))
        ));
        assert!(matches!(
            parse_update(b"{\"title\":"),
            Err(ApiError::Internal(_))
        ));
    }

    #[test]
    fn update_body_variants() {
        assert!(parse_update(b"").unwrap().is_empty());
        let input = parse_update(br#"{"completed":true}"#).unwrap();
        assert_eq!(input.completed, Some(true));
        assert!(input.title.is_none());
        assert!(matches!(
            parse_update(br#"{"completed":"yes"}"#),
            Err(ApiError::Validation(_))
        ));
        assert!(matches!(
            parse_update(b"[]"),
            Err(ApiError::Validation(_))
        ));
    }
}
