//! HTTP front end for the in-memory todo store.
//!
//! # Routes
//! - `GET /` HTML listing
//! - `GET /health`
//! - `GET|POST /api/todos`
//! - `GET /api/todos/stats`
//! - `GET|PUT|DELETE /api/todos/{id}`
//!
//! Unmatched paths answer 404 and unrouted methods 405, both with a JSON
//! `{"error": ...}` body. A panicking handler answers 500.

use std::{future::Future, sync::Arc};

use axum::{routing::get, Router};
use tokio::{net::TcpListener, sync::RwLock};
use todo_core::TodoStore;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

pub mod config;
pub mod error;
pub mod handlers;
pub mod page;

pub use handlers::Db;

use handlers::{
    create_todo, delete_todo, get_todo, health, index, list_todos, method_not_allowed,
    route_not_found, todo_stats, update_todo,
};

/// Router over a freshly seeded store.
pub fn app() -> Router {
    app_with_store(TodoStore::seeded())
}

pub fn app_with_store(store: TodoStore) -> Router {
    app_with_routes(routes(), store)
}

/// The service's routes and fallbacks, without state or middleware.
pub fn routes() -> Router<Db> {
    Router::new()
        .route("/", get(index))
        .route("/health", get(health))
        .route("/api/todos", get(list_todos).post(create_todo))
        .route("/api/todos/stats", get(todo_stats))
        .route(
            "/api/todos/{id}",
            get(get_todo).put(update_todo).delete(delete_todo),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Attaches `store` and the tracing and panic layers to `routes`.
pub fn app_with_routes(routes: Router<Db>, store: TodoStore) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    routes
        .with_state(db)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::panic_response))
}

/// Serves `store` on `listener` until `shutdown` resolves.
pub async fn run<F>(listener: TcpListener, store: TodoStore, shutdown: F) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    axum::serve(listener, app_with_store(store))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Resolves on Ctrl-C, or SIGTERM on unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
