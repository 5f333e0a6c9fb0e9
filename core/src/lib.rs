//! In-memory todo store for the todo service.
//!
//! # Overview
//! Holds every todo record plus the id counter, and computes aggregate
//! statistics over them. The crate is synchronous and does no I/O; the
//! server crate wraps a `TodoStore` in a lock and exposes it over HTTP.
//!
//! # Design
//! - Ids are allocated from a counter that only moves forward, so an id is
//!   never handed out twice, even after the record is deleted.
//! - Every fallible operation returns `Result<_, TodoError>`; mapping errors
//!   to status codes is the caller's job.

pub mod error;
pub mod store;
pub mod types;

pub use error::TodoError;
pub use store::TodoStore;
pub use types::{CreateTodo, Stats, Todo, UpdateTodo};
