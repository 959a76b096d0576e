//! A small CRUD service for blog posts, served over HTTP with axum and kept
//! in a process-local store.
//!
//! ```text
//! POST   /posts            create
//! GET    /posts?term=...   list, optionally filtered
//! GET    /posts/{id}       fetch one
//! PUT    /posts/{id}       replace title, content, category and tags
//! DELETE /posts/{id}       remove
//! GET    /health           liveness
//! ```

use std::sync::Arc;

pub mod config;
pub mod db;
pub mod error;
pub mod handler;
pub mod model;
pub mod route;
pub mod schema;

pub use db::{MemoryStore, PostStore};
pub use route::create_router;

pub struct AppState {
    pub db: Arc<dyn PostStore>,
}
