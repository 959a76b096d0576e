//! Post storage.
//!
//! [`PostStore`] is the contract the handlers program against. The only
//! backend today is [`MemoryStore`], which keeps everything in RAM behind a
//! [`RwLock`]; data is lost when the process exits.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use chrono::prelude::*;
use thiserror::Error;

use crate::model::{Post, PostDraft};

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("post with id {0} not found")]
    NotFound(u64),

    /// The backend failed in a way the caller cannot fix.
    #[error("store failure: {0}")]
    Internal(String),
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(_: PoisonError<T>) -> Self {
        StoreError::Internal("post collection lock poisoned".to_owned())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[async_trait]
pub trait PostStore: Send + Sync {
    /// Store a new post and return its assigned id.
    async fn create(&self, draft: PostDraft) -> Result<u64>;

    async fn get(&self, id: u64) -> Result<Post>;

    /// Posts whose title, content or category contain `term`, ignoring case.
    /// An empty term matches everything. Order is unspecified.
    async fn list(&self, term: &str) -> Result<Vec<Post>>;

    /// Replace the caller-editable fields of an existing post.
    async fn update(&self, id: u64, draft: PostDraft) -> Result<Post>;

    async fn delete(&self, id: u64) -> Result<()>;
}

struct Inner {
    posts: HashMap<u64, Post>,
    next_id: u64,
}

/// Thread-safe, in-memory implementation of [`PostStore`].
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Inner {
                posts: HashMap::new(),
                next_id: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn create(&self, draft: PostDraft) -> Result<u64> {
        let mut inner = self.inner.write()?;

        let id = inner.next_id;
        inner.next_id += 1;
        inner.posts.insert(id, Post::from_draft(id, draft, Utc::now()));

        Ok(id)
    }

    async fn get(&self, id: u64) -> Result<Post> {
        let inner = self.inner.read()?;
        inner.posts.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn list(&self, term: &str) -> Result<Vec<Post>> {
        let needle = term.to_lowercase();
        let inner = self.inner.read()?;

        Ok(inner
            .posts
            .values()
            .filter(|post| post.matches(&needle))
            .cloned()
            .collect())
    }

    async fn update(&self, id: u64, draft: PostDraft) -> Result<Post> {
        let mut inner = self.inner.write()?;
        let post = inner.posts.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        post.title = draft.title;
        post.content = draft.content;
        post.category = draft.category;
        post.tags = draft.tags;
        // The wall clock may step backwards; updatedAt must not.
        post.updated_at = Utc::now().max(post.updated_at);

        Ok(post.clone())
    }

    async fn delete(&self, id: u64) -> Result<()> {
        let mut inner = self.inner.write()?;
        match inner.posts.remove(&id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound(id)),
        }
    }
}
