use serde::Deserialize;

use crate::model::PostDraft;

#[derive(Debug)]
pub struct FilterOptions {
    pub term: Option<String>,
}

impl FilterOptions {
    /// Build from decoded query pairs. A repeated `term` keeps its first value.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let term = pairs
            .into_iter()
            .find(|(key, _)| key == "term")
            .map(|(_, value)| value);

        Self { term }
    }
}

/// Request body for `POST /posts` and `PUT /posts/{id}`.
///
/// Every field is optional at decode time so that a missing `title` or
/// `content` surfaces as a validation error rather than a decode error.
/// Any `id` or timestamp fields sent by the client are ignored.
#[derive(Deserialize, Debug)]
pub struct PostSchema {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl PostSchema {
    /// Names of the required fields that are missing or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.as_deref().unwrap_or_default().is_empty() {
            missing.push("title");
        }
        if self.content.as_deref().unwrap_or_default().is_empty() {
            missing.push("content");
        }
        missing
    }

    pub fn into_draft(self) -> PostDraft {
        PostDraft {
            title: self.title.unwrap_or_default(),
            content: self.content.unwrap_or_default(),
            category: self.category.unwrap_or_default(),
            tags: self.tags.unwrap_or_default(),
        }
    }
}
