use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

pub mod payload;

pub use payload::{ArticleChanges, ArticlePayload, FieldErrors, NewArticle, ValidationMode};

/// A blog article, as stored and as sent over the wire
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Article {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub is_published: bool,
}

/// Publication counts over the whole article set
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct ArticleStats {
    pub total: i64,
    pub published: i64,
    pub drafts: i64,
}

/// Query string of the article listing
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ListParameters {
    /// Case-insensitive substring of the author
    pub author: Option<String>,
    pub is_published: Option<bool>,
}
