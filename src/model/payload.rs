//! Incoming article payloads and their validation.
//!
//! Payload fields are all optional at the wire level so that a missing field can be
//! reported as such instead of failing the whole deserialization. A field sent as
//! `null` is told apart from a missing one.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use validator::{Validate, ValidationErrors};

use crate::model::Article;

const REQUIRED: &str = "This field is required.";
const NULL: &str = "This field may not be null.";
const BLANK: &str = "This field may not be blank.";

/// Body of a create or update request.
///
/// The outer `Option` is `None` when the field is missing, the inner one when it is `null`.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct ArticlePayload {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub author: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub is_published: Option<Option<bool>>,
}

/// Only called for fields that appear in the body
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Whether the text fields must all be present
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Create and PUT
    Full,
    /// PATCH
    Partial,
}

/// Validation failures, keyed by field name
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

/// A checked payload; absent fields are left untouched on update
#[derive(Debug, Default, Clone, PartialEq, Eq, Validate)]
pub struct ArticleChanges {
    #[validate(length(max = 200, message = "Ensure this field has no more than 200 characters."))]
    pub title: Option<String>,
    pub content: Option<String>,
    #[validate(length(max = 100, message = "Ensure this field has no more than 100 characters."))]
    pub author: Option<String>,
    pub is_published: Option<bool>,
}

/// Everything needed to insert an article
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewArticle {
    pub title: String,
    pub content: String,
    pub author: String,
    pub is_published: bool,
}

impl ArticlePayload {
    /// Trim the text fields, then check them against the article constraints.
    pub fn validate_for(self, mode: ValidationMode) -> Result<ArticleChanges, FieldErrors> {
        let mut errors = FieldErrors::default();

        let changes = ArticleChanges {
            title: text_field("title", self.title, mode, &mut errors),
            content: text_field("content", self.content, mode, &mut errors),
            author: text_field("author", self.author, mode, &mut errors),
            is_published: match self.is_published {
                Some(None) => {
                    errors.add("is_published", NULL);
                    None
                }
                value => value.flatten(),
            },
        };

        if let Err(length_errors) = changes.validate() {
            errors.merge(&length_errors);
        }

        if !errors.is_empty() {
            return Err(errors);
        }

        Ok(changes)
    }

    pub fn into_new_article(self) -> Result<NewArticle, FieldErrors> {
        self.validate_for(ValidationMode::Full)?.into_new_article()
    }
}

fn text_field(
    field: &str,
    value: Option<Option<String>>,
    mode: ValidationMode,
    errors: &mut FieldErrors,
) -> Option<String> {
    match value {
        None => {
            if mode == ValidationMode::Full {
                errors.add(field, REQUIRED);
            }
            None
        }
        Some(None) => {
            errors.add(field, NULL);
            None
        }
        Some(Some(value)) => {
            let value = value.trim().to_owned();
            if value.is_empty() {
                errors.add(field, BLANK);
            }
            Some(value)
        }
    }
}

impl ArticleChanges {
    pub fn into_new_article(self) -> Result<NewArticle, FieldErrors> {
        match (self.title, self.content, self.author) {
            (Some(title), Some(content), Some(author)) => Ok(NewArticle {
                title,
                content,
                author,
                is_published: self.is_published.unwrap_or(false),
            }),
            (title, content, author) => {
                let mut errors = FieldErrors::default();
                for (field, missing) in [
                    ("title", title.is_none()),
                    ("content", content.is_none()),
                    ("author", author.is_none()),
                ] {
                    if missing {
                        errors.add(field, REQUIRED);
                    }
                }
                Err(errors)
            }
        }
    }

    /// Overwrite the fields of `article` present in these changes
    pub fn apply(self, article: &mut Article) {
        if let Some(title) = self.title {
            article.title = title;
        }
        if let Some(content) = self.content {
            article.content = content;
        }
        if let Some(author) = self.author {
            article.author = author;
        }
        if let Some(is_published) = self.is_published {
            article.is_published = is_published;
        }
    }
}

impl FieldErrors {
    pub fn add(&mut self, field: &str, message: &str) {
        self.0
            .entry(field.to_owned())
            .or_default()
            .push(message.to_owned());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&Vec<String>> {
        self.0.get(field)
    }

    fn merge(&mut self, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors.iter() {
                let message = error
                    .message
                    .as_ref()
                    .map(|x| x.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                self.add(&field.to_string(), &message);
            }
        }
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields = self.0.keys().cloned().collect::<Vec<_>>();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}
