use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// A blog post. Counters only ever go up.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub author: Option<String>,
    pub category: Option<String>,
    pub views: i64,
    pub likes: i64,
    pub dislikes: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Body of `POST /createPost`.
///
/// `title` and `content` default to empty so a missing field is reported as
/// an invalid request rather than a deserialization failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct NewPost {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

impl NewPost {
    /// # Errors
    ///
    /// Returns `CoreError::InvalidRequest` if title or content is blank.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() || self.content.trim().is_empty() {
            return Err(CoreError::InvalidRequest(
                "Title and content are required".to_string(),
            ));
        }
        Ok(())
    }
}
