//! JSON response envelope returned by every HTTP route.
//!
//! ```json
//! { "success": true, "message": "Post fetched", "data": { ... } }
//! { "success": false, "message": "Post not found", "error": "post not found: pst-00000000" }
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }
}

impl ApiResponse<()> {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: None,
            error: None,
        }
    }

    pub fn failure(message: impl Into<String>, error: Option<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
            error,
        }
    }
}
