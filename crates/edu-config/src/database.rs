//! Database connection configuration.
//!
//! A remote libSQL server is used when both `url` and `auth_token` are set;
//! otherwise the store is a local file at `path` (`:memory:` is accepted).

use serde::{Deserialize, Serialize};

fn default_path() -> String {
    "edushare.db".to_string()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Remote database URL (e.g., `libsql://edushare.turso.io`).
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub auth_token: String,

    /// Local database file.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            auth_token: String::new(),
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Check if the remote connection has the minimum required fields.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty() && !self.auth_token.is_empty()
    }
}
