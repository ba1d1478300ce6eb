//! HTTP listener configuration.

use serde::{Deserialize, Serialize};

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    9000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Interface to bind.
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origin allowed by CORS (e.g. `http://localhost:5173`). Empty allows any origin.
    #[serde(default)]
    pub allowed_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_origin: String::new(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string for binding.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn restricts_origin(&self) -> bool {
        !self.allowed_origin.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = ServerConfig::default();
        assert_eq!(config.address(), "0.0.0.0:9000");
        assert!(!config.restricts_origin());
    }
}
