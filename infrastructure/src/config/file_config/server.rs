//! HTTP server configuration from TOML (`[server]` section)

use serde::{Deserialize, Serialize};

/// Greeting served on `GET /`.
pub const DEFAULT_WELCOME_MESSAGE: &str = "The document Q&A relay is running.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileServerConfig {
    pub host: String,
    pub port: u16,
    /// Origins allowed by CORS. `"*"` allows any origin.
    pub allowed_origins: Vec<String>,
    pub welcome_message: String,
}

impl Default for FileServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            allowed_origins: vec!["https://nelefrenn.github.io".to_string()],
            welcome_message: DEFAULT_WELCOME_MESSAGE.to_string(),
        }
    }
}

impl FileServerConfig {
    /// `host:port` as given in the config.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
