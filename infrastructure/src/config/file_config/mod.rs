//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod answer;
mod logging;
mod server;
mod upstream;

pub use answer::FileAnswerConfig;
pub use logging::FileLoggingConfig;
pub use server::{DEFAULT_WELCOME_MESSAGE, FileServerConfig};
pub use upstream::{FileUpstreamConfig, ResolveConfigError};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Problems found by [`FileConfig::validate`]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("upstream.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("upstream.model cannot be empty")]
    EmptyModelName,

    #[error("upstream.base_url cannot be empty")]
    EmptyBaseUrl,

    #[error("upstream.id_fields must name at least one field")]
    EmptyIdFields,

    #[error("server.port cannot be 0")]
    InvalidPort,

    #[error("answer.fallback cannot be empty")]
    EmptyFallback,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub upstream: FileUpstreamConfig,
    pub server: FileServerConfig,
    pub answer: FileAnswerConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration, returning every problem found.
    ///
    /// Missing credentials are not reported here; they surface on the first
    /// question so the server can still start.
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut issues = Vec::new();

        if self.upstream.timeout_seconds == 0 {
            issues.push(ConfigValidationError::InvalidTimeout);
        }
        if self.upstream.model.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyModelName);
        }
        if self.upstream.base_url.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyBaseUrl);
        }
        if self.upstream.id_fields.iter().all(|f| f.trim().is_empty()) {
            issues.push(ConfigValidationError::EmptyIdFields);
        }
        if self.server.port == 0 {
            issues.push(ConfigValidationError::InvalidPort);
        }
        if self.answer.fallback.trim().is_empty() {
            issues.push(ConfigValidationError::EmptyFallback);
        }

        issues
    }

    /// Copy with secrets replaced, for `--show-config`.
    pub fn redacted(&self) -> Self {
        let mut config = self.clone();
        if config.upstream.api_key.is_some() {
            config.upstream.api_key = Some("***".to_string());
        }
        config
    }
}
