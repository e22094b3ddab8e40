//! Upstream configuration from TOML (`[upstream]` section)

use crate::humata::gateway::DEFAULT_BASE_URL;
use relay_application::{AskParams, DEFAULT_MODEL};
use relay_domain::{DEFAULT_SESSION_ID_FIELDS, DocumentId, SessionIdFields};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// A setting needed to reach the upstream is missing.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveConfigError {
    #[error("{setting} is not configured: set the {env} environment variable or upstream.{key}")]
    Missing {
        setting: &'static str,
        env: String,
        key: &'static str,
    },

    #[error("{setting} is invalid: {reason}")]
    Invalid {
        setting: &'static str,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileUpstreamConfig {
    /// API root (default: "https://app.humata.ai/api/v1").
    pub base_url: String,
    /// Environment variable holding the API key (default: "HUMATA_API_KEY").
    pub api_key_env: String,
    /// Direct API key. The environment variable wins when both are set.
    pub api_key: Option<String>,
    /// Environment variable holding the document id (default: "HUMATA_DOCUMENT_ID").
    pub document_id_env: String,
    /// Direct document id.
    pub document_id: Option<String>,
    pub model: String,
    /// Ask for answers grounded strictly in the document.
    pub grounded: bool,
    /// Prefer event-stream answers.
    pub stream: bool,
    pub timeout_seconds: u64,
    /// Pause after creating a conversation before its first question (0 = none).
    pub settle_delay_ms: u64,
    /// Response fields that may carry the conversation handle, in order.
    pub id_fields: Vec<String>,
}

impl Default for FileUpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key_env: "HUMATA_API_KEY".to_string(),
            api_key: None,
            document_id_env: "HUMATA_DOCUMENT_ID".to_string(),
            document_id: None,
            model: DEFAULT_MODEL.to_string(),
            grounded: true,
            stream: true,
            timeout_seconds: 60,
            settle_delay_ms: 0,
            id_fields: DEFAULT_SESSION_ID_FIELDS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl FileUpstreamConfig {
    /// Resolve the API key, looking up environment variables with `env`.
    pub fn resolve_api_key(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<String, ResolveConfigError> {
        pick(env(&self.api_key_env), self.api_key.as_deref()).ok_or_else(|| {
            ResolveConfigError::Missing {
                setting: "API key",
                env: self.api_key_env.clone(),
                key: "api_key",
            }
        })
    }

    /// Resolve the document id, looking up environment variables with `env`.
    pub fn resolve_document_id(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<DocumentId, ResolveConfigError> {
        let raw = pick(env(&self.document_id_env), self.document_id.as_deref()).ok_or_else(
            || ResolveConfigError::Missing {
                setting: "document id",
                env: self.document_id_env.clone(),
                key: "document_id",
            },
        )?;
        DocumentId::parse(&raw).map_err(|e| ResolveConfigError::Invalid {
            setting: "document id",
            reason: e.to_string(),
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_seconds > 0).then(|| Duration::from_secs(self.timeout_seconds))
    }

    pub fn session_id_fields(&self) -> SessionIdFields {
        SessionIdFields::new(self.id_fields.iter().map(String::as_str))
    }

    /// Ask parameters for the use case, with `fallback` as the no-answer text.
    pub fn ask_params(&self, fallback: &str) -> AskParams {
        AskParams::default()
            .with_model(self.model.clone())
            .with_grounded(self.grounded)
            .with_stream(self.stream)
            .with_fallback_answer(fallback)
            .with_settle_delay(Some(Duration::from_millis(self.settle_delay_ms)))
    }
}

fn pick(from_env: Option<String>, direct: Option<&str>) -> Option<String> {
    from_env
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .or_else(|| {
            direct
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        })
}
