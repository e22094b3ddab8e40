//! Upstream schema tolerance for the conversation identifier.
//!
//! The create-conversation endpoint has returned the new handle under
//! different field names across API versions. [`SessionIdFields`] is the
//! ordered list of names we accept; the first one present wins.

use serde_json::Value;

/// Field names tried, in order, when no explicit list is configured.
pub const DEFAULT_SESSION_ID_FIELDS: &[&str] = &["id", "conversationId"];

/// Ordered list of accepted identifier field names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionIdFields {
    names: Vec<String>,
}

impl Default for SessionIdFields {
    fn default() -> Self {
        Self::new(DEFAULT_SESSION_ID_FIELDS.iter().copied())
    }
}

impl SessionIdFields {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Extract the identifier from a create-conversation response body.
    ///
    /// String values must be non-blank. Numeric identifiers are accepted and
    /// rendered in decimal. Returns `None` when no accepted field holds a
    /// usable value.
    pub fn extract(&self, body: &Value) -> Option<String> {
        self.names.iter().find_map(|name| match body.get(name)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }
}
