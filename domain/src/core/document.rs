//! Document identifier value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// Identifier of the upstream source document a conversation is bound to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
    pub fn parse(id: impl AsRef<str>) -> Result<Self, DomainError> {
        let id = id.as_ref().trim();
        if id.is_empty() {
            return Err(DomainError::EmptyDocumentId);
        }
        Ok(Self(id.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
