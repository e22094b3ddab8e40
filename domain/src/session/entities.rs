//! Session domain entities

use crate::core::document::DocumentId;
use chrono::{DateTime, Utc};

/// An upstream conversation bound to a single source document (Entity)
///
/// Immutable once created. Two sessions are the same session when every
/// field matches, which in practice means the upstream handed out the same
/// identifier at the same creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    id: String,
    document_id: DocumentId,
    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(id: impl Into<String>, document_id: DocumentId) -> Self {
        Self {
            id: id.into(),
            document_id,
            created_at: Utc::now(),
        }
    }

    /// The opaque upstream conversation identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn document_id(&self) -> &DocumentId {
        &self.document_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns true if this session answers questions about `document_id`.
    pub fn is_bound_to(&self, document_id: &DocumentId) -> bool {
        &self.document_id == document_id
    }
}
