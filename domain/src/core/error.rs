//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Question cannot be empty")]
    EmptyQuestion,

    #[error("Document id cannot be empty")]
    EmptyDocumentId,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(DomainError::EmptyQuestion.to_string(), "Question cannot be empty");
        assert_eq!(
            DomainError::EmptyDocumentId.to_string(),
            "Document id cannot be empty"
        );
    }
}
