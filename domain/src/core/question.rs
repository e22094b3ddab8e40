//! Question value object

use super::error::DomainError;
use serde::{Deserialize, Serialize};

/// A question to be asked against a document (Value Object)
///
/// Surrounding whitespace is trimmed; a question that is empty after
/// trimming is rejected before any upstream call is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    content: String,
}

impl Question {
    /// Try to create a new question
    pub fn parse(content: impl AsRef<str>) -> Result<Self, DomainError> {
        let content = content.as_ref().trim();
        if content.is_empty() {
            return Err(DomainError::EmptyQuestion);
        }
        Ok(Self {
            content: content.to_string(),
        })
    }

    /// Get the question content
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl std::fmt::Display for Question {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_trims_content() {
        let q = Question::parse("  What is a stem cell?  ").unwrap();
        assert_eq!(q.content(), "What is a stem cell?");
    }

    #[test]
    fn test_empty_question_rejected() {
        assert_eq!(Question::parse(""), Err(DomainError::EmptyQuestion));
        assert_eq!(Question::parse(" \n\t "), Err(DomainError::EmptyQuestion));
    }
}
