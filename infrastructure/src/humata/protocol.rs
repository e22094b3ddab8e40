//! Wire types for the Humata HTTP API.
//!
//! - `POST /conversations` with [`CreateConversationRequest`]
//! - `POST /ask` with [`AskPayload`]
//!
//! Responses are read as raw JSON (`serde_json::Value`) because the
//! upstream schema has drifted between versions; interpretation happens in
//! the application layer.

use relay_application::AskRequest;
use serde::Serialize;

/// Answer approach requested when answers must stay within the document.
pub const GROUNDED_APPROACH: &str = "Grounded";

/// Content type of streamed answers.
pub const EVENT_STREAM: &str = "text/event-stream";

/// Prefix of each record line in a streamed answer.
pub const DATA_PREFIX: &str = "data:";

/// Body of `POST /conversations`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConversationRequest {
    pub document_ids: Vec<String>,
}

/// Body of `POST /ask`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AskPayload<'a> {
    pub conversation_id: &'a str,
    pub question: &'a str,
    pub model: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_answer_approach: Option<&'static str>,
}

impl<'a> From<&'a AskRequest> for AskPayload<'a> {
    fn from(request: &'a AskRequest) -> Self {
        Self {
            conversation_id: &request.session_id,
            question: &request.question,
            model: &request.model,
            selected_answer_approach: request.grounded.then_some(GROUNDED_APPROACH),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(grounded: bool) -> AskRequest {
        AskRequest {
            session_id: "conv-1".to_string(),
            question: "Who can donate?".to_string(),
            model: "gpt-4-turbo-preview".to_string(),
            grounded,
            stream: true,
        }
    }

    #[test]
    fn test_create_conversation_uses_camel_case() {
        let body = CreateConversationRequest {
            document_ids: vec!["doc-1".to_string()],
        };
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({"documentIds": ["doc-1"]})
        );
    }

    #[test]
    fn test_grounded_ask_selects_approach() {
        let request = request(true);
        assert_eq!(
            serde_json::to_value(AskPayload::from(&request)).unwrap(),
            json!({
                "conversationId": "conv-1",
                "question": "Who can donate?",
                "model": "gpt-4-turbo-preview",
                "selectedAnswerApproach": "Grounded"
            })
        );
    }

    #[test]
    fn test_ungrounded_ask_omits_approach() {
        let request = request(false);
        let value = serde_json::to_value(AskPayload::from(&request)).unwrap();
        assert!(value.get("selectedAnswerApproach").is_none());
    }
}
