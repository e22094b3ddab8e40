//! Parsing of single event-stream lines.
//!
//! Each upstream line looks like `data: {"content": "..."}`. Other
//! event-stream fields (`event:`, `id:`, `retry:`) and `:` comments carry no
//! text and are ignored, as is the `[DONE]` sentinel some gateways append.

use serde_json::Value;
use thiserror::Error;

const DATA_PREFIX: &str = "data:";
const DONE_SENTINEL: &str = "[DONE]";
const NON_DATA_FIELDS: &[&str] = &["event:", "id:", "retry:"];

/// A line that looked like a record but could not be read.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("malformed fragment: {reason}")]
pub struct FragmentError {
    pub reason: String,
    pub raw: String,
}

/// What a single raw line contributes to the answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedLine {
    /// Framing, blank line or stream sentinel; contributes nothing.
    Skip,
    /// The `content` of a record. Empty when the record had none.
    Content(String),
}

/// Strip the event-stream framing prefix and surrounding whitespace.
pub fn strip_framing(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix(DATA_PREFIX).unwrap_or(line).trim()
}

/// Parse one raw line into the text it contributes.
///
/// A record without a string `content` field yields empty content rather
/// than an error; only text that is not JSON at all is a [`FragmentError`].
pub fn parse_line(line: &str) -> Result<ParsedLine, FragmentError> {
    let trimmed = line.trim();
    if trimmed.is_empty()
        || trimmed.starts_with(':')
        || NON_DATA_FIELDS.iter().any(|f| trimmed.starts_with(f))
    {
        return Ok(ParsedLine::Skip);
    }

    let payload = strip_framing(trimmed);
    if payload.is_empty() || payload == DONE_SENTINEL {
        return Ok(ParsedLine::Skip);
    }

    let record: Value = serde_json::from_str(payload).map_err(|e| FragmentError {
        reason: e.to_string(),
        raw: payload.to_string(),
    })?;

    let content = record
        .get("content")
        .and_then(Value::as_str)
        .unwrap_or_default();
    Ok(ParsedLine::Content(content.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_data_prefix() {
        assert_eq!(strip_framing("data: {\"a\":1}  "), "{\"a\":1}");
        assert_eq!(strip_framing("data:{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_framing("{\"a\":1}"), "{\"a\":1}");
    }

    #[test]
    fn test_reads_content_preserving_inner_spaces() {
        assert_eq!(
            parse_line(r#"data: {"content": " quick"}"#),
            Ok(ParsedLine::Content(" quick".to_string()))
        );
    }

    #[test]
    fn test_missing_or_non_string_content_is_empty() {
        assert_eq!(
            parse_line(r#"data: {"type": "ping"}"#),
            Ok(ParsedLine::Content(String::new()))
        );
        assert_eq!(
            parse_line(r#"data: {"content": 7}"#),
            Ok(ParsedLine::Content(String::new()))
        );
    }

    #[test]
    fn test_framing_lines_are_skipped() {
        assert_eq!(parse_line(""), Ok(ParsedLine::Skip));
        assert_eq!(parse_line("   "), Ok(ParsedLine::Skip));
        assert_eq!(parse_line("data: "), Ok(ParsedLine::Skip));
        assert_eq!(parse_line("event: message"), Ok(ParsedLine::Skip));
        assert_eq!(parse_line(": keep-alive"), Ok(ParsedLine::Skip));
        assert_eq!(parse_line("data: [DONE]"), Ok(ParsedLine::Skip));
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        let err = parse_line("data: {\"content\": \"unterminated").unwrap_err();
        assert_eq!(err.raw, "{\"content\": \"unterminated");
        assert!(err.to_string().starts_with("malformed fragment"));
    }
}
