//! Shared utility functions.

/// Shorten `s` to at most `max_chars` characters for log lines, marking the
/// cut with an ellipsis.
pub fn preview(s: &str, max_chars: usize) -> String {
    match s.char_indices().nth(max_chars) {
        None => s.to_string(),
        Some((end, _)) => format!("{}...", &s[..end]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview_no_op_when_short() {
        assert_eq!(preview("hi", 10), "hi");
        assert_eq!(preview("", 10), "");
    }

    #[test]
    fn test_preview_cuts_on_char_boundary() {
        assert_eq!(preview("hello world", 5), "hello...");
        assert_eq!(preview("células madre", 4), "célu...");
    }
}
