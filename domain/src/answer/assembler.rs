//! Reassembly of streamed answer fragments.
//!
//! The upstream streams an answer as a sequence of `data:` records whose
//! `content` is a short chunk of text. Chunks regularly split words
//! (`"T"`, `"he"`, `" quick"`), so the assembler keeps a single-slot
//! pending buffer:
//!
//! ```text
//! content ──► merge with pending ──► len <= 3 && no leading space? ──yes──► pending
//!                                                 │
//!                                                 no
//!                                                 ▼
//!                                          output segment
//! ```
//!
//! At end of stream the pending chunk is flushed, segments are joined with a
//! single space and [`fix_spacing`](super::spacing::fix_spacing) cleans up
//! punctuation. The rule is a heuristic: a genuinely short word such as
//! `"a"` is buffered and glued to whatever follows it.
//!
//! # Examples
//!
//! ```
//! use relay_domain::answer::assembler::AnswerAssembler;
//!
//! let text = AnswerAssembler::new("nothing found").assemble_contents(["T", "he", " quick"]);
//! assert_eq!(text, "The quick");
//! ```

use super::fragment::{ParsedLine, parse_line};
use super::result::DEFAULT_FALLBACK_ANSWER;
use super::spacing::fix_spacing;
use tracing::{debug, warn};

/// Fragments of at most this many characters are held back.
pub const SHORT_FRAGMENT_MAX_CHARS: usize = 3;

/// Counters describing one assembly, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssemblyStats {
    /// Lines that carried a record (including empty content).
    pub fragments: usize,
    /// Lines that could not be parsed and were skipped.
    pub malformed: usize,
}

/// Incremental reassembly of one streamed answer.
///
/// Feed raw lines with [`push_line`](Self::push_line) (or already-extracted
/// text with [`push_content`](Self::push_content)) and call
/// [`finish`](Self::finish) when the stream closes. Dropping the assembler
/// before `finish` discards any partial state.
#[derive(Debug, Clone)]
pub struct AnswerAssembler {
    fallback: String,
    segments: Vec<String>,
    pending: Option<String>,
    stats: AssemblyStats,
}

impl Default for AnswerAssembler {
    fn default() -> Self {
        Self::new(DEFAULT_FALLBACK_ANSWER)
    }
}

impl AnswerAssembler {
    pub fn new(fallback: impl Into<String>) -> Self {
        Self {
            fallback: fallback.into(),
            segments: Vec::new(),
            pending: None,
            stats: AssemblyStats::default(),
        }
    }

    pub fn stats(&self) -> AssemblyStats {
        self.stats
    }

    /// Consume one raw event-stream line.
    ///
    /// A line that fails to parse is logged and skipped; it never aborts
    /// the assembly.
    pub fn push_line(&mut self, line: &str) {
        match parse_line(line) {
            Ok(ParsedLine::Skip) => {}
            Ok(ParsedLine::Content(content)) => {
                self.stats.fragments += 1;
                self.push_content(&content);
            }
            Err(e) => {
                self.stats.malformed += 1;
                warn!("Skipping malformed stream fragment: {} (raw: {})", e.reason, e.raw);
            }
        }
    }

    /// Apply the word-join rule to one fragment's text.
    pub fn push_content(&mut self, content: &str) {
        let merged = match self.pending.take() {
            Some(mut pending) => {
                pending.push_str(content);
                pending
            }
            None => content.to_string(),
        };

        if is_short_fragment(&merged) {
            self.pending = Some(merged);
        } else {
            self.segments.push(merged);
        }
    }

    /// Flush the pending buffer and produce the cleaned answer.
    ///
    /// Returns the fallback text when nothing usable was received.
    pub fn finish(mut self) -> String {
        if let Some(pending) = self.pending.take()
            && !pending.is_empty()
        {
            self.segments.push(pending);
        }

        debug!(
            "Assembling {} segments from {} fragments ({} malformed)",
            self.segments.len(),
            self.stats.fragments,
            self.stats.malformed
        );

        let text = fix_spacing(&self.segments.join(" "));
        if text.is_empty() { self.fallback } else { text }
    }

    /// Assemble a complete sequence of raw lines.
    pub fn assemble<I, S>(mut self, lines: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for line in lines {
            self.push_line(line.as_ref());
        }
        self.finish()
    }

    /// Assemble a complete sequence of already-extracted fragment texts.
    pub fn assemble_contents<I, S>(mut self, contents: I) -> String
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for content in contents {
            self.push_content(content.as_ref());
        }
        self.finish()
    }
}

fn is_short_fragment(text: &str) -> bool {
    text.chars().count() <= SHORT_FRAGMENT_MAX_CHARS && !text.starts_with(char::is_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    const FALLBACK: &str = "No answer found.";

    fn data(content: &str) -> String {
        format!("data: {}", serde_json::json!({ "content": content }))
    }

    fn assemble(contents: &[&str]) -> String {
        let lines: Vec<String> = contents.iter().map(|c| data(c)).collect();
        AnswerAssembler::new(FALLBACK).assemble(lines)
    }

    #[test]
    fn test_short_fragments_merge_before_emission() {
        assert_eq!(assemble(&["T", "he", " quick"]), "The quick");
    }

    #[test]
    fn test_punctuation_spacing_is_corrected() {
        assert_eq!(assemble(&["Hello", " ,", " world", " ."]), "Hello, world.");
    }

    #[test]
    fn test_empty_stream_returns_fallback() {
        let empty: [&str; 0] = [];
        assert_eq!(AnswerAssembler::new(FALLBACK).assemble(empty), FALLBACK);
    }

    #[test]
    fn test_whitespace_only_stream_returns_fallback() {
        assert_eq!(assemble(&["   ", "\t"]), FALLBACK);
    }

    #[test]
    fn test_default_uses_default_fallback() {
        let empty: [&str; 0] = [];
        assert_eq!(AnswerAssembler::default().assemble(empty), DEFAULT_FALLBACK_ANSWER);
    }

    #[test]
    fn test_pending_fragment_is_flushed_at_end() {
        assert_eq!(assemble(&["Stem cells", " are", "ok"]), "Stem cells are ok");
    }

    #[test]
    fn test_leading_space_fragment_is_never_buffered() {
        let mut assembler = AnswerAssembler::new(FALLBACK);
        assembler.push_content(" a");
        assert!(assembler.pending.is_none());
        assert_eq!(assembler.segments, vec![" a".to_string()]);
    }

    #[test]
    fn test_short_word_is_glued_to_next_fragment() {
        // Known ambiguity of the heuristic: "a" looks like a split word.
        assert_eq!(assemble(&["It is", "a", " cell"]), "It is a cell");
        assert_eq!(assemble(&["It is", "a", "cell"]), "It is acell");
    }

    #[test]
    fn test_three_chars_still_count_as_short() {
        let mut assembler = AnswerAssembler::new(FALLBACK);
        assembler.push_content("abc");
        assert_eq!(assembler.pending.as_deref(), Some("abc"));
        assembler.push_content("d");
        assert_eq!(assembler.pending, None);
        assert_eq!(assembler.segments, vec!["abcd".to_string()]);
    }

    #[test]
    fn test_multibyte_characters_count_once() {
        let mut assembler = AnswerAssembler::new(FALLBACK);
        assembler.push_content("día");
        assert_eq!(assembler.pending.as_deref(), Some("día"));
    }

    #[test]
    fn test_malformed_line_does_not_abort_assembly() {
        let lines = vec![
            data("Bone marrow"),
            data(" donors"),
            "data: {\"content\": \"broken".to_string(),
            data(" are"),
            data(" screened."),
        ];
        let mut assembler = AnswerAssembler::new(FALLBACK);
        for line in &lines {
            assembler.push_line(line);
        }
        assert_eq!(
            assembler.stats(),
            AssemblyStats {
                fragments: 4,
                malformed: 1
            }
        );
        assert_eq!(assembler.finish(), "Bone marrow donors are screened.");
    }

    #[test]
    fn test_framing_lines_are_ignored() {
        let lines = vec![
            "event: message".to_string(),
            data("Cord blood"),
            String::new(),
            data(" banks"),
            "data: [DONE]".to_string(),
        ];
        assert_eq!(AnswerAssembler::new(FALLBACK).assemble(lines), "Cord blood banks");
    }

    #[test]
    fn test_output_is_stable_when_fed_back() {
        let first = assemble(&["T", "he", " donor", " ( adult )", " ,", " is", " screened", " ."]);
        let second = AnswerAssembler::new(FALLBACK).assemble([data(&first)]);
        assert_eq!(second, first);
    }
}
