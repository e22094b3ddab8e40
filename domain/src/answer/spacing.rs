//! Punctuation-spacing corrections for reassembled answers.
//!
//! Joining fragments with a single space leaves stray blanks around
//! punctuation (`"Hello , world ."`). [`fix_spacing`] applies a fixed set of
//! corrections:
//!
//! - runs of spaces or tabs collapse to one space
//! - no blank before `,` `.` `:` `;` `)`
//! - no blank after `(`
//! - leading and trailing whitespace is trimmed
//!
//! Line breaks are left alone so paragraph structure survives.

const NO_SPACE_BEFORE: &[char] = &[',', '.', ':', ';', ')'];

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Apply the punctuation-spacing corrections. Idempotent.
pub fn fix_spacing(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut after_open_paren = false;

    for c in text.chars() {
        if is_blank(c) {
            if after_open_paren || out.ends_with(is_blank) {
                continue;
            }
            out.push(' ');
            continue;
        }

        if NO_SPACE_BEFORE.contains(&c) {
            while out.ends_with(is_blank) {
                out.pop();
            }
        }

        out.push(c);
        after_open_paren = c == '(';
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_removes_space_before_punctuation() {
        assert_eq!(fix_spacing("Hello  , world  ."), "Hello, world.");
        assert_eq!(fix_spacing("Note : a ; b"), "Note: a; b");
    }

    #[test]
    fn test_tightens_parentheses() {
        assert_eq!(fix_spacing("see ( the annex )"), "see (the annex)");
    }

    #[test]
    fn test_collapses_blank_runs_but_keeps_newlines() {
        assert_eq!(fix_spacing("one \t  two\n\nthree"), "one two\n\nthree");
    }

    #[test]
    fn test_trims_edges() {
        assert_eq!(fix_spacing("   done.  "), "done.");
        assert_eq!(fix_spacing("   "), "");
    }

    #[test]
    fn test_is_idempotent() {
        let once = fix_spacing("A ( b ) , c .  d ; e :f");
        assert_eq!(fix_spacing(&once), once);
    }
}
