//! Control-character filtering for text payloads.
//!
//! Output documents (XML-based ones in particular) reject most C0 control
//! characters. Every literal payload that ends up in a run goes through
//! [`strip_control_chars`] right before the run is built.

use std::borrow::Cow;

/// Returns true for the characters removed from text payloads:
/// `0x00-0x08`, `0x0B`, `0x0C`, `0x0E-0x1F` and `0x7F`.
/// Tab, line feed and carriage return are kept.
pub fn is_forbidden_control(c: char) -> bool {
    matches!(c, '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}')
}

/// Remove forbidden control characters, borrowing when nothing changes.
pub fn strip_control_chars(text: &str) -> Cow<'_, str> {
    if text.chars().any(is_forbidden_control) {
        Cow::Owned(text.chars().filter(|c| !is_forbidden_control(*c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_tab_newline_and_carriage_return() {
        let text = "a\tb\nc\rd";
        assert!(matches!(strip_control_chars(text), Cow::Borrowed(_)));
        assert_eq!(strip_control_chars(text), text);
    }

    #[test]
    fn removes_forbidden_bytes() {
        let text = "x\u{00}\u{07}\u{0B}\u{0C}\u{1B}[0m\u{7F}y";
        assert_eq!(strip_control_chars(text), "x[0my");
    }

    #[test]
    fn leaves_non_ascii_alone() {
        assert_eq!(strip_control_chars("α ≤ β ⟦"), "α ≤ β ⟦");
    }
}
