//! Single-line editors for typed names and score edits.

/// What an editor accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorKind {
    /// Free text up to `max_len` characters.
    Text { max_len: usize },
    /// Optional leading `-` followed by digits.
    SignedNumber,
}

/// Digits allowed in a signed number (keeps the value inside `i32`).
const MAX_DIGITS: usize = 9;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEditor {
    buf: String,
    kind: EditorKind,
}

impl LineEditor {
    pub fn text(max_len: usize) -> Self {
        Self {
            buf: String::new(),
            kind: EditorKind::Text { max_len },
        }
    }

    pub fn signed_number() -> Self {
        Self {
            buf: String::new(),
            kind: EditorKind::SignedNumber,
        }
    }

    /// Editor prefilled with `value`; characters it would reject are dropped.
    pub fn with_value(mut self, value: &str) -> Self {
        self.set(value);
        self
    }

    pub fn kind(&self) -> EditorKind {
        self.kind
    }

    pub fn as_str(&self) -> &str {
        &self.buf
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }

    pub fn set(&mut self, value: &str) {
        self.buf.clear();
        for ch in value.chars() {
            self.insert(ch);
        }
    }

    /// Append `ch` if the editor accepts it. Returns whether it was taken.
    pub fn insert(&mut self, ch: char) -> bool {
        let ok = match self.kind {
            EditorKind::Text { max_len } => !ch.is_control() && self.buf.chars().count() < max_len,
            EditorKind::SignedNumber => {
                let digits = self.buf.trim_start_matches('-').len();
                (ch == '-' && self.buf.is_empty()) || (ch.is_ascii_digit() && digits < MAX_DIGITS)
            }
        };
        if ok {
            self.buf.push(ch);
        }
        ok
    }

    pub fn backspace(&mut self) {
        self.buf.pop();
    }

    /// The buffer as a number, `None` if empty or just a sign.
    pub fn parse_i32(&self) -> Option<i32> {
        self.buf.parse().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_editor_limits_length() {
        let mut e = LineEditor::text(3);
        assert!(e.insert('a'));
        assert!(e.insert(' '));
        assert!(e.insert('b'));
        assert!(!e.insert('c'));
        assert_eq!(e.as_str(), "a b");
        e.backspace();
        assert_eq!(e.as_str(), "a ");
    }

    #[test]
    fn test_text_editor_rejects_control_chars() {
        let mut e = LineEditor::text(10);
        assert!(!e.insert('\n'));
        assert!(e.is_empty());
    }

    #[test]
    fn test_signed_number_editor() {
        let mut e = LineEditor::signed_number();
        assert!(e.insert('-'));
        assert!(!e.insert('-'));
        assert!(e.insert('4'));
        assert!(!e.insert('x'));
        assert!(e.insert('0'));
        assert_eq!(e.parse_i32(), Some(-40));

        let e = LineEditor::signed_number().with_value("-");
        assert_eq!(e.parse_i32(), None);
    }

    #[test]
    fn test_signed_number_digit_cap() {
        let e = LineEditor::signed_number().with_value("-12345678901");
        assert_eq!(e.as_str(), "-123456789");
        assert_eq!(e.parse_i32(), Some(-123_456_789));
    }

    #[test]
    fn test_with_value_prefill() {
        let e = LineEditor::signed_number().with_value("260");
        assert_eq!(e.parse_i32(), Some(260));
        assert_eq!(e.kind(), EditorKind::SignedNumber);
    }
}
