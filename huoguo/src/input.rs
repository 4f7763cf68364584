//! Editable search box text.
//!
//! Tracks the raw input and a cursor, and counts edits so callers can tell
//! whether the text changed since they last looked.

/// Search box text with a cursor kept on a character boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryBuffer {
    text: String,
    cursor: usize, // byte offset
    revision: u64,
}

impl QueryBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Cursor position in characters.
    pub fn cursor(&self) -> usize {
        self.text[..self.cursor].chars().count()
    }

    /// Number of edits applied so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True when the text holds nothing but whitespace.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// Replace the whole text, leaving the cursor at the end.
    pub fn set_text(&mut self, text: &str) -> bool {
        if self.text == text {
            self.cursor = self.text.len();
            return false;
        }
        self.text = text.to_string();
        self.cursor = self.text.len();
        self.bump()
    }

    pub fn clear(&mut self) -> bool {
        self.set_text("")
    }

    pub fn insert_char(&mut self, ch: char) -> bool {
        self.text.insert(self.cursor, ch);
        self.cursor += ch.len_utf8();
        self.bump()
    }

    pub fn insert_str(&mut self, s: &str) -> bool {
        if s.is_empty() {
            return false;
        }
        self.text.insert_str(self.cursor, s);
        self.cursor += s.len();
        self.bump()
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) -> bool {
        match self.text[..self.cursor].chars().next_back() {
            Some(ch) => {
                self.cursor -= ch.len_utf8();
                self.text.remove(self.cursor);
                self.bump()
            }
            None => false,
        }
    }

    /// Remove the character under the cursor.
    pub fn delete(&mut self) -> bool {
        if self.cursor < self.text.len() {
            self.text.remove(self.cursor);
            self.bump()
        } else {
            false
        }
    }

    pub fn move_left(&mut self) -> bool {
        match self.text[..self.cursor].chars().next_back() {
            Some(ch) => {
                self.cursor -= ch.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn move_right(&mut self) -> bool {
        match self.text[self.cursor..].chars().next() {
            Some(ch) => {
                self.cursor += ch.len_utf8();
                true
            }
            None => false,
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.text.len();
    }

    fn bump(&mut self) -> bool {
        self.revision += 1;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_and_backspace_with_multibyte_text() {
        let mut b = QueryBuffer::new();
        b.insert_str("你h");
        b.insert_char('a');
        assert_eq!(b.text(), "你ha");
        assert_eq!(b.cursor(), 3);
        assert!(b.backspace());
        assert!(b.backspace());
        assert!(b.backspace());
        assert!(!b.backspace());
        assert!(b.is_empty());
        assert_eq!(b.revision(), 5);
    }

    #[test]
    fn cursor_moves_and_inserts_in_the_middle() {
        let mut b = QueryBuffer::new();
        b.set_text("nhao");
        b.move_home();
        assert!(b.move_right());
        b.insert_char('i');
        assert_eq!(b.text(), "nihao");
        b.move_end();
        assert!(!b.move_right());
        assert!(b.move_left());
        assert!(b.delete());
        assert_eq!(b.text(), "niha");
    }

    #[test]
    fn unchanged_text_does_not_bump_revision() {
        let mut b = QueryBuffer::new();
        assert!(b.set_text("ma"));
        assert!(!b.set_text("ma"));
        assert_eq!(b.revision(), 1);
        assert!(!b.insert_str(""));
        b.set_text("  ");
        assert!(b.is_blank());
    }
}
