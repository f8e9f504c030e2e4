use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    /// Key was not an edit (or had no effect).
    Unchanged,
    /// Buffer changed; `inserted` is the character typed, if any.
    Edited { inserted: Option<char> },
    Submit,
    Cancel,
}

/// Single-line editor backing the typing box.
#[derive(Clone, Debug, Default)]
pub struct TextInput {
    text: String,
    /// Char index, 0 = before the first char.
    cursor: usize,
}

impl TextInput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let len = self.text.chars().count();

        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(len),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = len,
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = len,
            KeyCode::Backspace if self.cursor > 0 => {
                self.remove_char_at(self.cursor - 1);
                self.cursor -= 1;
                return InputResult::Edited { inserted: None };
            }
            KeyCode::Delete if self.cursor < len => {
                self.remove_char_at(self.cursor);
                return InputResult::Edited { inserted: None };
            }
            KeyCode::Char('u') if ctrl && !self.text.is_empty() => {
                self.clear();
                return InputResult::Edited { inserted: None };
            }
            KeyCode::Char('w') if ctrl && self.cursor > 0 => {
                self.delete_word_back();
                return InputResult::Edited { inserted: None };
            }
            KeyCode::Char(ch) if !ctrl && !key.modifiers.contains(KeyModifiers::ALT) => {
                let at = self.char_to_byte(self.cursor);
                self.text.insert(at, ch);
                self.cursor += 1;
                return InputResult::Edited { inserted: Some(ch) };
            }
            _ => {}
        }
        InputResult::Unchanged
    }

    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map_or(self.text.len(), |(b, _)| b)
    }

    fn remove_char_at(&mut self, char_idx: usize) {
        let start = self.char_to_byte(char_idx);
        let end = self.char_to_byte(char_idx + 1);
        self.text.replace_range(start..end, "");
    }

    /// unix-word-rubout: trailing whitespace, then the word before it.
    fn delete_word_back(&mut self) {
        let chars: Vec<char> = self.text.chars().collect();
        let mut pos = self.cursor;
        while pos > 0 && chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        while pos > 0 && !chars[pos - 1].is_whitespace() {
            pos -= 1;
        }
        let start = self.char_to_byte(pos);
        let end = self.char_to_byte(self.cursor);
        self.text.replace_range(start..end, "");
        self.cursor = pos;
    }
}
