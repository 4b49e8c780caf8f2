use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Selector prefixes offered by tab completion, in cycling order.
const SELECTOR_PREFIXES: [&str; 5] = ["surah:", "juz:", "quarter:", "ruku:", "ayah:"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputResult {
    Continue,
    Submit,
    Cancel,
}

/// Single-line editor for typing a range selector such as `ruku:30:1-4`.
pub struct LineInput {
    text: String,
    /// Cursor position as a char index (0 = before first char).
    cursor: usize,
    completions: Vec<&'static str>,
    completion_index: Option<usize>,
}

impl LineInput {
    pub fn new(text: &str) -> Self {
        let cursor = text.chars().count();
        Self {
            text: text.to_string(),
            cursor,
            completions: Vec::new(),
            completion_index: None,
        }
    }

    pub fn value(&self) -> &str {
        &self.text
    }

    /// Returns (before_cursor, cursor_char, after_cursor) for styled rendering.
    /// When cursor is at end of text, cursor_char is None.
    pub fn render_parts(&self) -> (&str, Option<char>, &str) {
        let byte_offset = self.char_to_byte(self.cursor);
        match self.text[byte_offset..].chars().next() {
            Some(ch) => {
                let next_byte = byte_offset + ch.len_utf8();
                (&self.text[..byte_offset], Some(ch), &self.text[next_byte..])
            }
            None => (&self.text, None, ""),
        }
    }

    pub fn handle(&mut self, key: KeyEvent) -> InputResult {
        if !matches!(key.code, KeyCode::Tab | KeyCode::BackTab) {
            self.reset_completion();
        }
        match key.code {
            KeyCode::Esc => return InputResult::Cancel,
            KeyCode::Enter => return InputResult::Submit,
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.text.chars().count()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.text.chars().count(),
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.remove_at_cursor();
                }
            }
            KeyCode::Delete => self.remove_at_cursor(),
            KeyCode::Tab => self.tab_complete(true),
            KeyCode::BackTab => self.tab_complete(false),
            KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => self.cursor = 0,
            KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.cursor = self.text.chars().count();
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.clear();
                self.cursor = 0;
            }
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let byte_offset = self.char_to_byte(self.cursor);
                self.text.insert(byte_offset, ch);
                self.cursor += 1;
            }
            _ => {}
        }
        InputResult::Continue
    }

    /// Convert char index to byte offset.
    fn char_to_byte(&self, char_idx: usize) -> usize {
        self.text
            .char_indices()
            .nth(char_idx)
            .map(|(b, _)| b)
            .unwrap_or(self.text.len())
    }

    fn remove_at_cursor(&mut self) {
        let byte_offset = self.char_to_byte(self.cursor);
        if let Some(ch) = self.text[byte_offset..].chars().next() {
            self.text
                .replace_range(byte_offset..byte_offset + ch.len_utf8(), "");
        }
    }

    fn reset_completion(&mut self) {
        self.completions.clear();
        self.completion_index = None;
    }

    /// Completes the selector kind. Only active before the first `:`.
    fn tab_complete(&mut self, forward: bool) {
        match self.completion_index {
            None => {
                if self.text.contains(':') {
                    return;
                }
                let partial = self.text.to_ascii_lowercase();
                self.completions = SELECTOR_PREFIXES
                    .iter()
                    .copied()
                    .filter(|p| p.starts_with(&partial))
                    .collect();
                if self.completions.is_empty() {
                    return;
                }
                let first = if forward { 0 } else { self.completions.len() - 1 };
                self.apply_completion(first);
            }
            Some(idx) => {
                let count = self.completions.len();
                let next = if forward {
                    (idx + 1) % count
                } else {
                    (idx + count - 1) % count
                };
                self.apply_completion(next);
            }
        }
    }

    fn apply_completion(&mut self, idx: usize) {
        self.completion_index = Some(idx);
        self.text = self.completions[idx].to_string();
        self.cursor = self.text.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(ch: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(ch), KeyModifiers::CONTROL)
    }

    fn typed(text: &str) -> LineInput {
        let mut input = LineInput::new("");
        for ch in text.chars() {
            input.handle(key(KeyCode::Char(ch)));
        }
        input
    }

    #[test]
    fn insert_at_start_middle_end() {
        let mut input = LineInput::new("j30");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Right));
        input.handle(key(KeyCode::Char(':')));
        assert_eq!(input.value(), "j:30");
        assert_eq!(input.cursor, 2);

        input.handle(key(KeyCode::End));
        input.handle(key(KeyCode::Char(',')));
        assert_eq!(input.value(), "j:30,");
    }

    #[test]
    fn backspace_and_delete_at_boundaries() {
        let mut input = LineInput::new("ab");
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "ab");
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Backspace));
        input.handle(key(KeyCode::Backspace));
        assert_eq!(input.value(), "");
        assert_eq!(input.cursor, 0);

        let mut input = LineInput::new("ab");
        input.handle(key(KeyCode::Home));
        input.handle(key(KeyCode::Delete));
        assert_eq!(input.value(), "b");
    }

    #[test]
    fn cursor_stays_in_bounds() {
        let mut input = LineInput::new("a");
        input.handle(key(KeyCode::Right));
        assert_eq!(input.cursor, 1);
        input.handle(ctrl('a'));
        input.handle(key(KeyCode::Left));
        assert_eq!(input.cursor, 0);
        input.handle(ctrl('e'));
        assert_eq!(input.cursor, 1);
    }

    #[test]
    fn ctrl_u_clears() {
        let mut input = LineInput::new("ayah:2:1-20");
        input.handle(ctrl('u'));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn render_parts_split_at_cursor() {
        let mut input = LineInput::new("juz");
        assert_eq!(input.render_parts(), ("juz", None, ""));
        input.handle(key(KeyCode::Left));
        assert_eq!(input.render_parts(), ("ju", Some('z'), ""));
        input.handle(key(KeyCode::Home));
        assert_eq!(input.render_parts(), ("", Some('j'), "uz"));
    }

    #[test]
    fn submit_and_cancel() {
        let mut input = LineInput::new("juz:1");
        assert_eq!(input.handle(key(KeyCode::Enter)), InputResult::Submit);
        assert_eq!(input.handle(key(KeyCode::Esc)), InputResult::Cancel);
        assert_eq!(input.handle(key(KeyCode::Char('x'))), InputResult::Continue);
    }

    #[test]
    fn tab_completes_selector_kind() {
        let mut input = typed("q");
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.value(), "quarter:");
        input.handle(key(KeyCode::Char('2')));
        assert_eq!(input.value(), "quarter:2");
    }

    #[test]
    fn tab_cycles_and_backtab_reverses() {
        let mut input = LineInput::new("");
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.value(), "surah:");
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.value(), "juz:");
        input.handle(key(KeyCode::BackTab));
        input.handle(key(KeyCode::BackTab));
        assert_eq!(input.value(), "ayah:");
    }

    #[test]
    fn tab_after_colon_is_noop() {
        let mut input = LineInput::new("juz:3");
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.value(), "juz:3");

        let mut input = typed("x");
        input.handle(key(KeyCode::Tab));
        assert_eq!(input.value(), "x");
    }
}
