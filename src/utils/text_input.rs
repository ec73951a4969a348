use crate::keymap::Action;
use crossterm::event::KeyCode;

/// A single-line text input with encapsulated state.
///
/// Inputs may restrict which characters they accept and how many, which is
/// how the pairing code field stays digits-only and six characters long.
///
/// # Example
/// ```
/// use fambridge::utils::text_input::TextInput;
///
/// let mut input = TextInput::digits(6);
/// for c in "48a29137".chars() {
///     input.insert_char(c);
/// }
/// assert_eq!(input.text(), "482913");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextInput {
    text: String,
    cursor: usize,
    max_len: Option<usize>,
    filter: CharFilter,
}

/// Characters an input accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharFilter {
    /// Printable ASCII
    #[default]
    Printable,
    /// ASCII digits only
    Digits,
}

impl CharFilter {
    pub fn accepts(self, c: char) -> bool {
        match self {
            CharFilter::Printable => c.is_ascii() && !c.is_control(),
            CharFilter::Digits => c.is_ascii_digit(),
        }
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self {
            text: String::new(),
            cursor: 0,
            max_len: None,
            filter: CharFilter::default(),
        }
    }
}

impl TextInput {
    /// Create a new empty text input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Input accepting only ASCII digits, at most `max_len` of them.
    pub fn digits(max_len: usize) -> Self {
        Self {
            max_len: Some(max_len),
            filter: CharFilter::Digits,
            ..Self::default()
        }
    }

    /// Create a text input with initial text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut input = Self::default();
        input.set_text(text);
        input
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.text.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True once a length-limited input holds its maximum.
    pub fn is_full(&self) -> bool {
        self.max_len.is_some_and(|max| self.len() >= max)
    }

    pub fn max_len(&self) -> Option<usize> {
        self.max_len
    }

    /// Replace the text, dropping rejected characters, and move the cursor to the end.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text: String = text.into();
        self.clear();
        for c in text.chars() {
            self.insert_char(c);
        }
    }

    pub fn clear(&mut self) {
        self.text.clear();
        self.cursor = 0;
    }

    /// Insert a character at the cursor position.
    ///
    /// Returns false when the character is rejected or the input is full.
    pub fn insert_char(&mut self, c: char) -> bool {
        if !self.filter.accepts(c) || self.is_full() {
            return false;
        }
        let byte_index = self
            .text
            .char_indices()
            .map(|(i, _)| i)
            .nth(self.cursor)
            .unwrap_or(self.text.len());
        self.text.insert(byte_index, c);
        self.cursor += 1;
        true
    }

    /// Delete the character before the cursor (backspace).
    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            self.text = self
                .text
                .chars()
                .take(self.cursor - 1)
                .chain(self.text.chars().skip(self.cursor))
                .collect();
            self.cursor -= 1;
        }
    }

    /// Delete the character at the cursor position.
    pub fn delete(&mut self) {
        if self.cursor < self.len() {
            self.text = self
                .text
                .chars()
                .take(self.cursor)
                .chain(self.text.chars().skip(self.cursor + 1))
                .collect();
        }
    }

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.len() {
            self.cursor += 1;
        }
    }

    pub fn move_home(&mut self) {
        self.cursor = 0;
    }

    pub fn move_end(&mut self) {
        self.cursor = self.len();
    }

    /// Handle an editing action from the keymap.
    ///
    /// Returns true if the action was handled.
    pub fn handle_action(&mut self, action: Action) -> bool {
        match action {
            Action::MoveLeft => self.move_left(),
            Action::MoveRight => self.move_right(),
            Action::Home => self.move_home(),
            Action::End => self.move_end(),
            Action::Backspace => self.backspace(),
            Action::DeleteChar => self.delete(),
            _ => return false,
        }
        true
    }

    /// Handle a raw key code. Returns true if the key was handled.
    pub fn handle_key(&mut self, key_code: KeyCode) -> bool {
        match key_code {
            KeyCode::Char(c) => self.insert_char(c),
            KeyCode::Backspace => self.handle_action(Action::Backspace),
            KeyCode::Delete => self.handle_action(Action::DeleteChar),
            KeyCode::Left => self.handle_action(Action::MoveLeft),
            KeyCode::Right => self.handle_action(Action::MoveRight),
            KeyCode::Home => self.handle_action(Action::Home),
            KeyCode::End => self.handle_action(Action::End),
            _ => false,
        }
    }

    /// Whether a mapped action should run while a text input has focus.
    ///
    /// Actions bound to plain characters (`q` for Quit, `c` for Copy) are
    /// suppressed so those keys reach the input instead.
    pub fn is_action_allowed_when_focused(action: &Action) -> bool {
        matches!(
            action,
            Action::Back
                | Action::Confirm
                | Action::MoveLeft
                | Action::MoveRight
                | Action::Home
                | Action::End
                | Action::Backspace
                | Action::DeleteChar
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_insertion() {
        let mut input = TextInput::with_text("hello");
        input.move_left();
        input.move_left();
        input.move_left();
        input.insert_char('x');
        assert_eq!(input.text(), "hexllo");
        assert_eq!(input.cursor(), 3);
    }

    #[test]
    fn test_digits_rejects_letters_and_overflow() {
        let mut input = TextInput::digits(6);
        assert!(!input.insert_char('a'));
        for c in "1234567".chars() {
            input.insert_char(c);
        }
        assert_eq!(input.text(), "123456");
        assert!(input.is_full());
        assert!(!input.insert_char('9'));
    }

    #[test]
    fn test_set_text_filters() {
        let mut input = TextInput::digits(6);
        input.set_text("12-34 56 78");
        assert_eq!(input.text(), "123456");
        assert_eq!(input.cursor(), 6);
    }

    #[test]
    fn test_equality_includes_filter() {
        let mut a = TextInput::digits(6);
        let mut b = TextInput::digits(6);
        a.set_text("4829");
        b.set_text("48x29");
        assert_eq!(a, b);

        let mut plain = TextInput::new();
        plain.set_text("4829");
        assert_ne!(a, plain);
        assert!(CharFilter::Printable.accepts('x'));
        assert!(!CharFilter::Digits.accepts('x'));
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut input = TextInput::with_text("abc");
        input.backspace();
        assert_eq!(input.text(), "ab");
        input.move_home();
        input.delete();
        assert_eq!(input.text(), "b");
        assert_eq!(input.cursor(), 0);
        input.backspace();
        assert_eq!(input.text(), "b");
    }

    #[test]
    fn test_cursor_bounds() {
        let mut input = TextInput::with_text("ab");
        input.move_right();
        assert_eq!(input.cursor(), 2);
        input.move_home();
        input.move_left();
        assert_eq!(input.cursor(), 0);
    }

    #[test]
    fn test_handle_key() {
        let mut input = TextInput::digits(6);
        assert!(input.handle_key(KeyCode::Char('4')));
        assert!(!input.handle_key(KeyCode::Char('x')));
        assert!(input.handle_key(KeyCode::Backspace));
        assert!(input.is_empty());
        assert!(!input.handle_key(KeyCode::Tab));
    }

    #[test]
    fn test_quit_suppressed_when_focused() {
        assert!(!TextInput::is_action_allowed_when_focused(&Action::Quit));
        assert!(!TextInput::is_action_allowed_when_focused(&Action::Copy));
        assert!(TextInput::is_action_allowed_when_focused(&Action::Confirm));
    }
}
