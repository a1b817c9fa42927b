//! The line-editing collaborator prompts read from and write to.
//!
//! A [`LineSource`] behaves like a readline instance: it owns the line being
//! typed and its cursor, applies editing keys itself and reports every other
//! key, and turns <enter> into a submitted line. Its output starts muted; the
//! screen manager unmutes it around each programmatic write.

use crate::error::Result;

pub mod scripted;
pub mod terminal;

pub use scripted::ScriptedLineSource;
pub use terminal::TerminalLineSource;

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    /// Control chord, always carrying a lowercase letter
    Ctrl(char),
    Enter,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    Tab,
    Escape,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineEvent {
    /// <enter> was pressed; carries the submitted line, the buffer is now empty.
    Line(String),
    /// Any other key, already applied to the line buffer.
    Key(Key),
}

pub trait LineSource {
    /// Blocks until the next key arrives.
    fn read_event(&mut self) -> Result<LineEvent>;

    fn line(&self) -> &str;
    fn set_line(&mut self, line: &str);
    /// Cursor position, in characters from the start of the line.
    fn cursor(&self) -> usize;
    fn set_cursor(&mut self, cursor: usize);

    fn pause(&mut self);
    fn resume(&mut self);
    fn is_paused(&self) -> bool;

    fn mute(&mut self);
    fn unmute(&mut self);
    fn is_muted(&self) -> bool;

    /// Text the line editor considers to sit before the typed line.
    fn set_prompt(&mut self, prompt: &str);
    fn prompt(&self) -> &str;

    /// Output primitives. They are no-ops while muted.
    fn write(&mut self, text: &str) -> Result<()>;
    fn move_cursor_up(&mut self, n: usize) -> Result<()>;
    fn move_cursor_down(&mut self, n: usize) -> Result<()>;
    fn move_cursor_left(&mut self, n: usize) -> Result<()>;
    fn move_cursor_right(&mut self, n: usize) -> Result<()>;
    fn clear_line(&mut self) -> Result<()>;

    /// Terminal width in columns.
    fn width(&self) -> usize;

    /// Restores the terminal once a session is over.
    fn close(&mut self) -> Result<()>;
}

/// The editable line shared by the line source implementations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineBuffer {
    text: String,
    /// In characters
    cursor: usize,
}

impl LineBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set(&mut self, text: &str) {
        self.text = text.to_string();
        self.cursor = self.len();
    }

    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor.min(self.len());
    }

    /// Empties the buffer and returns what it held.
    pub fn take(&mut self) -> String {
        self.cursor = 0;
        std::mem::take(&mut self.text)
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_offset(&self, cursor: usize) -> usize {
        self.text
            .char_indices()
            .nth(cursor)
            .map_or(self.text.len(), |(offset, _)| offset)
    }

    /// Applies an editing key. Returns whether the buffer changed.
    pub fn apply(&mut self, key: &Key) -> bool {
        match key {
            Key::Char(c) if !c.is_control() => {
                let offset = self.byte_offset(self.cursor);
                self.text.insert(offset, *c);
                self.cursor += 1;
                true
            }
            Key::Backspace | Key::Ctrl('h') => {
                if self.cursor == 0 {
                    return false;
                }
                self.cursor -= 1;
                let offset = self.byte_offset(self.cursor);
                self.text.remove(offset);
                true
            }
            Key::Delete | Key::Ctrl('d') => {
                if self.cursor >= self.len() {
                    return false;
                }
                let offset = self.byte_offset(self.cursor);
                self.text.remove(offset);
                true
            }
            Key::Left | Key::Ctrl('b') => {
                self.cursor = self.cursor.saturating_sub(1);
                false
            }
            Key::Right | Key::Ctrl('f') => {
                self.cursor = (self.cursor + 1).min(self.len());
                false
            }
            Key::Home | Key::Ctrl('a') => {
                self.cursor = 0;
                false
            }
            Key::End | Key::Ctrl('e') => {
                self.cursor = self.len();
                false
            }
            Key::Ctrl('u') => {
                let offset = self.byte_offset(self.cursor);
                self.text.replace_range(..offset, "");
                self.cursor = 0;
                offset > 0
            }
            Key::Ctrl('k') => {
                let offset = self.byte_offset(self.cursor);
                let changed = offset < self.text.len();
                self.text.truncate(offset);
                changed
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typed(text: &str) -> LineBuffer {
        let mut buffer = LineBuffer::new();
        for c in text.chars() {
            buffer.apply(&Key::Char(c));
        }
        buffer
    }

    #[test]
    fn test_inserts_at_the_cursor() {
        let mut buffer = typed("hllo");
        buffer.set_cursor(1);
        buffer.apply(&Key::Char('e'));
        assert_eq!(buffer.as_str(), "hello");
        assert_eq!(buffer.cursor(), 2);
    }

    #[test]
    fn test_backspace_and_delete() {
        let mut buffer = typed("héllo");
        buffer.apply(&Key::Backspace);
        assert_eq!(buffer.as_str(), "héll");
        buffer.apply(&Key::Home);
        buffer.apply(&Key::Right);
        buffer.apply(&Key::Delete);
        assert_eq!(buffer.as_str(), "hll");
        assert!(!LineBuffer::new().apply(&Key::Backspace));
    }

    #[test]
    fn test_kill_chords() {
        let mut buffer = typed("hello world");
        buffer.set_cursor(5);
        buffer.apply(&Key::Ctrl('k'));
        assert_eq!(buffer.as_str(), "hello");
        buffer.apply(&Key::Ctrl('u'));
        assert_eq!(buffer.as_str(), "");
    }

    #[test]
    fn test_take_empties_the_buffer() {
        let mut buffer = typed("abc");
        assert_eq!(buffer.take(), "abc");
        assert_eq!(buffer.as_str(), "");
        assert_eq!(buffer.cursor(), 0);
    }

    #[test]
    fn test_control_characters_are_not_inserted() {
        let mut buffer = LineBuffer::new();
        assert!(!buffer.apply(&Key::Char('\u{1b}')));
        assert!(!buffer.apply(&Key::Up));
        assert_eq!(buffer.as_str(), "");
    }
}
