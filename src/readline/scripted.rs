use super::{Key, LineBuffer, LineEvent, LineSource};
use crate::error::Result;
use dialoguer::console::strip_ansi_codes;
use std::{collections::VecDeque, io};

/// Deterministic line source fed from a queue of keys.
///
/// Everything written while unmuted is appended to a transcript. Cursor
/// movements are not recorded.
#[derive(Debug, Clone)]
pub struct ScriptedLineSource {
    keys: VecDeque<Key>,
    buffer: LineBuffer,
    prompt: String,
    muted: bool,
    paused: bool,
    transcript: String,
    muted_writes: usize,
    closes: usize,
    width: usize,
}

impl ScriptedLineSource {
    pub fn new<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = Key>,
    {
        Self {
            keys: keys.into_iter().collect(),
            buffer: LineBuffer::new(),
            prompt: String::new(),
            muted: true,
            paused: false,
            transcript: String::new(),
            muted_writes: 0,
            closes: 0,
            width: 80,
        }
    }

    /// Types each line followed by <enter>.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut source = Self::new([]);
        for line in lines {
            source.type_line(line.as_ref());
        }
        source
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(1);
        self
    }

    pub fn push_key(&mut self, key: Key) {
        self.keys.push_back(key);
    }

    pub fn push_keys<I: IntoIterator<Item = Key>>(&mut self, keys: I) {
        self.keys.extend(keys);
    }

    pub fn type_text(&mut self, text: &str) {
        self.keys.extend(text.chars().map(Key::Char));
    }

    pub fn type_line(&mut self, line: &str) {
        self.type_text(line);
        self.keys.push_back(Key::Enter);
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }

    pub fn transcript(&self) -> &str {
        &self.transcript
    }

    /// The transcript without styling escapes.
    pub fn plain_output(&self) -> String {
        strip_ansi_codes(&self.transcript).to_string()
    }

    /// Writes attempted while the output was muted.
    pub fn muted_writes(&self) -> usize {
        self.muted_writes
    }

    pub fn closes(&self) -> usize {
        self.closes
    }
}

impl LineSource for ScriptedLineSource {
    fn read_event(&mut self) -> Result<LineEvent> {
        let Some(key) = self.keys.pop_front() else {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted keys left").into());
        };
        if key == Key::Enter {
            return Ok(LineEvent::Line(self.buffer.take()));
        }
        self.buffer.apply(&key);
        Ok(LineEvent::Key(key))
    }

    fn line(&self) -> &str {
        self.buffer.as_str()
    }

    fn set_line(&mut self, line: &str) {
        self.buffer.set(line);
    }

    fn cursor(&self) -> usize {
        self.buffer.cursor()
    }

    fn set_cursor(&mut self, cursor: usize) {
        self.buffer.set_cursor(cursor);
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn resume(&mut self) {
        self.paused = false;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn mute(&mut self) {
        self.muted = true;
    }

    fn unmute(&mut self) {
        self.muted = false;
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_prompt(&mut self, prompt: &str) {
        self.prompt = prompt.to_string();
    }

    fn prompt(&self) -> &str {
        &self.prompt
    }

    fn write(&mut self, text: &str) -> Result<()> {
        if self.muted {
            self.muted_writes += 1;
        } else {
            self.transcript.push_str(text);
        }
        Ok(())
    }

    fn move_cursor_up(&mut self, _n: usize) -> Result<()> {
        Ok(())
    }

    fn move_cursor_down(&mut self, _n: usize) -> Result<()> {
        Ok(())
    }

    fn move_cursor_left(&mut self, _n: usize) -> Result<()> {
        Ok(())
    }

    fn move_cursor_right(&mut self, _n: usize) -> Result<()> {
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        Ok(())
    }

    fn width(&self) -> usize {
        self.width
    }

    fn close(&mut self) -> Result<()> {
        self.closes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_lines_end_with_enter() {
        let mut source = ScriptedLineSource::from_lines(["ab"]);
        assert_eq!(source.read_event().unwrap(), LineEvent::Key(Key::Char('a')));
        assert_eq!(source.line(), "a");
        source.read_event().unwrap();
        assert_eq!(source.read_event().unwrap(), LineEvent::Line("ab".into()));
        assert_eq!(source.line(), "");
    }

    #[test]
    fn test_exhausted_script_is_an_io_error() {
        let mut source = ScriptedLineSource::new([]);
        assert!(matches!(source.read_event(), Err(Error::IoError(_))));
    }

    #[test]
    fn test_muted_writes_are_not_recorded() {
        let mut source = ScriptedLineSource::new([]);
        source.write("hidden").unwrap();
        source.unmute();
        source.write("shown").unwrap();
        assert_eq!(source.transcript(), "shown");
        assert_eq!(source.muted_writes(), 1);
    }
}
