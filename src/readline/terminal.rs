use super::{Key, LineBuffer, LineEvent, LineSource};
use crate::error::{Error, Result};
use dialoguer::console::{self, Term};
use log::trace;
use std::io;

/// Line source reading keys from the real terminal through `console`.
pub struct TerminalLineSource {
    term: Term,
    buffer: LineBuffer,
    prompt: String,
    muted: bool,
    paused: bool,
}

impl TerminalLineSource {
    pub fn new() -> Self {
        Self::with_term(Term::stderr())
    }

    pub fn with_term(term: Term) -> Self {
        Self {
            term,
            buffer: LineBuffer::new(),
            prompt: String::new(),
            muted: true,
            paused: false,
        }
    }
}

impl Default for TerminalLineSource {
    fn default() -> Self {
        Self::new()
    }
}

/// Maps `console` keys onto ours. Raw control bytes become `Ctrl` chords.
fn translate(key: console::Key) -> Key {
    match key {
        console::Key::Enter => Key::Enter,
        console::Key::Backspace => Key::Backspace,
        console::Key::Del => Key::Delete,
        console::Key::ArrowLeft => Key::Left,
        console::Key::ArrowRight => Key::Right,
        console::Key::ArrowUp => Key::Up,
        console::Key::ArrowDown => Key::Down,
        console::Key::Home => Key::Home,
        console::Key::End => Key::End,
        console::Key::Tab => Key::Tab,
        console::Key::Escape => Key::Escape,
        console::Key::Char('\r' | '\n') => Key::Enter,
        console::Key::Char('\t') => Key::Tab,
        console::Key::Char(c) if ('\u{1}'..='\u{1a}').contains(&c) => {
            Key::Ctrl((b'a' + (c as u8) - 1) as char)
        }
        console::Key::Char(c) => Key::Char(c),
        _ => Key::Unknown,
    }
}

impl LineSource for TerminalLineSource {
    fn read_event(&mut self) -> Result<LineEvent> {
        let key = match self.term.read_key() {
            Ok(key) => translate(key),
            Err(err) if err.kind() == io::ErrorKind::Interrupted => {
                return Err(Error::Interrupted)
            }
            Err(err) => return Err(err.into()),
        };
        trace!("terminal key: {key:?}");

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
        if !self.muted {
            self.term.write_str(text)?;
        }
        Ok(())
    }

    fn move_cursor_up(&mut self, n: usize) -> Result<()> {
        if !self.muted && n > 0 {
            self.term.move_cursor_up(n)?;
        }
        Ok(())
    }

    fn move_cursor_down(&mut self, n: usize) -> Result<()> {
        if !self.muted && n > 0 {
            self.term.move_cursor_down(n)?;
        }
        Ok(())
    }

    fn move_cursor_left(&mut self, n: usize) -> Result<()> {
        if !self.muted && n > 0 {
            self.term.move_cursor_left(n)?;
        }
        Ok(())
    }

    fn move_cursor_right(&mut self, n: usize) -> Result<()> {
        if !self.muted && n > 0 {
            self.term.move_cursor_right(n)?;
        }
        Ok(())
    }

    fn clear_line(&mut self) -> Result<()> {
        if !self.muted {
            self.term.clear_line()?;
        }
        Ok(())
    }

    fn width(&self) -> usize {
        match self.term.size_checked() {
            Some((_, cols)) if cols > 0 => cols as usize,
            _ => 80,
        }
    }

    fn close(&mut self) -> Result<()> {
        self.buffer.take();
        self.term.show_cursor()?;
        self.term.flush()?;
        Ok(())
    }
}
