//! Normalizes raw line-source events into the events widgets react to.

use crate::{
    error::{Error, Result},
    readline::{Key, LineEvent, LineSource},
};
use log::trace;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// A submitted line
    Line(String),
    Up,
    Down,
    Space,
    /// Digit keys 1 to 9
    Number(u32),
    /// ASCII letters
    Letter(char),
    /// Anything else, after the line source applied it
    Keypress(Key),
}

impl PromptEvent {
    /// Classifies a single line-source event.
    pub fn from_line_event(event: LineEvent) -> Result<Self> {
        let key = match event {
            LineEvent::Line(line) => return Ok(PromptEvent::Line(line)),
            LineEvent::Key(key) => key,
        };
        Ok(match key {
            Key::Ctrl('c') => return Err(Error::Interrupted),
            Key::Up | Key::Ctrl('p') => PromptEvent::Up,
            Key::Down | Key::Ctrl('n') => PromptEvent::Down,
            Key::Char(' ') => PromptEvent::Space,
            Key::Char(c @ '1'..='9') => PromptEvent::Number(c.to_digit(10).unwrap_or_default()),
            Key::Char(c) if c.is_ascii_alphabetic() => PromptEvent::Letter(c),
            key => PromptEvent::Keypress(key),
        })
    }
}

/// Blocks until the next event is available.
pub fn next_event(source: &mut dyn LineSource) -> Result<PromptEvent> {
    let event = PromptEvent::from_line_event(source.read_event()?)?;
    trace!("prompt event: {event:?}");
    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classify(key: Key) -> Result<PromptEvent> {
        PromptEvent::from_line_event(LineEvent::Key(key))
    }

    #[test]
    fn test_navigation_keys() {
        assert_eq!(classify(Key::Up).unwrap(), PromptEvent::Up);
        assert_eq!(classify(Key::Ctrl('p')).unwrap(), PromptEvent::Up);
        assert_eq!(classify(Key::Down).unwrap(), PromptEvent::Down);
        assert_eq!(classify(Key::Ctrl('n')).unwrap(), PromptEvent::Down);
    }

    #[test]
    fn test_shortcut_keys() {
        assert_eq!(classify(Key::Char(' ')).unwrap(), PromptEvent::Space);
        assert_eq!(classify(Key::Char('7')).unwrap(), PromptEvent::Number(7));
        assert_eq!(classify(Key::Char('a')).unwrap(), PromptEvent::Letter('a'));
        assert_eq!(classify(Key::Char('0')).unwrap(), PromptEvent::Keypress(Key::Char('0')));
        assert_eq!(classify(Key::Backspace).unwrap(), PromptEvent::Keypress(Key::Backspace));
    }

    #[test]
    fn test_lines_pass_through() {
        let event = PromptEvent::from_line_event(LineEvent::Line("hi".into())).unwrap();
        assert_eq!(event, PromptEvent::Line("hi".into()));
    }

    #[test]
    fn test_ctrl_c_interrupts() {
        assert!(matches!(classify(Key::Ctrl('c')), Err(Error::Interrupted)));
    }
}
