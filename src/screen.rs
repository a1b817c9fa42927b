//! Terminal output of a running prompt.
//!
//! The manager remembers how many lines the previous frame occupied, so each
//! new frame can first erase exactly that many lines and then put the cursor
//! back where the line editor expects it (at the typed line, not below the
//! bottom content).

use crate::{
    constants::glyphs::SPINNER_FRAMES,
    error::Result,
    readline::LineSource,
};
use dialoguer::console::{measure_text_width, strip_ansi_codes};
use std::ops::{Deref, DerefMut};

/// Keeps the line source unmuted for its lifetime.
struct Unmuted<'a, 'b> {
    source: &'a mut (dyn LineSource + 'b),
}

impl<'a, 'b> Unmuted<'a, 'b> {
    fn new(source: &'a mut (dyn LineSource + 'b)) -> Self {
        source.unmute();
        Self { source }
    }
}

impl Drop for Unmuted<'_, '_> {
    fn drop(&mut self) {
        self.source.mute();
    }
}

impl<'b> Deref for Unmuted<'_, 'b> {
    type Target = dyn LineSource + 'b;

    fn deref(&self) -> &Self::Target {
        &*self.source
    }
}

impl DerefMut for Unmuted<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.source
    }
}

#[derive(Debug, Clone)]
pub struct ScreenManager {
    /// Lines drawn by the last frame
    height: usize,
    /// Lines between the cursor and the bottom of the last frame
    extra_lines_under_prompt: usize,
    spinner_frame: usize,
    /// Whether the typed line is part of the rendered prompt line
    echo_input: bool,
    closed: bool,
}

impl ScreenManager {
    pub fn new() -> Self {
        Self {
            height: 0,
            extra_lines_under_prompt: 0,
            spinner_frame: 0,
            echo_input: true,
            closed: false,
        }
    }

    /// For prompts whose last line does not show what is being typed.
    pub fn without_echo(mut self) -> Self {
        self.echo_input = false;
        self
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Replaces the previous frame with `content`, followed by `bottom`.
    pub fn render(
        &mut self,
        source: &mut dyn LineSource,
        content: &str,
        bottom: Option<&str>,
    ) -> Result<()> {
        let mut out = Unmuted::new(source);
        self.clean(&mut *out)?;

        let raw_prompt_line = strip_ansi_codes(last_line(content)).to_string();
        let echoed = if self.echo_input { out.line().chars().count() } else { 0 };
        let keep = raw_prompt_line.chars().count().saturating_sub(echoed);
        let prompt: String = raw_prompt_line.chars().take(keep).collect();
        out.set_prompt(&prompt);

        let width = out.width().max(1);
        let typed = if self.echo_input {
            out.line().chars().take(out.cursor()).collect::<String>()
        } else {
            String::new()
        };
        let cursor = measure_text_width(&format!("{prompt}{typed}"));
        let (cursor_rows, cursor_cols) = (cursor / width, cursor % width);

        let mut content = force_line_return(content, width);
        let bottom = bottom.map(|bottom| force_line_return(bottom, width));
        let prompt_width = measure_text_width(&raw_prompt_line);
        // Keeps the cursor off the start of the next line.
        if prompt_width > 0 && prompt_width % width == 0 {
            content.push('\n');
        }

        let full = match &bottom {
            Some(bottom) => format!("{content}\n{bottom}"),
            None => content,
        };
        out.write(&full)?;

        let prompt_line_up_diff = (prompt_width / width).saturating_sub(cursor_rows);
        let bottom_height = prompt_line_up_diff + bottom.as_deref().map_or(0, height);
        out.move_cursor_up(bottom_height)?;
        out.move_cursor_left(measure_text_width(last_line(&full)))?;
        out.move_cursor_right(cursor_cols)?;

        self.extra_lines_under_prompt = bottom_height;
        self.height = height(&full);
        Ok(())
    }

    /// Renders a frame for a pending filter/validate call, with a spinner
    /// glyph in front of the bottom content, or of the content if there is
    /// no bottom content.
    pub fn render_with_spinner(
        &mut self,
        source: &mut dyn LineSource,
        content: &str,
        bottom: Option<&str>,
    ) -> Result<()> {
        let frame = SPINNER_FRAMES[self.spinner_frame % SPINNER_FRAMES.len()];
        self.spinner_frame += 1;
        match bottom {
            Some(bottom) => self.render(source, content, Some(&format!("{frame} {bottom}"))),
            None => self.render(source, &format!("{frame} {content}"), None),
        }
    }

    fn clean(&mut self, source: &mut dyn LineSource) -> Result<()> {
        source.move_cursor_down(self.extra_lines_under_prompt)?;
        for i in 0..self.height {
            source.clear_line()?;
            if i + 1 < self.height {
                source.move_cursor_up(1)?;
            }
        }
        Ok(())
    }

    /// Moves the cursor below the last frame and ends the prompt line.
    /// Only the first call has an effect.
    pub fn close(&mut self, source: &mut dyn LineSource) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;

        let mut out = Unmuted::new(source);
        out.move_cursor_down(self.extra_lines_under_prompt)?;
        self.extra_lines_under_prompt = 0;
        out.set_prompt("");
        out.write("\n")?;
        Ok(())
    }
}

impl Default for ScreenManager {
    fn default() -> Self {
        Self::new()
    }
}

fn last_line(content: &str) -> &str {
    content.rsplit('\n').next().unwrap_or(content)
}

fn height(content: &str) -> usize {
    content.split('\n').count()
}

/// Splits `line` into chunks of at most `width` columns, keeping ANSI
/// escape sequences attached to the text they style.
pub fn break_line(line: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_width = 0;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\u{1b}' {
            current.push(c);
            if chars.peek() == Some(&'[') {
                for next in chars.by_ref() {
                    current.push(next);
                    if next.is_ascii_alphabetic() {
                        break;
                    }
                }
            }
            continue;
        }
        let mut buf = [0; 4];
        let char_width = measure_text_width(c.encode_utf8(&mut buf));
        if current_width + char_width > width && current_width > 0 {
            chunks.push(std::mem::take(&mut current));
            current_width = 0;
        }
        current.push(c);
        current_width += char_width;
    }
    chunks.push(current);
    chunks
}

fn force_line_return(content: &str, width: usize) -> String {
    content
        .split('\n')
        .flat_map(|line| break_line(line, width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readline::ScriptedLineSource;

    #[test]
    fn writes_are_unmuted_then_muted_again() {
        let mut source = ScriptedLineSource::new([]);
        let mut screen = ScreenManager::new();

        screen.render(&mut source, "? name: ", Some(">> oops")).unwrap();

        assert!(source.is_muted());
        assert_eq!(source.muted_writes(), 0);
        assert_eq!(source.plain_output(), "? name: \n>> oops");
        assert_eq!(screen.height(), 2);
    }

    #[test]
    fn prompt_excludes_the_typed_line() {
        let mut source = ScriptedLineSource::new([]);
        source.set_line("abc");
        let mut screen = ScreenManager::new();

        screen.render(&mut source, "name: abc", None).unwrap();

        assert_eq!(source.prompt(), "name: ");
    }

    #[test]
    fn prompt_keeps_everything_without_echo() {
        let mut source = ScriptedLineSource::new([]);
        source.set_line("abc");
        let mut screen = ScreenManager::new().without_echo();

        screen.render(&mut source, "pick one", None).unwrap();

        assert_eq!(source.prompt(), "pick one");
    }

    #[test]
    fn long_lines_are_wrapped_to_the_width() {
        let mut source = ScriptedLineSource::new([]).with_width(4);
        let mut screen = ScreenManager::new();

        screen.render(&mut source, "abcdefghij", None).unwrap();

        assert_eq!(source.plain_output(), "abcd\nefgh\nij");
        assert_eq!(screen.height(), 3);
    }

    #[test]
    fn spinner_frames_advance() {
        let mut source = ScriptedLineSource::new([]);
        let mut screen = ScreenManager::new();

        screen.render_with_spinner(&mut source, "x", None).unwrap();
        screen.render_with_spinner(&mut source, "x", None).unwrap();

        let output = source.plain_output();
        assert!(output.contains(&format!("{} x", SPINNER_FRAMES[0])));
        assert!(output.contains(&format!("{} x", SPINNER_FRAMES[1])));
    }

    #[test]
    fn close_runs_once() {
        let mut source = ScriptedLineSource::new([]);
        let mut screen = ScreenManager::new();

        screen.close(&mut source).unwrap();
        screen.close(&mut source).unwrap();

        assert_eq!(source.transcript(), "\n");
        assert!(source.is_muted());
        assert!(screen.is_closed());
    }

    #[test]
    fn break_line_keeps_escapes_with_their_text() {
        let styled = "\u{1b}[36mabcdef\u{1b}[0m";
        let chunks = break_line(styled, 3);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0], "\u{1b}[36mabc");
        assert_eq!(chunks[1], "def\u{1b}[0m");
        assert_eq!(break_line("", 3), vec![String::new()]);
    }
}
