//! Windowing of long choice lists.

use crate::constants::{glyphs, messages};
use dialoguer::console::style;

/// The visible part of a paginated output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    pub lines: Vec<String>,
    pub more_above: bool,
    pub more_below: bool,
}

/// Picks which lines of a rendered choice list are shown.
///
/// In looping mode the pointer row moves down with the selection until it
/// reaches the middle of the window and then stays put while the list
/// scrolls underneath it, wrapping across the list boundary.
#[derive(Debug, Clone)]
pub struct Paginator {
    looping: bool,
    last_index: usize,
    /// Row of the active line inside the window (looping mode)
    pointer: usize,
}

impl Paginator {
    pub fn new(looping: bool) -> Self {
        Self { looping, last_index: 0, pointer: 0 }
    }

    /// Window around line `active`, or `None` if everything fits.
    pub fn page(&mut self, output: &str, active: usize, page_size: usize) -> Option<Page> {
        let page_size = page_size.max(1);
        let lines: Vec<&str> = output.split('\n').collect();
        if lines.len() <= page_size {
            return None;
        }

        let page = if self.looping {
            self.infinite(&lines, active, page_size)
        } else {
            finite(&lines, active, page_size)
        };
        self.last_index = active;
        Some(page)
    }

    /// Renders the window with its markers and the scrolling hint.
    pub fn paginate(&mut self, output: &str, active: usize, page_size: usize) -> String {
        let Some(page) = self.page(output, active, page_size) else {
            return output.to_string();
        };

        let mut rendered = Vec::with_capacity(page.lines.len() + 3);
        if page.more_above {
            rendered.push(style(glyphs::MORE_ABOVE).dim().to_string());
        }
        rendered.extend(page.lines);
        if page.more_below {
            rendered.push(style(glyphs::MORE_BELOW).dim().to_string());
        }
        rendered.push(style(messages::PAGINATION_HINT).dim().to_string());
        rendered.join("\n")
    }

    fn infinite(&mut self, lines: &[&str], active: usize, page_size: usize) -> Page {
        let len = lines.len();
        let middle = page_size / 2;
        if self.pointer < middle && self.last_index < active && active - self.last_index < page_size {
            self.pointer = middle.min(self.pointer + active - self.last_index);
        }

        // Three copies of the list give the wrap-around look.
        let top = (active + len).saturating_sub(self.pointer);
        let lines = (top..top + page_size)
            .map(|i| lines[i % len].to_string())
            .collect();
        Page { lines, more_above: true, more_below: true }
    }
}

fn finite(lines: &[&str], active: usize, page_size: usize) -> Page {
    let len = lines.len();
    let top = active.saturating_sub(page_size / 2).min(len - page_size);
    Page {
        lines: lines[top..top + page_size].iter().map(|l| l.to_string()).collect(),
        more_above: top > 0,
        more_below: top + page_size < len,
    }
}
