//! Interactive terminal prompts driven by question descriptors.

/// Answer map and path-aware assignment.
pub mod answers;

/// Choices, separators and the choice list.
pub mod choice;

/// Handles argument parsing for the binary.
pub mod cli;

/// Question descriptors and file loading.
pub mod config;

/// Texts, glyphs and defaults.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Normalized input events.
pub mod events;

/// Index arithmetic over choice lists.
pub mod navigation;

/// Windowing of long choice lists.
pub mod paginator;

/// Interactive widgets.
pub mod prompt;

/// The line editor prompts read from and draw through.
pub mod readline;

/// Template rendering for file-declared questions.
pub mod renderer;

/// Terminal output of a running prompt.
pub mod screen;

/// Question orchestration.
pub mod session;

pub use answers::Answers;
pub use config::Question;
pub use error::{Error, Result};
pub use session::{prompt, PromptSession};
