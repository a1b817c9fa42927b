//! Constants used throughout enquire

/// Question file extensions accepted by the loader
pub const QUESTION_FILE_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// Prompt type used when a question names no type, or an unregistered one
pub const DEFAULT_PROMPT_TYPE: &str = "input";

/// Number of choice lines shown before the list is paginated
pub const DEFAULT_PAGE_SIZE: usize = 7;

/// STDIN indicator for CLI arguments
pub const STDIN_INDICATOR: &str = "-";

/// Path segments that would alias container internals
pub const FORBIDDEN_PATH_SEGMENTS: &[&str] = &["__proto__", "constructor", "prototype"];

/// Largest array index an answer path may address.
pub const MAX_ANSWER_INDEX: usize = 4096;

/// Rendering glyphs
pub mod glyphs {
    pub const POINTER: &str = "❯";
    pub const CHECKED: &str = "◉";
    pub const UNCHECKED: &str = "◯";
    pub const ERROR_MARKER: &str = ">>";
    pub const SEPARATOR_LINE: &str = "──────────────";
    pub const MORE_ABOVE: &str = "  ↑ more";
    pub const MORE_BELOW: &str = "  ↓ more";
    pub const SPINNER_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];
}

/// Messages shown to the user
pub mod messages {
    pub const INVALID_ANSWER: &str = "Invalid answer";
    pub const INVALID_INDEX: &str = "Please enter a valid index";
    pub const INVALID_COMMAND: &str = "Please enter a valid command";
    pub const INVALID_NUMBER: &str = "Please enter a valid number";
    pub const PAGINATION_HINT: &str = "(Move up and down to reveal more choices)";
    pub const LIST_HINT: &str = "(Use arrow keys)";
    pub const CHECKBOX_HINT: &str = "(Press <space> to select, <a> to toggle all, <i> to invert selection, and <enter> to proceed)";
    pub const EXPAND_HELP: &str = "Help, list all options";
    pub const EDITOR_HINT: &str = "Press <enter> to launch your preferred editor.";
    pub const EDITOR_RECEIVED: &str = "Received";
    pub const HIDDEN_DEFAULT: &str = "[hidden]";
    pub const DISABLED: &str = "Disabled";
    pub const RAWLIST_ANSWER: &str = "Answer:";
}

/// Expand prompt shortcut keys
pub mod keys {
    /// Reserved for "show all options"
    pub const HELP: char = 'h';
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
