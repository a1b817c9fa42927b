//! Choices and separators offered by the selection prompts
//!
//! - `ChoiceSpec`: what the caller writes (may hold answer-dependent fields)
//! - `Choice`: a resolved, selectable entry
//! - `ChoiceList`: the ordered container the widgets navigate

use crate::{
    config::Dynamic,
    constants::{glyphs, messages},
};
use serde::Deserialize;
use serde_json::Value;

pub mod list;

pub use list::{ChoiceItem, ChoiceList};

/// Whether a choice can be selected. A reason string implies disabled.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Disabled {
    Flag(bool),
    Reason(String),
}

impl Disabled {
    /// `None` when the choice is selectable, otherwise the text shown next to it.
    pub fn reason(&self) -> Option<String> {
        match self {
            Disabled::Flag(false) => None,
            Disabled::Flag(true) => Some(messages::DISABLED.to_string()),
            Disabled::Reason(reason) => Some(reason.clone()),
        }
    }
}

/// A non-selectable divider between choices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Separator {
    pub line: String,
}

impl Separator {
    pub fn new() -> Self {
        Self { line: glyphs::SEPARATOR_LINE.to_string() }
    }

    pub fn with_line(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

impl Default for Separator {
    fn default() -> Self {
        Self::new()
    }
}

/// Options of a single selectable choice before resolution.
#[derive(Debug, Clone)]
pub struct ChoiceOptions {
    pub name: String,
    pub value: Option<Value>,
    pub short: Option<String>,
    pub key: Option<String>,
    pub checked: bool,
    pub disabled: Option<Dynamic<Disabled>>,
}

impl ChoiceOptions {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            short: None,
            key: None,
            checked: false,
            disabled: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_short(mut self, short: impl Into<String>) -> Self {
        self.short = Some(short.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }

    pub fn with_disabled(mut self, disabled: impl Into<Dynamic<Disabled>>) -> Self {
        self.disabled = Some(disabled.into());
        self
    }
}

/// An entry of a question's `choices` list.
#[derive(Debug, Clone)]
pub enum ChoiceSpec {
    Choice(ChoiceOptions),
    Separator(Separator),
}

impl ChoiceSpec {
    pub fn separator() -> Self {
        ChoiceSpec::Separator(Separator::new())
    }
}

impl From<ChoiceOptions> for ChoiceSpec {
    fn from(options: ChoiceOptions) -> Self {
        ChoiceSpec::Choice(options)
    }
}

impl From<Separator> for ChoiceSpec {
    fn from(separator: Separator) -> Self {
        ChoiceSpec::Separator(separator)
    }
}

impl From<&str> for ChoiceSpec {
    fn from(name: &str) -> Self {
        ChoiceSpec::Choice(ChoiceOptions::new(name))
    }
}

impl From<String> for ChoiceSpec {
    fn from(name: String) -> Self {
        ChoiceSpec::Choice(ChoiceOptions::new(name))
    }
}

impl From<bool> for Dynamic<Disabled> {
    fn from(flag: bool) -> Self {
        Dynamic::Literal(Disabled::Flag(flag))
    }
}

impl From<&str> for Dynamic<Disabled> {
    fn from(reason: &str) -> Self {
        Dynamic::Literal(Disabled::Reason(reason.to_string()))
    }
}

/// A resolved, selectable entry.
#[derive(Debug, Clone, PartialEq)]
pub struct Choice {
    pub name: String,
    /// Answer payload, defaults to `name`
    pub value: Value,
    /// Compact form shown once answered, defaults to `name`
    pub short: String,
    pub key: Option<String>,
    pub checked: bool,
    /// Set when the choice cannot be selected
    pub disabled: Option<String>,
}

impl Choice {
    pub fn is_disabled(&self) -> bool {
        self.disabled.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_reasons() {
        assert_eq!(Disabled::Flag(false).reason(), None);
        assert_eq!(Disabled::Flag(true).reason(), Some("Disabled".to_string()));
        assert_eq!(Disabled::Reason("soon".into()).reason(), Some("soon".to_string()));
    }

    #[test]
    fn test_disabled_deserializes_from_bool_or_string() {
        let flag: Disabled = serde_json::from_str("true").unwrap();
        let reason: Disabled = serde_json::from_str("\"out of stock\"").unwrap();
        assert_eq!(flag, Disabled::Flag(true));
        assert_eq!(reason, Disabled::Reason("out of stock".into()));
    }

    #[test]
    fn test_strings_become_plain_choices() {
        match ChoiceSpec::from("red") {
            ChoiceSpec::Choice(options) => {
                assert_eq!(options.name, "red");
                assert!(options.value.is_none());
            }
            ChoiceSpec::Separator(_) => panic!("expected a choice"),
        }
    }
}
