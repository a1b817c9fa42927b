//! Basic types and callback aliases for question configuration

use crate::{answers::Answers, error::Result};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// A computation over the answers collected so far.
pub type Computation<T> = Arc<dyn Fn(&Answers) -> anyhow::Result<T> + Send + Sync>;

/// Checks a (filtered) submission.
pub type ValidateFn = Arc<dyn Fn(&Value, &Answers) -> anyhow::Result<Validity> + Send + Sync>;

/// Transforms a raw submission before it is validated and stored.
pub type FilterFn = Arc<dyn Fn(Value, &Answers) -> anyhow::Result<Value> + Send + Sync>;

/// Formats the typed text for display only. The flag is set for the final render.
pub type TransformerFn = Arc<dyn Fn(&str, &Answers, bool) -> String + Send + Sync>;

/// A question field that is either given up front or computed from answers.
pub enum Dynamic<T> {
    Literal(T),
    Computed(Computation<T>),
}

impl<T: Clone> Dynamic<T> {
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(&Answers) -> anyhow::Result<T> + Send + Sync + 'static,
    {
        Dynamic::Computed(Arc::new(f))
    }

    pub fn resolve(&self, answers: &Answers) -> Result<T> {
        match self {
            Dynamic::Literal(value) => Ok(value.clone()),
            Dynamic::Computed(f) => Ok(f(answers)?),
        }
    }
}

impl<T> From<T> for Dynamic<T> {
    fn from(value: T) -> Self {
        Dynamic::Literal(value)
    }
}

impl<T: Clone> Clone for Dynamic<T> {
    fn clone(&self) -> Self {
        match self {
            Dynamic::Literal(value) => Dynamic::Literal(value.clone()),
            Dynamic::Computed(f) => Dynamic::Computed(Arc::clone(f)),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Dynamic<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dynamic::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            Dynamic::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

/// Result of a validate callback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validity {
    Valid,
    /// Rejected; `None` is reported with the generic message.
    Invalid(Option<String>),
}

impl Validity {
    pub fn invalid(message: impl Into<String>) -> Self {
        Validity::Invalid(Some(message.into()))
    }
}

impl From<bool> for Validity {
    fn from(valid: bool) -> Self {
        if valid {
            Validity::Valid
        } else {
            Validity::Invalid(None)
        }
    }
}

impl From<&str> for Validity {
    fn from(message: &str) -> Self {
        Validity::invalid(message)
    }
}

impl From<String> for Validity {
    fn from(message: String) -> Self {
        Validity::Invalid(Some(message))
    }
}

/// Lifecycle of a running prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Pending,
    /// The user started typing; the default hint is no longer shown.
    Touched,
    /// Terminal state: the final frame has been drawn.
    Answered,
    /// Expand prompt only: the full option menu is visible.
    Expanded,
}

/// How a password prompt displays what is typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mask {
    /// Nothing is echoed.
    #[default]
    Hidden,
    /// Every character is replaced by the given one.
    Char(char),
    /// Masking explicitly disabled; the text is shown as typed.
    None,
}

impl Mask {
    pub fn apply(&self, text: &str) -> String {
        match self {
            Mask::Hidden => String::new(),
            Mask::Char(c) => text.chars().map(|_| *c).collect(),
            Mask::None => text.to_string(),
        }
    }
}
