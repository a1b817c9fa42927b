//! Question descriptors and their resolution against the current answers

use crate::{
    answers::Answers,
    choice::ChoiceSpec,
    config::types::{
        Dynamic, FilterFn, Mask, TransformerFn, ValidateFn, Validity,
    },
    constants::{DEFAULT_PAGE_SIZE, DEFAULT_PROMPT_TYPE},
    error::{Error, Result},
};
use serde_json::Value;
use std::{fmt, sync::Arc};

/// A single question as supplied by the caller.
///
/// Fields that may depend on earlier answers (`message`, `default`,
/// `choices`, `when`) are [`Dynamic`] and are only resolved when the
/// question's turn comes.
#[derive(Clone)]
pub struct Question {
    /// Prompt type name, looked up in the widget registry
    pub r#type: String,
    /// Answer key; dotted/bracketed paths nest the answer
    pub name: String,
    pub message: Option<Dynamic<String>>,
    pub default: Option<Dynamic<Value>>,
    pub choices: Option<Dynamic<Vec<ChoiceSpec>>>,
    pub when: Dynamic<bool>,
    pub validate: Option<ValidateFn>,
    pub filter: Option<FilterFn>,
    pub transformer: Option<TransformerFn>,
    pub page_size: Option<usize>,
    /// Wrap-around navigation and paging
    pub r#loop: bool,
    pub prefix: String,
    pub suffix: String,
    /// Password prompts only
    pub mask: Mask,
    /// Ask even if the answer set already holds a value for `name`
    pub ask_answered: bool,
    /// Editor prompts only: suffix of the temporary file
    pub postfix: String,
    /// Editor prompts only: wait for <enter> before launching the editor
    pub wait_user_input: bool,
}

impl Question {
    pub fn new(r#type: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            r#type: r#type.into(),
            name: name.into(),
            message: None,
            default: None,
            choices: None,
            when: Dynamic::Literal(true),
            validate: None,
            filter: None,
            transformer: None,
            page_size: None,
            r#loop: true,
            prefix: String::new(),
            suffix: String::new(),
            mask: Mask::default(),
            ask_answered: false,
            postfix: ".txt".to_string(),
            wait_user_input: true,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(Dynamic::Literal(message.into()));
        self
    }

    pub fn with_message_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Answers) -> anyhow::Result<String> + Send + Sync + 'static,
    {
        self.message = Some(Dynamic::computed(f));
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(Dynamic::Literal(default.into()));
        self
    }

    pub fn with_default_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Answers) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.default = Some(Dynamic::computed(f));
        self
    }

    pub fn with_choices<I, C>(mut self, choices: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<ChoiceSpec>,
    {
        let choices = choices.into_iter().map(Into::into).collect();
        self.choices = Some(Dynamic::Literal(choices));
        self
    }

    pub fn with_choices_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Answers) -> anyhow::Result<Vec<ChoiceSpec>> + Send + Sync + 'static,
    {
        self.choices = Some(Dynamic::computed(f));
        self
    }

    pub fn with_when(mut self, when: bool) -> Self {
        self.when = Dynamic::Literal(when);
        self
    }

    pub fn with_when_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&Answers) -> anyhow::Result<bool> + Send + Sync + 'static,
    {
        self.when = Dynamic::computed(f);
        self
    }

    pub fn with_validate<F, V>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Answers) -> anyhow::Result<V> + Send + Sync + 'static,
        V: Into<Validity>,
    {
        self.validate = Some(Arc::new(
            move |value: &Value, answers: &Answers| -> anyhow::Result<Validity> {
                Ok(f(value, answers)?.into())
            },
        ));
        self
    }

    pub fn with_filter<F>(mut self, f: F) -> Self
    where
        F: Fn(Value, &Answers) -> anyhow::Result<Value> + Send + Sync + 'static,
    {
        self.filter = Some(Arc::new(f));
        self
    }

    pub fn with_transformer<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &Answers, bool) -> String + Send + Sync + 'static,
    {
        self.transformer = Some(Arc::new(f));
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_loop(mut self, looping: bool) -> Self {
        self.r#loop = looping;
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn with_mask(mut self, mask: Mask) -> Self {
        self.mask = mask;
        self
    }

    pub fn with_ask_answered(mut self, ask_answered: bool) -> Self {
        self.ask_answered = ask_answered;
        self
    }

    pub fn with_postfix(mut self, postfix: impl Into<String>) -> Self {
        self.postfix = postfix.into();
        self
    }

    pub fn with_wait_user_input(mut self, wait: bool) -> Self {
        self.wait_user_input = wait;
        self
    }

    /// Evaluates the `when` gate.
    pub fn is_enabled(&self, answers: &Answers) -> Result<bool> {
        self.when.resolve(answers)
    }

    /// Resolves `message`, `default` and `choices`, in that order, into the
    /// immutable configuration a widget is built from.
    pub fn resolve(&self, answers: &Answers) -> Result<ResolvedQuestion> {
        if self.name.trim().is_empty() {
            return Err(Error::missing("name"));
        }
        if self.page_size == Some(0) {
            return Err(Error::ConfigError("`page_size` must be at least 1".to_string()));
        }

        let message = match &self.message {
            Some(message) => message.resolve(answers)?,
            None => format!("{}:", self.name),
        };
        let default = match &self.default {
            Some(default) => Some(default.resolve(answers)?).filter(|v| !v.is_null()),
            None => None,
        };
        let choices = match &self.choices {
            Some(choices) => Some(choices.resolve(answers)?),
            None => None,
        };

        let r#type = if self.r#type.trim().is_empty() {
            DEFAULT_PROMPT_TYPE.to_string()
        } else {
            self.r#type.clone()
        };

        Ok(ResolvedQuestion {
            r#type,
            name: self.name.clone(),
            message,
            default,
            choices,
            validate: self.validate.clone(),
            filter: self.filter.clone(),
            transformer: self.transformer.clone(),
            page_size: self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
            r#loop: self.r#loop,
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            mask: self.mask,
            postfix: self.postfix.clone(),
            wait_user_input: self.wait_user_input,
        })
    }
}

impl fmt::Debug for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Question")
            .field("type", &self.r#type)
            .field("name", &self.name)
            .field("message", &self.message)
            .field("default", &self.default)
            .field("choices", &self.choices)
            .field("when", &self.when)
            .field("page_size", &self.page_size)
            .field("loop", &self.r#loop)
            .field("ask_answered", &self.ask_answered)
            .finish_non_exhaustive()
    }
}

/// A question with every dynamic field resolved. Built once per run of a
/// question and never mutated afterwards.
#[derive(Clone)]
pub struct ResolvedQuestion {
    pub r#type: String,
    pub name: String,
    pub message: String,
    pub default: Option<Value>,
    pub choices: Option<Vec<ChoiceSpec>>,
    pub validate: Option<ValidateFn>,
    pub filter: Option<FilterFn>,
    pub transformer: Option<TransformerFn>,
    pub page_size: usize,
    pub r#loop: bool,
    pub prefix: String,
    pub suffix: String,
    pub mask: Mask,
    pub postfix: String,
    pub wait_user_input: bool,
}

impl fmt::Debug for ResolvedQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedQuestion")
            .field("type", &self.r#type)
            .field("name", &self.name)
            .field("message", &self.message)
            .field("default", &self.default)
            .field("choices", &self.choices)
            .field("page_size", &self.page_size)
            .field("loop", &self.r#loop)
            .finish_non_exhaustive()
    }
}
