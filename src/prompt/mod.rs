//! Interactive widgets and the machinery they share
//!
//! The module is structured in layers:
//! - `base`: `PromptCore` (question formatting, status) and the event loop
//!   that drives any widget through the submission pipeline
//! - `pipeline`: filter-then-validate processing of submissions
//! - one module per widget type
//! - `Registry`: maps question type names to widget constructors

use crate::{
    answers::Answers,
    config::ResolvedQuestion,
    constants::DEFAULT_PROMPT_TYPE,
    error::{Error, Result},
    events::PromptEvent,
    readline::LineSource,
};
use log::debug;
use serde_json::Value;
use std::{collections::HashMap, sync::Arc};

pub mod base;
pub mod checkbox;
pub mod confirm;
pub mod editor;
pub mod expand;
pub mod input;
pub mod list;
pub mod number;
pub mod password;
pub mod pipeline;
pub mod rawlist;

pub use base::{display_value, run_widget, PromptCore};
pub use checkbox::CheckboxPrompt;
pub use confirm::ConfirmPrompt;
pub use editor::{DialoguerEditor, EditorPrompt, ExternalEditor};
pub use expand::ExpandPrompt;
pub use input::InputPrompt;
pub use list::ListPrompt;
pub use number::NumberPrompt;
pub use password::PasswordPrompt;
pub use pipeline::{Outcome, Stage, SubmissionPipeline};
pub use rawlist::RawListPrompt;

/// What a widget asks the driving loop to do after an event.
#[derive(Debug, Clone, PartialEq)]
pub enum Step {
    /// Nothing changed on screen
    Idle,
    /// Redraw, with optional bottom content
    Render(Option<String>),
    Submit(Submission),
    /// Redraw with an error under the prompt, without running the pipeline
    Error(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    /// Run through filter and validate
    Value(Value),
    /// Expand prompt only: show every option instead of resolving
    Expand,
}

/// One interactive prompt type.
///
/// A widget only reacts to events and renders its state; the loop in
/// [`run_widget`] owns the screen and the submission pipeline.
pub trait Widget {
    fn core(&self) -> &PromptCore;
    fn core_mut(&mut self) -> &mut PromptCore;

    /// Called once, right after the first frame is drawn.
    fn start(&mut self, _source: &mut dyn LineSource) -> Result<Step> {
        Ok(Step::Idle)
    }

    /// Full content of the next frame. `line` is what is being typed.
    fn render(&mut self, line: &str) -> String;

    fn on_event(&mut self, event: PromptEvent, source: &mut dyn LineSource) -> Result<Step>;

    /// Text shown next to the spinner while a submission is processed.
    fn spinning_value(&self, value: &Value) -> String {
        display_value(value)
    }

    /// A submission was rejected; the error line is drawn next.
    fn on_rejected(&mut self, _source: &mut dyn LineSource) {}

    /// The submission was accepted; the final frame is drawn next.
    fn on_accepted(&mut self, _value: &Value) {}

    /// Whether the last rendered line ends with the typed text.
    fn echoes_input(&self) -> bool {
        true
    }
}

pub type WidgetFactory =
    Arc<dyn Fn(ResolvedQuestion, &Answers) -> Result<Box<dyn Widget>> + Send + Sync>;

/// Widget constructors by question type name.
pub struct Registry {
    factories: HashMap<String, WidgetFactory>,
}

fn input_widget(question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
    Ok(Box::new(InputPrompt::new(question, answers)?))
}

fn number_widget(question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
    Ok(Box::new(NumberPrompt::new(question, answers)?))
}

fn confirm_widget(question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
    Ok(Box::new(ConfirmPrompt::new(question, answers)?))
}

fn list_widget(question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
    Ok(Box::new(ListPrompt::new(question, answers)?))
}

fn rawlist_widget(question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
    Ok(Box::new(RawListPrompt::new(question, answers)?))
}

fn checkbox_widget(question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
    Ok(Box::new(CheckboxPrompt::new(question, answers)?))
}

fn expand_widget(question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
    Ok(Box::new(ExpandPrompt::new(question, answers)?))
}

fn password_widget(question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
    Ok(Box::new(PasswordPrompt::new(question, answers)?))
}

impl Registry {
    /// A registry with every built-in widget. The editor widget uses
    /// [`DialoguerEditor`].
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("input", input_widget);
        registry.register("number", number_widget);
        registry.register("confirm", confirm_widget);
        registry.register("list", list_widget);
        registry.register("rawlist", rawlist_widget);
        registry.register("checkbox", checkbox_widget);
        registry.register("expand", expand_widget);
        registry.register("password", password_widget);
        registry.set_editor(Arc::new(DialoguerEditor));
        registry
    }

    pub fn empty() -> Self {
        Self { factories: HashMap::new() }
    }

    /// Adds a widget type, replacing any existing one with that name.
    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn(ResolvedQuestion, &Answers) -> Result<Box<dyn Widget>> + Send + Sync + 'static,
    {
        self.factories.insert(name.to_string(), Arc::new(factory));
    }

    /// Registers the `editor` widget backed by `editor`.
    pub fn set_editor(&mut self, editor: Arc<dyn ExternalEditor>) {
        self.register("editor", move |question, answers| {
            let widget: Box<dyn Widget> =
                Box::new(EditorPrompt::new(question, answers, Arc::clone(&editor))?);
            Ok(widget)
        });
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Constructs the widget for `question`. Unknown types get the plain
    /// input widget.
    pub fn build(&self, question: ResolvedQuestion, answers: &Answers) -> Result<Box<dyn Widget>> {
        let factory = match self.factories.get(&question.r#type) {
            Some(factory) => factory,
            None => {
                debug!(
                    "No widget registered for type '{}', using '{DEFAULT_PROMPT_TYPE}'",
                    question.r#type
                );
                self.factories.get(DEFAULT_PROMPT_TYPE).ok_or_else(|| {
                    Error::ConfigError(format!(
                        "No widget registered for type '{}'",
                        question.r#type
                    ))
                })?
            }
        };
        factory(question, answers)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Question;

    fn resolved(r#type: &str) -> ResolvedQuestion {
        Question::new(r#type, "q").resolve(&Answers::new()).unwrap()
    }

    #[test]
    fn test_registers_every_builtin() {
        let registry = Registry::new();
        for name in [
            "input", "number", "confirm", "list", "rawlist", "checkbox", "expand", "password",
            "editor",
        ] {
            assert!(registry.contains(name), "{name} missing");
        }
    }

    #[test]
    fn test_unknown_types_fall_back_to_input() {
        let registry = Registry::new();
        let widget = registry.build(resolved("nonsense"), &Answers::new()).unwrap();
        assert_eq!(widget.core().question.r#type, "nonsense");
        assert!(widget.echoes_input());
    }

    #[test]
    fn test_empty_registry_cannot_build() {
        let registry = Registry::empty();
        assert!(matches!(
            registry.build(resolved("input"), &Answers::new()),
            Err(Error::ConfigError(_))
        ));
    }

    #[test]
    fn test_selection_widgets_need_choices() {
        let registry = Registry::new();
        for name in ["list", "rawlist", "checkbox", "expand"] {
            assert!(matches!(
                registry.build(resolved(name), &Answers::new()),
                Err(Error::MissingParameter { .. })
            ));
        }
    }
}
