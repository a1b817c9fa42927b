use super::{
    base::{answered, display_value},
    PromptCore, Step, Submission, Widget,
};
use crate::{
    answers::Answers,
    config::ResolvedQuestion,
    constants::messages,
    error::{Error, Result},
    events::PromptEvent,
    readline::LineSource,
};
use dialoguer::{console::style, Editor};
use log::debug;
use serde_json::Value;
use std::sync::Arc;

/// Something that lets the user edit text outside the terminal prompt.
pub trait ExternalEditor: Send + Sync {
    /// `postfix` is the file suffix hint (e.g. `.md`) for syntax detection.
    fn edit(&self, text: &str, postfix: &str) -> Result<String>;
}

/// Opens `$VISUAL`/`$EDITOR` through dialoguer.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerEditor;

impl ExternalEditor for DialoguerEditor {
    fn edit(&self, text: &str, postfix: &str) -> Result<String> {
        match Editor::new().extension(postfix).edit(text) {
            Ok(Some(edited)) => Ok(edited),
            // Closed without saving
            Ok(None) => Ok(text.to_string()),
            Err(err) => Err(Error::EditorError(err.to_string())),
        }
    }
}

/// Answers by editing text in the external editor.
pub struct EditorPrompt {
    core: PromptCore,
    editor: Arc<dyn ExternalEditor>,
    /// Text the editor opens with; the default at first, then the last edit
    text: String,
    answered: bool,
}

impl EditorPrompt {
    pub fn new(
        question: ResolvedQuestion,
        answers: &Answers,
        editor: Arc<dyn ExternalEditor>,
    ) -> Result<Self> {
        let core = PromptCore::new(question, answers)?;
        let text = core.question.default.as_ref().map(display_value).unwrap_or_default();
        Ok(Self { core, editor, text, answered: false })
    }

    fn launch(&mut self, source: &mut dyn LineSource) -> Step {
        debug!("Launching editor for '{}'", self.core.question.name);
        source.pause();
        let edited = self.editor.edit(&self.text, &self.core.question.postfix);
        source.resume();

        match edited {
            Ok(text) => {
                self.text = text.clone();
                Step::Submit(Submission::Value(Value::String(text)))
            }
            Err(err) => Step::Error(err.to_string()),
        }
    }
}

impl Widget for EditorPrompt {
    fn core(&self) -> &PromptCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        &mut self.core
    }

    fn start(&mut self, source: &mut dyn LineSource) -> Result<Step> {
        if self.core.question.wait_user_input {
            Ok(Step::Idle)
        } else {
            Ok(self.launch(source))
        }
    }

    fn render(&mut self, _line: &str) -> String {
        let mut message = self.core.question_line();
        if self.answered && self.core.is_answered() {
            message.push_str(&answered(messages::EDITOR_RECEIVED));
        } else {
            message.push_str(&style(messages::EDITOR_HINT).dim().to_string());
        }
        message
    }

    fn on_event(&mut self, event: PromptEvent, source: &mut dyn LineSource) -> Result<Step> {
        match event {
            PromptEvent::Line(_) => Ok(self.launch(source)),
            _ => Ok(Step::Idle),
        }
    }

    fn spinning_value(&self, _value: &Value) -> String {
        String::new()
    }

    fn on_accepted(&mut self, _value: &Value) {
        self.answered = true;
    }

    fn echoes_input(&self) -> bool {
        false
    }
}

impl std::fmt::Debug for EditorPrompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorPrompt")
            .field("core", &self.core)
            .field("text", &self.text)
            .finish_non_exhaustive()
    }
}
