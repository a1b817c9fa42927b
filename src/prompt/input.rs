use super::{
    base::{answered, display_value},
    PromptCore, Step, Submission, Widget,
};
use crate::{
    answers::Answers,
    config::{ResolvedQuestion, Status},
    error::Result,
    events::PromptEvent,
    readline::{Key, LineSource},
};
use serde_json::Value;

/// Free text input. An empty line submits the default.
#[derive(Debug)]
pub struct InputPrompt {
    core: PromptCore,
    /// Last submitted line, restored into the editor on rejection
    last_line: String,
    answer: Option<String>,
}

impl InputPrompt {
    pub fn new(question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        Ok(Self {
            core: PromptCore::new(question, answers)?,
            last_line: String::new(),
            answer: None,
        })
    }

    /// The value an entered line stands for.
    pub fn submitted_value(&self, line: &str) -> Value {
        if line.is_empty() {
            self.core.question.default.clone().unwrap_or_else(|| Value::String(String::new()))
        } else {
            Value::String(line.to_string())
        }
    }

    pub(crate) fn remember(&mut self, line: String) {
        self.last_line = line;
    }

    pub(crate) fn restore_line(&self, source: &mut dyn LineSource) {
        source.set_line(&self.last_line);
    }
}

impl Widget for InputPrompt {
    fn core(&self) -> &PromptCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        &mut self.core
    }

    fn render(&mut self, line: &str) -> String {
        let mut message = self.core.question_line();
        match &self.answer {
            Some(answer) if self.core.is_answered() => {
                message.push_str(&answered(&self.core.transform(answer, true)));
            }
            _ => message.push_str(&self.core.transform(line, false)),
        }
        message
    }

    fn on_event(&mut self, event: PromptEvent, source: &mut dyn LineSource) -> Result<Step> {
        match event {
            PromptEvent::Line(line) => {
                let value = self.submitted_value(&line);
                self.remember(line);
                Ok(Step::Submit(Submission::Value(value)))
            }
            // Tab on an empty line puts the default up for editing.
            PromptEvent::Keypress(Key::Tab) if source.line().is_empty() => {
                if let Some(Value::String(default)) = &self.core.question.default {
                    source.set_line(default);
                    self.core.default_hint = None;
                }
                self.core.status = Status::Touched;
                Ok(Step::Render(None))
            }
            _ => {
                self.core.status = Status::Touched;
                Ok(Step::Render(None))
            }
        }
    }

    fn on_rejected(&mut self, source: &mut dyn LineSource) {
        self.restore_line(source);
    }

    fn on_accepted(&mut self, value: &Value) {
        self.answer = Some(display_value(value));
    }
}
