use super::{base::answered, PromptCore, Step, Submission, Widget};
use crate::{
    answers::Answers,
    config::{ResolvedQuestion, Status},
    error::Result,
    events::PromptEvent,
    readline::LineSource,
};
use serde_json::Value;

/// Yes/no question.
#[derive(Debug)]
pub struct ConfirmPrompt {
    core: PromptCore,
    default: bool,
    answer: Option<bool>,
}

impl ConfirmPrompt {
    pub fn new(question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        // Anything but an explicit `false` defaults to yes.
        let default = !matches!(question.default, Some(Value::Bool(false)));
        let mut core = PromptCore::new(question, answers)?;
        core.default_hint = Some(if default { "Y/n" } else { "y/N" }.to_string());
        Ok(Self { core, default, answer: None })
    }

    /// `y`/`yes` and `n`/`no` prefixes, case-insensitive. Anything else,
    /// including an empty line, is the default.
    pub fn interpret(&self, line: &str) -> bool {
        let line = line.trim().to_lowercase();
        if line.starts_with('y') {
            true
        } else if line.starts_with('n') {
            false
        } else {
            self.default
        }
    }
}

impl Widget for ConfirmPrompt {
    fn core(&self) -> &PromptCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        &mut self.core
    }

    fn render(&mut self, line: &str) -> String {
        let mut message = self.core.question_line();
        match self.answer {
            Some(answer) if self.core.is_answered() => {
                message.push_str(&answered(if answer { "Yes" } else { "No" }));
            }
            _ => message.push_str(line),
        }
        message
    }

    fn on_event(&mut self, event: PromptEvent, _source: &mut dyn LineSource) -> Result<Step> {
        match event {
            PromptEvent::Line(line) => {
                Ok(Step::Submit(Submission::Value(Value::Bool(self.interpret(&line)))))
            }
            _ => {
                self.core.status = Status::Touched;
                Ok(Step::Render(None))
            }
        }
    }

    fn on_accepted(&mut self, value: &Value) {
        self.answer = Some(value.as_bool().unwrap_or(self.default));
    }
}
