use super::{
    base::{answered, display_value},
    input::InputPrompt,
    PromptCore, Step, Widget,
};
use crate::{
    answers::Answers,
    config::{Mask, ResolvedQuestion},
    constants::messages,
    error::Result,
    events::PromptEvent,
    readline::LineSource,
};
use dialoguer::console::style;
use serde_json::Value;

/// Input whose text is masked on screen. The stored answer is the plain
/// text.
#[derive(Debug)]
pub struct PasswordPrompt {
    input: InputPrompt,
    mask: Mask,
    answer: Option<String>,
}

impl PasswordPrompt {
    pub fn new(question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        let mask = question.mask;
        let mut input = InputPrompt::new(question, answers)?;
        let core = input.core_mut();
        if core.default_hint.is_some() {
            core.default_hint = Some(messages::HIDDEN_DEFAULT.to_string());
        }
        Ok(Self { input, mask, answer: None })
    }
}

impl Widget for PasswordPrompt {
    fn core(&self) -> &PromptCore {
        self.input.core()
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        self.input.core_mut()
    }

    fn render(&mut self, line: &str) -> String {
        let mut message = self.core().question_line();
        match &self.answer {
            Some(answer) if self.core().is_answered() => {
                let shown = match self.mask {
                    Mask::Hidden => style(messages::HIDDEN_DEFAULT).dim().to_string(),
                    mask => answered(&mask.apply(answer)),
                };
                message.push_str(&shown);
            }
            _ => message.push_str(&self.mask.apply(line)),
        }
        message
    }

    fn on_event(&mut self, event: PromptEvent, source: &mut dyn LineSource) -> Result<Step> {
        self.input.on_event(event, source)
    }

    fn spinning_value(&self, value: &Value) -> String {
        self.mask.apply(&display_value(value))
    }

    fn on_rejected(&mut self, source: &mut dyn LineSource) {
        self.input.on_rejected(source);
    }

    fn on_accepted(&mut self, value: &Value) {
        self.answer = Some(display_value(value));
    }

    fn echoes_input(&self) -> bool {
        self.mask != Mask::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Question, prompt::run_widget, readline::ScriptedLineSource};
    use serde_json::json;

    fn prompt(question: Question) -> PasswordPrompt {
        let answers = Answers::new();
        PasswordPrompt::new(question.resolve(&answers).unwrap(), &answers).unwrap()
    }

    #[test]
    fn test_stores_plain_text_but_shows_mask() {
        let mut widget = prompt(Question::new("password", "pw").with_mask(Mask::Char('*')));
        let mut source = ScriptedLineSource::from_lines(["hunter"]);

        assert_eq!(run_widget(&mut widget, &mut source).unwrap(), json!("hunter"));
        let output = source.plain_output();
        assert!(output.contains("******"));
        assert!(!output.contains("hunter"));
    }

    #[test]
    fn test_hidden_mask_echoes_nothing() {
        let mut widget = prompt(Question::new("password", "pw"));
        let mut source = ScriptedLineSource::from_lines(["secret"]);

        assert_eq!(run_widget(&mut widget, &mut source).unwrap(), json!("secret"));
        let output = source.plain_output();
        assert!(!output.contains("secret"));
        assert!(!output.contains('*'));
        assert!(output.contains("[hidden]"));
        assert!(!widget.echoes_input());
    }

    #[test]
    fn test_unmasked_shows_text() {
        let mut widget = prompt(Question::new("password", "pw").with_mask(Mask::None));
        let mut source = ScriptedLineSource::from_lines(["visible"]);

        run_widget(&mut widget, &mut source).unwrap();
        assert!(source.plain_output().contains("visible"));
    }

    #[test]
    fn test_default_is_never_shown() {
        let widget = prompt(Question::new("password", "pw").with_default("s3cret"));
        let line = dialoguer::console::strip_ansi_codes(&widget.core().question_line()).to_string();
        assert!(line.contains("([hidden])"));
        assert!(!line.contains("s3cret"));
    }

    #[test]
    fn test_empty_line_submits_the_default() {
        let mut widget = prompt(Question::new("password", "pw").with_default("s3cret"));
        let mut source = ScriptedLineSource::from_lines([""]);
        assert_eq!(run_widget(&mut widget, &mut source).unwrap(), json!("s3cret"));
    }
}
