use super::{input::InputPrompt, PromptCore, Step, Submission, Widget};
use crate::{
    answers::Answers,
    config::ResolvedQuestion,
    constants::messages,
    error::Result,
    events::PromptEvent,
    readline::LineSource,
};
use serde_json::{Number, Value};

/// Input that only accepts numbers. Integers stay integers.
#[derive(Debug)]
pub struct NumberPrompt {
    input: InputPrompt,
}

impl NumberPrompt {
    pub fn new(question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        Ok(Self { input: InputPrompt::new(question, answers)? })
    }
}

/// Parses `text` as an integer, or else as a finite float.
pub fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if let Ok(int) = text.parse::<i64>() {
        return Some(Value::Number(int.into()));
    }
    text.parse::<f64>().ok().and_then(Number::from_f64).map(Value::Number)
}

impl Widget for NumberPrompt {
    fn core(&self) -> &PromptCore {
        self.input.core()
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        self.input.core_mut()
    }

    fn render(&mut self, line: &str) -> String {
        self.input.render(line)
    }

    fn on_event(&mut self, event: PromptEvent, source: &mut dyn LineSource) -> Result<Step> {
        let PromptEvent::Line(line) = event else {
            return self.input.on_event(event, source);
        };

        let value = if line.trim().is_empty() {
            self.input.submitted_value("")
        } else {
            match parse_number(&line) {
                Some(number) => number,
                None => {
                    self.input.remember(line);
                    return Ok(Step::Error(messages::INVALID_NUMBER.to_string()));
                }
            }
        };
        self.input.remember(line);
        Ok(Step::Submit(Submission::Value(value)))
    }

    fn on_rejected(&mut self, source: &mut dyn LineSource) {
        self.input.on_rejected(source);
    }

    fn on_accepted(&mut self, value: &Value) {
        self.input.on_accepted(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Question, prompt::run_widget, readline::ScriptedLineSource};
    use serde_json::json;

    #[test]
    fn test_parses_integers_and_floats() {
        assert_eq!(parse_number("42"), Some(json!(42)));
        assert_eq!(parse_number(" -3 "), Some(json!(-3)));
        assert_eq!(parse_number("2.5"), Some(json!(2.5)));
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("abc"), None);
    }

    #[test]
    fn test_invalid_number_is_reported_until_fixed() {
        let answers = Answers::new();
        let question = Question::new("number", "age").with_default(30);
        let mut widget =
            NumberPrompt::new(question.resolve(&answers).unwrap(), &answers).unwrap();
        // The bad text is restored, so it has to be erased before retrying.
        let mut source = ScriptedLineSource::from_lines(["x"]);
        source.push_key(crate::readline::Key::Backspace);
        source.type_line("7");

        assert_eq!(run_widget(&mut widget, &mut source).unwrap(), json!(7));
        assert!(source.plain_output().contains(messages::INVALID_NUMBER));
    }

    #[test]
    fn test_empty_line_uses_the_default() {
        let answers = Answers::new();
        let question = Question::new("number", "age").with_default(30);
        let mut widget =
            NumberPrompt::new(question.resolve(&answers).unwrap(), &answers).unwrap();
        let mut source = ScriptedLineSource::from_lines([""]);

        assert_eq!(run_widget(&mut widget, &mut source).unwrap(), json!(30));
    }
}
