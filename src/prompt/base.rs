use super::{Outcome, Step, Submission, SubmissionPipeline, Widget};
use crate::{
    answers::Answers,
    choice::ChoiceList,
    config::{ResolvedQuestion, Status},
    constants::glyphs,
    error::{Error, Result},
    events::next_event,
    readline::LineSource,
    screen::ScreenManager,
};
use dialoguer::console::style;
use log::debug;
use serde_json::Value;

/// State every widget embeds: the resolved question, the answers it was
/// resolved against and the lifecycle status.
#[derive(Debug)]
pub struct PromptCore {
    pub question: ResolvedQuestion,
    pub status: Status,
    pub answers: Answers,
    /// Shown dimmed after the message until the user starts typing
    pub default_hint: Option<String>,
    choices: Option<ChoiceList>,
}

impl PromptCore {
    pub fn new(question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        let choices = match &question.choices {
            Some(specs) => Some(ChoiceList::new(specs, answers)?),
            None => None,
        };
        Ok(Self {
            default_hint: question.default.as_ref().map(display_value),
            question,
            status: Status::Pending,
            answers: answers.clone(),
            choices,
        })
    }

    /// Hands the choice list over to the widget. Selection widgets cannot
    /// run without one.
    pub fn take_choices(&mut self) -> Result<ChoiceList> {
        self.choices.take().ok_or_else(|| Error::missing("choices"))
    }

    pub fn is_answered(&self) -> bool {
        self.status == Status::Answered
    }

    /// `prefix message suffix (default) `
    pub fn question_line(&self) -> String {
        let mut line = String::new();
        if !self.question.prefix.is_empty() {
            line.push_str(&self.question.prefix);
            line.push(' ');
        }
        line.push_str(&self.unprefixed_question_line());
        line
    }

    /// The question line without its prefix, used next to the spinner.
    pub fn unprefixed_question_line(&self) -> String {
        let mut line = format!(
            "{}{} ",
            style(&self.question.message).bold(),
            self.question.suffix
        );
        if let Some(hint) = &self.default_hint {
            if !matches!(self.status, Status::Touched | Status::Answered) {
                line.push_str(&style(format!("({hint}) ")).dim().to_string());
            }
        }
        line
    }

    /// Applies the display transformer, if any.
    pub fn transform(&self, text: &str, is_final: bool) -> String {
        match &self.question.transformer {
            Some(transformer) => transformer(text, &self.answers, is_final),
            None => text.to_string(),
        }
    }
}

/// Plain text form of an answer value.
pub fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Final answer as shown once the prompt is done.
pub(crate) fn answered(text: &str) -> String {
    style(text).cyan().to_string()
}

pub(crate) fn error_line(message: &str) -> String {
    format!("{} {message}", style(glyphs::ERROR_MARKER).red())
}

fn paint(
    widget: &mut dyn Widget,
    screen: &mut ScreenManager,
    source: &mut dyn LineSource,
    bottom: Option<&str>,
) -> Result<()> {
    let line = source.line().to_string();
    let content = widget.render(&line);
    screen.render(source, &content, bottom)
}

/// Runs `widget` until it produces an accepted answer.
///
/// The screen is closed on every exit path, including errors.
pub fn run_widget(widget: &mut dyn Widget, source: &mut dyn LineSource) -> Result<Value> {
    let mut screen = ScreenManager::new();
    if !widget.echoes_input() {
        screen = screen.without_echo();
    }

    let result = drive(widget, source, &mut screen);
    let closed = screen.close(source);
    let value = result?;
    closed?;
    Ok(value)
}

fn drive(
    widget: &mut dyn Widget,
    source: &mut dyn LineSource,
    screen: &mut ScreenManager,
) -> Result<Value> {
    let mut pipeline = SubmissionPipeline::for_question(&widget.core().question);
    let answers = widget.core().answers.clone();

    paint(widget, screen, source, None)?;
    let mut step = widget.start(source)?;
    loop {
        match step {
            Step::Idle => {}
            Step::Render(bottom) => paint(widget, screen, source, bottom.as_deref())?,
            Step::Error(message) => {
                widget.on_rejected(source);
                paint(widget, screen, source, Some(&error_line(&message)))?;
            }
            Step::Submit(Submission::Expand) => {
                widget.core_mut().status = Status::Expanded;
                paint(widget, screen, source, None)?;
            }
            Step::Submit(Submission::Value(raw)) => {
                let outcome = pipeline.process(raw, &answers, |value, stage| {
                    debug!("{stage:?} answer for '{}'", widget.core().question.name);
                    let content = format!(
                        "{}{}",
                        widget.core().unprefixed_question_line(),
                        widget.spinning_value(value)
                    );
                    screen.render_with_spinner(&mut *source, &content, None)
                })?;
                match outcome {
                    Some(Outcome::Accepted(value)) => {
                        widget.on_accepted(&value);
                        widget.core_mut().status = Status::Answered;
                        paint(widget, screen, source, None)?;
                        return Ok(value);
                    }
                    Some(Outcome::Rejected(message)) => {
                        debug!("Rejected answer for '{}': {message}", widget.core().question.name);
                        widget.on_rejected(source);
                        paint(widget, screen, source, Some(&error_line(&message)))?;
                    }
                    None => {}
                }
            }
        }
        step = widget.on_event(next_event(source)?, source)?;
    }
}
