use super::{base::answered, PromptCore, Step, Submission, Widget};
use crate::{
    answers::Answers,
    choice::{ChoiceItem, ChoiceList},
    config::ResolvedQuestion,
    constants::messages,
    error::Result,
    events::PromptEvent,
    navigation::{increment, Direction},
    paginator::Paginator,
    readline::LineSource,
};
use dialoguer::console::style;
use serde_json::Value;

/// Numbered list answered by typing the index of a choice.
#[derive(Debug)]
pub struct RawListPrompt {
    core: PromptCore,
    choices: ChoiceList,
    /// Choice index matching the typed line, if any
    selected: Option<usize>,
    default_index: usize,
    paginator: Paginator,
    answer: Option<String>,
}

impl RawListPrompt {
    pub fn new(question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        let mut core = PromptCore::new(question, answers)?;
        let choices = core.take_choices()?;
        let default_index = core
            .question
            .default
            .as_ref()
            .and_then(|default| choices.index_of_default(default))
            .unwrap_or(0);
        core.default_hint = None;
        let paginator = Paginator::new(core.question.r#loop);
        Ok(Self {
            core,
            choices,
            selected: Some(default_index),
            default_index,
            paginator,
            answer: None,
        })
    }

    /// Choice index a submitted line refers to. Indices are 1-based; an
    /// empty line keeps the current selection.
    fn resolve_line(&self, line: &str) -> Option<usize> {
        let line = line.trim();
        let index = if line.is_empty() {
            self.selected.unwrap_or(self.default_index)
        } else {
            line.parse::<usize>().ok()?.checked_sub(1)?
        };
        self.choices
            .get_choice(index)
            .filter(|choice| !choice.is_disabled())
            .map(|_| index)
    }

    fn render_choices(&self) -> String {
        let mut lines = Vec::with_capacity(self.choices.len());
        let mut index = 0;
        for item in self.choices.items() {
            match item {
                ChoiceItem::Separator(separator) => {
                    lines.push(format!("   {}", style(&separator.line).dim()));
                }
                ChoiceItem::Choice(choice) => {
                    let mut line = format!("  {}) {}", index + 1, choice.name);
                    if let Some(reason) = &choice.disabled {
                        line = style(format!("{line} ({reason})")).dim().to_string();
                    } else if Some(index) == self.selected {
                        line = style(line).cyan().to_string();
                    }
                    lines.push(line);
                    index += 1;
                }
            }
        }
        lines.join("\n")
    }
}

impl Widget for RawListPrompt {
    fn core(&self) -> &PromptCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        &mut self.core
    }

    fn render(&mut self, line: &str) -> String {
        let mut message = self.core.question_line();
        if let (true, Some(answer)) = (self.core.is_answered(), &self.answer) {
            message.push_str(&answered(answer));
            return message;
        }

        let choices = self.render_choices();
        let active = self.selected.and_then(|index| self.choices.slot_of(index)).unwrap_or(0);
        message.push('\n');
        message.push_str(&self.paginator.paginate(&choices, active, self.core.question.page_size));
        message.push_str(&format!("\n  {} {line}", messages::RAWLIST_ANSWER));
        message
    }

    fn on_event(&mut self, event: PromptEvent, source: &mut dyn LineSource) -> Result<Step> {
        match event {
            PromptEvent::Line(line) => Ok(match self.resolve_line(&line) {
                Some(index) => {
                    self.selected = Some(index);
                    let value = self.choices.get_choice(index).map(|c| c.value.clone());
                    Step::Submit(Submission::Value(value.unwrap_or(Value::Null)))
                }
                None => Step::Error(messages::INVALID_INDEX.to_string()),
            }),
            PromptEvent::Up | PromptEvent::Down => {
                let direction =
                    if event == PromptEvent::Up { Direction::Up } else { Direction::Down };
                let current = self.selected.unwrap_or(self.default_index);
                let index = increment(current, direction, &self.choices, self.core.question.r#loop);
                self.selected = Some(index);
                source.set_line(&(index + 1).to_string());
                Ok(Step::Render(None))
            }
            _ => {
                let line = source.line().trim();
                self.selected = if line.is_empty() {
                    None
                } else {
                    line.parse::<usize>()
                        .ok()
                        .and_then(|n| n.checked_sub(1))
                        .filter(|&index| index < self.choices.real_len())
                };
                Ok(Step::Render(None))
            }
        }
    }

    fn on_accepted(&mut self, _value: &Value) {
        self.answer = self
            .selected
            .and_then(|index| self.choices.get_choice(index))
            .map(|choice| choice.short.clone());
    }
}
