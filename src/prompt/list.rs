use super::{base::answered, PromptCore, Step, Submission, Widget};
use crate::{
    answers::Answers,
    choice::{ChoiceItem, ChoiceList},
    config::ResolvedQuestion,
    constants::{glyphs, messages},
    error::Result,
    events::PromptEvent,
    navigation::{first_selectable, increment, Direction},
    paginator::Paginator,
    readline::LineSource,
};
use dialoguer::console::style;
use serde_json::Value;

/// Single selection moved with the arrow keys.
#[derive(Debug)]
pub struct ListPrompt {
    core: PromptCore,
    choices: ChoiceList,
    selected: usize,
    paginator: Paginator,
    /// The navigation hint is shown until the pointer first moves
    first_render: bool,
}

impl ListPrompt {
    pub fn new(question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        let mut core = PromptCore::new(question, answers)?;
        let choices = core.take_choices()?;
        let selected = core
            .question
            .default
            .as_ref()
            .and_then(|default| choices.index_of_default(default))
            .filter(|&index| choices.get_choice(index).is_some_and(|c| !c.is_disabled()))
            .or_else(|| first_selectable(&choices))
            .unwrap_or(0);
        // The default is expressed by the pointer position.
        core.default_hint = None;
        let paginator = Paginator::new(core.question.r#loop);
        Ok(Self { core, choices, selected, paginator, first_render: true })
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    fn render_choices(&self) -> String {
        let mut lines = Vec::with_capacity(self.choices.len());
        let mut index = 0;
        for item in self.choices.items() {
            match item {
                ChoiceItem::Separator(separator) => {
                    lines.push(format!("  {}", style(&separator.line).dim()));
                }
                ChoiceItem::Choice(choice) => {
                    let line = if let Some(reason) = &choice.disabled {
                        style(format!("  - {} ({reason})", choice.name)).dim().to_string()
                    } else if index == self.selected {
                        style(format!("{} {}", glyphs::POINTER, choice.name)).cyan().to_string()
                    } else {
                        format!("  {}", choice.name)
                    };
                    lines.push(line);
                    index += 1;
                }
            }
        }
        lines.join("\n")
    }
}

impl Widget for ListPrompt {
    fn core(&self) -> &PromptCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        &mut self.core
    }

    fn render(&mut self, _line: &str) -> String {
        let mut message = self.core.question_line();
        if self.core.is_answered() {
            let short = self.choices.get_choice(self.selected).map(|c| c.short.as_str());
            message.push_str(&answered(short.unwrap_or_default()));
            return message;
        }
        if self.first_render {
            message.push_str(&style(messages::LIST_HINT).dim().to_string());
        }
        let choices = self.render_choices();
        let active = self.choices.slot_of(self.selected).unwrap_or(0);
        let page = self.paginator.paginate(&choices, active, self.core.question.page_size);
        message.push('\n');
        message.push_str(&page);
        message
    }

    fn on_event(&mut self, event: PromptEvent, _source: &mut dyn LineSource) -> Result<Step> {
        let looping = self.core.question.r#loop;
        match event {
            PromptEvent::Up | PromptEvent::Down => {
                let direction =
                    if event == PromptEvent::Up { Direction::Up } else { Direction::Down };
                self.selected = increment(self.selected, direction, &self.choices, looping);
            }
            PromptEvent::Number(number) => {
                let index = number as usize - 1;
                match self.choices.get_choice(index) {
                    Some(choice) if !choice.is_disabled() => self.selected = index,
                    _ => return Ok(Step::Idle),
                }
            }
            PromptEvent::Line(_) => {
                return Ok(match self.choices.get_choice(self.selected) {
                    Some(choice) if !choice.is_disabled() => {
                        Step::Submit(Submission::Value(choice.value.clone()))
                    }
                    _ => Step::Error(messages::INVALID_ANSWER.to_string()),
                });
            }
            _ => return Ok(Step::Idle),
        }
        self.first_render = false;
        Ok(Step::Render(None))
    }

    fn echoes_input(&self) -> bool {
        false
    }

    fn on_accepted(&mut self, _value: &Value) {
        self.first_render = false;
    }
}
