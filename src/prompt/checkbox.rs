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

/// Multiple selection. The answer lists the checked values in choice order.
#[derive(Debug)]
pub struct CheckboxPrompt {
    core: PromptCore,
    choices: ChoiceList,
    pointer: usize,
    paginator: Paginator,
    /// Usage hint shown until the first toggle
    show_hint: bool,
    answer: Option<String>,
}

impl CheckboxPrompt {
    pub fn new(question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        let mut core = PromptCore::new(question, answers)?;
        let mut choices = core.take_choices()?;
        if let Some(Value::Array(defaults)) = &core.question.default {
            for choice in choices.choices_mut() {
                if defaults.contains(&choice.value) {
                    choice.checked = true;
                }
            }
        }
        core.default_hint = None;
        let pointer = first_selectable(&choices).unwrap_or(0);
        let paginator = Paginator::new(core.question.r#loop);
        Ok(Self { core, choices, pointer, paginator, show_hint: true, answer: None })
    }

    pub fn choices(&self) -> &ChoiceList {
        &self.choices
    }

    /// Flips one choice. Disabled choices never change.
    pub fn toggle(&mut self, index: usize) {
        if let Some(choice) = self.choices.get_choice_mut(index) {
            if !choice.is_disabled() {
                choice.checked = !choice.checked;
            }
        }
    }

    /// Checks every enabled choice, unless all of them already are, in
    /// which case they are all unchecked.
    pub fn toggle_all(&mut self) {
        let any_unchecked = self.choices.choices().any(|c| !c.is_disabled() && !c.checked);
        for choice in self.choices.choices_mut().filter(|c| !c.is_disabled()) {
            choice.checked = any_unchecked;
        }
    }

    pub fn invert(&mut self) {
        for choice in self.choices.choices_mut().filter(|c| !c.is_disabled()) {
            choice.checked = !choice.checked;
        }
    }

    /// Values of the checked, enabled choices.
    pub fn selection(&self) -> Vec<Value> {
        self.choices
            .filter(|c| c.checked && !c.is_disabled())
            .into_iter()
            .map(|c| c.value.clone())
            .collect()
    }

    fn render_choices(&self) -> String {
        let mut lines = Vec::with_capacity(self.choices.len());
        let mut index = 0;
        for item in self.choices.items() {
            match item {
                ChoiceItem::Separator(separator) => {
                    lines.push(format!(" {}", style(&separator.line).dim()));
                }
                ChoiceItem::Choice(choice) => {
                    let line = if let Some(reason) = &choice.disabled {
                        style(format!(" - {} ({reason})", choice.name)).dim().to_string()
                    } else {
                        let mark = if choice.checked {
                            style(glyphs::CHECKED).green().to_string()
                        } else {
                            glyphs::UNCHECKED.to_string()
                        };
                        if index == self.pointer {
                            format!("{}{mark} {}", style(glyphs::POINTER).cyan(), style(&choice.name).cyan())
                        } else {
                            format!(" {mark} {}", choice.name)
                        }
                    };
                    lines.push(line);
                    index += 1;
                }
            }
        }
        lines.join("\n")
    }
}

impl Widget for CheckboxPrompt {
    fn core(&self) -> &PromptCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        &mut self.core
    }

    fn render(&mut self, _line: &str) -> String {
        let mut message = self.core.question_line();
        if let (true, Some(answer)) = (self.core.is_answered(), &self.answer) {
            message.push_str(&answered(answer));
            return message;
        }
        if self.show_hint {
            message.push_str(&style(messages::CHECKBOX_HINT).dim().to_string());
        }
        let choices = self.render_choices();
        let active = self.choices.slot_of(self.pointer).unwrap_or(0);
        message.push('\n');
        message.push_str(&self.paginator.paginate(&choices, active, self.core.question.page_size));
        message
    }

    fn on_event(&mut self, event: PromptEvent, _source: &mut dyn LineSource) -> Result<Step> {
        let looping = self.core.question.r#loop;
        match event {
            PromptEvent::Line(_) => {
                return Ok(Step::Submit(Submission::Value(Value::Array(self.selection()))));
            }
            PromptEvent::Up => {
                self.pointer = increment(self.pointer, Direction::Up, &self.choices, looping);
            }
            PromptEvent::Down => {
                self.pointer = increment(self.pointer, Direction::Down, &self.choices, looping);
            }
            PromptEvent::Space => {
                self.toggle(self.pointer);
                self.show_hint = false;
            }
            PromptEvent::Number(number) => {
                let index = number as usize - 1;
                match self.choices.get_choice(index) {
                    Some(choice) if !choice.is_disabled() => {}
                    _ => return Ok(Step::Idle),
                }
                self.pointer = index;
                self.toggle(index);
                self.show_hint = false;
            }
            PromptEvent::Letter('a') => {
                self.toggle_all();
                self.show_hint = false;
            }
            PromptEvent::Letter('i') => {
                self.invert();
                self.show_hint = false;
            }
            _ => return Ok(Step::Idle),
        }
        Ok(Step::Render(None))
    }

    fn on_accepted(&mut self, _value: &Value) {
        let shorts: Vec<&str> = self
            .choices
            .filter(|c| c.checked && !c.is_disabled())
            .into_iter()
            .map(|c| c.short.as_str())
            .collect();
        self.answer = Some(shorts.join(", "));
    }

    fn echoes_input(&self) -> bool {
        false
    }
}
