use super::{base::answered, PromptCore, Step, Submission, Widget};
use crate::{
    answers::Answers,
    choice::{ChoiceItem, ChoiceList, ChoiceOptions, ChoiceSpec},
    config::{ResolvedQuestion, Status},
    constants::{glyphs, keys, messages},
    error::{Error, Result},
    events::PromptEvent,
    paginator::Paginator,
    readline::LineSource,
};
use dialoguer::console::style;
use serde_json::Value;
use std::collections::HashSet;

/// Compact single-key selection. `h` expands the full option list.
#[derive(Debug)]
pub struct ExpandPrompt {
    core: PromptCore,
    choices: ChoiceList,
    /// Key submitted by an empty line
    default_key: String,
    selected: Option<usize>,
    paginator: Paginator,
}

/// Keys must be single characters, unique and never the help key.
/// Keys are lowercased in place.
fn validate_keys(specs: &mut [ChoiceSpec]) -> Result<()> {
    let mut format_error = false;
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for spec in specs.iter_mut() {
        let ChoiceSpec::Choice(options) = spec else { continue };
        let key = options.key.as_deref().unwrap_or_default().to_lowercase();
        if key.chars().count() != 1 {
            format_error = true;
        }
        if !seen.insert(key.clone()) && !duplicates.contains(&key) {
            duplicates.push(key.clone());
        }
        options.key = Some(key);
    }

    if format_error {
        return Err(Error::ConfigError(
            "Format error: `key` param must be a single letter and is required.".to_string(),
        ));
    }
    if seen.contains(keys::HELP.to_string().as_str()) {
        return Err(Error::ConfigError(format!(
            "Reserved key error: `key` param cannot be `{}` - this value is reserved.",
            keys::HELP
        )));
    }
    if !duplicates.is_empty() {
        return Err(Error::ConfigError(format!(
            "Duplicate key error: `key` param must be unique. Duplicates: {}",
            duplicates.join(", ")
        )));
    }
    Ok(())
}

impl ExpandPrompt {
    pub fn new(mut question: ResolvedQuestion, answers: &Answers) -> Result<Self> {
        let mut specs = question.choices.take().ok_or_else(|| Error::missing("choices"))?;
        validate_keys(&mut specs)?;
        specs.push(
            ChoiceOptions::new(messages::EXPAND_HELP)
                .with_key(keys::HELP.to_string())
                .with_value("help")
                .into(),
        );
        question.choices = Some(specs);

        let mut core = PromptCore::new(question, answers)?;
        let choices = core.take_choices()?;

        let default_index = core
            .question
            .default
            .as_ref()
            .and_then(|default| choices.index_of_default(default))
            .unwrap_or(choices.real_len() - 1);
        let mut hint: Vec<String> = choices.pluck(|c| c.key.clone().unwrap_or_default());
        let default_key = hint[default_index].clone();
        hint[default_index] = default_key.to_uppercase();
        core.default_hint = Some(hint.concat());

        let paginator = Paginator::new(core.question.r#loop);
        Ok(Self { core, choices, default_key, selected: None, paginator })
    }

    pub fn default_key(&self) -> &str {
        &self.default_key
    }

    fn index_of_key(&self, key: &str) -> Option<usize> {
        let key = key.trim().to_lowercase();
        self.choices.find_index(|c| c.key.as_deref() == Some(key.as_str()))
    }

    fn render_choices(&self, line: &str) -> String {
        let typed = line.trim().to_lowercase();
        let mut lines = Vec::with_capacity(self.choices.len());
        for item in self.choices.items() {
            match item {
                ChoiceItem::Separator(separator) => {
                    lines.push(format!("   {}", style(&separator.line).dim()));
                }
                ChoiceItem::Choice(choice) => {
                    let key = choice.key.as_deref().unwrap_or_default();
                    let entry = format!("  {key}) {}", choice.name);
                    if key == typed {
                        lines.push(style(entry).cyan().to_string());
                    } else {
                        lines.push(entry);
                    }
                }
            }
        }
        lines.join("\n")
    }
}

impl Widget for ExpandPrompt {
    fn core(&self) -> &PromptCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut PromptCore {
        &mut self.core
    }

    fn render(&mut self, line: &str) -> String {
        let mut message = self.core.question_line();
        match self.core.status {
            Status::Answered => {
                let short = self.selected.and_then(|i| self.choices.get_choice(i));
                message.push_str(&answered(short.map(|c| c.short.as_str()).unwrap_or_default()));
            }
            Status::Expanded => {
                let active = self
                    .index_of_key(line)
                    .and_then(|index| self.choices.slot_of(index))
                    .unwrap_or(0);
                let choices = self.render_choices(line);
                message.push('\n');
                message.push_str(&self.paginator.paginate(
                    &choices,
                    active,
                    self.core.question.page_size,
                ));
                message.push_str(&format!("\n  {} {line}", messages::RAWLIST_ANSWER));
            }
            _ => message.push_str(line),
        }
        message
    }

    fn on_event(&mut self, event: PromptEvent, source: &mut dyn LineSource) -> Result<Step> {
        if let PromptEvent::Line(line) = event {
            let key = if line.trim().is_empty() { self.default_key.clone() } else { line };
            return Ok(match self.index_of_key(&key) {
                Some(index) => {
                    let help = keys::HELP.to_string();
                    let choice = self.choices.get_choice(index);
                    if choice.and_then(|c| c.key.as_deref()) == Some(help.as_str()) {
                        Step::Submit(Submission::Expand)
                    } else {
                        self.selected = Some(index);
                        let value = choice.map(|c| c.value.clone()).unwrap_or(Value::Null);
                        Step::Submit(Submission::Value(value))
                    }
                }
                None => Step::Error(messages::INVALID_COMMAND.to_string()),
            });
        }

        if self.core.status == Status::Expanded {
            return Ok(Step::Render(None));
        }
        let hint = self
            .index_of_key(source.line())
            .and_then(|index| self.choices.get_choice(index))
            .map(|choice| {
                style(format!("{} {}", glyphs::ERROR_MARKER, choice.name)).cyan().to_string()
            });
        Ok(Step::Render(hint))
    }
}
