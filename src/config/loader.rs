//! Loading question descriptors from JSON or YAML files
//!
//! A file holds either a list of definitions or a map from answer name to
//! definition:
//!
//! ```yaml
//! project_name:
//!   message: Project name?
//!   default: demo
//! use_db:
//!   type: confirm
//! db:
//!   type: list
//!   when: use_db
//!   message: "Database for {{ project_name }}?"
//!   choices: [postgres, sqlite]
//! ```
//!
//! Messages and string defaults are minijinja templates rendered against the
//! answers given so far; `when` and `validate.condition` are expressions.

use crate::{
    answers::Answers,
    choice::{ChoiceOptions, ChoiceSpec, Disabled, Separator},
    config::{question::Question, types::Mask, Validity},
    constants::QUESTION_FILE_EXTENSIONS,
    error::{Error, Result},
    renderer::{MiniJinjaRenderer, TemplateRenderer},
};
use indexmap::IndexMap;
use log::{debug, warn};
use serde::Deserialize;
use serde_json::Value;
use std::{path::Path, sync::Arc};

/// Supported question file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Format named by the file extension, if supported.
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_lowercase();
        match extension.as_str() {
            "json" => Some(Format::Json),
            "yaml" | "yml" => Some(Format::Yaml),
            _ => None,
        }
    }
}

/// `when` as written in a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum WhenDef {
    Flag(bool),
    Expression(String),
}

impl Default for WhenDef {
    fn default() -> Self {
        WhenDef::Flag(true)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum MaskDef {
    /// `true` hides the input entirely, `false` shows it as typed
    Flag(bool),
    Char(char),
}

impl From<MaskDef> for Mask {
    fn from(mask: MaskDef) -> Self {
        match mask {
            MaskDef::Flag(true) => Mask::Hidden,
            MaskDef::Flag(false) => Mask::None,
            MaskDef::Char(c) => Mask::Char(c),
        }
    }
}

/// A rule checked against the filtered answer, bound as `value`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ValidationDef {
    pub condition: String,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ChoiceDef {
    Name(String),
    Object(ChoiceObject),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChoiceObject {
    /// `separator` marks a divider; anything else is a regular choice
    #[serde(default)]
    pub r#type: Option<String>,
    pub name: Option<String>,
    pub value: Option<Value>,
    pub short: Option<String>,
    pub key: Option<String>,
    #[serde(default)]
    pub checked: bool,
    pub disabled: Option<Disabled>,
    /// Separator text
    pub line: Option<String>,
}

impl ChoiceDef {
    fn into_spec(self) -> Option<ChoiceSpec> {
        let object = match self {
            ChoiceDef::Name(name) => return Some(ChoiceSpec::from(name)),
            ChoiceDef::Object(object) => object,
        };
        if object.r#type.as_deref() == Some("separator") {
            let separator = object.line.map(Separator::with_line).unwrap_or_default();
            return Some(separator.into());
        }
        let Some(name) = object.name else {
            warn!("Ignoring choice without a name: {object:?}");
            return None;
        };

        let mut options = ChoiceOptions::new(name).with_checked(object.checked);
        options.value = object.value;
        options.short = object.short;
        options.key = object.key;
        options.disabled = object.disabled.map(Into::into);
        Some(options.into())
    }
}

/// One question as written in a file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct QuestionDef {
    #[serde(default)]
    pub r#type: String,
    /// May be omitted in the map form, where the key is the name
    #[serde(default)]
    pub name: String,
    pub message: Option<String>,
    pub default: Option<Value>,
    pub choices: Option<Vec<ChoiceDef>>,
    #[serde(default)]
    pub when: WhenDef,
    pub validate: Option<ValidationDef>,
    pub page_size: Option<usize>,
    #[serde(default = "default_true")]
    pub r#loop: bool,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub suffix: String,
    pub mask: Option<MaskDef>,
    #[serde(default)]
    pub ask_answered: bool,
    pub postfix: Option<String>,
    #[serde(default = "default_true")]
    pub wait_user_input: bool,
}

fn default_true() -> bool {
    true
}

/// Renders `template` against `answers`, keeping the raw text if it does not
/// render.
fn render_or_raw(renderer: &dyn TemplateRenderer, template: &str, context: &Value) -> String {
    renderer.render(template, context).unwrap_or_else(|err| {
        debug!("Keeping '{template}' unrendered: {err}");
        template.to_string()
    })
}

impl QuestionDef {
    /// Builds the programmatic question, with templates and expressions
    /// evaluated by `renderer` when the question's turn comes.
    pub fn into_question(self, renderer: Arc<dyn TemplateRenderer>) -> Question {
        let mut question = Question::new(self.r#type, self.name)
            .with_loop(self.r#loop)
            .with_prefix(self.prefix)
            .with_suffix(self.suffix)
            .with_ask_answered(self.ask_answered)
            .with_wait_user_input(self.wait_user_input);

        if let Some(message) = self.message {
            let renderer = Arc::clone(&renderer);
            question = question.with_message_fn(move |answers: &Answers| {
                Ok(render_or_raw(renderer.as_ref(), &message, &answers.to_value()))
            });
        }

        match self.default {
            Some(Value::String(template)) => {
                let renderer = Arc::clone(&renderer);
                question = question.with_default_fn(move |answers: &Answers| {
                    let rendered = render_or_raw(renderer.as_ref(), &template, &answers.to_value());
                    Ok(Value::String(rendered))
                });
            }
            Some(default) => question = question.with_default(default),
            None => {}
        }

        if let Some(choices) = self.choices {
            question = question.with_choices(choices.into_iter().filter_map(ChoiceDef::into_spec));
        }

        match self.when {
            WhenDef::Flag(when) => question = question.with_when(when),
            WhenDef::Expression(expr) => {
                let renderer = Arc::clone(&renderer);
                question = question.with_when_fn(move |answers: &Answers| {
                    Ok(renderer.execute_expression(&expr, &answers.to_value())?)
                });
            }
        }

        if let Some(validation) = self.validate {
            let renderer = Arc::clone(&renderer);
            question = question.with_validate(
                move |value: &Value, answers: &Answers| -> anyhow::Result<Validity> {
                    let mut context = answers.clone();
                    context.set("value", value.clone())?;
                    let context = context.to_value();
                    if renderer.execute_expression(&validation.condition, &context)? {
                        return Ok(Validity::Valid);
                    }
                    Ok(match &validation.error_message {
                        Some(message) => {
                            Validity::invalid(render_or_raw(renderer.as_ref(), message, &context))
                        }
                        None => Validity::Invalid(None),
                    })
                },
            );
        }

        if let Some(page_size) = self.page_size {
            question = question.with_page_size(page_size);
        }
        if let Some(mask) = self.mask {
            question = question.with_mask(mask.into());
        }
        if let Some(postfix) = self.postfix {
            question = question.with_postfix(postfix);
        }
        question
    }
}

/// Contents of a question file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuestionFile {
    List(Vec<QuestionDef>),
    Map(IndexMap<String, QuestionDef>),
}

impl QuestionFile {
    pub fn parse(content: &str, format: Format) -> Result<Self> {
        Ok(match format {
            Format::Json => serde_json::from_str(content)?,
            Format::Yaml => serde_yaml::from_str(content)?,
        })
    }

    /// Definitions in file order, map keys taking the place of names.
    pub fn into_definitions(self) -> Vec<QuestionDef> {
        match self {
            QuestionFile::List(definitions) => definitions,
            QuestionFile::Map(definitions) => definitions
                .into_iter()
                .map(|(name, mut definition)| {
                    definition.name = name;
                    definition
                })
                .collect(),
        }
    }
}

/// Reads the questions declared in `path`, rendering templates with the
/// default [`MiniJinjaRenderer`].
pub fn load_questions<P: AsRef<Path>>(path: P) -> Result<Vec<Question>> {
    load_questions_with(path, Arc::new(MiniJinjaRenderer::new()))
}

pub fn load_questions_with<P: AsRef<Path>>(
    path: P,
    renderer: Arc<dyn TemplateRenderer>,
) -> Result<Vec<Question>> {
    let path = path.as_ref();
    let Some(format) = Format::from_path(path) else {
        return Err(Error::QuestionFileError {
            path: path.display().to_string(),
            reason: format!(
                "unsupported file extension, expected one of {}",
                QUESTION_FILE_EXTENSIONS.join(", ")
            ),
        });
    };

    debug!("Loading questions from {}", path.display());
    let content = std::fs::read_to_string(path)?;
    let questions = parse_questions(&content, format, renderer)?;
    debug!("Loaded {} questions from {}", questions.len(), path.display());
    Ok(questions)
}

/// Parses question definitions from `content`.
pub fn parse_questions(
    content: &str,
    format: Format,
    renderer: Arc<dyn TemplateRenderer>,
) -> Result<Vec<Question>> {
    Ok(QuestionFile::parse(content, format)?
        .into_definitions()
        .into_iter()
        .map(|definition| definition.into_question(Arc::clone(&renderer)))
        .collect())
}
