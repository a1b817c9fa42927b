use crate::{
    answers::Answers,
    config::{FilterFn, ResolvedQuestion, ValidateFn, Validity},
    constants::messages,
    error::Result,
};
use log::debug;
use serde_json::Value;

/// The step a submission is going through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Filtering,
    Validating,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Accepted(Value),
    Rejected(String),
}

/// Runs each submission through the question's filter and then its
/// validator.
///
/// Submissions are handled one at a time, in the order they are made. Once a
/// submission has been accepted the pipeline is latched: later submissions
/// are dropped and produce no outcome at all.
pub struct SubmissionPipeline {
    filter: Option<FilterFn>,
    validate: Option<ValidateFn>,
    accepted: bool,
}

impl SubmissionPipeline {
    pub fn new(filter: Option<FilterFn>, validate: Option<ValidateFn>) -> Self {
        Self { filter, validate, accepted: false }
    }

    pub fn for_question(question: &ResolvedQuestion) -> Self {
        Self::new(question.filter.clone(), question.validate.clone())
    }

    pub fn is_accepted(&self) -> bool {
        self.accepted
    }

    /// `on_stage` is called before each callback runs, with the value that
    /// callback will receive.
    pub fn process<F>(
        &mut self,
        raw: Value,
        answers: &Answers,
        mut on_stage: F,
    ) -> Result<Option<Outcome>>
    where
        F: FnMut(&Value, Stage) -> Result<()>,
    {
        if self.accepted {
            debug!("Ignoring submission after an accepted answer");
            return Ok(None);
        }

        let value = match &self.filter {
            Some(filter) => {
                on_stage(&raw, Stage::Filtering)?;
                match filter(raw, answers) {
                    Ok(value) => value,
                    Err(err) => return Ok(Some(Outcome::Rejected(err.to_string()))),
                }
            }
            None => raw,
        };

        let validity = match &self.validate {
            Some(validate) => {
                on_stage(&value, Stage::Validating)?;
                match validate(&value, answers) {
                    Ok(validity) => validity,
                    Err(err) => Validity::invalid(err.to_string()),
                }
            }
            None => Validity::Valid,
        };

        Ok(Some(match validity {
            Validity::Valid => {
                self.accepted = true;
                Outcome::Accepted(value)
            }
            Validity::Invalid(message) => {
                Outcome::Rejected(message.unwrap_or_else(|| messages::INVALID_ANSWER.to_string()))
            }
        }))
    }
}
