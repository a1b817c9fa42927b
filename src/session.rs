//! Question orchestration: runs questions one after another and folds their
//! answers into a single answer set.

use crate::{
    answers::Answers,
    config::Question,
    error::{Error, Result},
    prompt::{run_widget, Registry},
    readline::{LineSource, TerminalLineSource},
};
use indexmap::IndexMap;
use log::{debug, warn};

/// Runs question sequences against a line source.
///
/// One widget is active at a time; the next question is only resolved once
/// the previous one has produced its answer.
pub struct PromptSession<S: LineSource> {
    source: S,
    registry: Registry,
}

impl<S: LineSource> PromptSession<S> {
    pub fn new(source: S) -> Self {
        Self::with_registry(source, Registry::new())
    }

    pub fn with_registry(source: S, registry: Registry) -> Self {
        Self { source, registry }
    }

    /// Widget registry, e.g. to add custom prompt types.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn into_source(self) -> S {
        self.source
    }

    /// Asks every question from `questions` in order, starting from
    /// `initial` answers.
    ///
    /// `questions` may be anything iterable, including a channel receiver
    /// fed by another thread. The line source is closed once the run ends,
    /// whether it succeeded or not.
    pub fn run<I>(&mut self, questions: I, initial: Answers) -> Result<Answers>
    where
        I: IntoIterator<Item = Question>,
    {
        let result = self.ask_all(questions, initial);
        let closed = self.source.close();
        let answers = result?;
        closed?;
        Ok(answers)
    }

    /// Like [`PromptSession::run`] with questions keyed by name. The map key
    /// overrides any name already set on the question.
    pub fn run_map(
        &mut self,
        questions: IndexMap<String, Question>,
        initial: Answers,
    ) -> Result<Answers> {
        let questions = questions.into_iter().map(|(name, mut question)| {
            question.name = name;
            question
        });
        self.run(questions, initial)
    }

    fn ask_all<I>(&mut self, questions: I, mut answers: Answers) -> Result<Answers>
    where
        I: IntoIterator<Item = Question>,
    {
        for question in questions {
            if let Some(answer) = self.ask(&question, &answers)? {
                match answers.set(&question.name, answer) {
                    Ok(()) => debug!("Stored answer for '{}'", question.name),
                    Err(err @ (Error::UnsafeAnswerPath { .. } | Error::InvalidAnswerPath { .. })) => {
                        warn!("{err} The answer is ignored.");
                    }
                    Err(err) => return Err(err),
                }
            }
        }
        Ok(answers)
    }

    /// Runs a single question. `None` means the question was skipped.
    fn ask(&mut self, question: &Question, answers: &Answers) -> Result<Option<serde_json::Value>> {
        if !question.ask_answered && answers.contains(&question.name) {
            debug!("Skipping '{}': already answered", question.name);
            return Ok(None);
        }
        if !question.is_enabled(answers)? {
            debug!("Skipping '{}': disabled by `when`", question.name);
            return Ok(None);
        }

        let resolved = question.resolve(answers)?;
        debug!("Asking '{}' with a '{}' prompt", resolved.name, resolved.r#type);
        let mut widget = self.registry.build(resolved, answers)?;
        run_widget(widget.as_mut(), &mut self.source).map(Some)
    }
}

impl<S: LineSource + std::fmt::Debug> std::fmt::Debug for PromptSession<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptSession").field("source", &self.source).finish_non_exhaustive()
    }
}

/// Asks `questions` on the terminal.
///
/// # Example
/// ```no_run
/// use enquire::{config::Question, prompt, Answers};
///
/// let answers = prompt(
///     vec![
///         Question::new("input", "name").with_message("Your name?"),
///         Question::new("confirm", "ok").with_message("Continue?"),
///     ],
///     Answers::new(),
/// )?;
/// println!("{}", answers.to_value());
/// # Ok::<(), enquire::error::Error>(())
/// ```
pub fn prompt<I>(questions: I, initial: Answers) -> Result<Answers>
where
    I: IntoIterator<Item = Question>,
{
    PromptSession::new(TerminalLineSource::new()).run(questions, initial)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::readline::{Key, ScriptedLineSource};
    use serde_json::json;

    fn session(lines: &[&str]) -> PromptSession<ScriptedLineSource> {
        PromptSession::new(ScriptedLineSource::from_lines(lines))
    }

    #[test]
    fn test_answers_accumulate_in_order() {
        let mut session = session(&["ali", "y"]);
        let answers = session
            .run(
                vec![Question::new("input", "name"), Question::new("confirm", "ok")],
                Answers::new(),
            )
            .unwrap();
        assert_eq!(answers.to_value(), json!({"name": "ali", "ok": true}));
        assert_eq!(session.source().closes(), 1);
    }

    #[test]
    fn test_answered_questions_are_skipped_unless_forced() {
        let initial = Answers::from_value(json!({"name": "ali"}));

        let mut skipped = session(&[]);
        let answers = skipped.run(vec![Question::new("input", "name")], initial.clone()).unwrap();
        assert_eq!(answers.get("name"), Some(&json!("ali")));

        let mut forced = session(&["bob"]);
        let answers = forced
            .run(vec![Question::new("input", "name").with_ask_answered(true)], initial)
            .unwrap();
        assert_eq!(answers.get("name"), Some(&json!("bob")));
    }

    #[test]
    fn test_when_reads_earlier_answers() {
        let mut session = session(&["n"]);
        let answers = session
            .run(
                vec![
                    Question::new("confirm", "more"),
                    Question::new("input", "detail").with_when_fn(|answers| {
                        Ok(answers.get("more") == Some(&json!(true)))
                    }),
                ],
                Answers::new(),
            )
            .unwrap();
        assert_eq!(answers.to_value(), json!({"more": false}));
    }

    #[test]
    fn test_unsafe_paths_are_ignored() {
        let mut session = session(&["x", "y"]);
        let answers = session
            .run(
                vec![Question::new("input", "a.__proto__.b"), Question::new("input", "c")],
                Answers::new(),
            )
            .unwrap();
        assert_eq!(answers.to_value(), json!({"c": "y"}));
    }

    #[test]
    fn test_map_keys_become_names() {
        let mut questions = IndexMap::new();
        questions.insert("first".to_string(), Question::new("input", ""));
        questions.insert("second".to_string(), Question::new("input", "ignored"));

        let answers = session(&["1", "2"]).run_map(questions, Answers::new()).unwrap();

        assert_eq!(answers.to_value(), json!({"first": "1", "second": "2"}));
    }

    #[test]
    fn test_failures_close_the_source() {
        let mut session = PromptSession::new(ScriptedLineSource::new([Key::Ctrl('c')]));
        let err = session.run(vec![Question::new("input", "x")], Answers::new()).unwrap_err();
        assert!(matches!(err, Error::Interrupted));
        assert_eq!(session.source().closes(), 1);
    }
}
