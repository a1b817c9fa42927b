use super::args::Args;
use crate::{
    answers::Answers,
    config::load_questions,
    constants::STDIN_INDICATOR,
    error::{Error, Result},
    readline::LineSource,
    session::PromptSession,
};
use log::debug;
use serde_json::Value;
use std::io::{Read, Write};

/// Read content from a reader into a string.
fn read_from(mut reader: impl Read) -> Result<String> {
    let mut buf = String::new();
    reader.read_to_string(&mut buf)?;
    Ok(buf)
}

/// Parses initial answers. Only JSON objects are accepted.
pub fn parse_answers(text: &str) -> Result<Answers> {
    match serde_json::from_str::<Value>(text)? {
        value @ Value::Object(_) => Ok(Answers::from_value(value)),
        other => Err(Error::ConfigError(format!(
            "Initial answers must be a JSON object, got: {other}"
        ))),
    }
}

fn initial_answers(args: &Args) -> Result<Answers> {
    let Some(answers) = &args.answers else {
        return Ok(Answers::new());
    };
    let text = if answers == STDIN_INDICATOR {
        read_from(std::io::stdin())?
    } else {
        answers.clone()
    };
    parse_answers(&text)
}

/// Loads the question file, asks everything through `source` and writes
/// the answers to `out` as pretty JSON.
pub fn run_with<S: LineSource>(args: &Args, source: S, mut out: impl Write) -> Result<Answers> {
    let initial = initial_answers(args)?;
    let questions = load_questions(&args.questions)?;
    debug!("Asking {} questions with {} initial answers", questions.len(), initial.len());

    let answers = PromptSession::new(source).run(questions, initial)?;
    writeln!(out, "{}", serde_json::to_string_pretty(&answers)?)?;
    Ok(answers)
}

/// Runs the binary on the terminal, printing the answers to stdout.
pub fn run(args: Args) -> Result<()> {
    run_with(&args, crate::readline::TerminalLineSource::new(), std::io::stdout().lock())?;
    Ok(())
}
