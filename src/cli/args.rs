use crate::constants::{exit_codes, verbosity};
use clap::{error::ErrorKind, CommandFactory, Parser};
use log::LevelFilter;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Ask the questions declared in a file and print the answers as JSON.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Question file (.json, .yaml or .yml).
    #[arg(value_name = "QUESTIONS")]
    pub questions: PathBuf,

    /// Initial answers as a JSON object, or `-` to read them from stdin.
    /// Questions that already have an answer are not asked.
    #[arg(short, long)]
    pub answers: Option<String>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments, printing the help when the question file
/// is missing.
pub fn get_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        if e.kind() == ErrorKind::MissingRequiredArgument {
            let mut command = Args::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level. Prompts share stderr with
/// the logger, so only warnings are shown by default.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Warn,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Warn);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn test_parses_minimal_args() {
        let args = Args::parse_from(["enquire", "questions.yaml"]);
        assert_eq!(args.questions, PathBuf::from("questions.yaml"));
        assert_eq!(args.answers, None);
        assert_eq!(args.verbose, 0);
    }

    #[test]
    fn test_parses_answers_and_verbosity() {
        let args = Args::parse_from(["enquire", "q.json", "-vv", "--answers", r#"{"name":"ali"}"#]);
        assert_eq!(args.verbose, 2);
        assert_eq!(args.answers.as_deref(), Some(r#"{"name":"ali"}"#));
    }
}
