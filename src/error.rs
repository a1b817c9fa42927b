use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    /// A question is missing a field its prompt type cannot run without.
    #[error("You must provide a `{param}` parameter.")]
    MissingParameter { param: String },

    /// The question descriptor is present but malformed.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Refusing to assign answer to unsafe path '{path}'.")]
    UnsafeAnswerPath { path: String },

    #[error("Cannot parse answer path '{path}'.")]
    InvalidAnswerPath { path: String },

    #[error("Failed to parse JSON: {0}")]
    JSONParseError(#[from] serde_json::Error),

    #[error("Failed to parse YAML: {0}")]
    YAMLParseError(#[from] serde_yaml::Error),

    #[error("Failed to render. Original error: {0}")]
    MinijinjaError(#[from] minijinja::Error),

    #[error("Cannot load questions from '{path}': {reason}.")]
    QuestionFileError { path: String, reason: String },

    #[error("Editor error: {0}")]
    EditorError(String),

    /// The user aborted the prompt (Ctrl-C) or the input stream ended.
    #[error("Prompt was interrupted.")]
    Interrupted,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn missing(param: &str) -> Self {
        Error::MissingParameter { param: param.to_string() }
    }
}

/// Convenience type alias for Results with the crate error type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_parameter_names_the_field() {
        let err = Error::missing("choices");
        assert_eq!(err.to_string(), "You must provide a `choices` parameter.");
    }

    #[test]
    fn test_io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: Error = io.into();
        assert!(matches!(err, Error::IoError(_)));
    }
}
