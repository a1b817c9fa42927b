//! Filters available inside question templates, e.g.
//! `{{ project_name | snake_case }}`.

use log::warn;
use minijinja::Environment;
use regex::Regex;

pub use cruet::{
    case::{
        camel::to_camel_case, kebab::to_kebab_case, pascal::to_pascal_case,
        screaming_snake::to_screaming_snake_case, snake::to_snake_case,
        train::to_train_case,
    },
    string::{pluralize::to_plural, singularize::to_singular},
};

/// Whether `val` matches the regular expression `re`. An invalid pattern
/// never matches.
pub fn regex_filter(val: &str, re: &str) -> bool {
    match Regex::new(re) {
        Ok(re) => re.is_match(val),
        Err(err) => {
            warn!("Invalid regex '{re}': {err}");
            false
        }
    }
}

pub(crate) fn register(env: &mut Environment<'static>) {
    env.add_filter("camel_case", to_camel_case);
    env.add_filter("kebab_case", to_kebab_case);
    env.add_filter("pascal_case", to_pascal_case);
    env.add_filter("screaming_snake_case", to_screaming_snake_case);
    env.add_filter("snake_case", to_snake_case);
    env.add_filter("train_case", to_train_case);
    env.add_filter("plural", to_plural);
    env.add_filter("singular", to_singular);
    env.add_filter("regex", regex_filter);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_filter_matches() {
        assert!(regex_filter("user@example.com", r"^[^@]+@[^@]+$"));
        assert!(!regex_filter("not an email", r"^[^@]+@[^@]+$"));
    }

    #[test]
    fn invalid_regex_never_matches() {
        assert!(!regex_filter("anything", r"([unclosed"));
    }
}
