//! Template and expression evaluation for questions declared in files.

use crate::error::Result;
use serde_json::Value;

pub mod filters;
mod minijinja;

pub use self::minijinja::MiniJinjaRenderer;

/// A template engine evaluated against the answers collected so far.
pub trait TemplateRenderer: Send + Sync {
    /// Renders `template` with `context` as its variables.
    fn render(&self, template: &str, context: &Value) -> Result<String>;

    /// Evaluates `expr` and reports whether it is truthy. An empty
    /// expression is true.
    fn execute_expression(&self, expr: &str, context: &Value) -> Result<bool>;
}
