use super::{filters, TemplateRenderer};
use crate::error::Result;
use minijinja::Environment;
use serde_json::Value;

/// [`TemplateRenderer`] backed by minijinja, with the case conversion and
/// `regex` filters registered.
#[derive(Debug)]
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    pub fn new() -> Self {
        let mut env = Environment::new();
        filters::register(&mut env);
        Self { env }
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &str, context: &Value) -> Result<String> {
        Ok(self.env.render_str(template, context)?)
    }

    fn execute_expression(&self, expr: &str, context: &Value) -> Result<bool> {
        if expr.trim().is_empty() {
            return Ok(true);
        }
        let expr = self.env.compile_expression(expr)?;
        Ok(expr.eval(context)?.is_true())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn render(template: &str, context: Value) -> String {
        MiniJinjaRenderer::new().render(template, &context).unwrap()
    }

    #[test]
    fn test_renders_answers_into_messages() {
        assert_eq!(render("Hello {{ name }}!", json!({"name": "ali"})), "Hello ali!");
        assert_eq!(render("{{ user.email }}", json!({"user": {"email": "a@b.c"}})), "a@b.c");
    }

    #[test]
    fn test_case_filters() {
        assert_eq!(render("{{ 'my project' | snake_case }}", json!({})), "my_project");
        assert_eq!(render("{{ 'my project' | kebab_case }}", json!({})), "my-project");
        assert_eq!(render("{{ 'my project' | pascal_case }}", json!({})), "MyProject");
        assert_eq!(render("{{ 'car' | plural }}", json!({})), "cars");
    }

    #[test]
    fn test_regex_filter_in_templates() {
        assert_eq!(render("{{ 'v1.2.0' | regex('^v\\\\d') }}", json!({})), "true");
        assert_eq!(render("{{ '1.2.0' | regex('^v') }}", json!({})), "false");
    }

    #[test]
    fn test_expressions_read_the_context() {
        let renderer = MiniJinjaRenderer::new();
        let context = json!({"use_db": true, "value": "abc"});
        assert!(renderer.execute_expression("use_db", &context).unwrap());
        assert!(renderer.execute_expression("value | length > 2", &context).unwrap());
        assert!(!renderer.execute_expression("not use_db", &context).unwrap());
        assert!(renderer.execute_expression("", &context).unwrap());
    }

    #[test]
    fn test_broken_templates_are_errors() {
        let renderer = MiniJinjaRenderer::new();
        assert!(renderer.render("{{ unclosed", &json!({})).is_err());
        assert!(renderer.execute_expression("a ==", &json!({})).is_err());
    }
}
