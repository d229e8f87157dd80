//! Page template engine.
//!
//! Loads all `.jinja` templates from the `templates/` directory once and
//! renders them with minijinja. Page handlers build a context with
//! [`minijinja::context!`] and call [`render_page`].

use minijinja::{Environment, Value};
use std::path::Path;
use std::sync::OnceLock;

use crate::core::error::AppError;

/// Global template environment
static TEMPLATE_ENV: OnceLock<Environment<'static>> = OnceLock::new();

/// Template directory relative to the project root
const TEMPLATE_DIR: &str = "templates";

/// Initialize the template environment with all templates from the templates
/// directory. Called automatically on first use of `render_page`.
fn init_environment() -> Environment<'static> {
    let mut env = Environment::new();

    let template_path = Path::new(TEMPLATE_DIR);
    if template_path.exists() {
        load_templates_recursive(&mut env, template_path, template_path);
    }

    env
}

/// Recursively load all .jinja templates from a directory
fn load_templates_recursive(env: &mut Environment<'static>, base_path: &Path, current_path: &Path) {
    if let Ok(entries) = std::fs::read_dir(current_path) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.is_dir() {
                load_templates_recursive(env, base_path, &path);
            } else if path.extension().is_some_and(|ext| ext == "jinja") {
                if let Ok(relative) = path.strip_prefix(base_path) {
                    let template_name = relative.to_string_lossy().to_string();
                    if let Ok(content) = std::fs::read_to_string(&path) {
                        // Convert to 'static str by leaking (safe for long-lived templates)
                        let static_name: &'static str =
                            Box::leak(template_name.clone().into_boxed_str());
                        let static_content: &'static str = Box::leak(content.into_boxed_str());
                        if let Err(e) = env.add_template(static_name, static_content) {
                            tracing::warn!("Failed to load template {}: {}", template_name, e);
                        } else {
                            tracing::debug!("Loaded template: {}", template_name);
                        }
                    }
                }
            }
        }
    }
}

/// Get the global template environment
fn get_environment() -> &'static Environment<'static> {
    TEMPLATE_ENV.get_or_init(init_environment)
}

/// Render a page template with the given context.
///
/// `template_name` is the path relative to `templates/`, e.g.
/// `"photography.html.jinja"`.
pub fn render_page(template_name: &str, ctx: Value) -> Result<String, AppError> {
    let env = get_environment();

    let template = env
        .get_template(template_name)
        .map_err(|_| AppError::Template(format!("Template '{}' not found", template_name)))?;

    template
        .render(ctx)
        .map_err(|e| AppError::Template(e.to_string()))
}

/// Check if a template exists
#[allow(dead_code)]
pub fn template_exists(template_name: &str) -> bool {
    get_environment().get_template(template_name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_missing_template_is_an_error() {
        let result = render_page("definitely_not_a_real_template.jinja", context! {});
        assert!(matches!(result, Err(AppError::Template(_))));
    }
}
