use anyhow::{Context, Result};
use minijinja::{AutoEscape, Environment, UndefinedBehavior, context};
use std::fs;
use std::path::Path;

use crate::stats::UserStats;

pub const DEFAULT_TEMPLATE: &str = "index.jinja2";

/// Render `records` through the template at `template_path`, bound as `items`.
///
/// Every interpolation is HTML-escaped whatever the template's extension, as
/// names and logins come straight from user-controlled profiles. Referencing
/// a field the records do not have is an error.
pub fn render(records: &[UserStats], template_path: &Path) -> Result<String> {
    let source = fs::read_to_string(template_path)
        .with_context(|| format!("Failed to read template '{}'", template_path.display()))?;
    let name = template_path.display().to_string();

    let mut env = Environment::new();
    env.set_auto_escape_callback(|_| AutoEscape::Html);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(&name, &source)
        .with_context(|| format!("Failed to parse template '{name}'"))?;

    let template = env.get_template(&name)?;
    let html = template
        .render(context! { items => records })
        .with_context(|| format!("Failed to render template '{name}'"))?;
    Ok(html)
}
