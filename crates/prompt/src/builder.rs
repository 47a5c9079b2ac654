//! Prompt builder for filling the grounded template.

use crate::template::{GROUNDED_PROMPT, GROUNDED_PROMPT_ID};
use crate::types::BuiltPrompt;
use handlebars::Handlebars;
use rfp_core::{AppError, AppResult};
use std::collections::HashMap;

/// Fill the grounded template with a query and rendered sources.
///
/// # Example
/// ```
/// use rfp_prompt::build_prompt;
///
/// let built = build_prompt("사업기간은?", "프로젝트명: A\n").unwrap();
/// assert!(built.user.contains("Query: 사업기간은?"));
/// ```
pub fn build_prompt(query: &str, sources: &str) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", GROUNDED_PROMPT_ID);

    let mut variables = HashMap::new();
    variables.insert("query", query);
    variables.insert("sources", sources);

    let rendered = render_template(GROUNDED_PROMPT, &variables)?;

    Ok(BuiltPrompt::new(rendered, GROUNDED_PROMPT_ID, query, sources))
}

/// Render a Handlebars template with variables.
fn render_template(template: &str, variables: &HashMap<&str, &str>) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text: no HTML escaping, and a missing variable is an error
    handlebars.register_escape_fn(handlebars::no_escape);
    handlebars.set_strict_mode(true);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", variables)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
