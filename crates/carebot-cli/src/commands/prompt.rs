use anyhow::Result;
use console::style;
use std::path::PathBuf;

use carebot::agent::Assistant;
use carebot::session::Session;

use crate::printer::print_markdown;

pub fn handle_prompt(assistant: &Assistant, template: Option<PathBuf>) -> Result<()> {
    let prompt = match template {
        Some(path) => assistant.system_prompt_from(path)?,
        None => assistant.system_prompt()?,
    };
    print_markdown(&prompt)
}

pub fn handle_suggestions(session: &Session) -> Result<()> {
    for suggestion in session.context().suggestions() {
        println!(
            "{}  {}",
            style(suggestion.label).cyan().bold(),
            style(suggestion.prompt).dim()
        );
    }
    Ok(())
}
