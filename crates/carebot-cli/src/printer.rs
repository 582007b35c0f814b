use anyhow::{anyhow, Result};
use bat::WrappingMode;
use serde_json::Value;

const THEME: &str = "zenburn";

pub fn print_markdown(content: &str) -> Result<()> {
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()))
        .theme(THEME)
        .language("Markdown")
        .wrapping_mode(WrappingMode::Character)
        .print()
        .map_err(|e| anyhow!("Failed to print output: {}", e))?;
    println!();
    Ok(())
}

/// Print a JSON value under a header naming what it is
pub fn print_json(title: &str, value: &Value) -> Result<()> {
    let content = serde_json::to_string_pretty(value)?;
    bat::PrettyPrinter::new()
        .input(bat::Input::from_bytes(content.as_bytes()).name(title))
        .theme(THEME)
        .language("JSON")
        .grid(true)
        .header(true)
        .wrapping_mode(WrappingMode::Character)
        .print()
        .map_err(|e| anyhow!("Failed to print output: {}", e))?;
    println!();
    Ok(())
}
