use anyhow::Result;
use console::style;
use serde_json::json;

use carebot::agent::Assistant;
use carebot::components::ComponentRegistry;
use carebot::session::Session;

use super::parse_json;
use crate::printer::{print_json, print_markdown};

pub fn handle_tools(assistant: &Assistant) -> Result<()> {
    for tool in assistant.tools().tools() {
        println!("{}", style(&tool.name).cyan().bold());
        println!("  {}", tool.description.trim());
        print_json(
            &format!("{} schema", tool.name),
            &json!({ "input": tool.input_schema, "output": tool.output_schema }),
        )?;
    }
    Ok(())
}

pub fn handle_components(registry: &ComponentRegistry) -> Result<()> {
    for definition in registry.definitions() {
        println!("{}", style(definition.name).cyan().bold());
        println!("  {}", definition.description);
        print_json(
            &format!("{} props", definition.name),
            &definition.props_schema,
        )?;
    }
    Ok(())
}

pub fn handle_render(
    registry: &ComponentRegistry,
    session: &Session,
    component: &str,
    props: &str,
) -> Result<()> {
    let props = parse_json("--props", props)?;
    let rendered = registry.render(component, &props, &session.context())?;
    print_markdown(&rendered.to_string())
}
