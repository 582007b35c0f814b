use anyhow::Result;
use cliclack::spinner;
use console::style;

use carebot::agent::Assistant;
use carebot::models::tool::ToolCall;

use super::parse_json;
use crate::printer::{print_json, print_markdown};

pub async fn handle_call(assistant: &Assistant, tool: &str, input: &str, render: bool) -> Result<()> {
    let input = parse_json("--input", input)?;
    let call = ToolCall::new(tool, input);

    let spin = spinner();
    spin.start(format!("Calling {}...", tool));

    if !render {
        let output = assistant.tools().dispatch(call).await;
        spin.stop("");
        return print_json(&format!("Tool Response: {}", tool), &output);
    }

    let reply = assistant.respond(call).await;
    spin.stop("");
    let reply = reply?;

    print_json(&format!("Tool Response: {}", tool), &reply.output)?;
    match (reply.component, reply.rendered) {
        (Some(component), Some(rendered)) => {
            println!("{}", style(format!("Rendering {}", component)).dim());
            print_markdown(&rendered.to_string())
        }
        _ => {
            println!("{}", style("No component follows this result").dim());
            Ok(())
        }
    }
}
