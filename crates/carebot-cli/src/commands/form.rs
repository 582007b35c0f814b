use anyhow::{anyhow, Context, Result};
use cliclack::spinner;
use console::style;

use carebot::agent::Assistant;
use carebot::errors::FormError;
use carebot::forms::{FieldSpec, LiveForm};

use super::parse_json;
use crate::printer::{print_json, print_markdown};

fn ask(field: &FieldSpec, current: &str) -> Result<String> {
    if let Some(first) = field.choices.first() {
        let initial = field
            .choices
            .iter()
            .find(|choice| **choice == current)
            .unwrap_or(first);
        let items: Vec<(&str, &str, &str)> =
            field.choices.iter().map(|choice| (*choice, *choice, "")).collect();
        let picked = cliclack::select(field.label)
            .initial_value(*initial)
            .items(&items)
            .interact()?;
        return Ok(picked.to_string());
    }

    let mut prompt = cliclack::input(field.label)
        .placeholder(field.placeholder)
        .required(field.required);
    if !current.is_empty() {
        prompt = prompt.default_input(current);
    }
    if field.multiline {
        prompt = prompt.multiline();
    }
    let answer: String = prompt.interact()?;
    Ok(answer)
}

/// Prompt for `fields` and store the answers on the form
fn fill(form: &mut dyn LiveForm, fields: &[&FieldSpec]) -> Result<()> {
    for field in fields {
        let current = form.value(field.name).unwrap_or_default();
        loop {
            let answer = ask(field, &current)?;
            match form.set(field.name, &answer) {
                Ok(()) => break,
                Err(FormError::InvalidChoice { .. }) => {
                    cliclack::log::warning(format!("Pick one of: {}", field.choices.join(", ")))?;
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
    Ok(())
}

pub async fn handle_form(assistant: &Assistant, component: &str, props: &str) -> Result<()> {
    let props = parse_json("--props", props)?;
    let mut rendered = assistant.render(component, &props)?;
    let form = rendered
        .as_form_mut()
        .ok_or_else(|| anyhow!("{} is not a form", component))?;

    let view = form.view();
    cliclack::intro(style(format!(" {} ", view.title)).on_cyan().black())?;
    if let Some(subtitle) = &view.subtitle {
        cliclack::log::info(subtitle)?;
    }
    if let Some(notice) = view.notice {
        cliclack::log::remark(notice)?;
    }

    let all: Vec<&FieldSpec> = form.fields().iter().collect();
    fill(form, &all)?;

    let draft = loop {
        match form.submit() {
            Ok(draft) => break draft,
            Err(FormError::MissingFields(missing)) => {
                cliclack::log::warning(FormError::MissingFields(missing.clone()))?;
                let retry: Vec<&FieldSpec> = form
                    .fields()
                    .iter()
                    .filter(|field| missing.iter().any(|name| name == field.name))
                    .collect();
                fill(form, &retry)?;
            }
            Err(e) => return Err(e.into()),
        }
    };

    if let Some(confirmation) = form.view().confirmation {
        cliclack::outro(format!("{}: {}", confirmation.title, confirmation.message))?;
    }

    let spin = spinner();
    spin.start("Saving...");
    let stored = assistant.submit_form(form.component(), draft.clone()).await;
    spin.stop("");

    match stored.context("Failed to save the form")? {
        Some(output) => print_json("Saved", &output),
        None => {
            println!("{}", style("This form is not stored by any tool").dim());
            print_markdown(&form.view().to_string())?;
            print_json("Draft", &draft)
        }
    }
}
