use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use carebot::agent::Assistant;
use carebot::components::ComponentRegistry;
use carebot::config::Settings;
use carebot::models::role::Role;
use carebot::session::Session;

mod commands;
mod printer;

use commands::{call, catalog, configure, form, prompt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Role to act as: doctor, nurse or patient
    #[arg(short, long, global = true, default_value_t = Role::Doctor)]
    role: Role,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the tools offered to the agent runtime
    Tools,

    /// List the components the agent runtime can render
    Components,

    /// Call a tool with JSON input
    Call {
        /// Tool name, e.g. getAppointments
        tool: String,

        /// Tool input as a JSON object
        #[arg(short, long, default_value = "{}")]
        input: String,

        /// Also render the component that follows the result
        #[arg(long)]
        render: bool,
    },

    /// Render a component from JSON props
    Render {
        /// Component name, e.g. AppointmentList
        component: String,

        /// Component props as JSON
        #[arg(short, long, default_value = "{}")]
        props: String,
    },

    /// Fill in and submit a form interactively
    Form {
        /// Form component name, e.g. VitalsForm
        component: String,

        /// Initial props as JSON, e.g. {"patientName": "John Doe"}
        #[arg(short, long, default_value = "{}")]
        props: String,
    },

    /// Print the system prompt for the active role
    Prompt {
        /// Render this template file instead of the bundled prompt
        #[arg(long)]
        template: Option<PathBuf>,
    },

    /// Show suggested prompts for the active role
    Suggestions,

    /// Show the resolved configuration with keys masked
    Config,
}

const DEFAULT_LOG_FILTER: &str = "carebot=warn";

/// Directives from `RUST_LOG` when it holds any, else the quiet default
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|raw| !raw.trim().is_empty())
        .and_then(|raw| EnvFilter::try_new(raw).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

fn init_tracing() {
    let directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::registry()
        .with(log_filter(directives.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn assistant(role: Role) -> Result<Assistant> {
    let settings = Settings::new()?;
    Ok(Assistant::from_settings(&settings, role))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cli = Cli::parse();
    tracing::debug!(role = %cli.role, "carebot starting");
    match cli.command {
        Command::Tools => catalog::handle_tools(&assistant(cli.role)?),
        Command::Components => catalog::handle_components(&ComponentRegistry::with_defaults()),
        Command::Call {
            tool,
            input,
            render,
        } => call::handle_call(&assistant(cli.role)?, &tool, &input, render).await,
        Command::Render { component, props } => catalog::handle_render(
            &ComponentRegistry::with_defaults(),
            &Session::new(cli.role),
            &component,
            &props,
        ),
        Command::Form { component, props } => {
            form::handle_form(&assistant(cli.role)?, &component, &props).await
        }
        Command::Prompt { template } => prompt::handle_prompt(&assistant(cli.role)?, template),
        Command::Suggestions => prompt::handle_suggestions(&Session::new(cli.role)),
        Command::Config => configure::handle_config(),
    }
}
