//! raindeck CLI — the main entry point.
//!
//! Commands:
//! - `search`  — Search Raindrop bookmarks by tag and date range
//! - `tools`   — List, describe, or call registered tools
//! - `agents`  — Show the agent roster
//! - `status`  — Show configuration status
//! - `config`  — Show, locate, or initialize the config file

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "raindeck",
    about = "raindeck — Raindrop bookmark search and agent tooling",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Search bookmarks by tag and creation date
    Search(commands::search::SearchArgs),

    /// Inspect and invoke tools
    Tools {
        #[command(subcommand)]
        action: ToolsAction,
    },

    /// Inspect the agent roster
    Agents {
        #[command(subcommand)]
        action: AgentsAction,
    },

    /// Show configuration status
    Status,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ToolsAction {
    /// List registered tools
    List,

    /// Print a tool's parameter schema
    Schema {
        /// Tool name
        name: String,
    },

    /// Execute a tool with JSON arguments
    Call {
        /// Tool name
        name: String,

        /// Arguments as a JSON object
        #[arg(short, long, default_value = "{}")]
        args: String,
    },
}

#[derive(Subcommand)]
enum AgentsAction {
    /// List agents
    List,

    /// Show one agent and its resolved tools
    Show {
        /// Agent name (case-insensitive)
        name: String,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration (secrets redacted)
    Show,

    /// Print the config file path
    Path,

    /// Write a default config file if none exists
    Init,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search(args) => commands::search::run(args).await?,
        Commands::Tools { action } => match action {
            ToolsAction::List => commands::tools::list().await?,
            ToolsAction::Schema { name } => commands::tools::schema(&name).await?,
            ToolsAction::Call { name, args } => commands::tools::call(&name, &args).await?,
        },
        Commands::Agents { action } => match action {
            AgentsAction::List => commands::agents::list().await?,
            AgentsAction::Show { name } => commands::agents::show(&name).await?,
        },
        Commands::Status => commands::status::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Init => commands::config_cmd::init().await?,
        },
    }

    Ok(())
}
