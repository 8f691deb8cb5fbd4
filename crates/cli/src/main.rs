//! ToolRoute CLI — the main entry point.
//!
//! Commands:
//! - `chat`      — Interactive chat or single-message mode
//! - `turn`      — Run one turn from a JSON request body
//! - `classify`  — Show the intent selected for an utterance
//! - `tools`     — List registered tools
//! - `config`    — Show, validate or initialize configuration

use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;

#[derive(Parser)]
#[command(
    name = "toolroute",
    about = "ToolRoute — single-turn intent classification and tool dispatch",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the assistant
    Chat {
        /// Send a single message instead of entering interactive mode
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Run one turn from a `{"messages": [...]}` body and print the response
    Turn {
        /// Read the request from a file instead of stdin
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Print the intent the classifier selects for an utterance
    Classify {
        /// The utterance to classify
        text: String,
    },

    /// List registered tools and whether the classifier routes to them
    Tools,

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Load and validate the configuration file
    Validate,
    /// Print the configuration file path
    Path,
    /// Write a default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing. Logs go to stderr so `turn` output stays clean JSON.
    let filter = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr);
    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }

    match cli.command {
        Commands::Chat { message } => commands::chat::run(message).await?,
        Commands::Turn { file } => commands::turn::run(file).await?,
        Commands::Classify { text } => commands::classify::run(&text).await?,
        Commands::Tools => commands::tools::run().await?,
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config_cmd::show().await?,
            ConfigAction::Validate => commands::config_cmd::validate().await?,
            ConfigAction::Path => commands::config_cmd::path().await?,
            ConfigAction::Init { force } => commands::config_cmd::init(force).await?,
        },
    }

    Ok(())
}
