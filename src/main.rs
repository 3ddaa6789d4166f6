//! git-massage - CLI entry point.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use git_massage::app;
use git_massage::config::{self, API_KEY_ENV_VAR, Config};
use git_massage::git::{StagedChanges, SystemGit};
use git_massage::llm::OpenAiClient;
use git_massage::output::Console;
use git_massage::review::DialoguerTerminal;
use git_massage::setup::{offer_setup, run_setup};

/// Automate semantic git commit messages using OpenAI.
#[derive(Parser, Debug)]
#[command(name = "git-massage")]
#[command(about = "Automate semantic git commit messages using OpenAI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Override the AI model to use
    #[arg(long)]
    model: Option<String>,

    /// Override the OpenAI API key
    #[arg(long)]
    api_key: Option<String>,

    /// Run the setup wizard
    #[arg(long = "setup")]
    setup: bool,

    /// Print the message to stdout only (for editor integration)
    #[arg(long)]
    print_only: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Configure git-massage (API key and default model)
    Setup,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    // Decided once, before anything is printed
    let console = Console::new(cli.print_only);

    match run(cli, &console).await {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            console.error(&format!("{e:#}"));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, console: &Console) -> Result<u8> {
    if cli.setup || matches!(cli.command, Some(Command::Setup)) {
        let path = config::config_path().context("Cannot locate the config file")?;
        run_setup(console, &path)?;
        return Ok(0);
    }

    let config = Config::load().with_overrides(cli.model, cli.api_key);

    let api_key = match config.openai_api_key.clone() {
        Some(key) => key,
        None => match prompt_for_key(console)? {
            Some(key) => key,
            None => return Ok(1),
        },
    };

    let git = StagedChanges::new(SystemGit::new());
    let generator = OpenAiClient::new();

    match app::run(&config, &api_key, console, &git, &generator, &DialoguerTerminal).await {
        Ok(status) => Ok(status.exit_code()),
        Err(e) => {
            e.report(console);
            Ok(1)
        }
    }
}

/// Explain the missing key and offer to run setup; returns the saved key.
fn prompt_for_key(console: &Console) -> Result<Option<String>> {
    console.error("OpenAI API Key not found.");
    console.info(&format!(
        "Please run 'git-massage --setup' or set the {API_KEY_ENV_VAR} env var."
    ));

    if !offer_setup()? {
        return Ok(None);
    }

    let path = config::config_path().context("Cannot locate the config file")?;
    run_setup(console, &path)?;

    Ok(Config::load_from(&path).openai_api_key)
}

/// Log to stderr so stdout stays clean for `--print-only`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
