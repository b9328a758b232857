use anyhow::{Context, Result};
use chrono::Datelike;
use clap::Parser;
use folio::cli::{Cli, CliCommand, ContentArgs, RunArgs, Settings, ValidateArgs, validate_payload};
use folio::content::SiteContent;
use folio::form::SimulatedSubmitter;
use folio::runtime::Runtime;
use folio::state::AppState;
use folio::terminal::Terminal;
use folio::ui::Renderer;
use folio::ui::theme::Theme;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode> {
    match Cli::parse().into_command() {
        CliCommand::Run(args) => run(&args),
        CliCommand::Validate(args) => validate(&args),
        CliCommand::Content(args) => content(&args),
    }
}

fn run(args: &RunArgs) -> Result<ExitCode> {
    let settings = Settings::load(args);
    init_tracing(&settings.log_file)?;
    info!(?settings, "starting folio");

    let content = SiteContent::load(settings.content.as_deref())?;
    let year = chrono::Local::now().year();
    let state = AppState::new(content, year, SimulatedSubmitter::new(settings.submit_delay));
    let terminal = Terminal::new().context("failed to open terminal")?;

    Runtime::new(state, terminal)
        .with_renderer(Renderer::new(Theme::default_theme()))
        .run()
        .context("terminal session failed")?;
    Ok(ExitCode::SUCCESS)
}

fn validate(args: &ValidateArgs) -> Result<ExitCode> {
    let errors = match &args.input {
        Some(path) => {
            let file = File::open(path)
                .with_context(|| format!("failed to open {}", path.display()))?;
            validate_payload(file)?
        }
        None => validate_payload(io::stdin().lock())?,
    };
    println!("{}", serde_json::to_string_pretty(&errors)?);
    Ok(if errors.is_empty() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

fn content(args: &ContentArgs) -> Result<ExitCode> {
    let content = SiteContent::load(args.content.as_deref())?;
    println!("{}", serde_json::to_string_pretty(&content)?);
    Ok(ExitCode::SUCCESS)
}

/// Logs go to a file: stdout belongs to the alternate screen.
fn init_tracing(path: &Path) -> Result<()> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
