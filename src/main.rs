use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kickoff::prompt::TerminalPrompt;
use kickoff::{SystemRunner, Wizard, WizardConfig};

#[derive(Parser)]
#[command(
    author,
    version = env!("CARGO_PKG_VERSION"),
    about = "Start a new Nuxt project from the team template",
    long_about = None
)]
struct Cli {}

/// Diagnostics go to stderr so they never mix with the wizard's own output.
fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_env("KICKOFF_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    Cli::parse();
    init_tracing();

    let config = WizardConfig::load();
    let parent = std::env::current_dir().context("Failed to read current directory")?;

    println!("{}", "🚀 kickoff: new project setup".bold());
    println!("   Template: {}\n", config.template_repo.cyan());

    let report = Wizard::new(&SystemRunner, &config, parent).run(&TerminalPrompt);
    std::process::exit(report.exit_code());
}
