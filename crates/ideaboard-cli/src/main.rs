//! ideaboard - keep a README's project table in sync with repository activity

mod config;

use anyhow::Context;
use clap::Parser;
use colored::Colorize;
use ideaboard_core::{run_sync, StatusLabel, SyncOptions, SyncOutcome};
use ideaboard_providers::RepoClient;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use config::{FileConfig, Overrides, Settings};

#[derive(Parser)]
#[command(name = "ideaboard")]
#[command(
    version,
    about = "Sync a README project table with GitHub and GitLab activity",
    long_about = None
)]
struct Cli {
    /// README to update (default: README.md)
    #[arg(long)]
    readme: Option<PathBuf>,

    /// State file tracking the last seen commit per repo (default: data/state.json)
    #[arg(long)]
    state: Option<PathBuf>,

    /// YAML config file (default: ideaboard.yml in the working directory, if present)
    #[arg(long, short)]
    config: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    #[arg(long, help = "Print the updated README instead of writing any files")]
    dry_run: bool,

    #[arg(long, short, help = "Enable debug logging")]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{}: {:#}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "ideaboard_core=debug,ideaboard_providers=debug,ideaboard=debug"
    } else {
        "warn,ideaboard_core=info,ideaboard_providers=info,ideaboard=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let file = FileConfig::discover(cli.config.as_deref(), &cwd)?;
    let overrides = Overrides {
        readme: cli.readme.clone(),
        state: cli.state.clone(),
        timeout_seconds: cli.timeout,
    };
    let settings = Settings::resolve(overrides, file, |name| std::env::var(name).ok());

    tracing::debug!(
        readme = %settings.readme.display(),
        state = %settings.state.display(),
        "resolved settings"
    );

    let client = RepoClient::new(settings.providers)?;
    let options = SyncOptions {
        readme: settings.readme,
        state: settings.state,
        dry_run: cli.dry_run,
    };

    let outcome = run_sync(&options, &client)
        .with_context(|| format!("Failed to update {}", options.readme.display()))?;

    if cli.dry_run {
        print!("{}", outcome.document);
    } else {
        print_summary(&outcome, &options);
    }

    Ok(())
}

fn print_summary(outcome: &SyncOutcome, options: &SyncOptions) {
    for report in &outcome.reports {
        let status = match report.status {
            StatusLabel::Finished => report.status.to_string().green(),
            StatusLabel::Wip => report.status.to_string().yellow(),
            StatusLabel::NotStarted => report.status.to_string().dimmed(),
        };
        let marker = if report.changed {
            "●".cyan().bold()
        } else {
            "·".dimmed()
        };
        println!("  {} {} {} ({})", marker, report.name.bold(), status, report.provider);
    }

    println!(
        "{} Updated {} ({} project(s), {} with new commits), state saved to {}",
        "✓".green().bold(),
        options.readme.display(),
        outcome.reports.len(),
        outcome.changed_count(),
        options.state.display()
    );
}
