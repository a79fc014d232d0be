use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use customer_dashboard::{html, source, Dashboard, DEFAULT_SOURCE};

#[derive(Parser, Debug)]
#[command(version, about = "Customer transactions dashboard")]
struct Cli {
    /// Path or http(s) URL of customer.json
    #[arg(long, default_value = DEFAULT_SOURCE)]
    source: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Interactive terminal dashboard (default)
    Tui,
    /// Write the HTML dashboard page once
    Render {
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the per-customer totals
    Totals,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => run_ui_mode(&cli.source),
        Command::Render { output } => run_render(&cli.source, output),
        Command::Totals => run_totals(&cli.source),
    }
}

fn load(location: &str) -> Result<Dashboard> {
    let source = source::open(location)?;
    let mut dashboard = Dashboard::new();
    dashboard.load(source.as_ref());
    Ok(dashboard)
}

fn run_render(location: &str, output: Option<PathBuf>) -> Result<()> {
    let page = html::render_page(&load(location)?);

    match output {
        Some(path) => fs::write(&path, page)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => print!("{}", page),
    }

    Ok(())
}

fn run_totals(location: &str) -> Result<()> {
    let dashboard = load(location)?;

    for aggregate in dashboard.aggregates() {
        println!("{}\t{}", aggregate.name, aggregate.total);
    }

    Ok(())
}

#[cfg(feature = "tui")]
fn run_ui_mode(location: &str) -> Result<()> {
    use customer_dashboard::ui;

    let source = source::open(location)?;
    let mut app = ui::App::new(source);
    ui::run_ui(&mut app)
}

#[cfg(not(feature = "tui"))]
fn run_ui_mode(_location: &str) -> Result<()> {
    anyhow::bail!(
        "TUI mode not available; rebuild with `--features tui` or run `dashboard-server --features server`"
    )
}
