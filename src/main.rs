use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use csscov::cli;
use csscov::coverage::Options;

/// csscov: CSS coverage reports from browser coverage records.
#[derive(Parser)]
#[command(name = "csscov", version, about)]
struct Cli {
    /// Coverage JSON file, as exported from the browser (`-` for stdin).
    #[arg(long, short, global = true, default_value = "-")]
    input: PathBuf,

    /// Do not extract `<style>` contents from HTML documents.
    #[arg(long, global = true)]
    no_html: bool,

    /// Log pipeline details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show overall coverage totals.
    Summary,

    /// List per-stylesheet coverage.
    Files {
        /// Sort by coverage rate ascending (show worst stylesheets first).
        #[arg(long)]
        sort_by_coverage: bool,
    },

    /// Show the formatted text of a stylesheet with per-line coverage.
    Lines {
        /// URL of the stylesheet, as reported.
        url: String,

        /// Only list uncovered line ranges.
        #[arg(long)]
        uncovered: bool,
    },

    /// Print a coverage report.
    Report {
        /// Output style.
        #[arg(long, value_enum, default_value = "text")]
        style: cli::Style,
    },

    /// Print the full result as JSON.
    Json {
        /// Pretty-print the JSON.
        #[arg(long)]
        pretty: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing(args.verbose);

    let options = if args.no_html {
        Options::default().without_html()
    } else {
        Options::default()
    };
    let result = cli::load_coverage(&args.input, &options)?;

    let output = match args.command {
        Commands::Summary => cli::cmd_summary(&result),
        Commands::Files { sort_by_coverage } => cli::cmd_files(&result, sort_by_coverage),
        Commands::Lines { url, uncovered } => cli::cmd_lines(&result, &url, uncovered)?,
        Commands::Report { style } => cli::cmd_report(&result, &style),
        Commands::Json { pretty } => cli::cmd_json(&result, pretty)?,
    };
    print!("{output}");
    Ok(())
}
