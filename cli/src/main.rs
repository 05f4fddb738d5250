//! CLI for issues-to-blog.
//!
//! Mirrors labeled issues of the current repository into its `_posts` and
//! `_data/comments` directories, and pushes the result when asked to.

use clap::Parser;
use issues_to_blog::{BlogConfig, RunSummary, Runner, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Action that commits and pushes the generated files.
const PUSH_ACTION: &str = "push";

/// issues-to-blog - Mirror labeled GitHub issues into a Jekyll blog.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Pass `push` to commit and push the generated files.
    action: Option<String>,

    /// Settings file, relative to the current directory (defaults to
    /// issues-to-blog.toml in the repository root).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Render and log without writing files or pushing.
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    init_tracing();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("ERROR: {e}");
            return ExitCode::from(e.exit_code());
        }
    };

    match run(config).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Run failed");
            ExitCode::from(e.exit_code())
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Sets up the global tracing subscriber with:
/// - Compact log formatting (single-line output)
/// - Log level filtering via `RUST_LOG` env var (defaults to "info")
fn init_tracing() {
    tracing_subscriber::registry()
        .with(fmt::layer().compact().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}

/// Resolves the run configuration from the environment and arguments.
fn build_config(args: &Args) -> Result<BlogConfig, RunnerError> {
    let push = match args.action.as_deref() {
        Some(PUSH_ACTION) => true,
        Some(other) => {
            warn!(action = %other, "Ignoring unknown action");
            false
        }
        None => false,
    };

    let mut config = BlogConfig::from_env(push)?.with_dry_run(args.dry_run);
    if let Some(path) = &args.config {
        config = config.with_settings_path(path.clone());
    }
    Ok(config)
}

/// Main execution logic.
async fn run(config: BlogConfig) -> Result<RunSummary, RunnerError> {
    let runner = Runner::new(config).await?;
    runner.run().await
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    println!("\nSummary:");
    println!(
        "  Mode: {}",
        if summary.dry_run { "Dry Run" } else { "Live" }
    );
    println!("  Issues fetched: {}", summary.issues_fetched);
    println!("  Posts written: {}", summary.posts_written);
    println!("  Comments written: {}", summary.comments_written);
    match &summary.pushed_branch {
        Some(branch) => println!("  Pushed to: {branch}"),
        None => println!("  Pushed: no"),
    }
}
