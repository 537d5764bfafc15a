use crate::commands::{run_analyze, run_batch, run_highlight, run_normalize};
use crate::commands::{AnalyzeArgs, BatchArgs, HighlightArgs, NormalizeArgs};
use clap::{Parser, Subcommand};
use content_scoring::config::AppConfig;
use content_scoring::error::AppError;
use content_scoring::telemetry;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(
    name = "content-writer",
    about = "Grade draft articles against SEO content briefs from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Score one text against a guide and print the JSON report
    Analyze(AnalyzeArgs),
    /// Score every text listed in a manifest, loading each guide once
    Batch(BatchArgs),
    /// Show where each guide keyword occurs in a text
    Highlight(HighlightArgs),
    /// Print the normalized form keywords are matched against
    Normalize(NormalizeArgs),
}

pub(crate) fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let config = AppConfig::load()?;
    telemetry::init(&config.telemetry)?;
    debug!(?config.environment, "content writer starting");

    match cli.command {
        Command::Analyze(args) => run_analyze(&config, args),
        Command::Batch(args) => run_batch(&config, args),
        Command::Highlight(args) => run_highlight(&config, args),
        Command::Normalize(args) => run_normalize(args),
    }
}
