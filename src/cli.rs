use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::{error, info};
use validator::Validate;

use crate::aggregate::summarize_report;
use crate::config::SummaryConfig;
use crate::file_utils::read_json_file;
use crate::summary::models::SummaryQuery;
use crate::summary::utils::{build_poster, resolve_config};

/// Running summary from a fitness-tracker activity history
#[derive(Parser, Debug)]
#[command(name = "run-summary")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP API (default)
    Serve,

    /// Summarize a JSON export of activities and print the result
    Summarize(SummarizeArgs),
}

#[derive(Args, Debug, Clone)]
pub struct SummarizeArgs {
    /// Path to a JSON array of activity records
    pub file: PathBuf,

    /// Keep only runs from this local year
    #[arg(long)]
    pub year: Option<i32>,

    /// Minutes east of UTC for local-time bucketing
    #[arg(long, allow_hyphen_values = true)]
    pub offset_minutes: Option<i32>,

    /// Local date to measure the current streak against (YYYY-MM-DD)
    #[arg(long)]
    pub today: Option<NaiveDate>,

    /// Print the poster payload instead of the full statistics
    #[arg(long)]
    pub poster: bool,

    /// Athlete name for the poster
    #[arg(long)]
    pub athlete: Option<String>,
}

impl SummarizeArgs {
    fn query(&self) -> SummaryQuery {
        SummaryQuery {
            offset_minutes: self.offset_minutes,
            year: self.year,
            today: self.today,
            athlete: self.athlete.clone(),
        }
    }
}

/// Outcome of a CLI summary run.
#[derive(Debug, PartialEq)]
pub enum CliOutput {
    Json(String),
    NoRuns { skipped: usize },
}

/// Read, summarize and render the export named in `args`.
///
/// Errors are reported as human-readable messages.
pub async fn render_summary(
    args: &SummarizeArgs,
    base: &SummaryConfig,
) -> Result<CliOutput, String> {
    let query = args.query();
    query.validate().map_err(|e| e.to_string())?;

    let (config, today) = resolve_config(base, &query).map_err(|e| e.to_string())?;
    let document = read_json_file(&args.file)
        .await
        .map_err(|e| e.to_string())?;

    let report = summarize_report(&document, &config, today).map_err(|e| e.to_string())?;
    let Some(summary) = report.statistics else {
        return Ok(CliOutput::NoRuns {
            skipped: report.skipped_records,
        });
    };

    let rendered = if args.poster {
        serde_json::to_string_pretty(&build_poster(args.athlete.as_deref(), &summary))
    } else {
        serde_json::to_string_pretty(&summary)
    };

    rendered.map(CliOutput::Json).map_err(|e| e.to_string())
}

pub async fn run_cli(args: &SummarizeArgs, base: &SummaryConfig) -> Result<(), String> {
    info!("Summarizing {}", args.file.display());

    match render_summary(args, base).await {
        Ok(CliOutput::Json(json)) => println!("{}", json),
        Ok(CliOutput::NoRuns { skipped: 0 }) => println!("No running activities found."),
        Ok(CliOutput::NoRuns { skipped }) => println!(
            "No running activities found ({} malformed records skipped).",
            skipped
        ),
        Err(e) => {
            error!("Failed to summarize activities: {}", e);
            return Err(e);
        }
    }

    Ok(())
}
