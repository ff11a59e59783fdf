use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, ValueEnum};
use playscribe_timeline::export::{build_lines, serialize_lines, DEFAULT_MAX_LINE_BYTES};
use playscribe_timeline::{preprocess_with_report, PreprocessPolicy};
use tracing::info;

use super::generate::read_trace;
use super::output::emit;
use crate::cli::context::CliContext;

#[derive(Clone, Debug, ValueEnum)]
pub enum TimelineFormat {
    /// One JSON array of events
    Json,
    /// Header line, one line per event, footer line
    Jsonl,
}

#[derive(Args, Clone, Debug)]
pub struct TimelineArgs {
    /// Recorded trace, either bare or wrapped in a results message
    #[arg(short, long, value_name = "FILE")]
    pub trace: PathBuf,

    #[arg(long, value_enum, default_value = "json")]
    pub format: TimelineFormat,

    /// Ignore assertions and form controls
    #[arg(long)]
    pub basic: bool,

    /// Longest JSONL line accepted before the export fails
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_BYTES)]
    pub max_line_bytes: usize,

    /// Write to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

pub async fn cmd_timeline(args: TimelineArgs, ctx: &CliContext) -> Result<()> {
    let trace = read_trace(&args.trace).await?;
    let policy = if args.basic {
        PreprocessPolicy::basic()
    } else {
        ctx.config().preprocess.clone()
    };
    let (timeline, report) = preprocess_with_report(&trace, &policy);
    info!(
        events = timeline.len(),
        clicks_dropped = report.clicks_near_assertions
            + report.clicks_coalesced
            + report.clicks_on_form_controls,
        inputs_dropped = report.inputs_unsettled + report.inputs_on_form_controls,
        "timeline built"
    );

    let text = match args.format {
        TimelineFormat::Json => serde_json::to_string_pretty(&timeline)?,
        TimelineFormat::Jsonl => {
            let lines = build_lines(&timeline, &policy, Utc::now());
            serialize_lines(&lines, args.max_line_bytes)
                .context("exporting timeline")?
                .join("\n")
        }
    };

    if let Some(path) = emit(&text, args.output.as_deref()).await? {
        println!("Timeline written to {}", path.display());
    }
    Ok(())
}
