use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use playscribe_codegen::{generate_script, write_script, ScriptMeta};
use playscribe_core_types::{RawTrace, Viewport};
use playscribe_host_bridge::trace_from_json;
use playscribe_timeline::{preprocess_with_report, PreprocessPolicy};
use tokio::fs;
use tracing::info;

use super::output::emit;
use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Recorded trace, either bare or wrapped in a results message
    #[arg(short, long, value_name = "FILE")]
    pub trace: PathBuf,

    /// Page the generated test navigates to
    #[arg(short, long)]
    pub url: String,

    /// Script destination (defaults to <output_dir>/<trace name>.spec.ts)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Print the script instead of writing it
    #[arg(long, conflicts_with = "output")]
    pub stdout: bool,

    /// Override the recorded viewport, e.g. 1280x720
    #[arg(long, value_parser = parse_viewport)]
    pub viewport: Option<Viewport>,

    /// Ignore assertions and form controls
    #[arg(long)]
    pub basic: bool,

    /// Test title (defaults to the configured title)
    #[arg(long)]
    pub title: Option<String>,
}

pub async fn cmd_generate(args: GenerateArgs, ctx: &CliContext) -> Result<()> {
    let trace = read_trace(&args.trace).await?;
    let policy = if args.basic {
        PreprocessPolicy::basic()
    } else {
        ctx.config().preprocess.clone()
    };
    let (timeline, report) = preprocess_with_report(&trace, &policy);
    info!(
        events = timeline.len(),
        clicks_coalesced = report.clicks_coalesced,
        "trace preprocessed"
    );

    let mut meta = ScriptMeta::from_trace(&trace);
    if let Some(viewport) = args.viewport {
        meta = meta.with_viewport(viewport);
    }
    let mut options = ctx.config().script.clone();
    if let Some(title) = args.title {
        options.title = title;
    }
    let script = generate_script(&args.url, &timeline, &meta, &options);

    if args.stdout {
        emit(&script, None).await?;
        return Ok(());
    }
    let target = ctx.output_path(args.output.as_ref(), &script_file_name(&args.trace));
    let written = write_script(&target, &script)?;
    println!("Script written to {}", written.display());
    Ok(())
}

pub(crate) async fn read_trace(path: &Path) -> Result<RawTrace> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    trace_from_json(&raw).with_context(|| format!("parsing trace {}", path.display()))
}

fn script_file_name(trace: &Path) -> String {
    let stem = trace
        .file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .unwrap_or("recording");
    format!("{}.spec.ts", stem)
}

pub(crate) fn parse_viewport(raw: &str) -> Result<Viewport> {
    let Some((width, height)) = raw.trim().split_once(['x', 'X']) else {
        bail!("viewport must look like WIDTHxHEIGHT, got {:?}", raw);
    };
    let width: u32 = width.trim().parse().context("invalid viewport width")?;
    let height: u32 = height.trim().parse().context("invalid viewport height")?;
    Ok(Viewport { width, height })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_parses_both_separators() {
        assert_eq!(
            parse_viewport("1280x720").unwrap(),
            Viewport {
                width: 1280,
                height: 720
            }
        );
        assert_eq!(parse_viewport(" 800X600 ").unwrap().height, 600);
        assert!(parse_viewport("1280").is_err());
        assert!(parse_viewport("wide x 3").is_err());
    }

    #[test]
    fn script_name_follows_trace_stem() {
        assert_eq!(
            script_file_name(Path::new("traces/checkout.json")),
            "checkout.spec.ts"
        );
        assert_eq!(script_file_name(Path::new("/")), "recording.spec.ts");
    }
}
