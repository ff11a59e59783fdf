use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::Args;
use playscribe_capture::{ManualClock, PageEnvironment, PageSignal, Recorder, RecorderState};
use playscribe_core_types::RawTrace;
use playscribe_host_bridge::{EventBus, HostInput, HostMessage, InMemoryBus, Outbox, RecorderHost};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::fs;
use tracing::{debug, info, warn};

use super::output::emit;
use crate::cli::context::CliContext;

#[derive(Args, Clone, Debug)]
pub struct RecordArgs {
    /// Signal log: one JSON object per line with `at` and either `signal` or `message`
    #[arg(short, long, value_name = "FILE")]
    pub signals: PathBuf,

    /// Page environment (viewport, user agent, initial document) as JSON
    #[arg(short, long, value_name = "FILE")]
    pub page: Option<PathBuf>,

    /// Send a start message before the first line
    #[arg(long)]
    pub auto_start: bool,

    /// Write the trace to this file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

/// One line of a signal log. Lines with neither `signal` nor `message` only
/// move the clock, which lets pending debounce completions fire.
#[derive(Debug, Deserialize)]
struct LogLine {
    at: i64,
    #[serde(default)]
    signal: Option<PageSignal>,
    #[serde(default)]
    message: Option<Value>,
}

impl LogLine {
    fn into_input(self) -> HostInput {
        match (self.signal, self.message) {
            (Some(signal), _) => HostInput::Signal(signal),
            (None, Some(message)) => HostInput::Message(message),
            (None, None) => HostInput::Tick,
        }
    }
}

pub async fn cmd_record(args: RecordArgs, ctx: &CliContext) -> Result<()> {
    let raw = fs::read_to_string(&args.signals)
        .await
        .with_context(|| format!("reading {}", args.signals.display()))?;
    let lines = parse_log(&raw).with_context(|| format!("parsing {}", args.signals.display()))?;
    let page = match &args.page {
        Some(path) => read_page(path).await?,
        None => PageEnvironment::default(),
    };

    let trace = replay_log(lines, page, ctx, args.auto_start).await?;
    let text = serde_json::to_string_pretty(&trace)?;
    if let Some(path) = emit(&text, args.output.as_deref()).await? {
        println!("Trace written to {}", path.display());
    }
    Ok(())
}

fn parse_log(raw: &str) -> Result<Vec<LogLine>> {
    raw.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(idx, line)| {
            serde_json::from_str(line).with_context(|| format!("line {}", idx + 1))
        })
        .collect()
}

async fn read_page(path: &Path) -> Result<PageEnvironment> {
    let raw = fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing page {}", path.display()))
}

/// Feed the log through a host whose recorder runs on a manual clock, one
/// line at a time, and return the trace it publishes.
async fn replay_log(
    lines: Vec<LogLine>,
    page: PageEnvironment,
    ctx: &CliContext,
    auto_start: bool,
) -> Result<RawTrace> {
    let start_at = lines.first().map(|line| line.at).unwrap_or_default();
    let clock = Arc::new(ManualClock::new(start_at));
    let recorder = Recorder::new(ctx.config().capture.clone(), clock.clone());
    let bus = InMemoryBus::<HostMessage>::new(64);
    let mut outbound = Outbox::subscribe(&*bus);
    let outbound_bus: Arc<dyn EventBus<HostMessage>> = bus;
    let mut host = RecorderHost::new(recorder, page, outbound_bus);

    host.announce_ready().await?;
    if auto_start {
        host.handle_message(&json!({"type": "recorder-start"})).await?;
    }
    let total = lines.len();
    for line in lines {
        clock.set(line.at);
        host.handle(line.into_input()).await?;
    }
    if host.recorder().state() == RecorderState::Recording {
        warn!("signal log ended while recording; stopping");
        host.handle_message(&json!({"type": "recorder-stop"})).await?;
    }
    info!(lines = total, "signal log replayed");

    let mut trace = None;
    for message in outbound.drain() {
        debug!(kind = message.kind(), "outbound message");
        if let HostMessage::Results(results) = message {
            trace = Some(results);
        }
    }
    if outbound.skipped() > 0 {
        warn!(skipped = outbound.skipped(), "outbound messages lost during replay");
    }
    match trace {
        Some(trace) => Ok(trace),
        None => bail!("signal log never started the recorder"),
    }
}
