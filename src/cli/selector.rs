use anyhow::Result;
use clap::Args;
use playscribe_selector::canonicalize;
use serde_json::json;

use super::output::{emit, OutputFormat};

#[derive(Args, Clone, Debug)]
pub struct SelectorArgs {
    /// Selectors as recorded, e.g. "html>body>div#main>button"
    #[arg(required = true)]
    pub selectors: Vec<String>,

    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

pub async fn cmd_selector(args: SelectorArgs) -> Result<()> {
    let pairs: Vec<(String, String)> = args
        .selectors
        .into_iter()
        .map(|raw| {
            let canonical = canonicalize(&raw);
            (raw, canonical)
        })
        .collect();

    let text = match args.format {
        OutputFormat::Human => pairs
            .iter()
            .map(|(raw, canonical)| format!("{} -> {}", raw, canonical))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            let entries: Vec<_> = pairs
                .iter()
                .map(|(raw, canonical)| json!({"raw": raw, "canonical": canonical}))
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };
    emit(&text, None).await?;
    Ok(())
}
