use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::ValueEnum;
use tokio::fs;
use tokio::io::{self, AsyncWriteExt};

#[derive(Clone, Debug, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
}

/// Write `text` to `path`, creating parent directories, or to stdout when no
/// path is given.
pub async fn emit(text: &str, path: Option<&Path>) -> Result<Option<PathBuf>> {
    match path {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .await
                        .with_context(|| format!("creating {}", parent.display()))?;
                }
            }
            fs::write(path, text)
                .await
                .with_context(|| format!("writing {}", path.display()))?;
            Ok(Some(path.to_path_buf()))
        }
        None => {
            let mut stdout = io::stdout();
            stdout.write_all(text.as_bytes()).await?;
            if !text.ends_with('\n') {
                stdout.write_all(b"\n").await?;
            }
            stdout.flush().await?;
            Ok(None)
        }
    }
}
