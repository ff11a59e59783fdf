use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodegenError {
    #[error("failed to write script to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Write a rendered script, creating parent directories as needed.
pub fn write_script(path: &Path, script: &str) -> Result<PathBuf, CodegenError> {
    let wrap = |source| CodegenError::Write {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            create_dir_all(parent).map_err(wrap)?;
        }
    }
    let mut file = File::create(path).map_err(wrap)?;
    file.write_all(script.as_bytes()).map_err(wrap)?;
    file.flush().map_err(wrap)?;
    Ok(path.to_path_buf())
}
