use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::Config;

pub struct CliContext {
    config: Arc<Config>,
    config_path: PathBuf,
}

impl CliContext {
    pub fn new(config: Config, config_path: PathBuf) -> Self {
        Self {
            config: Arc::new(config),
            config_path,
        }
    }

    pub fn config(&self) -> &Config {
        self.config.as_ref()
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    /// `explicit` when given, otherwise `file_name` under the configured output directory.
    pub fn output_path(&self, explicit: Option<&PathBuf>, file_name: &str) -> PathBuf {
        match explicit {
            Some(path) => path.clone(),
            None => self.config.output_dir.join(file_name),
        }
    }
}
