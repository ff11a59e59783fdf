//! Application configuration
//!
//! Groups the per-stage settings of the capture, preprocessing and script
//! generation crates under one YAML document.

use std::path::PathBuf;

use playscribe_capture::CaptureConfig;
use playscribe_codegen::ScriptOptions;
use playscribe_timeline::PreprocessPolicy;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Signal families the recorder observes.
    pub capture: CaptureConfig,
    /// Windows and channels used when building the timeline.
    pub preprocess: PreprocessPolicy,
    /// Rendering options for generated scripts.
    pub script: ScriptOptions,
    /// Where commands write files when no explicit output is given.
    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            preprocess: PreprocessPolicy::default(),
            script: ScriptOptions::default(),
            output_dir: PathBuf::from("playscribe-output"),
        }
    }
}
