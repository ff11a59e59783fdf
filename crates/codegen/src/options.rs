use playscribe_core_types::{RawTrace, Viewport};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScriptOptions {
    pub title: String,
    /// Gaps longer than this become explicit waits.
    pub pacing_threshold_ms: i64,
    pub settle_wait_ms: u64,
    pub render_pacing: bool,
}

impl Default for ScriptOptions {
    fn default() -> Self {
        Self {
            title: "User interaction replay".to_string(),
            pacing_threshold_ms: 100,
            settle_wait_ms: 2_500,
            render_pacing: true,
        }
    }
}

/// Session facts the script needs besides the timeline itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScriptMeta {
    pub viewport: Viewport,
}

impl ScriptMeta {
    pub fn from_trace(trace: &RawTrace) -> Self {
        Self {
            viewport: trace.viewport(),
        }
    }

    pub fn with_viewport(mut self, viewport: Viewport) -> Self {
        self.viewport = viewport;
        self
    }
}
