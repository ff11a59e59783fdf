use serde::{Deserialize, Serialize};

/// Optional input channels. With both disabled the preprocessor only sees
/// clicks and text input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Channels {
    pub assertions: bool,
    pub form_controls: bool,
}

impl Default for Channels {
    fn default() -> Self {
        Self {
            assertions: true,
            form_controls: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreprocessPolicy {
    /// Clicks closer than this to a matching assertion are dropped.
    pub assertion_window_ms: i64,
    /// Repeated clicks on one selector with gaps up to this collapse into one.
    pub multi_click_window_ms: i64,
    /// Clicks and inputs closer than this to an overlapping form control are dropped.
    pub form_overlap_window_ms: i64,
    pub channels: Channels,
}

impl Default for PreprocessPolicy {
    fn default() -> Self {
        Self {
            assertion_window_ms: 1_000,
            multi_click_window_ms: 300,
            form_overlap_window_ms: 500,
            channels: Channels::default(),
        }
    }
}

impl PreprocessPolicy {
    /// Clicks and text input only.
    pub fn basic() -> Self {
        Self {
            channels: Channels {
                assertions: false,
                form_controls: false,
            },
            ..Self::default()
        }
    }
}
