//! Shared primitives for the playscribe recording pipeline.
//!
//! The raw trace is the only value that crosses from capture into
//! preprocessing, so it lives here where both sides can depend on it.

use std::fmt;

use uuid::Uuid;

pub mod trace;

pub use trace::{
    Assertion, AssertionKind, ClickDetail, ClickLog, ControlKind, CustomEventRecord, FocusChange,
    FocusKind, FormElementChange, FormSubmission, InputChange, InputPhase, KeyboardActivity,
    MediaInteraction, MouseSample, NavigationEntry, RawTrace, ScrollPosition, SessionTime,
    TouchRecord, UserInfo, Viewport, VisibilityChange, WindowSize,
};

/// Wall-clock milliseconds since the unix epoch, as observed by the page.
pub type TimestampMs = i64;

#[cfg_attr(feature = "serde-full", derive(serde::Serialize, serde::Deserialize))]
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(pub String);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
