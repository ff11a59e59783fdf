//! Canonical automation selectors.
//!
//! Rules, applied in order:
//! 1. A test-id attribute selector wins outright
//! 2. A leading `html>body>` prefix is dropped
//! 3. Paths deeper than two segments keep only the last two
//! 4. Any `#id` collapses the selector to that id
//! 5. Anything else is returned cleaned but otherwise unchanged

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

pub const TEST_ID_ATTRIBUTE: &str = "data-testid";

static TEST_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"\[data-testid="([^"]+)"\]"#).expect("test id pattern"));
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"#([a-zA-Z0-9_-]+)").expect("id pattern"));

const MAX_SEGMENTS: usize = 2;

pub fn canonicalize(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return String::new();
    }

    if let Some(caps) = TEST_ID_RE.captures(trimmed) {
        return format!("[{}=\"{}\"]", TEST_ID_ATTRIBUTE, &caps[1]);
    }

    let mut segments: Vec<&str> = trimmed
        .split('>')
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .collect();
    if segments.len() > MAX_SEGMENTS && segments[0] == "html" && segments[1] == "body" {
        segments.drain(..2);
    }

    let collapsed = if segments.len() > MAX_SEGMENTS {
        segments[segments.len() - MAX_SEGMENTS..].join(" ")
    } else {
        segments.join(">")
    };

    if let Some(caps) = ID_RE.captures(&collapsed) {
        return format!("#{}", &caps[1]);
    }

    collapsed
}

/// A selector that has already been through [`canonicalize`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CanonicalSelector(String);

impl CanonicalSelector {
    pub fn new(raw: &str) -> Self {
        Self(canonicalize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CanonicalSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for CanonicalSelector {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
