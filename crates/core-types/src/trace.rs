//! Raw, per-signal buffers accumulated during one recording session.
//!
//! Field names serialize in camelCase so a trace delivered by the page-side
//! script deserializes without translation.

use crate::TimestampMs;

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280,
            height: 720,
        }
    }
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct UserInfo {
    pub window_size: [u32; 2],
    pub app_code_name: String,
    pub app_name: String,
    pub vendor: String,
    pub platform: String,
    pub user_agent: String,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionTime {
    pub start_time: TimestampMs,
    pub current_time: TimestampMs,
    pub stop_time: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct ClickDetail {
    pub x: f64,
    pub y: f64,
    pub selector: String,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClickLog {
    pub click_count: u64,
    pub click_details: Vec<ClickDetail>,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyboardActivity {
    pub key: String,
    pub timestamp: TimestampMs,
}

/// Whether an input record is a keystroke-level snapshot or the settled value.
#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputPhase {
    Intermediate,
    Complete,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputChange {
    pub element_selector: String,
    pub value: String,
    pub timestamp: TimestampMs,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub action: Option<InputPhase>,
}

impl InputChange {
    /// Records without a phase marker come from older captures and count as settled.
    pub fn is_settled(&self) -> bool {
        !matches!(self.action, Some(InputPhase::Intermediate))
    }
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FocusKind {
    Focus,
    Blur,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FocusChange {
    pub element_selector: String,
    #[cfg_attr(feature = "serde-full", serde(rename = "type"))]
    pub kind: FocusKind,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlKind {
    Checkbox,
    Radio,
    Select,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlKind::Checkbox => "checkbox",
            ControlKind::Radio => "radio",
            ControlKind::Select => "select",
        }
    }

    /// Checkbox and radio controls replay as a final checked state.
    pub fn is_toggle(&self) -> bool {
        matches!(self, ControlKind::Checkbox | ControlKind::Radio)
    }
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormElementChange {
    pub element_selector: String,
    #[cfg_attr(feature = "serde-full", serde(rename = "type"))]
    pub kind: ControlKind,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub value: String,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub checked: Option<bool>,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub text: Option<String>,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AssertionKind {
    IsVisible,
    HasText,
    IsChecked,
    IsNotChecked,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assertion {
    pub selector: String,
    #[cfg_attr(feature = "serde-full", serde(rename = "type"))]
    pub kind: AssertionKind,
    #[cfg_attr(feature = "serde-full", serde(default))]
    pub value: Option<String>,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NavigationEntry {
    pub url: String,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormSubmission {
    pub name: Option<String>,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq)]
pub struct TouchRecord {
    pub kind: String,
    pub x: f64,
    pub y: f64,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MediaInteraction {
    pub kind: String,
    pub source: String,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowSize {
    pub width: u32,
    pub height: u32,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VisibilityChange {
    pub state: String,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollPosition {
    pub x: f64,
    pub y: f64,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MouseSample {
    pub x: f64,
    pub y: f64,
    pub timestamp: TimestampMs,
}

#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CustomEventRecord {
    pub name: String,
    pub detail: Option<String>,
    pub timestamp: TimestampMs,
}

/// Everything one recording session observed, grouped by signal kind.
///
/// Buffers are append-only while recording. Each buffer is individually
/// ordered by capture time; ordering across buffers is the preprocessor's job.
#[cfg_attr(
    feature = "serde-full",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase", default)
)]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawTrace {
    #[cfg_attr(
        feature = "serde-full",
        serde(skip_serializing_if = "Option::is_none")
    )]
    pub user_info: Option<UserInfo>,
    pub time: SessionTime,
    pub clicks: ClickLog,
    pub mouse_movements: Vec<MouseSample>,
    pub mouse_scroll: Vec<ScrollPosition>,
    pub keyboard_activities: Vec<KeyboardActivity>,
    pub input_changes: Vec<InputChange>,
    pub focus_changes: Vec<FocusChange>,
    pub navigation_history: Vec<NavigationEntry>,
    pub form_interactions: Vec<FormSubmission>,
    pub form_element_changes: Vec<FormElementChange>,
    pub touch_events: Vec<TouchRecord>,
    pub media_interactions: Vec<MediaInteraction>,
    pub window_sizes: Vec<WindowSize>,
    #[cfg_attr(feature = "serde-full", serde(alias = "visibilitychanges"))]
    pub visibility_changes: Vec<VisibilityChange>,
    pub custom_events: Vec<CustomEventRecord>,
    pub assertions: Vec<Assertion>,
}

impl RawTrace {
    pub fn new() -> Self {
        Self::default()
    }

    /// True when none of the replayable channels captured anything.
    pub fn has_no_interactions(&self) -> bool {
        self.clicks.click_details.is_empty()
            && self.input_changes.is_empty()
            && self.assertions.is_empty()
            && self.form_element_changes.is_empty()
    }

    /// Viewport to replay at: the session's initial window size, then the last
    /// observed resize, then the default.
    pub fn viewport(&self) -> Viewport {
        if let Some(info) = &self.user_info {
            let [width, height] = info.window_size;
            if width > 0 && height > 0 {
                return Viewport { width, height };
            }
        }
        self.window_sizes
            .last()
            .map(|size| Viewport {
                width: size.width,
                height: size.height,
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn viewport_prefers_user_info() {
        let mut trace = RawTrace::new();
        trace.window_sizes.push(WindowSize {
            width: 800,
            height: 600,
            timestamp: 10,
        });
        assert_eq!(trace.viewport(), Viewport { width: 800, height: 600 });

        trace.user_info = Some(UserInfo {
            window_size: [1440, 900],
            ..UserInfo::default()
        });
        assert_eq!(trace.viewport(), Viewport { width: 1440, height: 900 });
    }

    #[test]
    fn empty_trace_has_no_interactions() {
        let mut trace = RawTrace::new();
        assert!(trace.has_no_interactions());
        trace.keyboard_activities.push(KeyboardActivity {
            key: "Enter".into(),
            timestamp: 1,
        });
        assert!(trace.has_no_interactions());
        trace.assertions.push(Assertion {
            selector: "#title".into(),
            kind: AssertionKind::IsVisible,
            value: None,
            timestamp: 2,
        });
        assert!(!trace.has_no_interactions());
    }

    #[test]
    fn unmarked_input_counts_as_settled() {
        let change = InputChange {
            element_selector: "#q".into(),
            value: "rust".into(),
            timestamp: 5,
            action: None,
        };
        assert!(change.is_settled());
    }

    #[cfg(feature = "serde-full")]
    #[test]
    fn reads_page_side_field_names() {
        let raw = serde_json::json!({
            "clicks": {"clickCount": 1, "clickDetails": [{"x": 1.0, "y": 2.0, "selector": "button", "timestamp": 7}]},
            "inputChanges": [{"elementSelector": "#q", "value": "a", "timestamp": 8, "action": "complete"}],
            "formElementChanges": [{"elementSelector": "#agree", "type": "checkbox", "value": "on", "checked": true, "timestamp": 9}],
            "assertions": [{"selector": "#title", "type": "hasText", "value": "Hi", "timestamp": 10}],
            "visibilitychanges": [{"state": "hidden", "timestamp": 11}]
        });
        let trace: RawTrace = serde_json::from_value(raw).unwrap();
        assert_eq!(trace.clicks.click_details[0].selector, "button");
        assert_eq!(trace.input_changes[0].action, Some(InputPhase::Complete));
        assert_eq!(trace.form_element_changes[0].kind, ControlKind::Checkbox);
        assert_eq!(trace.assertions[0].kind, AssertionKind::HasText);
        assert_eq!(trace.visibility_changes.len(), 1);
    }
}
