use chrono::{DateTime, Utc};
use playscribe_core_types::{AssertionKind, ControlKind, TimestampMs};
use playscribe_selector::CanonicalSelector;
use serde::Serialize;
use serde_json::Value as JsonValue;

/// Tie-break order for events sharing a timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EventCategory {
    FormControl,
    Click,
    Input,
    Assertion,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EventPayload {
    Click {
        x: f64,
        y: f64,
    },
    Input {
        value: String,
    },
    FormControl {
        control: ControlKind,
        value: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        checked: Option<bool>,
        #[serde(skip_serializing_if = "Option::is_none")]
        option_text: Option<String>,
    },
    Assertion {
        assertion: AssertionKind,
        #[serde(skip_serializing_if = "Option::is_none")]
        expected: Option<String>,
    },
}

impl EventPayload {
    pub fn category(&self) -> EventCategory {
        match self {
            EventPayload::Click { .. } => EventCategory::Click,
            EventPayload::Input { .. } => EventCategory::Input,
            EventPayload::FormControl { .. } => EventCategory::FormControl,
            EventPayload::Assertion { .. } => EventCategory::Assertion,
        }
    }
}

/// One replayable step. Only the preprocessor builds these.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CanonicalEvent {
    selector: CanonicalSelector,
    timestamp_ms: TimestampMs,
    #[serde(flatten)]
    payload: EventPayload,
}

impl CanonicalEvent {
    pub(crate) fn new(
        selector: CanonicalSelector,
        timestamp_ms: TimestampMs,
        payload: EventPayload,
    ) -> Self {
        Self {
            selector,
            timestamp_ms,
            payload,
        }
    }

    pub fn selector(&self) -> &CanonicalSelector {
        &self.selector
    }

    pub fn timestamp_ms(&self) -> TimestampMs {
        self.timestamp_ms
    }

    pub fn payload(&self) -> &EventPayload {
        &self.payload
    }

    pub fn category(&self) -> EventCategory {
        self.payload.category()
    }
}

/// Ordered, deduplicated events, non-decreasing by timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Timeline {
    events: Vec<CanonicalEvent>,
}

impl Timeline {
    pub(crate) fn from_sorted(events: Vec<CanonicalEvent>) -> Self {
        debug_assert!(events
            .windows(2)
            .all(|pair| pair[0].timestamp_ms <= pair[1].timestamp_ms));
        Self { events }
    }

    pub fn events(&self) -> &[CanonicalEvent] {
        &self.events
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CanonicalEvent> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn count(&self, category: EventCategory) -> usize {
        self.events
            .iter()
            .filter(|event| event.category() == category)
            .count()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a CanonicalEvent;
    type IntoIter = std::slice::Iter<'a, CanonicalEvent>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}

/// What each preprocessing step removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StitchReport {
    pub clicks_in: usize,
    pub clicks_near_assertions: usize,
    pub clicks_coalesced: usize,
    pub clicks_on_form_controls: usize,
    pub inputs_in: usize,
    pub inputs_unsettled: usize,
    pub inputs_on_form_controls: usize,
    pub form_changes_in: usize,
    pub form_changes_folded: usize,
    pub form_duplicates: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct HeaderLine {
    pub export_version: &'static str,
    pub generated_at: DateTime<Utc>,
    pub policy_snapshot: JsonValue,
}

#[derive(Debug, Clone, Serialize)]
pub struct FooterLine {
    pub total_events: usize,
    pub clicks: usize,
    pub inputs: usize,
    pub form_controls: usize,
    pub assertions: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum JsonlLine {
    Header(HeaderLine),
    Event(CanonicalEvent),
    Footer(FooterLine),
}
