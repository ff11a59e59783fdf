use std::collections::BTreeSet;

use playscribe_core_types::ControlKind;
use playscribe_selector::CanonicalSelector;

use crate::model::{CanonicalEvent, EventPayload};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum FormState {
    Checked(bool),
    Value(String),
}

/// Stable sort by timestamp; ties resolve form control, click, input, assertion.
pub(crate) fn merge(mut events: Vec<CanonicalEvent>) -> Vec<CanonicalEvent> {
    events.sort_by(|a, b| {
        a.timestamp_ms()
            .cmp(&b.timestamp_ms())
            .then_with(|| a.category().cmp(&b.category()))
    });
    events
}

/// Keep the first form-control event per (kind, selector, resulting state).
/// Other categories pass through untouched.
pub(crate) fn dedupe_form_controls(events: Vec<CanonicalEvent>) -> (Vec<CanonicalEvent>, usize) {
    let mut seen: BTreeSet<(ControlKind, CanonicalSelector, FormState)> = BTreeSet::new();
    let mut dropped = 0;
    let mut kept = Vec::with_capacity(events.len());
    for event in events {
        if let EventPayload::FormControl {
            control,
            value,
            checked,
            ..
        } = event.payload()
        {
            let state = match checked {
                Some(checked) => FormState::Checked(*checked),
                None => FormState::Value(value.clone()),
            };
            if !seen.insert((*control, event.selector().clone(), state)) {
                dropped += 1;
                continue;
            }
        }
        kept.push(event);
    }
    (kept, dropped)
}
