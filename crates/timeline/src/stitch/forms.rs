use std::collections::BTreeMap;

use playscribe_core_types::{ControlKind, FormElementChange, TimestampMs};
use playscribe_selector::{contains_either, CanonicalSelector};

use super::within_window;
use crate::model::{CanonicalEvent, EventPayload};

/// Consolidated form-control changes plus what later steps need to know
/// about them: which selectors they own and when each was last set.
#[derive(Debug, Default)]
pub(crate) struct FormSummary {
    pub events: Vec<CanonicalEvent>,
    last_at: BTreeMap<CanonicalSelector, TimestampMs>,
}

impl FormSummary {
    pub fn owns(&self, selector: &CanonicalSelector) -> bool {
        !selector.is_empty() && self.last_at.contains_key(selector)
    }

    /// A form control whose selector contains, or is contained in, `selector`
    /// was last set less than `window_ms` away from `at`.
    pub fn overlaps(&self, selector: &CanonicalSelector, at: TimestampMs, window_ms: i64) -> bool {
        self.last_at.iter().any(|(form_selector, form_at)| {
            contains_either(selector.as_str(), form_selector.as_str())
                && within_window(at, *form_at, window_ms)
        })
    }
}

/// Checkbox and radio groups keep their final state; selects keep each change
/// to a new value, in order. A group's kind is taken from its first change.
pub(crate) fn consolidate(changes: &[FormElementChange]) -> FormSummary {
    let mut grouped: BTreeMap<CanonicalSelector, Vec<&FormElementChange>> = BTreeMap::new();
    for change in changes {
        grouped
            .entry(CanonicalSelector::new(&change.element_selector))
            .or_default()
            .push(change);
    }

    let mut summary = FormSummary::default();
    for (selector, mut group) in grouped {
        group.sort_by_key(|change| change.timestamp);
        let kind = group[0].kind;
        if kind.is_toggle() {
            if let Some(last) = group.last() {
                summary.last_at.insert(selector.clone(), last.timestamp);
                summary.events.push(form_event(selector, kind, last));
            }
        } else {
            let mut last_value: Option<&str> = None;
            for change in group {
                if last_value == Some(change.value.as_str()) {
                    continue;
                }
                last_value = Some(change.value.as_str());
                summary.last_at.insert(selector.clone(), change.timestamp);
                summary.events.push(form_event(selector.clone(), kind, change));
            }
        }
    }
    summary
}

fn form_event(
    selector: CanonicalSelector,
    kind: ControlKind,
    change: &FormElementChange,
) -> CanonicalEvent {
    let payload = if kind.is_toggle() {
        EventPayload::FormControl {
            control: kind,
            value: change.value.clone(),
            checked: Some(change.checked.unwrap_or(false)),
            option_text: None,
        }
    } else {
        EventPayload::FormControl {
            control: kind,
            value: change.value.clone(),
            checked: None,
            option_text: change.text.clone(),
        }
    };
    CanonicalEvent::new(selector, change.timestamp, payload)
}
