use playscribe_core_types::InputChange;
use playscribe_selector::CanonicalSelector;

use super::forms::FormSummary;
use crate::model::{CanonicalEvent, EventPayload, StitchReport};

const TOGGLE_TYPE_MARKERS: [&str; 2] = ["type=\"checkbox\"", "type=\"radio\""];

/// Settled text input that no form control already accounts for.
pub(crate) fn consolidate(
    changes: &[InputChange],
    forms: &FormSummary,
    window_ms: i64,
    report: &mut StitchReport,
) -> Vec<CanonicalEvent> {
    let mut events = Vec::new();
    for change in changes {
        if !change.is_settled() {
            report.inputs_unsettled += 1;
            continue;
        }
        let selector = CanonicalSelector::new(&change.element_selector);
        if names_toggle(&change.element_selector)
            || names_toggle(selector.as_str())
            || forms.owns(&selector)
            || forms.overlaps(&selector, change.timestamp, window_ms)
        {
            report.inputs_on_form_controls += 1;
            continue;
        }
        events.push(CanonicalEvent::new(
            selector,
            change.timestamp,
            EventPayload::Input {
                value: change.value.clone(),
            },
        ));
    }
    events
}

fn names_toggle(selector: &str) -> bool {
    TOGGLE_TYPE_MARKERS
        .iter()
        .any(|marker| selector.contains(marker))
}
