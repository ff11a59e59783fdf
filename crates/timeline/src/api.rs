use playscribe_core_types::RawTrace;
use playscribe_selector::CanonicalSelector;
use tracing::debug;

use crate::model::{CanonicalEvent, EventPayload, StitchReport, Timeline};
use crate::policy::PreprocessPolicy;
use crate::stitch::clicks::{self, ClickCandidate};
use crate::stitch::forms::{self, FormSummary};
use crate::stitch::{inputs, merge};

/// Build the replayable timeline for a finished trace.
///
/// Steps, in order:
/// 1. clicks near a matching assertion are dropped
/// 2. rapid repeat clicks on one selector collapse into the first
/// 3. form-control changes are consolidated per selector
/// 4. only settled text input not owned by a form control is kept
/// 5. clicks that belong to a form-control change are dropped
/// 6. everything is merged and stably sorted by time
/// 7. duplicate form-control end states are removed
pub fn preprocess(trace: &RawTrace, policy: &PreprocessPolicy) -> Timeline {
    preprocess_with_report(trace, policy).0
}

pub fn preprocess_with_report(
    trace: &RawTrace,
    policy: &PreprocessPolicy,
) -> (Timeline, StitchReport) {
    let mut report = StitchReport {
        clicks_in: trace.clicks.click_details.len(),
        inputs_in: trace.input_changes.len(),
        form_changes_in: trace.form_element_changes.len(),
        ..StitchReport::default()
    };

    let assertions: Vec<(CanonicalSelector, i64)> = if policy.channels.assertions {
        trace
            .assertions
            .iter()
            .map(|a| (CanonicalSelector::new(&a.selector), a.timestamp))
            .collect()
    } else {
        Vec::new()
    };

    let candidates: Vec<ClickCandidate> = trace
        .clicks
        .click_details
        .iter()
        .map(ClickCandidate::from_detail)
        .collect();
    let before = candidates.len();
    let candidates =
        clicks::suppress_near_assertions(candidates, &assertions, policy.assertion_window_ms);
    report.clicks_near_assertions = before - candidates.len();

    let before = candidates.len();
    let candidates = clicks::coalesce(candidates, policy.multi_click_window_ms);
    report.clicks_coalesced = before - candidates.len();

    let form_summary = if policy.channels.form_controls {
        forms::consolidate(&trace.form_element_changes)
    } else {
        FormSummary::default()
    };
    if policy.channels.form_controls {
        report.form_changes_folded = report.form_changes_in - form_summary.events.len();
    }

    let input_events = inputs::consolidate(
        &trace.input_changes,
        &form_summary,
        policy.form_overlap_window_ms,
        &mut report,
    );

    let before = candidates.len();
    let candidates =
        clicks::suppress_form_overlap(candidates, &form_summary, policy.form_overlap_window_ms);
    report.clicks_on_form_controls = before - candidates.len();

    let mut events: Vec<CanonicalEvent> = form_summary.events;
    events.extend(candidates.into_iter().map(ClickCandidate::into_event));
    events.extend(input_events);
    if policy.channels.assertions {
        events.extend(trace.assertions.iter().map(|assertion| {
            CanonicalEvent::new(
                CanonicalSelector::new(&assertion.selector),
                assertion.timestamp,
                EventPayload::Assertion {
                    assertion: assertion.kind,
                    expected: assertion.value.clone(),
                },
            )
        }));
    }

    let (events, duplicates) = merge::dedupe_form_controls(merge::merge(events));
    report.form_duplicates = duplicates;

    debug!(
        events = events.len(),
        clicks_near_assertions = report.clicks_near_assertions,
        clicks_coalesced = report.clicks_coalesced,
        clicks_on_form_controls = report.clicks_on_form_controls,
        inputs_unsettled = report.inputs_unsettled,
        form_duplicates = report.form_duplicates,
        "trace preprocessed"
    );

    (Timeline::from_sorted(events), report)
}
