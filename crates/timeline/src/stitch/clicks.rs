use std::collections::BTreeMap;

use playscribe_core_types::{ClickDetail, TimestampMs};
use playscribe_selector::{same_element, CanonicalSelector};

use super::forms::FormSummary;
use super::within_window;
use crate::model::{CanonicalEvent, EventPayload};

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct ClickCandidate {
    pub selector: CanonicalSelector,
    pub x: f64,
    pub y: f64,
    pub timestamp: TimestampMs,
}

impl ClickCandidate {
    pub fn from_detail(detail: &ClickDetail) -> Self {
        Self {
            selector: CanonicalSelector::new(&detail.selector),
            x: detail.x,
            y: detail.y,
            timestamp: detail.timestamp,
        }
    }

    pub fn into_event(self) -> CanonicalEvent {
        CanonicalEvent::new(
            self.selector,
            self.timestamp,
            EventPayload::Click {
                x: self.x,
                y: self.y,
            },
        )
    }
}

/// Drop clicks that land within `window_ms` of an assertion on what looks
/// like the same element. Matching is loose on purpose; see
/// [`same_element`].
pub(crate) fn suppress_near_assertions(
    clicks: Vec<ClickCandidate>,
    assertions: &[(CanonicalSelector, TimestampMs)],
    window_ms: i64,
) -> Vec<ClickCandidate> {
    if assertions.is_empty() {
        return clicks;
    }
    clicks
        .into_iter()
        .filter(|click| {
            !assertions.iter().any(|(selector, at)| {
                within_window(click.timestamp, *at, window_ms)
                    && same_element(click.selector.as_str(), selector.as_str())
            })
        })
        .collect()
}

/// Collapse runs of clicks on one selector. A click joins the run when it
/// follows the previous click on that selector by at most `window_ms`; only
/// the first click of each run survives. Output is ordered by timestamp.
pub(crate) fn coalesce(clicks: Vec<ClickCandidate>, window_ms: i64) -> Vec<ClickCandidate> {
    let mut grouped: BTreeMap<CanonicalSelector, Vec<ClickCandidate>> = BTreeMap::new();
    for click in clicks {
        grouped.entry(click.selector.clone()).or_default().push(click);
    }

    let mut kept = Vec::new();
    for (_, mut group) in grouped {
        group.sort_by_key(|click| click.timestamp);
        let mut previous: Option<TimestampMs> = None;
        for click in group {
            let starts_run = previous.map_or(true, |prev| click.timestamp.saturating_sub(prev) > window_ms);
            previous = Some(click.timestamp);
            if starts_run {
                kept.push(click);
            }
        }
    }
    kept.sort_by_key(|click| click.timestamp);
    kept
}

/// Drop clicks that are really part of a form-control change.
pub(crate) fn suppress_form_overlap(
    clicks: Vec<ClickCandidate>,
    forms: &FormSummary,
    window_ms: i64,
) -> Vec<ClickCandidate> {
    clicks
        .into_iter()
        .filter(|click| {
            !forms.owns(&click.selector) && !forms.overlaps(&click.selector, click.timestamp, window_ms)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn click(selector: &str, at: i64) -> ClickCandidate {
        ClickCandidate {
            selector: CanonicalSelector::new(selector),
            x: 0.0,
            y: 0.0,
            timestamp: at,
        }
    }

    fn stamps(clicks: &[ClickCandidate]) -> Vec<i64> {
        clicks.iter().map(|c| c.timestamp).collect()
    }

    #[test]
    fn coalesce_compares_against_previous_click() {
        let kept = coalesce(vec![click("#go", 0), click("#go", 150), click("#go", 600)], 300);
        assert_eq!(stamps(&kept), vec![0, 600]);

        let chained = coalesce(vec![click("#go", 0), click("#go", 250), click("#go", 500)], 300);
        assert_eq!(stamps(&chained), vec![0]);
    }

    #[test]
    fn coalesce_keeps_distinct_selectors() {
        let kept = coalesce(vec![click("#a", 0), click("#b", 100), click("#a", 200)], 300);
        let selectors: Vec<&str> = kept.iter().map(|c| c.selector.as_str()).collect();
        assert_eq!(selectors, vec!["#a", "#b"]);
    }

    #[test]
    fn assertion_window_is_exclusive() {
        let assertions = vec![(CanonicalSelector::new("#save"), 1_500)];
        let kept = suppress_near_assertions(
            vec![click("#save", 500), click("#save", 600), click("#cancel", 1_400)],
            &assertions,
            1_000,
        );
        assert_eq!(stamps(&kept), vec![500, 1_400]);
    }

    #[test]
    fn shared_leading_token_counts_as_same_element() {
        let assertions = vec![(CanonicalSelector::new("button.primary"), 100)];
        let kept = suppress_near_assertions(vec![click("button.secondary", 200)], &assertions, 1_000);
        assert!(kept.is_empty());
    }
}
